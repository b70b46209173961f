#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::print_stderr)]
#![warn(clippy::print_stdout)]

pub mod error;
pub mod pagination;
pub mod permalink;
pub mod site;

pub use crate::error::Error;
pub use crate::pagination::{Paginator, paginate};
pub use crate::permalink::{explode_permalink, format_url_as_file, item_url};
pub use crate::site::{ResolvedItem, ResolvedSite, resolve};

pub use siteconf_config::Config;
