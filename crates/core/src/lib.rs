//! Walks a site's source tree and turns files into [`siteconf_config::ContentItem`]s.

mod classify;
mod fs;
mod source;

pub use classify::*;
pub use fs::*;
pub use source::*;

type Status = status::Status;
type Result<T, E = Status> = std::result::Result<T, E>;
