//! Model of a Jekyll-style `_config.yml` and the `defaults` scopes that give every content
//! item its effective front matter.

mod collection;
mod comments;
mod config;
mod defaults;
mod document;
mod frontmatter;
mod options;
mod permalink;
mod site;
mod validate;

pub mod path;

pub use self::collection::*;
pub use self::comments::*;
pub use self::config::*;
pub use self::defaults::*;
pub use self::document::*;
pub use self::frontmatter::*;
pub use self::options::*;
pub use self::permalink::*;
pub use self::site::*;
pub use self::validate::*;

type Status = status::Status;
type Result<T, E = Status> = std::result::Result<T, E>;
