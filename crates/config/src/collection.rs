use super::*;

pub const POSTS: &str = "posts";
pub const PAGES: &str = "pages";
pub const DRAFTS: &str = "drafts";

/// A `collections.<name>` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub struct Collection {
    pub output: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permalink: Option<Permalink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
}

/// A file that will be rendered, identified by where it lives and which collection owns it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[non_exhaustive]
pub struct ContentItem {
    pub rel_path: relative_path::RelativePathBuf,
    pub collection: String,
    pub draft: bool,
}

impl ContentItem {
    pub fn new(
        rel_path: impl Into<relative_path::RelativePathBuf>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            rel_path: rel_path.into(),
            collection: collection.into(),
            draft: false,
        }
    }

    pub fn draft(rel_path: impl Into<relative_path::RelativePathBuf>) -> Self {
        Self {
            rel_path: rel_path.into(),
            collection: POSTS.to_owned(),
            draft: true,
        }
    }

    /// Whether a `type` filter of a defaults scope selects this item.
    pub fn is_type(&self, kind: &str) -> bool {
        self.collection == kind || (self.draft && kind == DRAFTS)
    }
}
