use relative_path::RelativePath;
use siteconf_config::Config;
use siteconf_config::ContentItem;

/// Extensions of files that carry front matter and get rendered.
pub const CONTENT_EXTENSIONS: &[&str] = &["md", "markdown", "html"];

/// Decide whether `rel_path` is a content item and which collection owns it.
///
/// `_posts/` and `_drafts/` hold posts, `_<name>/` holds the items of a declared collection,
/// any other `_`-prefixed entry belongs to the theme (layouts, includes, data) and is not
/// content.  Hidden files never are.
pub fn classify(rel_path: &RelativePath, config: &Config) -> Option<ContentItem> {
    let ext = rel_path.extension()?;
    if !CONTENT_EXTENSIONS.contains(&ext) {
        return None;
    }

    let segments: Vec<&str> = rel_path.as_str().split('/').collect();
    if segments.iter().any(|s| s.starts_with('.')) {
        return None;
    }
    let nested = segments.len() > 1;

    let item = match segments[0].strip_prefix('_') {
        Some("posts") if nested => ContentItem::new(rel_path.to_owned(), siteconf_config::POSTS),
        Some("drafts") if nested => ContentItem::draft(rel_path.to_owned()),
        Some(name) if nested && config.collections.contains_key(name) => {
            ContentItem::new(rel_path.to_owned(), name)
        }
        Some(_) => {
            log::trace!("{rel_path}: not content");
            return None;
        }
        None => ContentItem::new(rel_path.to_owned(), siteconf_config::PAGES),
    };
    Some(item)
}
