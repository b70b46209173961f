use std::cmp::Reverse;
use std::collections::BTreeMap;

use anyhow::Context as _;
use relative_path::RelativePathBuf;
use siteconf_config::Config;
use siteconf_config::ContentItem;
use siteconf_config::Document;
use siteconf_config::Frontmatter;
use siteconf_core::Source;

use crate::error::Result;
use crate::pagination::{self, Paginator};
use crate::permalink;

/// Everything known about one content item once the configuration has been applied.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ResolvedItem {
    pub collection: String,
    pub draft: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Where the rendered item lands, relative to `destination`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<RelativePathBuf>,
    /// What the `defaults` scopes contribute.
    pub defaults: Frontmatter,
    /// The item's header layered over `defaults`.
    pub front: Frontmatter,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct ResolvedSite {
    pub items: BTreeMap<RelativePathBuf, ResolvedItem>,
    /// Published posts, newest first; [`Paginator::items`] indexes into this.
    pub posts: Vec<RelativePathBuf>,
    pub pagination: Vec<Paginator>,
}

/// Validate `config` and resolve every content item under its source directory.
pub fn resolve(config: &Config) -> Result<ResolvedSite> {
    config.validate().context("invalid configuration")?;
    let per_page = config.per_page().context("invalid configuration")?;

    let source = Source::from_config(config)?;
    let items: Vec<ContentItem> = source.items(config).collect();
    log::debug!(
        "Found {} content items in {}",
        items.len(),
        source.root().display()
    );

    for idx in config.defaults.unmatched(&items) {
        let scope = &config.defaults.rules()[idx].scope;
        log::warn!(
            "`defaults[{idx}]` scope (path {:?}{}) matches no content item",
            scope.path,
            scope
                .kind
                .as_deref()
                .map(|kind| format!(", type `{kind}`"))
                .unwrap_or_default()
        );
    }

    let mut all_defaults = config.defaults.resolve_all(&items);
    let mut resolved = BTreeMap::new();
    let mut posts = Vec::new();
    for item in items {
        let defaults = all_defaults.remove(&item.rel_path).unwrap_or_default();
        let header = read_header(&source, &item)?;
        let front = header.merge(&defaults);

        let url = permalink::item_url(config, &item, &front)?;
        let output = url.as_deref().map(permalink::format_url_as_file);
        log::trace!("{}: {:?}", item.rel_path, url);

        if item.collection == siteconf_config::POSTS && !item.draft {
            posts.push((permalink::item_date(&item, &front), item.rel_path.clone()));
        }

        let ContentItem {
            rel_path,
            collection,
            draft,
            ..
        } = item;
        resolved.insert(
            rel_path,
            ResolvedItem {
                collection,
                draft,
                url,
                output,
                defaults,
                front,
            },
        );
    }

    posts.sort_by(|(a_date, a_path), (b_date, b_path)| {
        (Reverse(a_date), a_path).cmp(&(Reverse(b_date), b_path))
    });
    let posts: Vec<_> = posts.into_iter().map(|(_, rel_path)| rel_path).collect();
    let pagination = pagination::paginate(posts.len(), per_page, &config.paginate_path);

    Ok(ResolvedSite {
        items: resolved,
        posts,
        pagination,
    })
}

fn read_header(source: &Source, item: &ContentItem) -> Result<Frontmatter> {
    let path = item.rel_path.to_path(source.root());
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let document =
        Document::parse(&content).with_context(|| format!("`{}`: bad header", item.rel_path))?;
    let (front, _) = document.into_parts();
    Ok(front)
}

#[cfg(test)]
mod test {
    use super::*;

    fn fixture_config() -> Config {
        Config::from_file("tests/fixtures/blog/_config.yml").unwrap()
    }

    fn item<'s>(site: &'s ResolvedSite, rel_path: &str) -> &'s ResolvedItem {
        &site.items[relative_path::RelativePath::new(rel_path)]
    }

    #[test]
    fn resolve_fixture() {
        let site = resolve(&fixture_config()).unwrap();
        let paths: Vec<_> = site.items.keys().map(|p| p.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "_drafts/wip.md",
                "_posts/2023-01-07-flutter-form-validation.md",
                "_posts/2023-02-11-dart-pattern-matching.md",
                "_tabs/about.md",
                "index.html",
            ]
        );
    }

    #[test]
    fn resolve_draft_gets_layered_defaults() {
        let site = resolve(&fixture_config()).unwrap();
        let draft = item(&site, "_drafts/wip.md");
        assert!(draft.draft);
        assert_eq!(draft.defaults.layout.as_deref(), Some("post"));
        assert_eq!(draft.defaults.comments, Some(false));
        assert_eq!(draft.front.title.as_deref(), Some("Work in progress"));
    }

    #[test]
    fn resolve_header_overrides_defaults() {
        let site = resolve(&fixture_config()).unwrap();
        let post = item(&site, "_posts/2023-02-11-dart-pattern-matching.md");
        assert_eq!(post.defaults.comments, Some(true));
        assert_eq!(post.front.comments, Some(false));
        assert_eq!(post.front.layout.as_deref(), Some("post"));
    }

    #[test]
    fn resolve_urls() {
        let site = resolve(&fixture_config()).unwrap();
        let post = item(&site, "_posts/2023-01-07-flutter-form-validation.md");
        assert_eq!(post.url.as_deref(), Some("/posts/flutter-form-validation/"));
        assert_eq!(
            post.output,
            Some(RelativePathBuf::from("posts/flutter-form-validation/index.html"))
        );
        let tab = item(&site, "_tabs/about.md");
        assert_eq!(tab.url.as_deref(), Some("/tabs/about/"));
        let index = item(&site, "index.html");
        assert_eq!(index.url.as_deref(), Some("/index.html"));
    }

    #[test]
    fn resolve_paginates_published_posts_newest_first() {
        let site = resolve(&fixture_config()).unwrap();
        assert_eq!(
            site.posts,
            vec![
                RelativePathBuf::from("_posts/2023-02-11-dart-pattern-matching.md"),
                RelativePathBuf::from("_posts/2023-01-07-flutter-form-validation.md"),
            ]
        );
        assert_eq!(site.pagination.len(), 1);
        assert_eq!(site.pagination[0].items, 0..2);
    }

    #[test]
    fn resolve_rejects_invalid_config() {
        let mut config = fixture_config();
        config.paginate = 0;
        let err = resolve(&config).unwrap_err();
        assert_eq!(err.to_string(), "invalid configuration");
    }

    #[test]
    fn resolve_unmatched_scope_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("_posts")).unwrap();
        std::fs::write(
            dir.path().join("_posts/2024-01-01-hello.md"),
            "---\ntitle: Hello\n---\nHello\n",
        )
        .unwrap();
        let mut config: Config = serde_yaml::from_str(
            "defaults:\n  - scope:\n      path: _postz\n    values:\n      layout: post",
        )
        .unwrap();
        config.root = dir.path().to_owned();

        let site = resolve(&config).unwrap();
        let post = item(&site, "_posts/2024-01-01-hello.md");
        assert!(post.defaults.is_empty());
        assert_eq!(post.front.layout, None);
    }

    #[test]
    fn resolve_empty_source() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.root = dir.path().to_owned();
        let site = resolve(&config).unwrap();
        assert!(site.items.is_empty());
        assert_eq!(site.pagination.len(), 1);
        assert!(site.pagination[0].is_empty());
    }
}
