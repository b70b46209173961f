use std::borrow::Cow;
use std::collections::BTreeMap;

use anyhow::Context as _;
use relative_path::RelativePathBuf;
use siteconf_config::Config;
use siteconf_config::ContentItem;
use siteconf_config::Frontmatter;
use siteconf_config::Permalink;
use siteconf_config::PermalinkStyle;
use siteconf_config::path;

use crate::error::Result;

const OUTPUT_EXT: &str = ".html";

/// Values for every placeholder an item can fill.
pub fn permalink_vars(item: &ContentItem, front: &Frontmatter) -> BTreeMap<&'static str, String> {
    let mut vars = BTreeMap::new();

    let rel_path = item.rel_path.as_str();
    let (without_ext, _) = path::split_ext(rel_path);
    let in_collection = if item.collection == siteconf_config::PAGES {
        without_ext
    } else {
        without_ext
            .split_once('/')
            .map(|(_, rest)| rest)
            .unwrap_or(without_ext)
    };
    let name = item.rel_path.file_stem().unwrap_or_default();
    let (_, file_title) = path::parse_file_stem(name);

    let slug = front
        .data
        .get("slug")
        .and_then(serde_yaml::Value::as_str)
        .map(path::slugify)
        .unwrap_or_else(|| path::slugify(&file_title));

    vars.insert("collection", item.collection.clone());
    vars.insert("path", in_collection.to_owned());
    vars.insert("name", name.to_owned());
    vars.insert("title", slug.clone());
    vars.insert("slug", slug);
    vars.insert("output_ext", OUTPUT_EXT.to_owned());

    let categories = front
        .categories
        .iter()
        .flatten()
        .map(path::slugify)
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join("/");
    vars.insert("categories", categories);

    if let Some(date) = item_date(item, front) {
        let month = u8::from(date.month());
        vars.insert("year", format!("{:04}", date.year()));
        vars.insert("short_year", format!("{:02}", date.year().rem_euclid(100)));
        vars.insert("month", format!("{month:02}"));
        vars.insert("i_month", month.to_string());
        vars.insert("day", format!("{:02}", date.day()));
        vars.insert("i_day", date.day().to_string());
        vars.insert("y_day", format!("{:03}", date.ordinal()));
    }

    vars
}

/// Publication date from the header, falling back to a `YYYY-MM-DD-` file name prefix.
pub fn item_date(item: &ContentItem, front: &Frontmatter) -> Option<time::Date> {
    front.date.as_deref().and_then(path::parse_date).or_else(|| {
        let name = item.rel_path.file_stem().unwrap_or_default();
        path::parse_file_stem(name).0
    })
}

/// Expand `template` into a URL path.
pub fn explode_permalink<S: AsRef<str>>(permalink: S, vars: &BTreeMap<&str, String>) -> String {
    explode_permalink_string(permalink.as_ref(), vars)
}

fn explode_permalink_string(permalink: &str, vars: &BTreeMap<&str, String>) -> String {
    let mut p = siteconf_config::substitute(permalink, |name| {
        vars.get(name).map(|v| Cow::Borrowed(v.as_str()))
    });

    // Handle the user doing windows-style
    p = p.replace('\\', "/");

    // Handle cases where substitutions were blank
    while p.contains("//") {
        p = p.replace("//", "/");
    }

    if !p.starts_with('/') {
        p.insert(0, '/');
    }

    p
}

/// Where a URL lands on disk, relative to the destination.
pub fn format_url_as_file<S: AsRef<str>>(permalink: S) -> RelativePathBuf {
    format_url_as_file_str(permalink.as_ref())
}

fn format_url_as_file_str(permalink: &str) -> RelativePathBuf {
    let trimmed = permalink.trim_matches('/');
    let mut path_buf = RelativePathBuf::from(trimmed);

    // explode the url if no extension was specified
    if permalink.ends_with('/') || path_buf.extension().is_none() {
        path_buf.push("index.html");
    }

    path_buf
}

/// The template an item's URL comes from, most specific first: its own front matter (which
/// already carries `defaults`), its collection, then the site.
///
/// `None` when the item is not written out.
pub fn permalink_template(
    config: &Config,
    item: &ContentItem,
    front: &Frontmatter,
) -> Option<Permalink> {
    if let Some(permalink) = &front.permalink {
        return Some(permalink.clone());
    }

    if item.collection == siteconf_config::PAGES {
        return Some(Permalink::new("/:path:output_ext"));
    }

    let collection = config.collection(&item.collection)?;
    if let Some(permalink) = collection.permalink {
        return Some(permalink);
    }
    if item.collection == siteconf_config::POSTS {
        let site = config
            .permalink
            .clone()
            .unwrap_or_else(|| Permalink::new(PermalinkStyle::Date.template()));
        return Some(site);
    }
    collection
        .output
        .then(|| Permalink::new("/:collection/:path:output_ext"))
}

/// The URL of `item`, or `None` if its collection is not written out.
pub fn item_url(config: &Config, item: &ContentItem, front: &Frontmatter) -> Result<Option<String>> {
    let Some(permalink) = permalink_template(config, item, front) else {
        return Ok(None);
    };
    let template = permalink
        .template()
        .with_context(|| format!("`{}`: invalid `permalink`", item.rel_path))?;
    let vars = permalink_vars(item, front);
    Ok(Some(explode_permalink(template, &vars)))
}
