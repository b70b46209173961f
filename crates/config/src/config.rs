use std::collections::BTreeMap;
use std::fmt;
use std::path;

use super::*;

pub const CONFIG_FILE: &str = "_config.yml";

const DEFAULT_PAGINATE: i64 = 10;
const DEFAULT_PAGINATE_PATH: &str = "/page:num/";

/// The site configuration document.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub struct Config {
    #[serde(skip)]
    pub root: path::PathBuf,
    pub source: relative_path::RelativePathBuf,
    pub destination: relative_path::RelativePathBuf,
    #[serde(skip)]
    pub abs_source: Option<path::PathBuf>,

    pub lang: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub baseurl: String,

    pub github: Account,
    pub twitter: Account,
    pub social: Social,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_mode: Option<ThemeMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img_cdn: Option<String>,

    pub comments: Comments,

    pub paginate: i64,
    pub paginate_path: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub permalink: Option<Permalink>,
    pub collections: BTreeMap<String, Collection>,
    pub defaults: Defaults,

    pub markdown: String,
    pub highlighter: String,
    pub kramdown: Kramdown,
    pub compress_html: CompressHtml,
    pub exclude: Vec<String>,

    /// Keys this crate does not interpret, kept for the generator and theme.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            root: Default::default(),
            source: relative_path::RelativePathBuf::from("."),
            destination: relative_path::RelativePathBuf::from("_site"),
            abs_source: Default::default(),
            lang: "en".to_owned(),
            timezone: Default::default(),
            title: Default::default(),
            tagline: Default::default(),
            description: Default::default(),
            url: Default::default(),
            baseurl: Default::default(),
            github: Default::default(),
            twitter: Default::default(),
            social: Default::default(),
            theme_mode: Default::default(),
            avatar: Default::default(),
            img_cdn: Default::default(),
            comments: Default::default(),
            paginate: DEFAULT_PAGINATE,
            paginate_path: DEFAULT_PAGINATE_PATH.to_owned(),
            permalink: Default::default(),
            collections: Default::default(),
            defaults: Default::default(),
            markdown: "kramdown".to_owned(),
            highlighter: "rouge".to_owned(),
            kramdown: Default::default(),
            compress_html: Default::default(),
            exclude: Default::default(),
            extra: Default::default(),
        }
    }
}

impl Config {
    pub fn from_file<P: Into<path::PathBuf>>(path: P) -> Result<Config> {
        Self::from_file_internal(path.into())
    }

    fn from_file_internal(path: path::PathBuf) -> Result<Config> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Status::new("Failed to read config")
                .with_source(e)
                .context_with(|c| c.insert("Path", path.display().to_string()))
        })?;

        let mut config = Self::from_str_internal(&content).map_err(|e| {
            Status::new("Failed to parse config")
                .with_source(e)
                .context_with(|c| c.insert("Path", path.display().to_string()))
        })?;

        let mut root = path;
        root.pop(); // Remove filename
        if root == path::Path::new("") {
            root = path::Path::new(".").to_owned();
        }
        config.root = root;

        Ok(config)
    }

    fn from_str_internal(content: &str) -> std::result::Result<Config, serde_yaml::Error> {
        if content.trim().is_empty() {
            Ok(Config::default())
        } else {
            serde_yaml::from_str(content)
        }
    }

    pub fn from_cwd<P: Into<path::PathBuf>>(cwd: P) -> Result<Config> {
        Self::from_cwd_internal(cwd.into())
    }

    fn from_cwd_internal(cwd: path::PathBuf) -> Result<Config> {
        let file_path = find_project_file(&cwd, CONFIG_FILE);
        let config = file_path
            .map(|p| {
                log::debug!("Using config file `{}`", p.display());
                Self::from_file(&p)
            })
            .unwrap_or_else(|| {
                log::warn!("No {CONFIG_FILE} file found in current directory, using default config.");
                let config = Config {
                    root: cwd,
                    ..Default::default()
                };
                Ok(config)
            })?;
        Ok(config)
    }

    /// Absolute (or cwd-relative) directory holding the content.
    pub fn source_dir(&self) -> path::PathBuf {
        self.abs_source
            .clone()
            .unwrap_or_else(|| self.source.to_logical_path(&self.root))
    }

    pub fn color_scheme(&self) -> ColorScheme {
        ColorScheme::from_theme_mode(self.theme_mode)
    }

    /// Every name a `defaults` scope may use as its `type`.
    pub fn collection_names(&self) -> impl Iterator<Item = &str> {
        [collection::POSTS, collection::PAGES, collection::DRAFTS]
            .into_iter()
            .chain(
                self.collections
                    .keys()
                    .map(String::as_str)
                    .filter(|name| !matches!(*name, collection::POSTS | collection::PAGES)),
            )
    }

    /// Settings for `name`, including the implicit `posts` collection.
    pub fn collection(&self, name: &str) -> Option<Collection> {
        self.collections.get(name).cloned().or_else(|| {
            (name == collection::POSTS).then(|| Collection {
                output: true,
                ..Default::default()
            })
        })
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let converted = serde_yaml::to_string(self).map_err(|_| fmt::Error)?;
        let converted = converted.strip_prefix("---\n").unwrap_or(&converted);
        write!(f, "{converted}")
    }
}

fn find_project_file<P: Into<path::PathBuf>>(dir: P, name: &str) -> Option<path::PathBuf> {
    find_project_file_internal(dir.into(), name)
}

fn find_project_file_internal(dir: path::PathBuf, name: &str) -> Option<path::PathBuf> {
    let mut file_path = dir;
    file_path.push(name);
    while !file_path.exists() {
        file_path.pop(); // filename
        let hit_bottom = !file_path.pop();
        if hit_bottom {
            return None;
        }
        file_path.push(name);
    }
    Some(file_path)
}
