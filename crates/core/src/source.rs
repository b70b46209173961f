use siteconf_config::Config;
use siteconf_config::ContentItem;

use crate::Result;
use crate::SourcePath;
use crate::Status;

/// Paths the generator never treats as source, whatever `exclude` says.
pub const BUILTIN_EXCLUDES: &[&str] = &[
    ".git",
    ".bundle",
    ".jekyll-cache",
    ".sass-cache",
    "Gemfile",
    "Gemfile.lock",
    "node_modules",
    "vendor",
];

#[derive(Debug, Clone)]
pub struct Source {
    root: std::path::PathBuf,
    ignore: ignore::gitignore::Gitignore,
}

impl Source {
    pub fn new<'i>(
        root: &std::path::Path,
        ignores: impl IntoIterator<Item = &'i str>,
    ) -> Result<Self> {
        let mut ignore = ignore::gitignore::GitignoreBuilder::new(root);
        for line in ignores.into_iter() {
            ignore
                .add_line(None, line)
                .map_err(|e| Status::new("Invalid exclude entry").with_source(e))?;
        }
        let ignore = ignore
            .build()
            .map_err(|e| Status::new("Invalid exclude entry").with_source(e))?;

        let source = Self {
            root: root.to_owned(),
            ignore,
        };
        Ok(source)
    }

    /// The source tree of `config`, with the destination, built-in and `exclude` entries
    /// removed.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut ignores: Vec<String> = BUILTIN_EXCLUDES.iter().map(|s| (*s).to_owned()).collect();
        let destination = config.destination.as_str().trim_matches('/');
        if !destination.is_empty() && destination != "." {
            ignores.push(format!("/{destination}"));
        }
        ignores.extend(config.exclude.iter().cloned());
        Self::new(&config.source_dir(), ignores.iter().map(String::as_str))
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    pub fn includes_file(&self, file: &std::path::Path) -> bool {
        let is_dir = false;
        self.includes_path(file, is_dir)
    }

    pub fn includes_dir(&self, dir: &std::path::Path) -> bool {
        let is_dir = true;
        self.includes_path(dir, is_dir)
    }

    pub fn iter(&self) -> impl Iterator<Item = SourcePath> + '_ {
        walkdir::WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |e| self.includes_entry(e))
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(move |e| SourcePath::from_root(&self.root, e.path()))
    }

    /// Every content item, in file-name order.
    pub fn items<'s>(&'s self, config: &'s Config) -> impl Iterator<Item = ContentItem> + 's {
        self.iter()
            .filter_map(move |path| crate::classify(&path.rel_path, config))
    }

    fn includes_path(&self, path: &std::path::Path, is_dir: bool) -> bool {
        if path == self.root {
            return true;
        }

        let parent = path.parent();
        if let Some(parent) = parent {
            if parent.starts_with(&self.root) && !self.includes_path(parent, true) {
                return false;
            }
        }

        self.includes_path_leaf(path, is_dir)
    }

    fn includes_path_leaf(&self, path: &std::path::Path, is_dir: bool) -> bool {
        match self.ignore.matched(path, is_dir) {
            ignore::Match::None => true,
            ignore::Match::Ignore(glob) => {
                log::trace!("{:?}: excluded by {:?}", path, glob.original());
                false
            }
            ignore::Match::Whitelist(glob) => {
                log::trace!("{:?}: allowed by {:?}", path, glob.original());
                true
            }
        }
    }

    fn includes_entry(&self, entry: &walkdir::DirEntry) -> bool {
        let file = entry.path();

        // Assumption: The parent paths will have been checked before we even get to this point.
        let is_dir = entry.file_type().is_dir();
        self.includes_path_leaf(file, is_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! assert_includes_dir {
        ($root:expr, $ignores:expr, $test:expr, $included:expr) => {
            let root = $root;
            let ignores = $ignores.clone();
            let files = Source::new(std::path::Path::new(root), ignores).unwrap();
            assert_eq!(files.includes_dir(std::path::Path::new($test)), $included);
        };
    }
    macro_rules! assert_includes_file {
        ($root:expr, $ignores:expr, $test:expr, $included:expr) => {
            let root = $root;
            let ignores = $ignores.clone();
            let files = Source::new(std::path::Path::new(root), ignores).unwrap();
            assert_eq!(files.includes_file(std::path::Path::new($test)), $included);
        };
    }

    #[test]
    fn files_includes_root_dir() {
        assert_includes_dir!("/usr/blog/site", &[], "/usr/blog/site", true);

        assert_includes_dir!("./", &[], "./", true);
    }

    #[test]
    fn files_includes_child_dir() {
        assert_includes_dir!("/usr/blog/site", &[], "/usr/blog/site/child", true);

        assert_includes_dir!("./", &[], "./child", true);
    }

    #[test]
    fn files_includes_file() {
        assert_includes_file!("/usr/blog/site", &[], "/usr/blog/site/child.txt", true);

        assert_includes_file!("./", &[], "./child.txt", true);
    }

    #[test]
    fn files_excludes_named_file() {
        assert_includes_file!(
            "/usr/blog/site",
            &["README.md"],
            "/usr/blog/site/README.md",
            false
        );
    }

    #[test]
    fn files_excludes_glob() {
        assert_includes_file!(
            "/usr/blog/site",
            &["*.gemspec"],
            "/usr/blog/site/theme.gemspec",
            false
        );
    }

    #[test]
    fn files_excluded_by_parent() {
        assert_includes_file!(
            "/usr/blog/site",
            &["/tools"],
            "/usr/blog/site/tools/run.md",
            false
        );
    }

    #[test]
    fn files_not_excluded_by_parent_outside_root() {
        assert_includes_file!(
            "/tmp/tools/blog/site",
            &["tools"],
            "/tmp/tools/blog/site/child.md",
            true
        );
    }

    #[test]
    fn items_from_fixture() {
        let mut config: Config = serde_yaml::from_str(
            "collections:\n  tabs:\n    output: true\nexclude:\n  - tools\n  - README.md",
        )
        .unwrap();
        config.root = std::path::PathBuf::from("tests/fixtures/site");
        let source = Source::from_config(&config).unwrap();
        let items: Vec<_> = source
            .items(&config)
            .map(|item| (item.rel_path.to_string(), item.collection, item.draft))
            .collect();
        assert_eq!(
            items,
            vec![
                ("_drafts/wip.md".to_owned(), "posts".to_owned(), true),
                (
                    "_posts/2023-01-07-flutter-form-validation.md".to_owned(),
                    "posts".to_owned(),
                    false
                ),
                (
                    "_posts/2023-02-11-dart-pattern-matching.md".to_owned(),
                    "posts".to_owned(),
                    false
                ),
                ("_tabs/about.md".to_owned(), "tabs".to_owned(), false),
                ("index.html".to_owned(), "pages".to_owned(), false),
            ]
        );
    }
}
