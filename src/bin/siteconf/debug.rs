use crate::args;
use crate::error::Result;

/// Print site debug information
#[derive(Clone, Debug, PartialEq, Eq, clap::Subcommand)]
pub(crate) enum DebugCommands {
    /// Prints post-processed config
    Config {
        #[command(flatten, next_help_heading = "Config")]
        config: args::ConfigArgs,
    },

    /// Print content items, optionally only those of one collection
    Files {
        /// Collection name
        collection: Option<String>,

        #[command(flatten, next_help_heading = "Config")]
        config: args::ConfigArgs,
    },

    /// Print how published posts are split across index pages
    Paginate {
        #[command(flatten, next_help_heading = "Config")]
        config: args::ConfigArgs,
    },
}

impl DebugCommands {
    pub(crate) fn run(&self) -> Result<()> {
        match self {
            Self::Config { config } => {
                let config = config.load_config()?;
                print!("{config}");
            }
            Self::Files { collection, config } => {
                let config = config.load_config()?;
                if let Some(name) = collection.as_deref() {
                    if !config.collection_names().any(|n| n == name) {
                        anyhow::bail!("Collection `{name}` is not defined");
                    }
                }

                let source = siteconf_core::Source::from_config(&config)?;
                for item in source.items(&config) {
                    if collection.as_deref().is_none_or(|name| item.is_type(name)) {
                        println!("{}", item.rel_path);
                    }
                }
            }
            Self::Paginate { config } => {
                let config = config.load_config()?;
                let site = siteconf::resolve(&config)?;
                for page in &site.pagination {
                    println!(
                        "{} ({}/{}): {} posts",
                        page.index_permalink,
                        page.index,
                        page.total_indexes,
                        page.len()
                    );
                    for rel_path in &site.posts[page.items.clone()] {
                        println!("  {rel_path}");
                    }
                }
            }
        }

        Ok(())
    }
}
