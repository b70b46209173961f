use std::collections::BTreeMap;

use relative_path::RelativePath;

use crate::args;
use crate::error::Result;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum Format {
    #[default]
    Yaml,
    Json,
}

/// Print the effective front matter of every content item
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct ResolveArgs {
    /// Only print this item (path relative to the source directory)
    item: Option<String>,

    #[arg(long, value_enum, default_value_t)]
    format: Format,

    /// Only print what the `defaults` scopes contribute
    #[arg(long)]
    defaults_only: bool,

    #[command(flatten, next_help_heading = "Config")]
    config: args::ConfigArgs,
}

impl ResolveArgs {
    pub(crate) fn run(&self) -> Result<()> {
        let config = self.config.load_config()?;
        let site = siteconf::resolve(&config)?;

        let mut items: BTreeMap<&RelativePath, &siteconf::ResolvedItem> = site
            .items
            .iter()
            .map(|(rel_path, item)| (rel_path.as_relative_path(), item))
            .collect();
        if let Some(only) = self.item.as_deref() {
            let only = RelativePath::new(only);
            items.retain(|rel_path, _| *rel_path == only);
            if items.is_empty() {
                anyhow::bail!("`{only}` is not a content item");
            }
        }

        if self.defaults_only {
            let defaults: BTreeMap<_, _> = items
                .into_iter()
                .map(|(rel_path, item)| (rel_path, &item.defaults))
                .collect();
            print(&defaults, self.format)
        } else {
            print(&items, self.format)
        }
    }
}

fn print<T: serde::Serialize>(value: &T, format: Format) -> Result<()> {
    let rendered = match format {
        Format::Yaml => serde_yaml::to_string(value)?,
        Format::Json => serde_json::to_string_pretty(value)? + "\n",
    };
    print!("{rendered}");
    Ok(())
}
