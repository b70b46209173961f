use crate::args;
use crate::error::Result;

/// Load, validate and resolve the site, reporting the first problem found
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct CheckArgs {
    #[command(flatten, next_help_heading = "Config")]
    config: args::ConfigArgs,
}

impl CheckArgs {
    pub(crate) fn run(&self) -> Result<()> {
        let config = self.config.load_config()?;
        let site = siteconf::resolve(&config)?;

        let drafts = site.items.values().filter(|item| item.draft).count();
        log::info!(
            "{} content items ({} posts, {} drafts), {} index pages",
            site.items.len(),
            site.posts.len(),
            drafts,
            site.pagination.len()
        );
        log::info!("Configuration is valid");

        Ok(())
    }
}
