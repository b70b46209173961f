use std::env;
use std::path;

use anyhow::Context as _;

use crate::error::Result;

#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct ConfigArgs {
    /// Config file to use [default: _config.yml]
    #[arg(short, long, value_name = "FILE")]
    config: Option<path::PathBuf>,

    /// Site source directory [default: the config file's directory]
    #[arg(short, long, value_name = "DIR")]
    source: Option<path::PathBuf>,
}

impl ConfigArgs {
    pub(crate) fn load_config(&self) -> Result<siteconf::Config> {
        let mut config = if let Some(config_path) = self.config.as_deref() {
            siteconf::Config::from_file(config_path).with_context(|| {
                format!("Error reading config file {}", config_path.display())
            })?
        } else {
            let cwd = env::current_dir().context("Could not read the current directory")?;
            siteconf::Config::from_cwd(cwd)?
        };

        if let Some(source) = self.source.as_deref() {
            config.abs_source = Some(source.to_owned());
        }
        log::debug!("Source directory: {}", config.source_dir().display());

        Ok(config)
    }
}
