//! CLI command implementations.

pub mod build;
pub mod init;
pub mod list;

pub use build::build_sitemap;
pub use init::init_project;
pub use list::list_urls;

use anyhow::{Context, Result};
use clap::Args;
use routemap_core::{Config, RouteFile, SitemapGenerator};
use std::path::{Path, PathBuf};

/// Route source flags shared by `build` and `list`
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Route document (JSON or YAML); skips discovery under the output dir
    #[arg(long)]
    pub routes: Option<PathBuf>,

    /// Application URL prepended to every route
    #[arg(long)]
    pub app_url: Option<String>,
}

impl SourceArgs {
    /// Load the config file and apply flag overrides.
    ///
    /// A missing config file is tolerated when `--routes` names the route document.
    pub fn load_config(&self, config_path: &Path) -> Result<Config> {
        let mut config = if config_path.exists() || self.routes.is_none() {
            tracing::debug!("Loading config from {:?}", config_path);
            Config::from_file(config_path).context("Failed to load configuration")?
        } else {
            tracing::debug!("No config at {:?}; using defaults", config_path);
            Config::default()
        };

        if let Some(app_url) = &self.app_url {
            config.app_url = Some(app_url.clone());
        }

        Ok(config)
    }

    /// Route source: `--routes` if given, otherwise whatever the config resolves to
    pub fn provider(&self, generator: &SitemapGenerator) -> Result<RouteFile> {
        match &self.routes {
            Some(path) => Ok(RouteFile::new(absolute(path)?)),
            None => generator
                .resolve_provider()
                .context("Failed to locate route table"),
        }
    }
}

/// Anchor CLI paths at the working directory rather than the config file.
pub(crate) fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        Ok(cwd.join(path))
    }
}
