//! Print the flattened URL list without writing a sitemap.

use super::SourceArgs;
use anyhow::{Context, Result};
use routemap_core::SitemapGenerator;
use std::path::Path;

pub fn list_urls(config_path: &Path, source: &SourceArgs, json: bool) -> Result<()> {
    let config = source.load_config(config_path)?;
    let generator = SitemapGenerator::new(config).context("Invalid sitemap configuration")?;
    let provider = source.provider(&generator)?;
    let urls = generator
        .urls(&provider)
        .context("Failed to flatten routes")?;

    if json {
        let payload = serde_json::to_string_pretty(&urls)?;
        println!("{}", payload);
    } else {
        for url in &urls {
            println!("{}", url);
        }
    }

    Ok(())
}
