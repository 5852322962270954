//! Build command implementation.

use super::{absolute, SourceArgs};
use anyhow::{Context, Result};
use routemap_core::SitemapGenerator;
use std::path::Path;

/// Generate sitemap.xml and write it to disk
pub fn build_sitemap(config_path: &Path, source: &SourceArgs, outfile: Option<&Path>) -> Result<()> {
    let mut config = source.load_config(config_path)?;

    if !config.enable_sitemap {
        tracing::info!("Sitemap disabled; skipping sitemap.xml");
        return Ok(());
    }

    if let Some(outfile) = outfile {
        config.paths.outfile = Some(absolute(outfile)?);
    }

    let generator = SitemapGenerator::new(config).context("Invalid sitemap configuration")?;
    let provider = source.provider(&generator)?;
    let report = generator
        .write(&provider)
        .context("Error generating sitemap")?;

    tracing::info!("✓ Wrote {} URLs", report.url_count);
    tracing::info!("✓ Output written to {:?}", report.outfile);
    Ok(())
}
