//! Sitemap generation - ties route providers, flattening, rendering and output together.

use crate::{
    config::{Config, ConfigError},
    filter::RouteFilter,
    flatten::{FlattenError, Flattener, RoutePredicate},
    provider::{discover_route_file, RouteError, RouteFile, RouteProvider},
    sitemap::SitemapSerializer,
};
use routemap_types::RouteNode;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Route error: {0}")]
    Routes(#[from] RouteError),

    #[error("Flatten error: {0}")]
    Flatten(#[from] FlattenError),

    #[error("No route file found: set paths.routes or place {file_name} under {output:?}")]
    NoRoutes { file_name: String, output: PathBuf },

    #[error("Failed to write sitemap to {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Outcome of a successful [`SitemapGenerator::write`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateReport {
    pub outfile: PathBuf,
    pub url_count: usize,
}

/// Main sitemap generator
pub struct SitemapGenerator {
    config: Config,
    filter: RouteFilter,
    custom_filter: Option<RoutePredicate>,
}

impl SitemapGenerator {
    pub fn new(config: Config) -> Result<Self, GenerateError> {
        let filter = config.route_filter()?;
        Ok(Self {
            config,
            filter,
            custom_filter: None,
        })
    }

    /// Add a caller-supplied inclusion predicate on top of the configured excludes.
    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&RouteNode) -> bool + Send + Sync + 'static,
    {
        self.custom_filter = Some(Arc::new(filter));
        self
    }

    /// Flattener configured from the app URL, depth bound and filters
    pub fn flattener(&self) -> Flattener {
        let mut flattener = Flattener::new().with_max_depth(self.config.max_depth);
        if let Some(app_url) = self.config.app_url() {
            flattener = flattener.with_prefix(app_url);
        }

        if !self.filter.is_empty() || self.custom_filter.is_some() {
            let filter = self.filter.clone();
            let custom = self.custom_filter.clone();
            flattener = flattener.with_filter(move |node| {
                filter.allows(node) && custom.as_ref().map_or(true, |include| include(node))
            });
        }

        flattener
    }

    pub fn serializer(&self) -> SitemapSerializer {
        SitemapSerializer::new().with_escaping(self.config.escape_xml)
    }

    /// Pick the route source: the configured route file, else discovery under the output dir
    pub fn resolve_provider(&self) -> Result<RouteFile, GenerateError> {
        if let Some(path) = self.config.routes_file() {
            tracing::debug!("Using configured route file {:?}", path);
            return Ok(RouteFile::new(path));
        }

        let output = self.config.output_dir();
        discover_route_file(&output, &self.config.route_file_name)
            .map(RouteFile::new)
            .ok_or_else(|| GenerateError::NoRoutes {
                file_name: self.config.route_file_name.clone(),
                output,
            })
    }

    /// Sorted, unique URLs for the provider's route tree
    pub fn urls(&self, provider: &dyn RouteProvider) -> Result<Vec<String>, GenerateError> {
        tracing::debug!("Loading routes from {}", provider.describe());
        let routes = provider.routes()?;
        let urls = self.flattener().flatten(&routes)?;
        tracing::info!("Resolved {} URLs from {} top-level routes", urls.len(), routes.len());
        Ok(urls)
    }

    /// Render the sitemap document without touching disk
    pub fn render(&self, provider: &dyn RouteProvider) -> Result<String, GenerateError> {
        let urls = self.urls(provider)?;
        Ok(self.serializer().serialize(&urls))
    }

    /// Render and write the sitemap to the configured outfile
    pub fn write(&self, provider: &dyn RouteProvider) -> Result<GenerateReport, GenerateError> {
        let urls = self.urls(provider)?;
        let xml = self.serializer().serialize(&urls);

        let outfile = self.config.outfile();
        if let Some(parent) = outfile.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| GenerateError::Write {
                path: outfile.clone(),
                source,
            })?;
        }
        fs::write(&outfile, xml).map_err(|source| GenerateError::Write {
            path: outfile.clone(),
            source,
        })?;

        tracing::info!("Generated {:?} with {} URLs", outfile, urls.len());

        Ok(GenerateReport {
            outfile,
            url_count: urls.len(),
        })
    }
}
