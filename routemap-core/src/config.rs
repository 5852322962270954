//! Configuration parsing and management.

use crate::filter::{FilterError, RouteFilter};
use crate::flatten::DEFAULT_MAX_DEPTH;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid exclude pattern: {0}")]
    InvalidPattern(#[from] FilterError),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Main configuration struct matching the routemap.yml schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Deployed application URL, prepended to every route
    #[serde(default)]
    pub app_url: Option<String>,

    #[serde(default)]
    pub paths: PathsConfig,

    /// File name searched for under the output directory when `paths.routes` is unset
    #[serde(default = "default_route_file_name")]
    pub route_file_name: String,

    /// Regexes matched against each route's own path
    #[serde(default)]
    pub exclude: Vec<String>,

    #[serde(default)]
    pub escape_xml: bool,

    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    #[serde(default = "default_true")]
    pub enable_sitemap: bool,

    // Internal: path to config file (for relative path resolution)
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

fn default_route_file_name() -> String {
    String::from("routes.json")
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_output")]
    pub output: PathBuf,

    #[serde(default)]
    pub routes: Option<PathBuf>,

    #[serde(default)]
    pub outfile: Option<PathBuf>,
}

fn default_output() -> PathBuf {
    PathBuf::from("dist")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            routes: None,
            outfile: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_url: None,
            paths: PathsConfig::default(),
            route_file_name: default_route_file_name(),
            exclude: Vec::new(),
            escape_xml: false,
            max_depth: default_max_depth(),
            enable_sitemap: true,
            config_path: None,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&contents)?;

        // Store config file path for relative path resolution
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Parse configuration from YAML text (paths resolve against the working directory)
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.route_file_name.trim().is_empty() {
            return Err(ConfigError::MissingField("route_file_name".to_string()));
        }
        if self.max_depth == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_depth".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// App URL prefix, `None` when unset or blank
    pub fn app_url(&self) -> Option<&str> {
        self.app_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Get the build output directory, resolved relative to config file
    pub fn output_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.output)
    }

    /// Get the explicit route document, if one is configured
    pub fn routes_file(&self) -> Option<PathBuf> {
        self.paths.routes.as_ref().map(|p| self.resolve_path(p))
    }

    /// Sitemap destination (defaults to `<output>/sitemap.xml`)
    pub fn outfile(&self) -> PathBuf {
        match &self.paths.outfile {
            Some(path) => self.resolve_path(path),
            None => self.output_dir().join("sitemap.xml"),
        }
    }

    /// Compile the exclude patterns
    pub fn route_filter(&self) -> Result<RouteFilter, ConfigError> {
        Ok(RouteFilter::new(self.exclude.as_slice())?)
    }

    /// Resolve a path relative to the config file location
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(config_path) = &self.config_path {
            if let Some(parent) = config_path.parent() {
                parent.join(path)
            } else {
                path.to_path_buf()
            }
        } else {
            path.to_path_buf()
        }
    }

    /// Get a nested config value using dotted path (e.g., "paths.output")
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();
        match parts.as_slice() {
            ["app_url"] => self.app_url().map(str::to_string),
            ["paths", "output"] => Some(self.paths.output.display().to_string()),
            ["paths", "routes"] => self.paths.routes.as_ref().map(|p| p.display().to_string()),
            ["paths", "outfile"] => self.paths.outfile.as_ref().map(|p| p.display().to_string()),
            ["route_file_name"] => Some(self.route_file_name.clone()),
            ["escape_xml"] => Some(self.escape_xml.to_string()),
            ["max_depth"] => Some(self.max_depth.to_string()),
            ["enable_sitemap"] => Some(self.enable_sitemap.to_string()),
            _ => None,
        }
    }
}
