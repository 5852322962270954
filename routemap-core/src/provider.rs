//! Route sources: static route lists, route documents on disk, and discovery
//! of route documents inside a build output directory.

use routemap_types::{RouteNode, RoutePosition};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum RouteError {
    #[error("Failed to read route file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in route file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML in route file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid route node at {position}: {reason}")]
    InvalidNode {
        position: RoutePosition,
        reason: String,
    },

    #[error("Unsupported route file format: {0:?} (expected .json, .yml or .yaml)")]
    UnsupportedFormat(PathBuf),
}

/// Anything that can hand over a route tree.
pub trait RouteProvider {
    fn routes(&self) -> Result<Vec<RouteNode>, RouteError>;

    /// Human-readable origin, used in logs
    fn describe(&self) -> String;
}

/// Routes supplied directly by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticRoutes(pub Vec<RouteNode>);

impl StaticRoutes {
    pub fn new(routes: Vec<RouteNode>) -> Self {
        Self(routes)
    }
}

impl RouteProvider for StaticRoutes {
    fn routes(&self) -> Result<Vec<RouteNode>, RouteError> {
        Ok(self.0.clone())
    }

    fn describe(&self) -> String {
        format!("{} static routes", self.0.len())
    }
}

/// A JSON or YAML route document on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteFile {
    path: PathBuf,
}

impl RouteFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RouteProvider for RouteFile {
    fn routes(&self) -> Result<Vec<RouteNode>, RouteError> {
        let contents = fs::read_to_string(&self.path).map_err(|source| RouteError::Io {
            path: self.path.clone(),
            source,
        })?;

        let extension = self
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => parse_json_routes(&contents),
            Some("yml") | Some("yaml") => parse_yaml_routes(&contents),
            _ => Err(RouteError::UnsupportedFormat(self.path.clone())),
        }
    }

    fn describe(&self) -> String {
        format!("route file {}", self.path.display())
    }
}

/// Parse a JSON route document
///
/// The document is either an array of routes or an object with a `routes`
/// array. Unknown fields on route records are ignored.
///
/// # Example
///
/// ```
/// use routemap_core::provider::parse_json_routes;
///
/// let routes = parse_json_routes(r#"[{"path": "/", "name": "home"}]"#).unwrap();
/// assert_eq!(routes[0].path, "/");
/// ```
pub fn parse_json_routes(contents: &str) -> Result<Vec<RouteNode>, RouteError> {
    let value: Value = serde_json::from_str(contents)?;
    routes_from_value(&value)
}

/// Parse a YAML route document (same shape as the JSON one)
pub fn parse_yaml_routes(contents: &str) -> Result<Vec<RouteNode>, RouteError> {
    let value: Value = serde_yaml::from_str(contents)?;
    routes_from_value(&value)
}

/// Build a route tree from an untyped document, reporting the position of the first bad node.
pub fn routes_from_value(value: &Value) -> Result<Vec<RouteNode>, RouteError> {
    let root = RoutePosition::root();
    let list = match value {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("routes") {
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(RouteError::InvalidNode {
                    position: root,
                    reason: format!("`routes` must be an array, found {}", kind(other)),
                })
            }
            None => {
                return Err(RouteError::InvalidNode {
                    position: root,
                    reason: "expected a `routes` array".to_string(),
                })
            }
        },
        other => {
            return Err(RouteError::InvalidNode {
                position: root,
                reason: format!("expected an array of routes, found {}", kind(other)),
            })
        }
    };

    nodes_from_values(list, &root)
}

fn nodes_from_values(items: &[Value], parent: &RoutePosition) -> Result<Vec<RouteNode>, RouteError> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| node_from_value(item, parent.child(index)))
        .collect()
}

fn node_from_value(value: &Value, position: RoutePosition) -> Result<RouteNode, RouteError> {
    let invalid = |reason: String| RouteError::InvalidNode {
        position: position.clone(),
        reason,
    };

    let map = value
        .as_object()
        .ok_or_else(|| invalid(format!("expected an object, found {}", kind(value))))?;

    let path = match map.get("path") {
        Some(Value::String(path)) => path.clone(),
        Some(other) => return Err(invalid(format!("`path` must be a string, found {}", kind(other)))),
        None => return Err(invalid("missing `path`".to_string())),
    };

    let children = match map.get("children") {
        None | Some(Value::Null) => None,
        Some(Value::Array(items)) => Some(nodes_from_values(items, &position)?),
        Some(other) => {
            return Err(invalid(format!(
                "`children` must be an array, found {}",
                kind(other)
            )))
        }
    };

    Ok(RouteNode { path, children })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Find the first file named `file_name` under `dir`, walking in sorted order.
pub fn discover_route_file(dir: &Path, file_name: &str) -> Option<PathBuf> {
    if !dir.is_dir() {
        tracing::debug!("Output directory {:?} does not exist; nothing to discover", dir);
        return None;
    }

    let found = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .find(|entry| entry.file_name().to_str() == Some(file_name))
        .map(|entry| entry.into_path());

    if let Some(path) = &found {
        tracing::debug!("Found route file {:?}", path);
    }

    found
}
