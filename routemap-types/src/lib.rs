//! Shared types for routemap
//!
//! This crate provides the route tree handed to the flattener, plus the
//! position type used to point at a node when something goes wrong.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One entry in a client-side router's route table.
///
/// `path` is relative to the resolved path of the enclosing node. Router
/// records usually carry more fields (`name`, `component`, `meta`); those are
/// ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RouteNode {
    pub path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<RouteNode>>,
}

impl RouteNode {
    /// A node without children
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            children: None,
        }
    }

    pub fn with_children(path: impl Into<String>, children: Vec<RouteNode>) -> Self {
        Self {
            path: path.into(),
            children: Some(children),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Child routes; absent and empty look the same.
    pub fn children(&self) -> &[RouteNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn has_children(&self) -> bool {
        !self.children().is_empty()
    }
}

impl From<&str> for RouteNode {
    fn from(path: &str) -> Self {
        RouteNode::new(path)
    }
}

/// Index path from the top-level route list down to one node.
///
/// Displays as `routes[0].children[2]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct RoutePosition(pub Vec<usize>);

impl RoutePosition {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Position of the `index`-th child of this position.
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for RoutePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("routes");
        }
        for (depth, index) in self.0.iter().enumerate() {
            if depth == 0 {
                write!(f, "routes[{}]", index)?;
            } else {
                write!(f, ".children[{}]", index)?;
            }
        }
        Ok(())
    }
}
