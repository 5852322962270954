//! Pattern-based route exclusion.

use crate::flatten::RoutePredicate;
use regex::Regex;
use routemap_types::RouteNode;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Invalid route pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Excludes routes whose own `path` matches any of a set of regexes.
///
/// A rejected node takes its whole subtree with it.
#[derive(Debug, Clone, Default)]
pub struct RouteFilter {
    exclude: Vec<Regex>,
}

impl RouteFilter {
    pub fn new<S: AsRef<str>>(exclude: &[S]) -> Result<Self, FilterError> {
        let exclude = exclude
            .iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                Regex::new(pattern).map_err(|source| FilterError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { exclude })
    }

    pub fn is_empty(&self) -> bool {
        self.exclude.is_empty()
    }

    /// Whether the node (and so its subtree) stays in the sitemap
    pub fn allows(&self, node: &RouteNode) -> bool {
        !self.exclude.iter().any(|re| re.is_match(&node.path))
    }

    pub fn into_predicate(self) -> RoutePredicate {
        Arc::new(move |node: &RouteNode| self.allows(node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten::Flattener;

    #[test]
    fn test_empty_filter_allows_everything() {
        let filter = RouteFilter::default();
        assert!(filter.is_empty());
        assert!(filter.allows(&RouteNode::new("/anything")));
    }

    #[test]
    fn test_exclude_patterns() {
        let filter = RouteFilter::new(&["^/admin", "preview$"]).unwrap();
        assert!(!filter.allows(&RouteNode::new("/admin/users")));
        assert!(!filter.allows(&RouteNode::new("/post-preview")));
        assert!(filter.allows(&RouteNode::new("/about")));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = RouteFilter::new(&["("]).unwrap_err();
        assert!(err.to_string().contains("Invalid route pattern \"(\""));
    }

    #[test]
    fn test_predicate_drops_subtree() {
        let routes = vec![
            RouteNode::with_children("/admin", vec![RouteNode::new("settings")]),
            RouteNode::new("/home"),
        ];
        let predicate = RouteFilter::new(&["^/admin$"]).unwrap().into_predicate();
        let urls = Flattener::new()
            .with_predicate(predicate)
            .flatten(&routes)
            .unwrap();
        assert_eq!(urls, vec!["/home"]);
    }
}
