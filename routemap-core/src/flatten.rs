//! Route tree flattening.
//!
//! Turns a nested router table into the sorted, deduplicated list of URLs
//! that belong in a sitemap.

use routemap_types::{RouteNode, RoutePosition};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Placeholder paths that mark fallback/404 routes rather than real pages.
///
/// Matched literally; other parametrized segments such as `:id` are kept.
pub const WILDCARD_PATHS: [&str; 2] = ["*", "/:catchAll(.*)"];

/// Default bound on route nesting before the tree is rejected.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Inclusion predicate shared between threads.
pub type RoutePredicate = Arc<dyn Fn(&RouteNode) -> bool + Send + Sync>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlattenError {
    #[error("Malformed route tree at {position}: nesting exceeds {max_depth} levels (cyclic route table?)")]
    MalformedTree {
        position: RoutePosition,
        max_depth: usize,
    },
}

/// Returns true for the literal catch-all placeholders.
pub fn is_wildcard(path: &str) -> bool {
    WILDCARD_PATHS.contains(&path)
}

/// Configurable route flattener
///
/// # Example
///
/// ```
/// use routemap_core::Flattener;
/// use routemap_types::RouteNode;
///
/// let routes = vec![RouteNode::with_children(
///     "",
///     vec![RouteNode::new("home"), RouteNode::new("about")],
/// )];
///
/// let urls = Flattener::new().flatten(&routes).unwrap();
/// assert_eq!(urls, vec!["/about", "/home"]);
/// ```
#[derive(Clone)]
pub struct Flattener {
    prefix: Option<String>,
    filter: Option<RoutePredicate>,
    max_depth: usize,
}

impl Default for Flattener {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Flattener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flattener")
            .field("prefix", &self.prefix)
            .field("filter", &self.filter.as_ref().map(|_| "<predicate>"))
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

impl Flattener {
    pub fn new() -> Self {
        Self {
            prefix: None,
            filter: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Prefix every top-level path with `prefix` (usually the app URL).
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&RouteNode) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(filter));
        self
    }

    pub fn with_predicate(mut self, predicate: RoutePredicate) -> Self {
        self.filter = Some(predicate);
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Flatten `nodes` into sorted, unique URLs
    pub fn flatten(&self, nodes: &[RouteNode]) -> Result<Vec<String>, FlattenError> {
        let include = self
            .filter
            .as_deref()
            .map(|f| f as &(dyn Fn(&RouteNode) -> bool));
        flatten_with_depth(nodes, self.prefix.as_deref(), include, self.max_depth)
    }
}

/// Flatten with an optional prefix and borrowed predicate, using the default depth bound.
pub fn flatten_routes(
    nodes: &[RouteNode],
    prefix: Option<&str>,
    include: Option<&dyn Fn(&RouteNode) -> bool>,
) -> Result<Vec<String>, FlattenError> {
    flatten_with_depth(nodes, prefix, include, DEFAULT_MAX_DEPTH)
}

fn flatten_with_depth(
    nodes: &[RouteNode],
    prefix: Option<&str>,
    include: Option<&dyn Fn(&RouteNode) -> bool>,
    max_depth: usize,
) -> Result<Vec<String>, FlattenError> {
    let walker = Walker { include, max_depth };

    let mut urls = Vec::new();
    walker.walk(nodes, prefix, &RoutePosition::root(), &mut urls)?;

    let collected = urls.len();
    urls.sort();
    urls.dedup();

    tracing::debug!(
        "Flattened {} route entries into {} unique URLs",
        collected,
        urls.len()
    );

    Ok(urls)
}

struct Walker<'a> {
    include: Option<&'a dyn Fn(&RouteNode) -> bool>,
    max_depth: usize,
}

impl Walker<'_> {
    fn walk(
        &self,
        nodes: &[RouteNode],
        host: Option<&str>,
        parent: &RoutePosition,
        dest: &mut Vec<String>,
    ) -> Result<(), FlattenError> {
        // An empty prefix counts as no prefix at all
        let host = host.filter(|h| !h.is_empty());

        for (index, node) in nodes.iter().enumerate() {
            let position = parent.child(index);
            if position.depth() > self.max_depth {
                return Err(FlattenError::MalformedTree {
                    position,
                    max_depth: self.max_depth,
                });
            }

            if let Some(include) = self.include {
                if !include(node) {
                    continue;
                }
            }

            // Layout wrapper at the top: no page of its own
            let is_layout = host.is_none() && node.path.trim().is_empty();

            let path = if is_layout {
                String::new()
            } else {
                if is_wildcard(&node.path) {
                    continue;
                }

                let mut path = join_path(host.unwrap_or(""), &node.path);
                if path.ends_with('/') {
                    path.pop();
                }
                if !path.is_empty() {
                    dest.push(path.clone());
                }
                path
            };

            if node.has_children() {
                let child_host = format!("{}/", path);
                self.walk(node.children(), Some(&child_host), &position, dest)?;
            }
        }

        Ok(())
    }
}

/// Concatenate `prefix` and `path`, keeping a single `/` at the seam.
fn join_path(prefix: &str, path: &str) -> String {
    match (prefix.ends_with('/'), path.strip_prefix('/')) {
        (true, Some(rest)) => format!("{}{}", prefix, rest),
        _ => format!("{}{}", prefix, path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(path: &str) -> RouteNode {
        RouteNode::new(path)
    }

    fn branch(path: &str, children: Vec<RouteNode>) -> RouteNode {
        RouteNode::with_children(path, children)
    }

    fn flatten(nodes: &[RouteNode]) -> Vec<String> {
        flatten_routes(nodes, None, None).unwrap()
    }

    #[test]
    fn test_layout_root_children_sorted() {
        let routes = vec![branch("", vec![leaf("home"), leaf("about")])];
        assert_eq!(flatten(&routes), vec!["/about", "/home"]);
    }

    #[test]
    fn test_param_segment_is_kept() {
        let routes = vec![branch("/users", vec![leaf("/:id")])];
        assert_eq!(flatten(&routes), vec!["/users", "/users/:id"]);

        let relative = vec![branch("/users", vec![leaf(":id")])];
        assert_eq!(flatten(&relative), vec!["/users", "/users/:id"]);
    }

    #[test]
    fn test_wildcard_only() {
        assert!(flatten(&[leaf("*")]).is_empty());
        assert!(flatten(&[leaf("/:catchAll(.*)")]).is_empty());
    }

    #[test]
    fn test_duplicate_top_level() {
        assert_eq!(flatten(&[leaf("/a"), leaf("/a")]), vec!["/a"]);
    }

    #[test]
    fn test_duplicates_from_different_branches_collapse() {
        let routes = vec![
            branch("/docs", vec![leaf("intro")]),
            leaf("/docs/intro"),
            leaf("/docs/intro/"),
        ];
        assert_eq!(flatten(&routes), vec!["/docs", "/docs/intro"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(flatten(&[]).is_empty());
    }

    #[test]
    fn test_wildcard_children_not_visited() {
        let routes = vec![
            leaf("/"),
            branch("*", vec![leaf("hidden")]),
            branch("/shop", vec![branch("/:catchAll(.*)", vec![leaf("deep")])]),
        ];
        let urls = flatten(&routes);
        assert_eq!(urls, vec!["/shop"]);
        assert!(urls.iter().all(|u| !u.contains("hidden") && !u.contains("deep")));
    }

    #[test]
    fn test_wildcard_match_is_literal() {
        let routes = vec![leaf("/*"), leaf("/:pathMatch(.*)*"), leaf(" *")];
        assert_eq!(flatten(&routes), vec![" *", "/*", "/:pathMatch(.*)*"]);
    }

    #[test]
    fn test_trailing_slash_stripped_once() {
        let routes = vec![branch("/docs/", vec![leaf("intro/")])];
        assert_eq!(flatten(&routes), vec!["/docs", "/docs/intro"]);
    }

    #[test]
    fn test_root_slash_is_not_emitted_as_empty_url() {
        let routes = vec![leaf("/"), leaf("/about")];
        assert_eq!(flatten(&routes), vec!["/about"]);
    }

    #[test]
    fn test_whitespace_layout_root() {
        let routes = vec![branch("  ", vec![leaf("a")])];
        assert_eq!(flatten(&routes), vec!["/a"]);
    }

    #[test]
    fn test_prefix_applies_to_tree() {
        let routes = vec![
            leaf("/"),
            leaf("/about"),
            branch("/blog", vec![leaf(":slug")]),
        ];
        let urls = flatten_routes(&routes, Some("https://example.com"), None).unwrap();
        assert_eq!(
            urls,
            vec![
                "https://example.com",
                "https://example.com/about",
                "https://example.com/blog",
                "https://example.com/blog/:slug",
            ]
        );
    }

    #[test]
    fn test_empty_prefix_behaves_like_none() {
        let routes = vec![branch("", vec![leaf("home")])];
        assert_eq!(
            flatten_routes(&routes, Some(""), None).unwrap(),
            flatten(&routes)
        );
    }

    #[test]
    fn test_filter_short_circuits_subtree() {
        let routes = vec![
            branch("/admin", vec![leaf("users"), leaf("public")]),
            leaf("/about"),
        ];
        let include = |node: &RouteNode| node.path != "/admin";
        let urls = flatten_routes(&routes, None, Some(&include)).unwrap();
        assert_eq!(urls, vec!["/about"]);
    }

    #[test]
    fn test_filter_applies_at_every_depth() {
        let routes = vec![branch("/docs", vec![leaf("draft"), leaf("guide")])];
        let urls = Flattener::new()
            .with_filter(|node| node.path != "draft")
            .flatten(&routes)
            .unwrap();
        assert_eq!(urls, vec!["/docs", "/docs/guide"]);
    }

    #[test]
    fn test_idempotent() {
        let routes = vec![
            branch("", vec![leaf("b"), leaf("a"), branch("c", vec![leaf("d")])]),
            leaf("*"),
        ];
        let flattener = Flattener::new().with_prefix("https://x.test");
        assert_eq!(
            flattener.flatten(&routes).unwrap(),
            flattener.flatten(&routes).unwrap()
        );
    }

    #[test]
    fn test_output_sorted_ordinal() {
        let routes = vec![
            leaf("/b"),
            leaf("/B"),
            leaf("/a"),
            branch("/a", vec![leaf("z"), leaf("0")]),
        ];
        let urls = flatten(&routes);
        assert!(urls.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(urls, vec!["/B", "/a", "/a/0", "/a/z", "/b"]);
    }

    #[test]
    fn test_depth_limit_reports_position() {
        let mut node = leaf("leaf");
        for _ in 0..5 {
            node = branch("n", vec![node]);
        }
        let err = Flattener::new()
            .with_max_depth(3)
            .flatten(&[node])
            .unwrap_err();
        match err {
            FlattenError::MalformedTree {
                position,
                max_depth,
            } => {
                assert_eq!(max_depth, 3);
                assert_eq!(position.to_string(), "routes[0].children[0].children[0].children[0]");
            }
        }
    }

    #[test]
    fn test_depth_limit_not_hit_by_filtered_subtree() {
        let deep = branch("/x", vec![branch("y", vec![leaf("z")])]);
        let urls = Flattener::new()
            .with_max_depth(1)
            .with_filter(|node| node.path != "/x")
            .flatten(&[deep, leaf("/ok")])
            .unwrap();
        assert_eq!(urls, vec!["/ok"]);
    }

    #[test]
    fn test_join_path_seam() {
        assert_eq!(join_path("/users/", "/:id"), "/users/:id");
        assert_eq!(join_path("/users/", ":id"), "/users/:id");
        assert_eq!(join_path("", "/a"), "/a");
        assert_eq!(join_path("https://x.test", "/a"), "https://x.test/a");
    }
}
