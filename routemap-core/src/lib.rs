//! # routemap-core
//!
//! Core library for routemap.
//!
//! This crate flattens client-side router tables into sorted, unique URLs and
//! renders them as `sitemap.xml`. The [`generator`] module adds the thin I/O
//! layer: loading route documents, applying configured filters and writing
//! the result to disk.

pub mod config;
pub mod filter;
pub mod flatten;
pub mod generator;
pub mod provider;
pub mod sitemap;

pub use config::{Config, ConfigError};
pub use filter::{FilterError, RouteFilter};
pub use flatten::{flatten_routes, is_wildcard, FlattenError, Flattener, RoutePredicate};
pub use generator::{GenerateError, GenerateReport, SitemapGenerator};
pub use provider::{RouteError, RouteFile, RouteProvider, StaticRoutes};
pub use routemap_types::{RouteNode, RoutePosition};
pub use sitemap::{serialize, SitemapSerializer};
