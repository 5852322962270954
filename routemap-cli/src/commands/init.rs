//! Init command implementation.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# routemap configuration

# Deployed application URL, prepended to every route (optional)
# app_url: "https://example.com"

paths:
  # Build output directory; searched for the route table and home of sitemap.xml
  output: "dist"
  # Explicit route document (JSON or YAML); skips discovery when set
  # routes: "src/router/routes.json"
  # Sitemap destination (defaults to <output>/sitemap.xml)
  # outfile: "dist/sitemap.xml"

# File name looked up under paths.output when paths.routes is unset
route_file_name: "routes.json"

# Regexes matched against each route's own path; matches drop the whole subtree
exclude: []

escape_xml: false
max_depth: 128
enable_sitemap: true
"#;

/// Initialize a new routemap project
pub fn init_project(path: Option<&Path>) -> Result<()> {
    let root = path.unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(root).with_context(|| format!("Failed to create {:?}", root))?;

    let config_path = root.join("routemap.yml");
    if config_path.exists() {
        println!("routemap.yml already exists at {:?}", config_path);
        return Ok(());
    }

    fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {:?}", config_path))?;

    println!("✓ routemap initialized in {:?}", root);
    println!("  - Edit routemap.yml to set app_url and the route source");
    Ok(())
}
