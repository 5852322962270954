//! # routemap CLI
//!
//! Command-line interface for generating `sitemap.xml` from router tables.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "routemap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "routemap.yml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter routemap.yml
    Init {
        /// Target directory (defaults to current directory)
        path: Option<PathBuf>,
    },

    /// Generate sitemap.xml from the route table
    Build {
        #[command(flatten)]
        source: commands::SourceArgs,

        /// Output file (defaults to <output>/sitemap.xml)
        #[arg(long)]
        outfile: Option<PathBuf>,
    },

    /// Print the flattened URL list
    List {
        #[command(flatten)]
        source: commands::SourceArgs,

        /// Emit a JSON array instead of one URL per line
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing (stderr, so list output stays machine-readable)
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Init { path } => commands::init_project(path.as_deref()),
        Commands::Build { source, outfile } => {
            commands::build_sitemap(&cli.config, &source, outfile.as_deref())
        }
        Commands::List { source, json } => commands::list_urls(&cli.config, &source, json),
    }
}
