//! Sitemap-Harvest main entry point
//!
//! This is the command-line interface for Sitemap-Harvest.

use anyhow::Context;
use clap::Parser;
use sitemap_harvest::config::{load_config_with_hash, Config};
use sitemap_harvest::crawler::run_crawl;
use sitemap_harvest::server;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Sitemap-Harvest: sitemap-driven structured page extraction
///
/// Finds a site's sitemap, classifies the site as commerce or general
/// content, and extracts a typed JSON record from every listed page.
#[derive(Parser, Debug)]
#[command(name = "sitemap-harvest")]
#[command(version = "1.0.0")]
#[command(about = "Sitemap-driven structured page extraction", long_about = None)]
struct Cli {
    /// URL (or bare host) whose domain should be crawled
    #[arg(value_name = "URL", required_unless_present = "serve")]
    url: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Pretty-print the JSON response
    #[arg(long)]
    pretty: bool,

    /// Run the HTTP form server instead of a one-shot crawl
    #[arg(long, conflicts_with = "url")]
    serve: bool,

    /// Address for the HTTP server (overrides [server] bind)
    #[arg(long, value_name = "ADDR", requires = "serve")]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if cli.serve {
        if let Some(bind) = cli.bind {
            config.server.bind = bind.to_string();
        }
        server::serve(config).await?;
        return Ok(());
    }

    let url = cli.url.context("a URL is required unless --serve is given")?;
    handle_crawl(config, &url, cli.pretty).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout carries only the JSON response.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitemap_harvest=info,warn"),
            1 => EnvFilter::new("sitemap_harvest=debug,info"),
            2 => EnvFilter::new("sitemap_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles a one-shot crawl: prints the JSON response to stdout
///
/// A whole-run error object is still a well-formed response and exits 0.
async fn handle_crawl(config: Config, url: &str, pretty: bool) -> anyhow::Result<()> {
    let response = run_crawl(config, url)
        .await
        .with_context(|| format!("cannot crawl {}", url))?;

    if let Some(error) = response.error() {
        tracing::warn!("Crawl did not run: {}", error);
    }

    println!("{}", response.to_json(pretty)?);
    Ok(())
}
