//! Webmirror main entry point
//!
//! This is the command-line interface for the webmirror site mirroring
//! tool.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use webmirror::config::{load_config, validate, Config};
use webmirror::crawler::crawl;
use webmirror::output::print_statistics;
use webmirror::CanonicalUrl;

/// Webmirror: a same-host website mirroring tool
///
/// Webmirror downloads a site's pages and embedded images into a local
/// directory, following links on the seed's host up to a bounded depth.
/// Files downloaded by a previous run are reused instead of refetched.
#[derive(Parser, Debug)]
#[command(name = "webmirror")]
#[command(version = "1.0.0")]
#[command(about = "Mirror a website into a local directory", long_about = None)]
struct Cli {
    /// Seed URL to start mirroring from
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum link depth to follow (overrides config)
    #[arg(long, value_name = "N")]
    depth: Option<u32>,

    /// Output directory (overrides config)
    #[arg(short, long, value_name = "DIR")]
    output: Option<String>,

    /// Maximum concurrent fetches (overrides config)
    #[arg(long, value_name = "N")]
    concurrency: Option<u32>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };
    apply_overrides(&mut config, &cli);
    validate(&config).context("invalid configuration")?;

    let seed = CanonicalUrl::parse(&cli.url)
        .with_context(|| format!("invalid seed URL: {}", cli.url))?;

    tracing::info!(
        "Mirroring {} into {} (depth {}, {} concurrent fetches)",
        seed,
        config.output.directory,
        config.crawler.max_depth,
        config.crawler.max_concurrent_fetches
    );

    let stats = crawl(config, seed).await.context("crawl failed")?;

    print_statistics(&stats);

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("webmirror=info,warn"),
            1 => EnvFilter::new("webmirror=debug,info"),
            2 => EnvFilter::new("webmirror=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Applies command-line overrides on top of the loaded configuration
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(depth) = cli.depth {
        config.crawler.max_depth = depth;
    }
    if let Some(output) = &cli.output {
        config.output.directory = output.clone();
    }
    if let Some(concurrency) = cli.concurrency {
        config.crawler.max_concurrent_fetches = concurrency;
    }
}
