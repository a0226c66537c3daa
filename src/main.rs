// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up diagnostics (tracing, controlled by RUST_LOG)
// 2. Parse command-line arguments using clap
// 3. Crawl the site from the root page, printing each page visited
// 4. Exit with proper code (0 = crawl finished, 2 = crawl aborted)
//
// Rust concepts used:
// - async/await: reqwest is async, so the crawl runs on a tokio runtime
// - Result<T, E>: For error handling (T = success type, E = error type)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli; // src/cli.rs - command-line parsing
mod crawl; // src/crawl/ - the crawl loop and page fetching
mod error; // src/error.rs - error types
mod extract; // src/extract/ - finding links in HTML
mod filter; // src/filter/ - deciding which links to follow

use anyhow::{Context, Result};
use cli::Cli;
use crawl::{ConsoleReporter, CrawlSession, HttpFetcher};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// The crawl never runs two fetches at once, so one thread is all it needs
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            // {:#} prints the whole error chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<()> {
    // Diagnostics go to stderr; stdout only carries the crawl lines
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse_args();
    let config = cli.crawl_config();

    let fetcher = HttpFetcher::new().context("Failed to create HTTP client")?;
    let mut session = CrawlSession::new(&config, fetcher, ConsoleReporter::stdio())?;
    let summary = session.run().await?;

    info!(
        root = %config.root,
        visited = summary.visited,
        failed_fetches = summary.failed_fetches,
        "crawl finished"
    );
    Ok(())
}
