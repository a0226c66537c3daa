// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Breadth-first crawling starting from a root URL
// - Same-domain restriction (links to other hosts are never followed)
// - Each URL string is fetched at most once per queue position
// - One page at a time: no two fetches are ever in flight together
//
// Submodules:
// - engine: the visited set, the work queue and the crawl loop
// - fetch: the Fetcher trait and the reqwest-backed HttpFetcher
// - report: the lines printed while crawling
// =============================================================================

mod engine;
mod fetch;
mod report;

pub use engine::{CrawlConfig, CrawlSession};
pub use fetch::HttpFetcher;
pub use report::ConsoleReporter;
