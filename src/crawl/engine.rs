// src/crawl/engine.rs
// =============================================================================
// This module implements the crawl itself: a breadth-first walk over every
// same-domain page reachable from the root.
//
// How it works:
// 1. Announce the root, mark it visited, fetch it and queue its links
// 2. Look at the front of the queue
// 3. If that URL was never visited: announce it, fetch it, append its
//    links to the back of the queue, then mark it visited
// 4. Remove the front of the queue (visited or not) and repeat
// 5. Stop when the queue is empty
//
// Things worth knowing:
// - URLs are compared as plain strings. "https://example.com" and
//   "https://example.com/" are different pages as far as the crawl knows.
// - The same URL can sit in the queue many times; only its first
//   occurrence is fetched.
// - A page that cannot be fetched adds no links. A page whose body cannot
//   be read stops the whole crawl.
//
// Rust concepts:
// - Generics: the session works with any Fetcher and any CrawlReporter
// - VecDeque: FIFO queue with cheap push_back / pop_front
// - HashSet: O(1) "have we seen this URL?" checks
// =============================================================================

use std::collections::{HashSet, VecDeque};

use tracing::debug;

use super::fetch::{Fetcher, PageBody};
use super::report::CrawlReporter;
use crate::error::CrawlError;
use crate::extract::{extract_links, parse_document};
use crate::filter::{follow, CandidateUrl};

// Settings for one crawl
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// The page the crawl starts from, exactly as the user typed it
    pub root: String,
}

// What a finished crawl did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    pub visited: usize,
    pub failed_fetches: usize,
}

// All the state of a single crawl
//
// A new session is created for every crawl; nothing is shared between runs.
pub struct CrawlSession<F, R> {
    root: CandidateUrl,
    root_raw: String,
    fetcher: F,
    reporter: R,
    visited: HashSet<String>,
    queue: VecDeque<CandidateUrl>,
    summary: CrawlSummary,
}

impl<F: Fetcher, R: CrawlReporter> CrawlSession<F, R> {
    // Prepares a crawl; fails if the root URL does not parse
    pub fn new(config: &CrawlConfig, fetcher: F, reporter: R) -> Result<Self, CrawlError> {
        let root = CandidateUrl::parse(&config.root).map_err(|source| CrawlError::InvalidRoot {
            url: config.root.clone(),
            source,
        })?;

        Ok(Self {
            root,
            root_raw: config.root.clone(),
            fetcher,
            reporter,
            visited: HashSet::new(),
            queue: VecDeque::new(),
            summary: CrawlSummary::default(),
        })
    }

    // Crawls until the queue is empty
    pub async fn run(&mut self) -> Result<CrawlSummary, CrawlError> {
        self.start().await?;
        self.drain().await?;
        Ok(self.summary.clone())
    }

    // Announces the root and seeds the queue with its links
    //
    // The root is never announced as "Visiting"; it is marked visited under
    // the exact string the user gave.
    async fn start(&mut self) -> Result<(), CrawlError> {
        let root = self.root_raw.clone();
        self.reporter.starting(&root);
        self.visited.insert(root.clone());

        let links = self.links_from(&root).await?;
        self.queue.extend(links);
        Ok(())
    }

    async fn drain(&mut self) -> Result<(), CrawlError> {
        while let Some(next) = self.queue.front() {
            let url = next.to_string();

            if !self.visited.contains(&url) {
                self.reporter.visiting(&url);
                self.summary.visited += 1;

                let links = self.links_from(&url).await?;
                self.queue.extend(links);
                self.visited.insert(url);
            } else {
                debug!(url = %url, "already visited");
            }

            self.queue.pop_front();
        }
        Ok(())
    }

    // Fetches a page and returns the links worth following, in page order
    async fn links_from(&mut self, url: &str) -> Result<Vec<CandidateUrl>, CrawlError> {
        let body = match self.fetcher.get(url).await {
            Ok(body) => body,
            Err(e) => {
                debug!(url, error = %e, "fetch failed");
                self.reporter.fetch_failed(url);
                self.summary.failed_fetches += 1;
                return Ok(Vec::new());
            }
        };

        // One unreadable page ends the whole crawl. Skipping just this page
        // would be the gentler behavior if this is ever revisited.
        let html = body
            .into_text()
            .await
            .map_err(|source| CrawlError::HtmlParse {
                url: url.to_string(),
                source,
            })?;

        let document = parse_document(&html);
        let root = &self.root;
        let links = extract_links(&document)
            .filter_map(|link| {
                debug!(href = %link.href, text = %link.text, "found link");
                follow(&link.href, root)
            })
            .collect();

        Ok(links)
    }
}
