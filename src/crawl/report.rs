// src/crawl/report.rs
// =============================================================================
// This module prints crawl progress.
//
// Output format:
//   stdout: "Starting with root page: <url>"   (once)
//   stdout: "Visiting URL: <url>"              (once per visited page)
//   stderr: "Unsuccessful GET for: <url>"      (once per failed fetch)
//
// The writers are generic so tests can capture the exact lines in a Vec<u8>.
// =============================================================================

use std::io::{self, Write};

use tracing::warn;

// Receives the user-visible crawl events
pub trait CrawlReporter {
    fn starting(&mut self, root: &str);
    fn visiting(&mut self, url: &str);
    fn fetch_failed(&mut self, url: &str);
}

pub struct ConsoleReporter<O, E> {
    out: O,
    err: E,
}

impl ConsoleReporter<io::Stdout, io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> ConsoleReporter<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }
}

#[cfg(test)]
impl ConsoleReporter<Vec<u8>, Vec<u8>> {
    // (stdout, stderr) as captured so far
    pub fn captured(&self) -> (String, String) {
        (
            String::from_utf8_lossy(&self.out).into_owned(),
            String::from_utf8_lossy(&self.err).into_owned(),
        )
    }
}

impl<O: Write, E: Write> CrawlReporter for ConsoleReporter<O, E> {
    fn starting(&mut self, root: &str) {
        if let Err(e) = writeln!(self.out, "Starting with root page: {}", root) {
            warn!(error = %e, "could not write crawl output");
        }
    }

    fn visiting(&mut self, url: &str) {
        if let Err(e) = writeln!(self.out, "Visiting URL: {}", url) {
            warn!(error = %e, "could not write crawl output");
        }
    }

    fn fetch_failed(&mut self, url: &str) {
        if let Err(e) = writeln!(self.err, "Unsuccessful GET for: {}", url) {
            warn!(error = %e, "could not write crawl output");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_lines() {
        let mut reporter = ConsoleReporter::new(Vec::new(), Vec::new());
        reporter.starting("https://example.com");
        reporter.visiting("https://example.com/about");
        reporter.fetch_failed("https://example.com/down");

        let (out, err) = reporter.captured();
        assert_eq!(
            out,
            "Starting with root page: https://example.com\nVisiting URL: https://example.com/about\n"
        );
        assert_eq!(err, "Unsuccessful GET for: https://example.com/down\n");
    }
}
