// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// There is exactly one option, the root page to crawl:
//
//   sitemap-crawler -url https://example.com
//   sitemap-crawler --url=https://example.com
//   sitemap-crawler                           (crawls https://golang.org)
//
// clap only understands single-dash flags with one letter, so "-url" is
// rewritten to "--url" before parsing.
//
// Rust concepts:
// - Derive macros: clap generates the parser from the struct definition
// - Iterators: map over argv without collecting it first
// =============================================================================

use std::ffi::OsString;

use clap::Parser;

use crate::crawl::CrawlConfig;

pub const DEFAULT_ROOT_URL: &str = "https://golang.org";

#[derive(Parser, Debug)]
#[command(
    name = "sitemap-crawler",
    version,
    about = "Crawl a website from a root page and print every same-domain page visited",
    long_about = "sitemap-crawler fetches the root page, follows every link that stays on the \
                  root's domain, and prints each page it visits. Set RUST_LOG=debug to see \
                  which links were discarded and why."
)]
pub struct Cli {
    /// URL of the root web page to build the sitemap from
    #[arg(long = "url", default_value = DEFAULT_ROOT_URL)]
    pub url: String,
}

impl Cli {
    // Parses the real process arguments, accepting "-url" as well
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    pub fn crawl_config(&self) -> CrawlConfig {
        CrawlConfig {
            root: self.url.clone(),
        }
    }
}

// Rewrites "-url X" / "-url=X" to "--url X" / "--url=X"
//
// Arguments after a bare "--" are left untouched.
fn normalize_args<I>(args: I) -> impl Iterator<Item = OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut passthrough = false;
    args.into_iter().map(move |arg| {
        if passthrough {
            return arg;
        }
        let rewritten = match arg.to_str() {
            Some("--") => {
                passthrough = true;
                None
            }
            Some("-url") => Some(OsString::from("--url")),
            Some(s) if s.starts_with("-url=") => Some(OsString::from(format!("-{}", s))),
            _ => None,
        };
        rewritten.unwrap_or(arg)
    })
}
