// src/error.rs
// =============================================================================
// Error types for the crawler.
//
// There are four kinds of failure and each one is handled differently:
// - URL parse failure (an href that is not a URL): silently dropped
// - Fetch failure (GET could not reach the server): reported, crawl goes on
// - HTML parse failure (page body could not be turned into a document): fatal
// - Root URL parse failure: fatal, before anything is fetched
//
// Rust concepts:
// - thiserror: derive macro that implements std::error::Error and Display
// - #[source]: keeps the underlying error so the full chain can be printed
// =============================================================================

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Why a string could not be parsed as a URL reference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlParseError {
    #[error("invalid control character in URL")]
    ControlCharacter,
    #[error("missing protocol scheme")]
    MissingScheme,
    #[error("first path segment in URL cannot contain colon")]
    ColonInFirstSegment,
    #[error("invalid URL escape {0:?}")]
    InvalidEscape(String),
    #[error("invalid character {0:?} in host name")]
    InvalidHostCharacter(char),
    #[error("invalid port {0:?} after host")]
    InvalidPort(String),
    #[error("missing ']' in host")]
    UnclosedBracket,
    #[error("invalid userinfo")]
    InvalidUserinfo,
}

/// A transport-level GET failure. Non-2xx responses are never a FetchError.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("no host in request URL {0}")]
    NoHost(String),
    #[error("invalid request URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: BoxError,
    },
}

/// The response body could not be read into a string.
#[derive(Debug, Error)]
#[error("could not read response body: {0}")]
pub struct BodyError(pub String);

impl From<reqwest::Error> for BodyError {
    fn from(e: reqwest::Error) -> Self {
        BodyError(e.to_string())
    }
}

/// Conditions that abort a whole crawl.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("invalid root URL {url:?}: {source}")]
    InvalidRoot {
        url: String,
        #[source]
        source: UrlParseError,
    },
    #[error("could not parse HTML from {url}: {source}")]
    HtmlParse {
        url: String,
        #[source]
        source: BodyError,
    },
}
