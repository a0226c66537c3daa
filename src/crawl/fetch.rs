// src/crawl/fetch.rs
// =============================================================================
// This module downloads pages.
//
// The crawl engine only needs one capability: "GET this URL and give me the
// body". That capability is the Fetcher trait, so the engine can be tested
// with an in-memory fetcher and run for real with HttpFetcher (reqwest).
//
// Two steps can fail, and they fail differently:
// - get(): the request never got a response (DNS, refused connection,
//   bad URL). The crawl reports it and moves on.
// - into_text(): a response arrived but its body could not be read.
//   The crawl treats that page as unparseable, which is fatal.
//
// A response with any HTTP status, 404 and 500 included, is a success here.
//
// Rust concepts:
// - Traits with associated types: each fetcher picks its own body type
// - BoxFuture: a heap-allocated future, so traits can have async methods
// =============================================================================

use futures::future::BoxFuture;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::error::{BodyError, FetchError};
use crate::filter::CandidateUrl;

// A response body that has not been read yet
pub trait PageBody: Send {
    fn into_text(self) -> BoxFuture<'static, Result<String, BodyError>>;
}

// Something that can GET a URL
pub trait Fetcher {
    type Body: PageBody;

    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Self::Body, FetchError>>;
}

impl PageBody for reqwest::Response {
    fn into_text(self) -> BoxFuture<'static, Result<String, BodyError>> {
        Box::pin(async move { Ok(self.text().await?) })
    }
}

// Fetches pages over HTTP(S) with a shared reqwest client
//
// Redirects follow reqwest's default policy (up to 10 hops). There is no
// request timeout and no retry.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    type Body = reqwest::Response;

    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Self::Body, FetchError>> {
        Box::pin(async move {
            // Opaque references such as "https:team@example.com" have no
            // host to connect to
            match CandidateUrl::parse(url) {
                Ok(candidate) if !candidate.host.is_empty() => {}
                _ => return Err(FetchError::NoHost(url.to_string())),
            }

            let target = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
                url: url.to_string(),
                source,
            })?;

            let response = self
                .client
                .get(target)
                .send()
                .await
                .map_err(|e| FetchError::Transport {
                    url: url.to_string(),
                    source: Box::new(e),
                })?;

            debug!(url, status = %response.status(), "fetched page");
            Ok(response)
        })
    }
}
