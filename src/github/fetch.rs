// src/github/fetch.rs
// =============================================================================
// The network side of the pipeline.
//
// GitHubClient wraps one reqwest Client and is used for both kinds of request:
// - listing calls: GET <api>/repos/<owner>/<repo>/contents/<path>?ref=<branch>
//   with the API's JSON Accept header
// - fetches: a plain GET of a file's download_url
//
// There are no retries. A non-200 answer or a transport error is returned to
// the caller straight away.
// =============================================================================

use crate::config::Config;
use crate::error::{Error, Result};
use crate::github::listing::{decode_listing, Entry, Lister};
use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};

/// Accept header that pins the contents API to its v3 JSON shape
const GITHUB_JSON: &str = "application/vnd.github.v3+json";

/// Anything that can download the raw bytes of a file entry.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, entry: &Entry) -> Result<Vec<u8>>;
}

#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
}

impl GitHubClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(Error::Client)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Lister for GitHubClient {
    async fn list(&self, listing_url: &str) -> Result<Vec<Entry>> {
        log::debug!("GET {}", listing_url);

        let listing_error = |detail: String| Error::Listing {
            url: listing_url.to_string(),
            detail,
        };

        let response = self
            .client
            .get(listing_url)
            .header(header::ACCEPT, GITHUB_JSON)
            .send()
            .await
            .map_err(|e| listing_error(e.to_string()))?;

        if response.status() != StatusCode::OK {
            return Err(listing_error(format!(
                "github API responded with status: {}",
                response.status()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| listing_error(e.to_string()))?;

        decode_listing(listing_url, &body)
    }
}

#[async_trait]
impl Fetcher for GitHubClient {
    async fn fetch(&self, entry: &Entry) -> Result<Vec<u8>> {
        let fetch_error = |detail: String| Error::Fetch {
            path: entry.relative_path.clone(),
            detail,
        };

        let url = entry
            .content_url
            .as_deref()
            .ok_or_else(|| fetch_error("no download URL".to_string()))?;

        log::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        if response.status() != StatusCode::OK {
            return Err(fetch_error(format!(
                "failed to download file: {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does #[async_trait] do?
//    - Rewrites `async fn` in a trait into a method returning a boxed future
//    - That keeps Lister and Fetcher usable behind Arc<dyn ...> and generics
//
// 2. Why is `.header(ACCEPT, ..)` only on listing calls?
//    - download_url points at raw.githubusercontent.com, which serves bytes
//      and ignores the API's media types
//
// 3. Where does the User-Agent come from?
//    - Client::builder().user_agent(..) adds it to every request the client
//      makes, so neither call site sets it by hand
// -----------------------------------------------------------------------------
