// src/github/fetch.rs
// =============================================================================
// This module performs the actual HTTP fetch of a file's raw contents.
//
// Strategy:
// - Build a raw.githubusercontent.com URL from the embed request
// - Issue exactly one GET: no retry, no backoff, default redirect policy
// - Fail loudly on a non-2xx status or an empty body
//
// Why raw file access and not the GitHub API?
// - The API requires authentication for decent rate limits
// - Raw access serves exactly the bytes we want to embed
// - Private repositories are out of scope anyway
//
// Rust concepts:
// - async functions: For network I/O
// - Traits with async methods: So tests can swap in a stub fetcher
// - enum errors: Each failure mode is a distinct variant
// =============================================================================

use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::debug;

use crate::scanner::EmbedRequest;

/// Host serving raw, unrendered file bytes
const RAW_HOST: &str = "https://raw.githubusercontent.com";

/// Host serving the human-facing file view, used for the rendered link
const WEB_HOST: &str = "https://github.com";

// What can go wrong while fetching
//
// Every variant is fatal to the current pass: there is no retry and no
// partial result. The orchestrator propagates these up unchanged.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with something other than 2xx
    #[error("got status {status} fetching {url}")]
    BadStatus { url: String, status: StatusCode },

    /// The server answered 2xx but the body was empty
    #[error("got an empty body fetching {url}")]
    EmptyBody { url: String },

    /// The request itself failed (DNS, TLS, connection, ...)
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

// The fetching seam
//
// Production code uses GithubFetcher; tests implement this trait with a
// stub that counts invocations and returns canned bodies or failures.
pub trait Fetch {
    /// Fetches the raw contents of the file the request points at
    async fn fetch(&self, request: &EmbedRequest) -> Result<String, FetchError>;
}

// Builds the raw-content URL for a request
//
// Shape: https://raw.githubusercontent.com/{repo}/{revision}/{file}
// where revision is the commit hash if present, else the branch
// (defaulting to master).
//
// Example:
//   repo "acme/demo", file "main.go", no branch or hash
//   -> "https://raw.githubusercontent.com/acme/demo/master/main.go"
pub fn raw_url(request: &EmbedRequest) -> String {
    format!(
        "{}/{}/{}/{}",
        RAW_HOST,
        request.repository,
        request.version_selector(),
        request.filename
    )
}

// Builds the display URL shown in the rendered fragment
//
// Shape: https://github.com/{repo}/blob/{revision}/{file}
// This is where a reader lands when clicking the embedded file's name.
pub fn blob_url(request: &EmbedRequest) -> String {
    format!(
        "{}/{}/blob/{}/{}",
        WEB_HOST,
        request.repository,
        request.version_selector(),
        request.filename
    )
}

// The real fetcher, backed by a shared reqwest client
//
// The client is created once and reused for every request in the pass
// (connection pooling).
#[derive(Debug, Clone)]
pub struct GithubFetcher {
    client: Client,
}

impl GithubFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for GithubFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetch for GithubFetcher {
    async fn fetch(&self, request: &EmbedRequest) -> Result<String, FetchError> {
        let url = raw_url(request);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::BadStatus {
                status: response.status(),
                url,
            });
        }

        let body = response.text().await?;
        if body.is_empty() {
            return Err(FetchError::EmptyBody { url });
        }

        Ok(body)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a trait for fetching?
//    - The pipeline should be testable without a network
//    - Processor is generic over Fetch, so tests hand it a stub and count
//      how often it gets called
//    - This is dependency injection, Rust style: the seam is a trait bound
//
// 2. What does #[error(transparent)] do?
//    - Forwards Display and source() straight to the wrapped error
//    - Used when our variant adds no information of its own
//
// 3. What does #[from] do?
//    - Generates From<reqwest::Error> for FetchError
//    - That is what lets the ? operator convert errors automatically
//
// 4. Why take &EmbedRequest instead of owning it?
//    - Fetching only reads the request, it never consumes it
//    - The caller keeps ownership and reuses the request for cache keys
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn request(branch: Option<&str>, hash: Option<&str>) -> EmbedRequest {
        EmbedRequest {
            repository: "acme/demo".to_string(),
            filename: "src/main.go".to_string(),
            filetype: "go".to_string(),
            branch: branch.map(str::to_string),
            commit_hash: hash.map(str::to_string),
        }
    }

    #[test]
    fn test_raw_url_default_branch() {
        assert_eq!(
            raw_url(&request(None, None)),
            "https://raw.githubusercontent.com/acme/demo/master/src/main.go"
        );
    }

    #[test]
    fn test_raw_url_explicit_branch() {
        assert_eq!(
            raw_url(&request(Some("dev"), None)),
            "https://raw.githubusercontent.com/acme/demo/dev/src/main.go"
        );
    }

    #[test]
    fn test_raw_url_hash_wins_over_branch() {
        assert_eq!(
            raw_url(&request(Some("dev"), Some("abc123"))),
            "https://raw.githubusercontent.com/acme/demo/abc123/src/main.go"
        );
    }

    #[test]
    fn test_blob_url_shapes() {
        assert_eq!(
            blob_url(&request(None, None)),
            "https://github.com/acme/demo/blob/master/src/main.go"
        );
        assert_eq!(
            blob_url(&request(None, Some("abc123"))),
            "https://github.com/acme/demo/blob/abc123/src/main.go"
        );
    }
}
