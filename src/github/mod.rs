// src/github/mod.rs
// =============================================================================
// This module fetches raw file contents from GitHub repositories.
//
// Currently implements:
// - Building raw.githubusercontent.com URLs for a (repo, file, revision)
// - Building the matching github.com/blob display URL for the rendered link
// - A single-GET fetcher with a typed failure taxonomy
//
// Future enhancements (stretch goals):
// - Use the GitHub API with authentication for private repos
// - Support other raw-content hosts (GitLab, Bitbucket)
//
// Rust concepts:
// - Traits: The Fetch trait is the seam tests use to stub the network
// - thiserror: Typed errors instead of stringly-typed failures
// =============================================================================

mod fetch;

// Re-export the fetch API
pub use fetch::{blob_url, raw_url, Fetch, FetchError, GithubFetcher};
