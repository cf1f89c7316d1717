// src/processor/pipeline.rs
// =============================================================================
// This module implements the scan-fetch-replace pass over article text.
//
// How it works:
// 1. Collect every [git:...] tag match in the article
// 2. For each match, resolve the file body: from the cache when enabled
//    and warm, otherwise by fetching (and then filling the cache)
// 3. Render the HTML fragment for the body
// 4. Replace the matched tag text in the article content
//
// Replacement is literal string substitution of the exact matched tag.
// If the same tag text appears several times verbatim, every occurrence
// is replaced in one step.
//
// Rust concepts:
// - &mut String: The article content is mutated in place
// - Sequential awaits: One tag at a time, one request in flight at most
// =============================================================================

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use crate::cache::CacheStore;
use crate::config::EmbedConfig;
use crate::github::{blob_url, Fetch};
use crate::render::{RenderContext, Renderer, ASSET_BASE, FOOTER_FULL};
use crate::scanner::{scan_tags, EmbedRequest, TagMatch};

// What one processed article looked like, for the CLI report
#[derive(Debug, Clone, Serialize)]
pub struct EmbedReport {
    /// The article file that was processed
    pub file: String,
    /// How many embed tags were found and replaced
    pub tags_replaced: usize,
}

// The orchestrator
//
// Owns its collaborators; generic over the fetcher so tests can inject a
// stub. One processor handles a whole batch of articles sequentially.
pub struct Processor<F> {
    config: EmbedConfig,
    cache: CacheStore,
    renderer: Renderer,
    fetcher: F,
}

impl<F: Fetch> Processor<F> {
    /// Wires up the pipeline from its parts
    ///
    /// The cache store is rooted at the configured location; whether it is
    /// ever consulted depends on config.cache_enabled.
    pub fn new(config: EmbedConfig, renderer: Renderer, fetcher: F) -> Self {
        let cache = CacheStore::new(config.cache_location.clone());
        Self {
            config,
            cache,
            renderer,
            fetcher,
        }
    }

    /// Runs the scan-fetch-replace pass over one article's content
    ///
    /// Mutates the content in place and returns the number of tags
    /// replaced. The first fetch failure aborts the remaining tags and
    /// leaves the article partially processed, matching the all-or-abort
    /// contract of the pass.
    pub async fn process_article(&self, content: &mut String) -> Result<usize> {
        // Collect first: the matches borrow the content we are about to
        // mutate
        let matches: Vec<TagMatch> = scan_tags(content).collect();

        for tag in &matches {
            let request = &tag.request;
            info!(
                "[git]: found repo {}, file {}, type {}, branch {:?}, hash {:?}",
                request.repository,
                request.filename,
                request.filetype,
                request.branch,
                request.commit_hash
            );

            let body = self.resolve_body(request).await?;

            let context = RenderContext {
                code: body,
                filename: request.filename.clone(),
                filetype: request.filetype.clone(),
                url: blob_url(request),
                footer: FOOTER_FULL.to_string(),
                base: ASSET_BASE.to_string(),
            };
            let replacement = self.renderer.render(&context)?;

            // Every verbatim occurrence of this tag text is replaced at once
            *content = content.replace(&tag.matched_text, &replacement);
        }

        Ok(matches.len())
    }

    // Resolves the file body for one request: cache first when enabled,
    // network otherwise
    async fn resolve_body(&self, request: &EmbedRequest) -> Result<String> {
        if self.config.cache_enabled {
            if let Some(body) = self.cache.get(request) {
                info!("[git]: found file in cache");
                return Ok(body);
            }
            info!("[git]: file not in cache, fetching...");
        }

        let body = self.fetcher.fetch(request).await?;

        if self.config.cache_enabled {
            info!("[git]: saving file to cache...");
            self.cache.put(request, &body)?;
        }

        Ok(body)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why is Processor generic instead of holding Box<dyn Fetch>?
//    - The fetcher type is known at each call site (real one in main,
//      stub in tests), so static dispatch is enough
//    - No trait object means no vtable and no object-safety concerns for
//      the async method
//
// 2. Why collect the matches before the loop?
//    - scan_tags borrows the content; the loop mutates it
//    - Collecting into owned TagMatch values ends the borrow first
//    - This mirrors findall-then-replace: the scan sees the original text
//
// 3. Why does resolve_body check cache_enabled twice?
//    - The lookup and the store are independently skipped when caching is
//      off; the fetch in between runs either way on a miss
//    - When disabled, no cache file is ever read or created
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStore;
    use crate::github::FetchError;
    use reqwest::StatusCode;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    // A canned fetcher: returns a fixed body or a fixed failure, and
    // counts how often it was asked
    enum StubResponse {
        Body(String),
        NotFound,
    }

    struct StubFetcher {
        response: StubResponse,
        calls: Arc<AtomicUsize>,
    }

    impl StubFetcher {
        fn returning(body: &str) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    response: StubResponse::Body(body.to_string()),
                    calls: calls.clone(),
                },
                calls,
            )
        }

        fn not_found() -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    response: StubResponse::NotFound,
                    calls: calls.clone(),
                },
                calls,
            )
        }
    }

    impl Fetch for StubFetcher {
        async fn fetch(&self, request: &EmbedRequest) -> Result<String, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.response {
                StubResponse::Body(body) => Ok(body.clone()),
                StubResponse::NotFound => Err(FetchError::BadStatus {
                    url: crate::github::raw_url(request),
                    status: StatusCode::NOT_FOUND,
                }),
            }
        }
    }

    fn config(cache_enabled: bool, cache_dir: &std::path::Path) -> EmbedConfig {
        EmbedConfig {
            cache_enabled,
            cache_location: cache_dir.to_path_buf(),
        }
    }

    fn processor(cfg: EmbedConfig, fetcher: StubFetcher) -> Processor<StubFetcher> {
        Processor::new(cfg, Renderer::new().unwrap(), fetcher)
    }

    fn cache_file_count(dir: &std::path::Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[tokio::test]
    async fn test_end_to_end_replacement() {
        let dir = tempfile::tempdir().unwrap();
        let (stub, _calls) = StubFetcher::returning("package main");
        let processor = processor(config(false, dir.path()), stub);

        let mut content = "See [git:repo=acme/demo,file=main.go]".to_string();
        let replaced = processor.process_article(&mut content).await.unwrap();

        assert_eq!(replaced, 1);
        assert!(content.contains("package main"));
        assert!(content.contains("https://github.com/acme/demo/blob/master/main.go"));
        // No residual tag syntax
        assert!(!content.contains("[git:"));
    }

    #[tokio::test]
    async fn test_caching_disabled_refetches_every_pass() {
        let dir = tempfile::tempdir().unwrap();
        let (stub, calls) = StubFetcher::returning("body");
        let processor = processor(config(false, dir.path()), stub);

        let article = "See [git:repo=acme/demo,file=main.go]";
        processor
            .process_article(&mut article.to_string())
            .await
            .unwrap();
        processor
            .process_article(&mut article.to_string())
            .await
            .unwrap();

        // Two passes, two fetches, and the cache directory stayed empty
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache_file_count(dir.path()), 0);
    }

    #[tokio::test]
    async fn test_cache_miss_then_hit() {
        let dir = tempfile::tempdir().unwrap();
        let (stub, calls) = StubFetcher::returning("cached body");
        let processor = processor(config(true, dir.path()), stub);

        let article = "See [git:repo=acme/demo,file=main.go]";
        processor
            .process_article(&mut article.to_string())
            .await
            .unwrap();
        // The miss fetched once and filled the cache
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache_file_count(dir.path()), 1);

        let mut content = article.to_string();
        processor.process_article(&mut content).await.unwrap();
        // The second pass was served from disk
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(content.contains("cached body"));
    }

    #[tokio::test]
    async fn test_prepopulated_cache_bypasses_fetcher() {
        let dir = tempfile::tempdir().unwrap();

        // Seed the cache under the same key the processor will derive
        let request = EmbedRequest {
            repository: "acme/demo".to_string(),
            filename: "main.go".to_string(),
            filetype: "text".to_string(),
            branch: None,
            commit_hash: None,
        };
        CacheStore::new(dir.path())
            .put(&request, "seeded body")
            .unwrap();

        let (stub, calls) = StubFetcher::returning("network body");
        let processor = processor(config(true, dir.path()), stub);

        let mut content = "See [git:repo=acme/demo,file=main.go]".to_string();
        processor.process_article(&mut content).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(content.contains("seeded body"));
        assert!(!content.contains("network body"));
    }

    #[tokio::test]
    async fn test_fetch_failure_aborts_without_caching() {
        let dir = tempfile::tempdir().unwrap();
        let (stub, calls) = StubFetcher::not_found();
        let processor = processor(config(true, dir.path()), stub);

        let mut content = "See [git:repo=acme/demo,file=missing.go]".to_string();
        let error = processor.process_article(&mut content).await.unwrap_err();

        assert!(matches!(
            error.downcast_ref::<FetchError>(),
            Some(FetchError::BadStatus { .. })
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        // The failure wrote nothing and replaced nothing
        assert_eq!(cache_file_count(dir.path()), 0);
        assert!(content.contains("[git:repo=acme/demo,file=missing.go]"));
    }

    #[tokio::test]
    async fn test_repeated_tag_text_replaced_everywhere() {
        let dir = tempfile::tempdir().unwrap();
        let (stub, _calls) = StubFetcher::returning("fn main() {}");
        let processor = processor(config(false, dir.path()), stub);

        let mut content = "\
Top: [git:repo=acme/demo,file=main.rs]
Bottom: [git:repo=acme/demo,file=main.rs]"
            .to_string();
        processor.process_article(&mut content).await.unwrap();

        // Both verbatim occurrences are gone
        assert!(!content.contains("[git:"));
        assert_eq!(content.matches("fn main() {}").count(), 2);
    }

    #[tokio::test]
    async fn test_article_without_tags_is_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let (stub, calls) = StubFetcher::returning("body");
        let processor = processor(config(false, dir.path()), stub);

        let mut content = "Just prose, no embeds here.".to_string();
        let replaced = processor.process_article(&mut content).await.unwrap();

        assert_eq!(replaced, 0);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(content, "Just prose, no embeds here.");
    }
}
