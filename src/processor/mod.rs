// src/processor/mod.rs
// =============================================================================
// This module drives the whole embed pipeline for an article.
//
// Per matched tag, the steps are:
//   scan -> cache lookup -> (hit | miss) -> [fetch -> cache store]
//        -> render -> substitute
//
// Cache lookup and store are skipped entirely when caching is disabled.
// A fetch failure aborts the pass for the whole article: there is no
// per-tag isolation and no partial output for a failing tag.
//
// Rust concepts:
// - Generics with trait bounds: The processor works with any Fetch impl
// - Explicit dependencies: Config, cache, renderer and fetcher are all
//   passed in at construction time
// =============================================================================

mod pipeline;

// Re-export the pipeline API
pub use pipeline::{EmbedReport, Processor};
