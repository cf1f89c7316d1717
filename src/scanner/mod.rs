// src/scanner/mod.rs
// =============================================================================
// This module finds embed tags in article text.
//
// An embed tag looks like:
//   [git:repo=owner/name,file=src/main.rs,type=rust,branch=dev,hash=abc123]
//
// Only repo and file are required. The optional fields are order-fixed:
// type before branch before hash.
//
// The scanner only extracts; it never validates repository or filename
// syntax. A malformed value simply produces a request that fails later at
// fetch time with an HTTP error.
//
// Rust concepts:
// - Regex with named capture groups: To pull fields out of the tag
// - Iterators: Matches are yielded lazily, one at a time
// =============================================================================

mod tag;

// Re-export the scanner API
pub use tag::{scan_tags, EmbedRequest, TagMatch};
