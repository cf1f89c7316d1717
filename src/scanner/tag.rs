// src/scanner/tag.rs
// =============================================================================
// This module parses [git:...] embed tags out of article text.
//
// How it works:
// 1. A fixed regex matches the whole tag and captures each field by name
// 2. Each match becomes an EmbedRequest (typed, with documented defaults)
// 3. The exact matched substring is kept alongside, so the caller can
//    replace it in the article text later
//
// Field defaults:
// - type   -> "text" (display hint only, never affects fetching)
// - branch -> absent ("master" is assumed downstream when hash is absent too)
// - hash   -> absent (when present it wins over branch everywhere)
//
// Rust concepts:
// - LazyLock: Compile the regex once, on first use
// - Option<String>: To represent fields that may be absent
// - impl Iterator: Return a lazy sequence without naming its type
// =============================================================================

use regex::Regex;
use std::sync::LazyLock;

// The embed tag grammar. Fields are order-fixed: repo, file, then the
// optional type/branch/hash in that relative order. Values run up to the
// next comma or the closing bracket.
static GIT_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\[git:repo=(?P<repo>[^,\]]+),file=(?P<file>[^,\]]+)(?:,type=(?P<type>[^,\]]+))?(?:,branch=(?P<branch>[^,\]]+))?(?:,hash=(?P<hash>[^,\]]+))?\]",
    )
    // The pattern is a constant known to be valid - if it fails to compile,
    // that is a programmer error and panicking is correct
    .expect("embed tag pattern is valid")
});

// One parsed embed directive
//
// This is the typed request that flows through the whole pipeline:
// cache key derivation, URL construction and rendering all read from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedRequest {
    /// Source repository in owner/name form (e.g. "rust-lang/rust")
    pub repository: String,
    /// Path of the file within the repository
    pub filename: String,
    /// Display/highlighting hint, defaults to "text"
    pub filetype: String,
    /// Branch to fetch from; None means the default branch
    pub branch: Option<String>,
    /// Commit hash pinning an exact revision; takes precedence over branch
    pub commit_hash: Option<String>,
}

impl EmbedRequest {
    /// Branch assumed when neither a branch nor a hash is given
    pub const DEFAULT_BRANCH: &'static str = "master";
    /// Filetype assumed when the tag has no type field
    pub const DEFAULT_FILETYPE: &'static str = "text";

    /// The revision actually used for fetching and cache keying
    ///
    /// Invariant: exactly one value pins the revision. A commit hash wins
    /// over a branch; with neither present, the default branch applies.
    pub fn version_selector(&self) -> &str {
        self.commit_hash
            .as_deref()
            .or(self.branch.as_deref())
            .unwrap_or(Self::DEFAULT_BRANCH)
    }
}

// A single scanner hit: the request plus the exact text that matched
//
// We keep the matched substring (not just the captured fields) because the
// orchestrator replaces that literal text in the article content.
#[derive(Debug, Clone)]
pub struct TagMatch {
    /// The full tag text as it appears in the article
    pub matched_text: String,
    /// The parsed request
    pub request: EmbedRequest,
}

// Scans article text for embed tags
//
// Parameters:
//   text: the article body to scan (borrowed as &str)
//
// Returns: a lazy iterator of TagMatch, in document order
//
// The iterator borrows the text, so callers that want to mutate the article
// afterwards collect the matches into a Vec first.
//
// Example input:
//   "See [git:repo=acme/demo,file=main.go] for the code"
//
// Example output:
//   one TagMatch with repository "acme/demo" and filename "main.go"
pub fn scan_tags(text: &str) -> impl Iterator<Item = TagMatch> + '_ {
    GIT_TAG.captures_iter(text).map(|caps| {
        // Optional groups come back as None when the field was omitted
        let optional = |name: &str| caps.name(name).map(|m| m.as_str().to_string());

        TagMatch {
            matched_text: caps[0].to_string(),
            request: EmbedRequest {
                repository: caps["repo"].to_string(),
                filename: caps["file"].to_string(),
                filetype: optional("type")
                    .unwrap_or_else(|| EmbedRequest::DEFAULT_FILETYPE.to_string()),
                branch: optional("branch"),
                commit_hash: optional("hash"),
            },
        }
    })
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is LazyLock?
//    - A container that runs its initializer the first time it is accessed
//    - Compiling a regex is not free, so we do it once and share the result
//    - It lives in std::sync, no extra crate needed
//
// 2. What are named capture groups?
//    - (?P<repo>...) captures a part of the match under the name "repo"
//    - caps["repo"] then reads it back by name instead of by index
//    - Much more readable than caps[2], caps[4], ...
//
// 3. Why Option<String> for branch and hash?
//    - "absent" and "empty" are different things
//    - Downstream code decides what absence means (fall back to master)
//    - Encoding absence in the type beats sentinel values like ""
//
// 4. What does impl Iterator mean as a return type?
//    - "some type that implements Iterator" without spelling out which
//    - The + '_ ties the iterator's lifetime to the borrowed text
//    - Callers can loop over it or .collect() it into a Vec
// -----------------------------------------------------------------------------
