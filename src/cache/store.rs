// src/cache/store.rs
// =============================================================================
// This module implements the on-disk key->body cache.
//
// How it works:
// 1. Derive a cache key: MD5 over repository, filename and the revision
//    actually used for fetching (commit hash if present, else branch)
// 2. get() reads {key}.cache from the base directory; a missing or
//    unreadable file is simply a miss
// 3. put() writes the body to the same path, overwriting any previous entry
//
// The lookup path and the store path derive the key from the same request
// values. A cached body for one branch of a file is therefore never served
// for a different branch or hash of that file.
//
// Rust concepts:
// - The Digest trait: Same hashing API across md-5, sha2 and friends
// - Result vs Option: Reads fold errors into a miss, writes propagate them
// =============================================================================

use anyhow::{Context, Result};
use md5::{Digest, Md5};
use std::fs;
use std::path::PathBuf;

use crate::scanner::EmbedRequest;

/// Suffix appended to each cache file name
const CACHE_SUFFIX: &str = "cache";

// The flat one-file-per-key store
//
// Holds only the base directory. Whether caching is enabled at all is the
// orchestrator's decision; when disabled, neither get nor put is called.
#[derive(Debug, Clone)]
pub struct CacheStore {
    base: PathBuf,
}

impl CacheStore {
    /// Creates a store rooted at the given directory
    ///
    /// The directory itself is created at startup by the configuration
    /// layer, not here.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Computes the on-disk path for a request's cache entry
    ///
    /// The digest input order is fixed: repository, filename, then the
    /// version selector. Changing any one of the three changes the key.
    pub fn cache_path(&self, request: &EmbedRequest) -> PathBuf {
        let mut hasher = Md5::new();
        hasher.update(request.repository.as_bytes());
        hasher.update(request.filename.as_bytes());
        hasher.update(request.version_selector().as_bytes());
        let digest = hasher.finalize();

        self.base
            .join(format!("{}.{}", hex::encode(digest), CACHE_SUFFIX))
    }

    /// Looks up a previously cached body
    ///
    /// Returns None when no entry exists for the key. A file that exists
    /// but cannot be read (permissions, encoding) also counts as a miss;
    /// the caller will just re-fetch.
    pub fn get(&self, request: &EmbedRequest) -> Option<String> {
        fs::read_to_string(self.cache_path(request)).ok()
    }

    /// Persists a fetched body under the request's key
    ///
    /// Overwrites any existing entry. Write failures propagate; there is no
    /// fallback for a cache directory that went missing mid-run.
    pub fn put(&self, request: &EmbedRequest, body: &str) -> Result<()> {
        let path = self.cache_path(request);
        fs::write(&path, body)
            .with_context(|| format!("Failed to write cache file {}", path.display()))
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why MD5 and not SHA-256?
//    - The key only needs to map a (repo, file, revision) tuple to a stable
//      filename; nothing verifies integrity against an attacker
//    - Keeping MD5 keeps existing cache directories valid
//
// 2. What is impl Into<PathBuf>?
//    - Accepts anything convertible into a PathBuf: &str, String, &Path, ...
//    - Saves callers from writing PathBuf::from(...) everywhere
//
// 3. Why does get() return Option but put() return Result?
//    - A missing entry is normal (first fetch of a file), not an error
//    - .ok() throws away the io::Error and turns a failed read into None
//    - A failed write is real trouble and the caller should hear about it
//
// 4. What does with_context do?
//    - Wraps the underlying error with a human-readable message
//    - The original io::Error stays attached as the cause
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn request(repository: &str, filename: &str) -> EmbedRequest {
        EmbedRequest {
            repository: repository.to_string(),
            filename: filename.to_string(),
            filetype: "text".to_string(),
            branch: None,
            commit_hash: None,
        }
    }

    #[test]
    fn test_put_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::new(dir.path());
        let req = request("acme/demo", "main.go");

        store.put(&req, "package main\n").unwrap();
        assert_eq!(store.get(&req).as_deref(), Some("package main\n"));
    }

    #[test]
    fn test_get_missing_entry_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::new(dir.path());
        assert_eq!(store.get(&request("acme/demo", "main.go")), None);
    }

    #[test]
    fn test_key_is_deterministic() {
        let store = CacheStore::new("/tmp/git-cache");
        let a = store.cache_path(&request("acme/demo", "main.go"));
        let b = store.cache_path(&request("acme/demo", "main.go"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_key_changes_with_each_field() {
        let store = CacheStore::new("/tmp/git-cache");
        let base = store.cache_path(&request("acme/demo", "main.go"));

        assert_ne!(base, store.cache_path(&request("acme/other", "main.go")));
        assert_ne!(base, store.cache_path(&request("acme/demo", "lib.go")));

        let mut branched = request("acme/demo", "main.go");
        branched.branch = Some("dev".to_string());
        assert_ne!(base, store.cache_path(&branched));
    }

    #[test]
    fn test_hash_controls_key_even_with_branch_set() {
        let store = CacheStore::new("/tmp/git-cache");

        // branch differs but the hash pins the revision, so keys agree
        let mut a = request("acme/demo", "main.go");
        a.branch = Some("dev".to_string());
        a.commit_hash = Some("deadbeef".to_string());

        let mut b = request("acme/demo", "main.go");
        b.branch = Some("release".to_string());
        b.commit_hash = Some("deadbeef".to_string());

        assert_eq!(store.cache_path(&a), store.cache_path(&b));
    }

    #[test]
    fn test_cache_filename_shape() {
        let store = CacheStore::new("/tmp/git-cache");
        let path = store.cache_path(&request("acme/demo", "main.go"));
        let name = path.file_name().unwrap().to_str().unwrap();

        // 32 hex digits, a dot, then the suffix
        assert!(name.ends_with(".cache"));
        let digest = name.trim_end_matches(".cache");
        assert_eq!(digest.len(), 32);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_put_overwrites_existing_entry() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::new(dir.path());
        let req = request("acme/demo", "main.go");

        store.put(&req, "old body").unwrap();
        store.put(&req, "new body").unwrap();
        assert_eq!(store.get(&req).as_deref(), Some("new body"));
    }
}
