// src/config.rs
// =============================================================================
// This file holds the tool's configuration: whether the fetch cache is on,
// and where cache files live.
//
// Resolution order (later wins):
// 1. Built-in defaults (cache off, cache dir under the system temp dir)
// 2. An optional JSON settings file passed with --config
// 3. Command-line flags (--cache, --cache-dir)
//
// ensure_cache_dir() is the startup hook: it creates the cache directory
// (and parents) before any processing begins, so the store never has to.
//
// Rust concepts:
// - serde defaults: Missing settings-file keys fall back per field
// - PathBuf: Owned paths that work on every platform
// =============================================================================

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// The recognized settings
//
// #[serde(default)] means a settings file may name only the keys it wants
// to change; everything else keeps its default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedConfig {
    /// Consult and fill the on-disk cache (default: off, always re-fetch)
    pub cache_enabled: bool,
    /// Directory holding the {md5-hex}.cache files
    pub cache_location: PathBuf,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            cache_enabled: false,
            cache_location: std::env::temp_dir().join("git-cache"),
        }
    }
}

impl EmbedConfig {
    /// Loads settings from a JSON file
    ///
    /// Example file:
    ///   { "cache_enabled": true, "cache_location": "/var/cache/git-embed" }
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))
    }

    /// Creates the cache directory if it does not exist yet
    ///
    /// Runs once at startup, before the first article is processed.
    pub fn ensure_cache_dir(&self) -> Result<()> {
        if !self.cache_location.exists() {
            fs::create_dir_all(&self.cache_location).with_context(|| {
                format!(
                    "Failed to create cache directory {}",
                    self.cache_location.display()
                )
            })?;
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does #[serde(default)] on the struct do?
//    - During deserialization, any missing field takes its Default value
//    - Combined with impl Default, a settings file can be partial: just
//      {"cache_enabled": true} is a valid file
//
// 2. Why std::env::temp_dir()?
//    - /tmp on Linux, the proper temp folder elsewhere
//    - The cache is throwaway data, so the temp dir is the natural default
//
// 3. Why check exists() before create_dir_all?
//    - create_dir_all already tolerates existing directories
//    - The check keeps the common warm-start path free of syscalls that
//      would fail on a read-only parent
// -----------------------------------------------------------------------------
