// src/render/template.rs
// =============================================================================
// This module renders the replacement HTML fragment with tera.
//
// How it works:
// 1. Renderer::new() loads the embedded template into a fresh Tera instance
//    and switches autoescaping off for it
// 2. The orchestrator builds a RenderContext per embed request
// 3. render() serializes the context and fills the template
//
// Template placeholders: code, filename, filetype, url, footer, base.
//
// Rust concepts:
// - Owned engine state: Each Renderer has its own Tera, passed explicitly
//   to whoever needs it instead of living in a process-wide static
// - tera::Context::from_serialize: serde struct in, template context out
// =============================================================================

use anyhow::{Context as _, Result};
use serde::Serialize;
use tera::Tera;

/// Name the embedded template is registered under
const GIT_TEMPLATE: &str = "git.html";

/// Base URL the template links back to for the footer credit
pub const ASSET_BASE: &str = "https://github.com/git-embed/git-embed";

/// Footer mode rendering the full source/credit line
pub const FOOTER_FULL: &str = "full";

// Everything the template needs for one fragment
//
// Built immediately before rendering and discarded right after; nothing in
// here is persisted.
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext {
    /// The fetched file body, inserted verbatim
    pub code: String,
    /// Filename shown in the fragment header
    pub filename: String,
    /// Highlighting hint, ends up as a language-* class
    pub filetype: String,
    /// Canonical display URL of the file on GitHub
    pub url: String,
    /// Footer mode; "full" renders the source/credit footer
    pub footer: String,
    /// Base URL for the footer credit link
    pub base: String,
}

// The template engine wrapper
//
// Constructed once per run and handed to the orchestrator explicitly.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Loads the embedded template into a fresh engine
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(GIT_TEMPLATE, include_str!("../../templates/git.html.tera"))
            .context("Failed to load the embedded git template")?;

        // The fetched body goes into the fragment exactly as fetched.
        // Escaping here would corrupt the embedded code for highlighters.
        tera.autoescape_on(vec![]);

        Ok(Self { tera })
    }

    /// Renders the replacement fragment for one embed request
    ///
    /// Pure function of the context fields; rendering the same context twice
    /// yields the same fragment.
    pub fn render(&self, context: &RenderContext) -> Result<String> {
        let tera_context = tera::Context::from_serialize(context)
            .context("Failed to build the template context")?;

        self.tera
            .render(GIT_TEMPLATE, &tera_context)
            .context("Failed to render the git embed template")
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is include_str!?
//    - Reads a file at COMPILE time and embeds it as a &'static str
//    - The binary carries its template; no files to install alongside it
//    - The path is relative to the source file containing the macro
//
// 2. Why is autoescaping off?
//    - Tera escapes HTML entities by default for .html templates
//    - Our code body must survive byte-for-byte (think '<' in C++ includes)
//    - autoescape_on(vec![]) empties the list of autoescaped suffixes
//
// 3. What is `Context as _` in the use line?
//    - anyhow::Context is a trait we only need for its methods
//    - Importing it as _ brings the methods in without taking the name,
//      which would clash with tera::Context
// -----------------------------------------------------------------------------
