// src/render/mod.rs
// =============================================================================
// This module turns a fetched file body into the HTML fragment that
// replaces the embed tag in the article.
//
// Features:
// - A single fixed template, compiled into the binary
// - A tera environment owned by an explicit Renderer value (no globals)
// - Verbatim insertion of the fetched body: autoescaping is off
//
// The unescaped insertion is deliberate. Articles embed files from
// repositories their author trusts; the fragment must carry the code
// exactly as fetched so client-side highlighters see the real text.
//
// Rust concepts:
// - include_str!: Embed a file's contents in the binary at compile time
// - serde Serialize: The render context becomes the template context
// =============================================================================

mod template;

// Re-export the rendering API
pub use template::{RenderContext, Renderer, ASSET_BASE, FOOTER_FULL};
