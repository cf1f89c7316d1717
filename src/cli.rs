// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Enums: Types that can be one of several variants
// - Derive macros: Automatically generate code for our types
// =============================================================================

use clap::{Parser, Subcommand};
use std::path::PathBuf;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "git-embed",
    version = "0.1.0",
    about = "Embed files from GitHub repositories into rendered articles",
    long_about = "git-embed scans rendered article text for [git:...] tags, fetches the \
                  referenced file's raw contents from GitHub and replaces each tag with an \
                  HTML fragment embedding the code. Designed to run as a post-render pass \
                  in a static-site pipeline."
)]
pub struct Cli {
    // The #[command(subcommand)] attribute tells clap that this field
    // will hold one of the subcommands defined in the Commands enum
    #[command(subcommand)]
    pub command: Commands,
}

// This enum defines our subcommands (process, fetch)
//
// Each variant represents a different subcommand the user can run
// The fields inside each variant become the arguments for that subcommand
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replace [git:...] embed tags in article files with fetched code
    ///
    /// Example: git-embed process output/*.html --cache --write
    Process {
        /// Article files to process
        ///
        /// Positional, one or more rendered article files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Write the processed text back to each file
        ///
        /// Without this flag the processed text is printed to stdout
        #[arg(long)]
        write: bool,

        /// Output the per-file report in JSON format instead of a table
        #[arg(long)]
        json: bool,

        /// Enable the on-disk fetch cache
        ///
        /// Off by default: every tag re-fetches on every run
        #[arg(long)]
        cache: bool,

        /// Directory for cache files (default: <system temp>/git-cache)
        #[arg(long)]
        cache_dir: Option<PathBuf>,

        /// JSON settings file; flags override its values
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Fetch one file's raw contents and print them to stdout
    ///
    /// Example: git-embed fetch rust-lang/rust src/lib.rs --branch beta
    Fetch {
        /// Repository in owner/name form
        repo: String,

        /// Path of the file within the repository
        file: String,

        /// Branch to fetch from (default: master)
        #[arg(long)]
        branch: Option<String>,

        /// Commit hash pinning the exact revision; wins over --branch
        #[arg(long)]
        hash: Option<String>,
    },
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why use structs and enums?
//    - Structs group related data (like the CLI arguments)
//    - Enums represent choices (like "process OR fetch")
//    - Both are core Rust types for organizing data
//
// 2. What are derive macros?
//    - #[derive(...)] automatically generates code for common operations
//    - Parser: generates CLI parsing logic
//    - Debug: generates code to print the struct for debugging
//
// 3. What is Option<PathBuf>?
//    - An optional flag: None when the user did not pass it
//    - Lets the caller tell "not given" apart from "given as empty"
//
// 4. Why Vec<PathBuf> with required = true?
//    - Positional arguments collect into the Vec in order
//    - required = true makes clap reject a bare `git-embed process`
// -----------------------------------------------------------------------------
