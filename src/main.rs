// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Resolve configuration (defaults -> settings file -> flags) and make
//    sure the cache directory exists
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code (0 = success, 2 = error)
//
// Rust concepts used:
// - async/await: The fetch path does network I/O
// - Result<T, E>: For error handling (T = success type, E = error type)
// - match: Pattern matching to handle different subcommands
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cache; // src/cache/ - on-disk body cache
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - settings and the startup hook
mod github; // src/github/ - URL building and raw-content fetching
mod processor; // src/processor/ - the scan-fetch-replace pass
mod render; // src/render/ - HTML fragment templating
mod scanner; // src/scanner/ - [git:...] tag parsing

// Import items we need from our modules
use clap::Parser; // Parser trait enables the parse() method
use cli::{Cli, Commands};
use config::EmbedConfig;
use github::{Fetch, GithubFetcher};
use processor::{EmbedReport, Processor};
use render::Renderer;
use scanner::EmbedRequest;
use std::path::PathBuf;

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::{Context, Result};

// The #[tokio::main] attribute transforms our async main into a real main
// function. It creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    // Library modules log through tracing; RUST_LOG picks the verbosity
    // (e.g. RUST_LOG=git_embed=debug). Logs go to stderr so stdout stays
    // clean for processed article text
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Run our application logic and capture the exit code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = success
//   Err = processing or fetch error (exit code 2)
async fn run() -> Result<i32> {
    // Parse command-line arguments into our Cli struct
    // This will automatically handle --help, --version, etc.
    let cli = Cli::parse();

    // Match on which subcommand was used
    match cli.command {
        Commands::Process {
            files,
            write,
            json,
            cache,
            cache_dir,
            config,
        } => handle_process(files, write, json, cache, cache_dir, config).await,
        Commands::Fetch {
            repo,
            file,
            branch,
            hash,
        } => handle_fetch(repo, file, branch, hash).await,
    }
}

// Handles the 'process' subcommand: the batch scan-fetch-replace pass
//
// Parameters mirror the CLI flags; config resolution order is
// defaults -> settings file -> flags.
async fn handle_process(
    files: Vec<PathBuf>,
    write: bool,
    json: bool,
    cache: bool,
    cache_dir: Option<PathBuf>,
    config_file: Option<PathBuf>,
) -> Result<i32> {
    // Start from the settings file when given, defaults otherwise
    let mut config = match config_file {
        Some(path) => EmbedConfig::from_file(&path)?,
        None => EmbedConfig::default(),
    };

    // Flags override whatever the file said
    if cache {
        config.cache_enabled = true;
    }
    if let Some(dir) = cache_dir {
        config.cache_location = dir;
    }

    // Startup hook: the cache directory must exist before the first put
    config.ensure_cache_dir()?;

    println!("🔍 Processing {} article file(s)", files.len());
    if config.cache_enabled {
        println!("💾 Cache enabled at {}", config.cache_location.display());
    }

    // One processor for the whole batch: shared HTTP client, shared
    // template engine
    let processor = Processor::new(config, Renderer::new()?, GithubFetcher::new());

    let mut reports = Vec::new();
    for path in &files {
        let mut content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read article file {}", path.display()))?;

        // A failing embed aborts the whole run; the host pipeline decides
        // whether to isolate per-article failures, we do not
        let tags_replaced = processor.process_article(&mut content).await?;

        if write {
            std::fs::write(path, &content)
                .with_context(|| format!("Failed to write article file {}", path.display()))?;
        } else {
            println!("{}", content);
        }

        reports.push(EmbedReport {
            file: path.display().to_string(),
            tags_replaced,
        });
    }

    print_reports(&reports, json)?;
    Ok(0)
}

// Handles the 'fetch' subcommand: one raw fetch straight to stdout
//
// Useful for checking what a tag would embed before publishing.
async fn handle_fetch(
    repo: String,
    file: String,
    branch: Option<String>,
    hash: Option<String>,
) -> Result<i32> {
    let request = EmbedRequest {
        repository: repo,
        filename: file,
        filetype: EmbedRequest::DEFAULT_FILETYPE.to_string(),
        branch,
        commit_hash: hash,
    };

    let body = GithubFetcher::new().fetch(&request).await?;
    print!("{}", body);
    Ok(0)
}

// Prints the per-file report either as a table or JSON
// Parameters:
//   reports: slice of EmbedReport structs
//   json: whether to output JSON format
fn print_reports(reports: &[EmbedReport], json: bool) -> Result<()> {
    if json {
        // Serialize reports to JSON and print
        let json_output = serde_json::to_string_pretty(reports)?;
        println!("{}", json_output);
    } else {
        // Print human-readable table
        print_table(reports);
    }
    Ok(())
}

// Prints the report as a human-readable table in the terminal
fn print_table(reports: &[EmbedReport]) {
    println!("{:<60} {:<15}", "FILE", "TAGS REPLACED");
    println!("{}", "=".repeat(75));

    for report in reports {
        // Truncate the path if too long for display
        let file_display = if report.file.len() > 57 {
            format!("{}...", &report.file[..57])
        } else {
            report.file.clone()
        };

        println!("{:<60} {:<15}", file_display, report.tags_replaced);
    }

    println!();

    // Print summary
    let total: usize = reports.iter().map(|r| r.tags_replaced).sum();
    println!("📊 Summary:");
    println!("   📄 Files: {}", reports.len());
    println!("   ✅ Tags replaced: {}", total);
}
