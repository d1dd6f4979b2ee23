// Declare modules
pub mod builder;
pub mod cli;
pub mod config;
pub mod decode;
pub mod formatter;
pub mod models;
pub mod scanner;

use anyhow::{Context, Result};
use clap::Parser;
use std::env;

use self::builder::DumpBuilder;
use self::cli::Cli;
use self::config::{load_presets_file, resolve_config};

/// Initializes components and orchestrates data flow.
pub fn run() -> Result<()> {
    // 1. Parse Args
    let args = Cli::parse();

    // 2. Identify traversal root & project name
    let current_dir = env::current_dir().context("Failed to get current directory")?;
    let root = match &args.root {
        Some(root) => current_dir.join(root),
        None => current_dir,
    };
    let canonical = root
        .canonicalize()
        .with_context(|| format!("Cannot access root directory {}", root.display()))?;
    let project_name = canonical.file_name().and_then(|n| n.to_str());

    // 3. Resolve configuration
    let presets = load_presets_file(args.config.as_deref())?;
    let config = resolve_config(args, project_name, &presets)?;

    // 4. Build the dump
    let builder = DumpBuilder::new(config);
    let output = builder.config().output.display().to_string();
    log::info!("Starting project dump... Output will be in '{}'", output);

    let summary = builder.run(root)?;

    if summary.files_failed > 0 {
        log::warn!("{} file(s) could not be read and were skipped", summary.files_failed);
    }
    if !summary.lossy_files.is_empty() {
        log::warn!(
            "Dropped {} undecodable byte(s) from {} file(s): {}",
            summary.dropped_bytes,
            summary.lossy_files.len(),
            summary.lossy_files.join(", ")
        );
    }

    // 5. Report
    println!("{}", "-".repeat(20));
    println!(
        "✅ Success! Project dump with {} file(s) created at '{}'.",
        summary.files_written, output
    );

    Ok(())
}
