//! `acknowledgr`: collect the license texts of a project's installed
//! dependencies into one Markdown acknowledgments document.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load generator config ([`config::load_config`]).
//! 3. List the declared runtime dependencies ([`analyzer`]).
//! 4. Resolve each dependency's license text with bounded concurrency ([`license`]).
//! 5. Assemble the document ([`report::markdown`]).
//! 6. Format it with the project's Prettier options ([`format`]) and write it ([`writer`]).
//! 7. Exit `0` after the write, `1` on any failure.

mod analyzer;
mod cli;
mod config;
mod error;
mod format;
mod license;
mod models;
mod pipeline;
mod report;
mod writer;

use anyhow::Result;
use chrono::Datelike;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::load_config;
use license::{LocalFs, Resolver};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        tracing::debug!(error = ?err, "generation failed");
        eprintln!("{} {}", "error:".red().bold(), err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Resolve project path
    let root = cli
        .path
        .canonicalize()
        .unwrap_or_else(|_| cli.path.clone());

    let config = load_config(&root, cli.config.as_deref())?;
    let resolver = Resolver::from_config(LocalFs, &root, &config);
    let current_year = chrono::Local::now().year();

    let pb = if !cli.quiet {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )?
                .progress_chars("#>-"),
        );
        pb.set_message("Resolving licenses");
        Some(pb)
    } else {
        None
    };

    let result = pipeline::generate(&root, &config, &resolver, current_year, pb.as_ref()).await;

    if let Some(pb) = &pb {
        pb.finish_and_clear();
    }
    let acknowledgments = result?;

    report::terminal::render(
        &acknowledgments.records,
        &acknowledgments.destination,
        cli.verbose,
        cli.quiet,
    );

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over the `--verbose` default.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
