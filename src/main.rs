//! pychub - Python wheel bundler
//!
//! Packages a main wheel, its declared dependencies, install scripts,
//! auxiliary files and metadata into a single deterministic `.chub` archive.

use clap::Parser;
use miette::Diagnostic;
use tracing_subscriber::EnvFilter;

mod archive;
mod cli;
mod commands;
mod config;
mod error;
mod hash;
mod path_utils;
mod progress;
mod resolver;
mod source;
mod temp;
mod wheel;

#[cfg(test)]
mod test_fixtures;

use cli::Cli;

/// Filter used when `RUST_LOG` is unset
fn default_filter(verbose: bool) -> &'static str {
    if verbose { "pychub=debug" } else { "pychub=info" }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = commands::build::run(cli) {
        tracing::debug!(category = ?e.category(), "Command failed");
        eprintln!("Error: {}", e);
        if let Some(help) = e.help() {
            eprintln!("  help: {}", help);
        }
        std::process::exit(1);
    }
}
