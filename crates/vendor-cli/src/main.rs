//! grammar-vendor CLI
//!
//! Vendors the tree-sitter engine and a pinned set of grammars, checks them
//! for upstream updates and publishes per-grammar tags.

mod cli;
mod commands;
mod error;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::Workspace;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(command) = cli.command else {
        return print_usage();
    };

    let workspace = || Workspace::load(cli.root.as_deref(), cli.config.as_deref());
    match command {
        Commands::Download => commands::run_download(&workspace()?),
        Commands::CheckUpdates { json } => commands::run_check_updates(&workspace()?, json),
        Commands::TagGrammars => commands::run_tag_grammars(&workspace()?),
        Commands::Test => commands::run_test(&workspace()?),
        Commands::Other(args) => {
            tracing::debug!(?args, "unrecognized verb");
            print_usage()
        }
    }
}

/// Logs go to stderr so `check-updates --json` stays parseable. `-v` forces
/// debug, otherwise `RUST_LOG` applies with a default of `warn`.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .try_init();
    if verbose {
        tracing::debug!("Verbose mode enabled");
    }
}

fn print_usage() -> Result<()> {
    Cli::command().print_help()?;
    println!();
    Ok(())
}
