//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// grammar-vendor - Keep vendored tree-sitter sources pinned and patched
#[derive(Parser, Debug)]
#[command(name = "grammar-vendor")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Working root holding vendor.toml and the vendored tree
    #[arg(long, global = true, env = "GRAMMAR_VENDOR_ROOT")]
    pub root: Option<PathBuf>,

    /// Configuration file (defaults to <root>/vendor.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Rebuild the vendored engine and every grammar from upstream
    Download,

    /// Compare pinned versions with the newest upstream release tags
    CheckUpdates {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Tag HEAD with {target}/{version} for every vendored grammar
    TagGrammars,

    /// Verify the vendored tree, then run the configured test command
    Test,

    /// Anything else prints usage
    #[command(external_subcommand)]
    Other(Vec<String>),
}
