//! The `download` command

use colored::Colorize;

use vendor_core::{download, fetcher_for};

use super::Workspace;
use crate::error::Result;

/// Rebuild the engine and every grammar. The first failure aborts the run.
pub fn run_download(workspace: &Workspace) -> Result<()> {
    let registry = &workspace.registry;
    println!(
        "{} Vendoring engine {} and {} grammar(s) into {}",
        "=>".blue().bold(),
        registry.engine_version().cyan(),
        registry.grammars().len(),
        workspace.vendor_root().display()
    );

    let fetcher = fetcher_for(&workspace.config.upstream.raw_base_url);
    let report = download(
        registry,
        &workspace.config,
        &workspace.base,
        fetcher.as_ref(),
    )?;

    println!(
        "   {} engine {} ({} files)",
        "+".green(),
        report.engine.version,
        report.engine.files.len()
    );
    for grammar in &report.grammars {
        let target = grammar
            .target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!(
            "   {} {} {} -> {}/ ({} files)",
            "+".green(),
            grammar.name.cyan(),
            grammar.version,
            target,
            grammar.files.len()
        );
    }

    println!(
        "{} Vendored {} grammar(s).",
        "OK".green().bold(),
        report.grammars.len()
    );
    Ok(())
}
