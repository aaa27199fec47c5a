//! The `check-updates` command
//!
//! Read-only. Outdated or unknown items are reported, never treated as
//! failures.

use colored::Colorize;

use vendor_core::{FreshnessEntry, FreshnessStatus, GitTagSource, check_updates};

use super::Workspace;
use crate::error::Result;

pub fn run_check_updates(workspace: &Workspace, json: bool) -> Result<()> {
    let source = GitTagSource::new(workspace.config.upstream.git_base_url.clone());

    if !json {
        println!("{} Checking upstream release tags...", "=>".blue().bold());
    }
    let entries = check_updates(&workspace.registry, &source);

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for entry in &entries {
        print_entry(entry);
    }

    let outdated = entries.iter().filter(|e| e.is_outdated()).count();
    if outdated == 0 {
        println!("{} Everything is up to date.", "OK".green().bold());
    } else {
        println!(
            "{} {} item(s) have newer releases.",
            "OUTDATED".yellow().bold(),
            outdated
        );
    }
    Ok(())
}

fn print_entry(entry: &FreshnessEntry) {
    match &entry.status {
        FreshnessStatus::UpToDate => println!(
            "   {} {} {}",
            "=".green(),
            entry.name.cyan(),
            entry.vendored_version
        ),
        FreshnessStatus::Outdated => println!(
            "   {} {} {} -> {}",
            "!".yellow(),
            entry.name.cyan(),
            entry.vendored_version,
            entry.remote_latest.as_deref().unwrap_or("?").yellow()
        ),
        FreshnessStatus::Unknown { reason } => println!(
            "   {} {} {} ({})",
            "?".red(),
            entry.name.cyan(),
            entry.vendored_version,
            reason.dimmed()
        ),
    }
}
