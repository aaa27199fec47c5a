//! The `tag-grammars` command

use colored::Colorize;

use vendor_core::publish_tags;
use vendor_git::TagOutcome;

use super::Workspace;
use crate::error::Result;

/// Tag HEAD of the repository containing the working root.
///
/// Refuses when the vendored tree does not verify.
pub fn run_tag_grammars(workspace: &Workspace) -> Result<()> {
    println!("{} Publishing grammar tags...", "=>".blue().bold());

    let reports = publish_tags(
        &workspace.registry,
        &workspace.vendor_root(),
        &workspace.base,
    )?;
    let mut created = 0;
    for report in &reports {
        match report.outcome {
            TagOutcome::Created => {
                created += 1;
                println!("   {} {}", "+".green(), report.name.cyan());
            }
            TagOutcome::Existing => {
                println!("   {} {} {}", "=".dimmed(), report.name, "(exists)".dimmed());
            }
        }
    }

    println!(
        "{} {} tag(s) created, {} already present.",
        "OK".green().bold(),
        created,
        reports.len() - created
    );
    Ok(())
}
