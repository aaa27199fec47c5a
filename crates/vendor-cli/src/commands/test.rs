//! The `test` command

use colored::Colorize;

use vendor_core::{run_test_command, verify_tree};

use super::Workspace;
use crate::error::Result;

/// Verify the vendored tree, then hand over to the configured test command.
pub fn run_test(workspace: &Workspace) -> Result<()> {
    println!("{} Verifying vendored tree...", "=>".blue().bold());

    let report = verify_tree(&workspace.registry, &workspace.vendor_root())?;
    if !report.is_clean() {
        println!("{} Vendored tree is inconsistent:", "ERROR".red().bold());
        for violation in &report.violations {
            println!("   {} {}", "-".red(), violation);
        }
        println!();
        println!("Run {} to rebuild it.", "grammar-vendor download".cyan());
        return Err(vendor_core::Error::VerifyFailed {
            count: report.violations.len(),
        }
        .into());
    }
    println!(
        "{} {} grammar directories verified.",
        "OK".green().bold(),
        report.checked
    );

    let command = &workspace.config.test.command;
    if command.is_empty() {
        println!("No test command configured.");
        return Ok(());
    }
    println!("{} Running {}", "=>".blue().bold(), command.join(" ").cyan());
    run_test_command(command, &workspace.base)?;
    println!("{} Tests passed.", "OK".green().bold());
    Ok(())
}
