//! External test runner for the `test` verb

use std::path::Path;
use std::process::Command;

use crate::{Error, Result};

/// Run `command` (program followed by arguments) in `dir`.
///
/// An empty command is skipped. A non-zero exit is [`Error::TestFailed`].
pub fn run_test_command(command: &[String], dir: &Path) -> Result<()> {
    let Some((program, args)) = command.split_first() else {
        tracing::info!("no test command configured, skipping");
        return Ok(());
    };

    let rendered = command.join(" ");
    tracing::info!(command = %rendered, dir = %dir.display(), "running tests");

    let status = Command::new(program)
        .args(args)
        .current_dir(dir)
        .status()
        .map_err(|e| Error::TestFailed {
            command: rendered.clone(),
            status: e.to_string(),
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(Error::TestFailed {
            command: rendered,
            status: status.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cmd(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_empty_command_is_skipped() {
        let temp = TempDir::new().unwrap();
        run_test_command(&[], temp.path()).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_command() {
        let temp = TempDir::new().unwrap();
        run_test_command(&cmd(&["true"]), temp.path()).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_command() {
        let temp = TempDir::new().unwrap();
        let err = run_test_command(&cmd(&["false"]), temp.path()).unwrap_err();
        assert!(matches!(err, Error::TestFailed { .. }));
    }

    #[test]
    fn test_missing_program() {
        let temp = TempDir::new().unwrap();
        let err = run_test_command(&cmd(&["definitely-not-a-real-program-xyz"]), temp.path())
            .unwrap_err();
        assert!(err.to_string().contains("definitely-not-a-real-program-xyz"));
    }
}
