//! Tagged clones of upstream repositories

use std::path::Path;

use git2::build::{CheckoutBuilder, RepoBuilder};

use crate::{Error, Result};

/// Clone `url` into `dest` and check out the release `tag` with a detached HEAD.
///
/// Whatever was at `dest` before is removed first, so the result is always a
/// fresh tree. A tag missing upstream is reported as [`Error::TagNotFound`].
pub fn clone_at_tag(url: &str, dest: &Path, tag: &str) -> Result<()> {
    vendor_fs::remove_tree(dest)?;
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::Clone {
            url: url.to_string(),
            message: format!("Failed to create {}: {}", parent.display(), e),
        })?;
    }

    tracing::info!(url = %url, tag = %tag, dest = %dest.display(), "cloning upstream");

    let repo = RepoBuilder::new()
        .clone(url, dest)
        .map_err(|e| Error::Clone {
            url: url.to_string(),
            message: e.message().to_string(),
        })?;

    let object = repo
        .revparse_single(&format!("refs/tags/{tag}"))
        .map_err(|_| Error::TagNotFound {
            url: url.to_string(),
            tag: tag.to_string(),
        })?;
    let commit = object.peel_to_commit()?;

    repo.checkout_tree(commit.as_object(), Some(CheckoutBuilder::new().force()))
        .map_err(|e| Error::Clone {
            url: url.to_string(),
            message: format!("Failed to checkout {}: {}", tag, e.message()),
        })?;
    repo.set_head_detached(commit.id())?;

    tracing::debug!(tag = %tag, commit = %commit.id(), "checked out release tag");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn clone_rejects_invalid_url() {
        let temp = TempDir::new().unwrap();
        let result = clone_at_tag("not-a-valid-url", &temp.path().join("scratch"), "v1.0.0");
        assert!(matches!(result, Err(Error::Clone { .. })));
    }
}
