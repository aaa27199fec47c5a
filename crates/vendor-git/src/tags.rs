//! Idempotent local tag creation

use std::path::Path;

use git2::{ErrorCode, Reference, Repository};

use crate::{Error, Result};

/// What [`ensure_tag`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagOutcome {
    /// The tag was created at HEAD.
    Created,
    /// A tag with that name already existed and was left alone.
    Existing,
}

/// Open the repository containing `path`.
pub fn open_repository(path: &Path) -> Result<Repository> {
    Repository::discover(path).map_err(|_| Error::RepositoryNotFound {
        path: path.to_path_buf(),
    })
}

/// Check whether `refs/tags/{name}` exists.
pub fn tag_exists(repo: &Repository, name: &str) -> Result<bool> {
    match repo.find_reference(&format!("refs/tags/{name}")) {
        Ok(_) => Ok(true),
        Err(e) if e.code() == ErrorCode::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Create a lightweight tag `name` at HEAD unless it already exists.
///
/// Existing tags are never moved, even when they point at another commit.
pub fn ensure_tag(repo: &Repository, name: &str) -> Result<TagOutcome> {
    if !Reference::is_valid_name(&format!("refs/tags/{name}")) {
        return Err(Error::InvalidTagName {
            name: name.to_string(),
        });
    }

    if tag_exists(repo, name)? {
        tracing::info!(tag = %name, "tag already exists, skipping");
        return Ok(TagOutcome::Existing);
    }

    let head = repo
        .head()
        .and_then(|head| head.peel_to_commit())
        .map_err(|_| Error::NoHead {
            path: repo.workdir().unwrap_or(repo.path()).to_path_buf(),
        })?;

    repo.tag_lightweight(name, head.as_object(), false)?;
    tracing::info!(tag = %name, commit = %head.id(), "created tag");
    Ok(TagOutcome::Created)
}
