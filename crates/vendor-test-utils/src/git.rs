//! Git repository fixtures built with `git2`.
//!
//! Commits use a fixed signature so tests never depend on the user's git
//! configuration.

use std::fs;
use std::path::Path;

use git2::{IndexAddOption, Oid, Repository, Signature};

fn signature() -> Signature<'static> {
    Signature::now("Test User", "test@example.com")
        .unwrap_or_else(|e| panic!("signature: {e}"))
}

/// Initialise a repository at `path` with a single commit containing `README.md`.
///
/// # Panics
/// Panics if any git or filesystem operation fails.
pub fn repo_with_commit(path: &Path) -> Repository {
    let repo = Repository::init(path)
        .unwrap_or_else(|e| panic!("repo_with_commit: init {}: {e}", path.display()));
    fs::write(path.join("README.md"), "# Test\n")
        .unwrap_or_else(|e| panic!("repo_with_commit: write README.md: {e}"));
    commit_all(&repo, "Initial commit");
    repo
}

/// Stage every file in the working tree and commit it on HEAD.
///
/// # Panics
/// Panics if any git operation fails.
pub fn commit_all(repo: &Repository, message: &str) -> Oid {
    let mut index = repo.index().unwrap();
    index
        .add_all(["*"], IndexAddOption::DEFAULT, None)
        .unwrap();
    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();

    let sig = signature();
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .unwrap_or_else(|e| panic!("commit_all: {e}"))
}

/// Create a lightweight tag at HEAD.
///
/// # Panics
/// Panics if HEAD cannot be resolved or the tag exists.
pub fn tag_head(repo: &Repository, name: &str) {
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    repo.tag_lightweight(name, head.as_object(), false)
        .unwrap_or_else(|e| panic!("tag_head: {name}: {e}"));
}

/// Names of all tags in the repository, sorted.
pub fn tag_names(repo: &Repository) -> Vec<String> {
    let mut names: Vec<String> = repo
        .tag_names(None)
        .unwrap()
        .iter()
        .flatten()
        .map(str::to_string)
        .collect();
    names.sort();
    names
}
