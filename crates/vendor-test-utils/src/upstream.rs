//! [`UpstreamMirror`]: an offline upstream for synchronizer tests.
//!
//! Layout inside the temp dir:
//!
//! ```text
//! raw/{repository}/{tag}/{path}   files served to the mirror fetcher
//! git/{repository}/               git repositories with release tags
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::git;

/// A temporary directory that stands in for both upstream hosts.
pub struct UpstreamMirror {
    temp_dir: TempDir,
}

impl Default for UpstreamMirror {
    fn default() -> Self {
        Self::new()
    }
}

impl UpstreamMirror {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("raw")).unwrap();
        fs::create_dir_all(temp_dir.path().join("git")).unwrap();
        Self { temp_dir }
    }

    /// Base to configure as the raw-file host.
    pub fn raw_base(&self) -> PathBuf {
        self.temp_dir.path().join("raw")
    }

    /// Base to configure as the git host.
    pub fn git_base(&self) -> PathBuf {
        self.temp_dir.path().join("git")
    }

    /// Publish `content` as `{repository}/{tag}/{path}` on the raw host.
    pub fn add_file(&self, repository: &str, tag: &str, path: &str, content: &str) -> &Self {
        let target = self.raw_base().join(repository).join(tag).join(path);
        fs::create_dir_all(target.parent().unwrap()).unwrap();
        fs::write(&target, content).unwrap();
        self
    }

    /// Create a git repository `{repository}` on the git host holding
    /// `files`, committed once and tagged with every entry of `tags`.
    pub fn add_git_repo(&self, repository: &str, files: &[(&str, &str)], tags: &[&str]) -> PathBuf {
        let path = self.git_base().join(repository);
        fs::create_dir_all(&path).unwrap();
        let repo = git::repo_with_commit(&path);

        for (relative, content) in files {
            write_file(&path, relative, content);
        }
        if !files.is_empty() {
            git::commit_all(&repo, "Add sources");
        }
        for tag in tags {
            git::tag_head(&repo, tag);
        }
        path
    }
}

fn write_file(root: &Path, relative: &str, content: &str) {
    let target = root.join(relative);
    fs::create_dir_all(target.parent().unwrap()).unwrap();
    fs::write(target, content).unwrap();
}
