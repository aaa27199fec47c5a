//! Error types for vendor-git

use std::path::PathBuf;

/// Result type for vendor-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in vendor-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Filesystem error: {0}")]
    Fs(#[from] vendor_fs::Error),

    #[error("Failed to clone {url}: {message}")]
    Clone { url: String, message: String },

    #[error("Tag '{tag}' not found in {url}")]
    TagNotFound { url: String, tag: String },

    #[error("Failed to list tags of {url}: {message}")]
    RemoteQuery { url: String, message: String },

    #[error("No git repository found at or above {path}")]
    RepositoryNotFound { path: PathBuf },

    #[error("Repository at {path} has no commit to tag")]
    NoHead { path: PathBuf },

    #[error("Invalid tag name: {name}")]
    InvalidTagName { name: String },
}
