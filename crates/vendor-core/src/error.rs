//! Error types for vendor-core

use std::path::PathBuf;

/// Result type for vendor-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in vendor-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A file could not be retrieved from upstream. Aborts the run.
    #[error("Failed to fetch {url}: {message}")]
    Transport { url: String, message: String },

    /// A file could not be patched as the registry requires. Aborts the run.
    #[error("Patch failed for {path}: {message}")]
    Patch { path: PathBuf, message: String },

    /// Remote tags could not be listed for one repository.
    #[error("Cannot list release tags of {repository}: {message}")]
    VersionQuery { repository: String, message: String },

    /// Failure while synchronizing one grammar.
    #[error("grammar '{name}': {source}")]
    Grammar {
        name: String,
        #[source]
        source: Box<Error>,
    },

    /// Failure while synchronizing the engine.
    #[error("engine {version}: {source}")]
    Engine {
        version: String,
        #[source]
        source: Box<Error>,
    },

    /// Configuration file explicitly requested but absent.
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file could not be parsed.
    #[error("Invalid configuration at {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// Registry data violates an invariant.
    #[error("Invalid registry: {message}")]
    InvalidRegistry { message: String },

    /// A rewrite rule pattern did not compile.
    #[error("Invalid rewrite pattern '{pattern}': {message}")]
    InvalidRule { pattern: String, message: String },

    /// The vendored tree on disk failed verification.
    #[error("Vendored tree has {count} violation(s)")]
    VerifyFailed { count: usize },

    /// The external test command failed.
    #[error("Test command `{command}` failed: {status}")]
    TestFailed { command: String, status: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from vendor-fs
    #[error(transparent)]
    Fs(#[from] vendor_fs::Error),

    /// Git error from vendor-git
    #[error(transparent)]
    Git(#[from] vendor_git::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn patch(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Patch {
            path: path.into(),
            message: message.into(),
        }
    }

    pub(crate) fn in_grammar(name: &str, source: Error) -> Self {
        Self::Grammar {
            name: name.to_string(),
            source: Box::new(source),
        }
    }

    pub(crate) fn in_engine(version: &str, source: Error) -> Self {
        Self::Engine {
            version: version.to_string(),
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grammar_error_names_grammar_and_file() {
        let err = Error::in_grammar(
            "go",
            Error::Transport {
                url: "https://example.test/tree-sitter/tree-sitter-go/v0.16.0/src/parser.c".into(),
                message: "HTTP 404".into(),
            },
        );

        let display = err.to_string();
        assert!(display.contains("grammar 'go'"), "got: {display}");
        assert!(display.contains("src/parser.c"), "got: {display}");
        assert!(display.contains("404"), "got: {display}");
    }
}
