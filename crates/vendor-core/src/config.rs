//! `vendor.toml` loading
//!
//! Every section is optional; a missing file means all defaults. Relative
//! paths are resolved against the workspace base directory (the CLI's
//! `--root`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::registry::{Registry, RegistryManifest};
use crate::{Error, Result};

/// Default configuration file name, looked up in the workspace base.
pub const CONFIG_FILE_NAME: &str = "vendor.toml";

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_scratch() -> PathBuf {
    PathBuf::from(".vendor-scratch")
}

fn default_raw_base_url() -> String {
    "https://raw.githubusercontent.com".to_string()
}

fn default_git_base_url() -> String {
    "https://github.com".to_string()
}

fn default_test_command() -> Vec<String> {
    vec!["go".to_string(), "test".to_string(), "./...".to_string()]
}

/// Where vendored files land.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsSection {
    /// Destination of engine files and grammar directories.
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// Scratch location for the engine clone, deleted after each sync.
    #[serde(default = "default_scratch")]
    pub scratch: PathBuf,
}

impl Default for PathsSection {
    fn default() -> Self {
        Self {
            root: default_root(),
            scratch: default_scratch(),
        }
    }
}

/// Upstream hosts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamSection {
    /// Raw file host; a non-HTTP value is treated as a local mirror directory.
    #[serde(default = "default_raw_base_url")]
    pub raw_base_url: String,
    /// Git host used for engine clones and tag listing.
    #[serde(default = "default_git_base_url")]
    pub git_base_url: String,
}

impl Default for UpstreamSection {
    fn default() -> Self {
        Self {
            raw_base_url: default_raw_base_url(),
            git_base_url: default_git_base_url(),
        }
    }
}

/// External test runner invoked by the `test` verb.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSection {
    /// Program and arguments; empty disables the runner.
    #[serde(default = "default_test_command")]
    pub command: Vec<String>,
}

impl Default for TestSection {
    fn default() -> Self {
        Self {
            command: default_test_command(),
        }
    }
}

/// Parsed `vendor.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsSection,
    #[serde(default)]
    pub upstream: UpstreamSection,
    #[serde(default)]
    pub test: TestSection,
    /// Replaces the builtin registry when present.
    #[serde(default)]
    pub registry: Option<RegistryManifest>,
}

impl Config {
    /// Parse configuration from TOML text. `origin` is only used in errors.
    pub fn parse(content: &str, origin: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load configuration for the workspace at `base`.
    ///
    /// With `explicit` set the file must exist. Otherwise `base/vendor.toml`
    /// is used when present and defaults apply when it is not.
    pub fn load(base: &Path, explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => {
                let path = base.join(path);
                if !path.is_file() {
                    return Err(Error::ConfigNotFound { path });
                }
                path
            }
            None => {
                let path = base.join(CONFIG_FILE_NAME);
                if !path.is_file() {
                    tracing::debug!(base = %base.display(), "no vendor.toml, using defaults");
                    return Ok(Self::default());
                }
                path
            }
        };

        tracing::debug!(path = %path.display(), "loading configuration");
        let content = vendor_fs::read_text(&path)?;
        Self::parse(&content, &path)
    }

    /// The registry declared in the file, or the builtin one.
    pub fn registry(&self) -> Result<Registry> {
        match &self.registry {
            Some(manifest) => Registry::from_manifest(manifest.clone()),
            None => Ok(Registry::builtin()),
        }
    }

    /// Absolute destination root for the workspace at `base`.
    pub fn vendor_root(&self, base: &Path) -> PathBuf {
        base.join(&self.paths.root)
    }

    /// Absolute scratch directory for the workspace at `base`.
    pub fn scratch_dir(&self, base: &Path) -> PathBuf {
        base.join(&self.paths.scratch)
    }
}
