//! Command implementations for vendor-cli

pub mod check_updates;
pub mod download;
pub mod tag;
pub mod test;

use std::path::{Path, PathBuf};

use vendor_core::{Config, Registry};

use crate::error::Result;

pub use check_updates::run_check_updates;
pub use download::run_download;
pub use tag::run_tag_grammars;
pub use test::run_test;

/// Resolved working root, its configuration and the registry it selects.
#[derive(Debug)]
pub struct Workspace {
    pub base: PathBuf,
    pub config: Config,
    pub registry: Registry,
}

impl Workspace {
    /// Resolve `root` (default: current directory) and load its configuration.
    pub fn load(root: Option<&Path>, config: Option<&Path>) -> Result<Self> {
        let base = match root {
            Some(root) => dunce::canonicalize(root)?,
            None => std::env::current_dir()?,
        };
        let config = Config::load(&base, config)?;
        let registry = config.registry()?;
        tracing::debug!(
            base = %base.display(),
            grammars = registry.grammars().len(),
            "workspace loaded"
        );
        Ok(Self {
            base,
            config,
            registry,
        })
    }

    pub fn vendor_root(&self) -> PathBuf {
        self.config.vendor_root(&self.base)
    }
}
