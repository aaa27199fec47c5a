//! Freshness checker.
//!
//! Compares each pinned version with the newest release tag upstream. The
//! comparison is exact-match: anything other than the newest release, a
//! pre-release newer than it included, is reported as outdated.

use serde::Serialize;

use crate::engine::join_url;
use crate::registry::Registry;
use crate::version::latest_release;
use crate::{Error, Result};

/// Lists the tags of an upstream repository.
pub trait TagSource {
    fn list_tags(&self, repository: &str) -> Result<Vec<String>>;
}

/// [`TagSource`] backed by a git remote (`git ls-remote --tags`).
pub struct GitTagSource {
    base_url: String,
}

impl GitTagSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl TagSource for GitTagSource {
    fn list_tags(&self, repository: &str) -> Result<Vec<String>> {
        let url = join_url(&self.base_url, repository);
        vendor_git::list_remote_tags(&url).map_err(|e| Error::VersionQuery {
            repository: repository.to_string(),
            message: e.to_string(),
        })
    }
}

/// Result of comparing one pinned version with upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FreshnessStatus {
    UpToDate,
    Outdated,
    /// Upstream could not be queried or has no release tags.
    Unknown { reason: String },
}

/// One line of the `check-updates` report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FreshnessEntry {
    pub name: String,
    pub repository: String,
    pub vendored_version: String,
    pub remote_latest: Option<String>,
    pub status: FreshnessStatus,
}

impl FreshnessEntry {
    pub fn is_outdated(&self) -> bool {
        self.status == FreshnessStatus::Outdated
    }
}

/// Check one item against its upstream repository.
///
/// A failed tag query affects only this entry.
pub fn check_item(
    name: &str,
    repository: &str,
    vendored_version: &str,
    source: &dyn TagSource,
) -> FreshnessEntry {
    let (remote_latest, status) = match source.list_tags(repository) {
        Ok(tags) => match latest_release(tags.iter().map(String::as_str)) {
            Some(latest) if latest == vendored_version => {
                (Some(latest.to_string()), FreshnessStatus::UpToDate)
            }
            Some(latest) => (Some(latest.to_string()), FreshnessStatus::Outdated),
            None => (
                None,
                FreshnessStatus::Unknown {
                    reason: "no release tags".to_string(),
                },
            ),
        },
        Err(e) => {
            tracing::warn!(name = %name, repository = %repository, error = %e, "freshness check failed");
            (
                None,
                FreshnessStatus::Unknown {
                    reason: e.to_string(),
                },
            )
        }
    };

    tracing::debug!(name = %name, vendored = %vendored_version, ?remote_latest, ?status, "checked");
    FreshnessEntry {
        name: name.to_string(),
        repository: repository.to_string(),
        vendored_version: vendored_version.to_string(),
        remote_latest,
        status,
    }
}

/// Check the engine and every grammar, in registry order. Never mutates.
pub fn check_updates(registry: &Registry, source: &dyn TagSource) -> Vec<FreshnessEntry> {
    let engine = registry.engine();
    let mut entries = Vec::with_capacity(registry.grammars().len() + 1);
    entries.push(check_item(
        engine.name(),
        &engine.repository,
        &engine.version,
        source,
    ));

    for grammar in registry.grammars() {
        entries.push(check_item(
            &grammar.name,
            &grammar.repository(),
            &grammar.version,
            source,
        ));
    }
    entries
}
