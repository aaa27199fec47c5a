//! Tag publisher.
//!
//! Makes each vendored grammar version addressable with a local tag at
//! HEAD. Existing tags are detected up front and left untouched, so the
//! publisher can run on any commit any number of times. Nothing is tagged
//! unless the vendored tree passes [`verify_tree`].

use std::path::Path;

use vendor_git::TagOutcome;

use crate::registry::Registry;
use crate::verify::verify_tree;
use crate::{Error, Result};

/// What happened to one planned tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagReport {
    pub name: String,
    pub outcome: TagOutcome,
}

/// Tag names for every grammar, in registry order.
///
/// `{target}/{version}`, or `{target}/{variant}/{version}` per variant.
pub fn planned_tags(registry: &Registry) -> Vec<String> {
    let mut names = Vec::new();
    for grammar in registry.grammars() {
        let target = registry.target_for(grammar);
        if grammar.has_variants() {
            for variant in &grammar.variants {
                names.push(format!("{target}/{variant}/{}", grammar.version));
            }
        } else {
            names.push(format!("{target}/{}", grammar.version));
        }
    }
    names
}

/// Create every planned tag at HEAD of the repository containing `repo_path`.
///
/// The tree under `vendor_root` is verified first; any violation refuses
/// the whole run with [`Error::VerifyFailed`] before a tag is written.
pub fn publish_tags(
    registry: &Registry,
    vendor_root: &Path,
    repo_path: &Path,
) -> Result<Vec<TagReport>> {
    let repo = vendor_git::open_repository(repo_path)?;

    let verification = verify_tree(registry, vendor_root)?;
    if !verification.is_clean() {
        for violation in &verification.violations {
            tracing::warn!(%violation, "vendored tree is not publishable");
        }
        return Err(Error::VerifyFailed {
            count: verification.violations.len(),
        });
    }

    let mut reports = Vec::new();
    for name in planned_tags(registry) {
        let outcome = vendor_git::ensure_tag(&repo, &name)?;
        reports.push(TagReport { name, outcome });
    }

    let created = reports
        .iter()
        .filter(|r| r.outcome == TagOutcome::Created)
        .count();
    tracing::info!(created, existing = reports.len() - created, "published tags");
    Ok(reports)
}
