//! Engine synchronizer.
//!
//! Clones the engine at the pinned tag into scratch, flattens its include
//! namespaces, applies the compatibility fix, copies the needed subset flat
//! into the vendor root and throws the scratch tree away.

use std::path::{Path, PathBuf};

use crate::patch::{engine_rules, insert_engine_compatibility_fix, rewrite_includes};
use crate::registry::EngineSpec;
use crate::{Error, Result};

/// Public headers inside the engine checkout.
const PUBLIC_HEADER_DIR: &str = "lib/include/tree_sitter";
/// Implementation files and internal headers.
const SOURCE_DIR: &str = "lib/src";
/// Unicode helper headers.
const UNICODE_DIR: &str = "lib/src/unicode";

/// Amalgamation that `#include`s every other source file. Compiling it next
/// to the individual files would define every symbol twice.
pub const AGGREGATE_SOURCE: &str = "lib.c";

/// Outcome of [`sync_engine`].
#[derive(Debug, Clone)]
pub struct EngineSyncReport {
    pub version: String,
    /// Files now present in the vendor root, sorted.
    pub files: Vec<PathBuf>,
}

/// Rebuild the vendored engine at `spec.version`.
///
/// `git_base_url` is joined with the engine repository to form the clone
/// URL. Failures are reported with the engine version attached; whatever was
/// already written to `destination` is left for the next full run to replace.
pub fn sync_engine(
    spec: &EngineSpec,
    git_base_url: &str,
    scratch: &Path,
    destination: &Path,
) -> Result<EngineSyncReport> {
    sync_engine_inner(spec, git_base_url, scratch, destination)
        .map_err(|e| Error::in_engine(&spec.version, e))
}

fn sync_engine_inner(
    spec: &EngineSpec,
    git_base_url: &str,
    scratch: &Path,
    destination: &Path,
) -> Result<EngineSyncReport> {
    let url = join_url(git_base_url, &spec.repository);
    tracing::info!(version = %spec.version, url = %url, "synchronizing engine");

    vendor_git::clone_at_tag(&url, scratch, &spec.version)?;

    let public_headers = vendor_fs::list_files(&scratch.join(PUBLIC_HEADER_DIR), &["h"])?;
    let sources = vendor_fs::list_files(&scratch.join(SOURCE_DIR), &["c"])?;
    let internal_headers = vendor_fs::list_files(&scratch.join(SOURCE_DIR), &["h"])?;
    let unicode_headers = vendor_fs::list_files(&scratch.join(UNICODE_DIR), &["h"])?;

    if public_headers.is_empty() {
        return Err(Error::patch(
            scratch.join(PUBLIC_HEADER_DIR),
            "engine checkout has no public headers",
        ));
    }
    if sources.is_empty() {
        return Err(Error::patch(
            scratch.join(SOURCE_DIR),
            "engine checkout has no source files",
        ));
    }

    let rules = engine_rules();
    let all_files: Vec<PathBuf> = public_headers
        .iter()
        .chain(&sources)
        .chain(&internal_headers)
        .chain(&unicode_headers)
        .cloned()
        .collect();
    for file in &all_files {
        rewrite_includes(file, &rules)?;
    }

    if let Some(fix) = &spec.compat_fix {
        insert_engine_compatibility_fix(&scratch.join(&fix.file), &fix.include)?;
    }

    let mut copied = vendor_fs::copy_into(&all_files, destination)?;

    vendor_fs::remove_tree(scratch)?;

    if vendor_fs::remove_file_if_exists(&destination.join(AGGREGATE_SOURCE))? {
        tracing::debug!(file = AGGREGATE_SOURCE, "removed aggregate engine source");
    }
    copied.retain(|path| path.file_name().is_none_or(|name| name != AGGREGATE_SOURCE));
    copied.sort();
    copied.dedup();

    tracing::info!(version = %spec.version, files = copied.len(), "engine synchronized");
    Ok(EngineSyncReport {
        version: spec.version.clone(),
        files: copied,
    })
}

/// Join a host base (URL or local directory) with a repository path.
pub(crate) fn join_url(base: &str, repository: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        repository.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url_trims_slashes() {
        assert_eq!(
            join_url("https://github.com/", "/tree-sitter/tree-sitter"),
            "https://github.com/tree-sitter/tree-sitter"
        );
        assert_eq!(join_url("/srv/git", "a/b"), "/srv/git/a/b");
    }
}
