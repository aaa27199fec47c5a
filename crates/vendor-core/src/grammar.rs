//! Grammar synchronizer and the `download` run.
//!
//! Each grammar directory is deleted and rebuilt from upstream on every run,
//! so files dropped from a descriptor never linger.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::engine::{EngineSyncReport, sync_engine};
use crate::fetch::{Fetcher, fetch_to};
use crate::patch::{grammar_rules, rewrite_includes};
use crate::registry::{GrammarDescriptor, Registry, RemapTable};
use crate::{Error, Result};

/// Parser header every grammar ships under `src/tree_sitter/`.
pub const PARSER_HEADER: &str = "parser.h";
/// Header shared by the variants of a grammar, stored at the repository root.
pub const SHARED_SCANNER_HEADER: &str = "scanner.h";

const SHARED_SCANNER_REMOTE: &str = "common/scanner.h";

/// Outcome of [`sync_grammar`].
#[derive(Debug, Clone)]
pub struct GrammarSyncReport {
    pub name: String,
    pub version: String,
    /// Directory the grammar was written to.
    pub target: PathBuf,
    /// Every file written, in write order.
    pub files: Vec<PathBuf>,
}

/// Outcome of [`download`].
#[derive(Debug, Clone)]
pub struct DownloadReport {
    pub engine: EngineSyncReport,
    pub grammars: Vec<GrammarSyncReport>,
}

/// Rebuild the vendored tree of one grammar under `root`.
///
/// Errors carry the grammar name; fetch errors also carry the remote path.
pub fn sync_grammar(
    descriptor: &GrammarDescriptor,
    remaps: &RemapTable,
    fetcher: &dyn Fetcher,
    root: &Path,
) -> Result<GrammarSyncReport> {
    sync_grammar_inner(descriptor, remaps, fetcher, root)
        .map_err(|e| Error::in_grammar(&descriptor.name, e))
}

fn sync_grammar_inner(
    descriptor: &GrammarDescriptor,
    remaps: &RemapTable,
    fetcher: &dyn Fetcher,
    root: &Path,
) -> Result<GrammarSyncReport> {
    let target_name = remaps.target_for(&descriptor.name);
    let target = root.join(target_name);
    let repository = descriptor.repository();
    let tag = descriptor.version.as_str();

    tracing::info!(
        grammar = %descriptor.name,
        version = %tag,
        target = %target_name,
        "synchronizing grammar"
    );

    vendor_fs::recreate_dir(&target)?;

    let files = if descriptor.has_variants() {
        // One fetch, one copy per variant: each variant directory builds on
        // its own and the copies are identical by construction.
        let shared = fetcher.fetch(&repository, tag, SHARED_SCANNER_REMOTE)?;
        let mut files = Vec::new();
        for variant in &descriptor.variants {
            let variant_dir = target.join(variant);
            let header = variant_dir.join(SHARED_SCANNER_HEADER);
            vendor_fs::write_atomic(&header, &shared)?;
            files.push(header);

            files.extend(sync_sources(
                descriptor,
                fetcher,
                &repository,
                &format!("{variant}/src"),
                &variant_dir,
                true,
            )?);
        }
        files
    } else {
        sync_sources(descriptor, fetcher, &repository, "src", &target, false)?
    };

    tracing::info!(grammar = %descriptor.name, files = files.len(), "grammar synchronized");
    Ok(GrammarSyncReport {
        name: descriptor.name.clone(),
        version: descriptor.version.clone(),
        target,
        files,
    })
}

/// Fetch `parser.h` and every declared file from `remote_dir` into `dest`,
/// rewriting includes to the flat layout.
fn sync_sources(
    descriptor: &GrammarDescriptor,
    fetcher: &dyn Fetcher,
    repository: &str,
    remote_dir: &str,
    dest: &Path,
    with_shared_header: bool,
) -> Result<Vec<PathBuf>> {
    let tag = descriptor.version.as_str();
    let mut written = Vec::with_capacity(descriptor.files.len() + 1);

    let header = dest.join(PARSER_HEADER);
    fetch_to(
        fetcher,
        repository,
        tag,
        &format!("{remote_dir}/tree_sitter/{PARSER_HEADER}"),
        &header,
    )?;
    written.push(header);

    for file in &descriptor.files {
        let local = dest.join(file);
        fetch_to(
            fetcher,
            repository,
            tag,
            &format!("{remote_dir}/{file}"),
            &local,
        )?;
        rewrite_includes(&local, &grammar_rules(file, with_shared_header))?;
        written.push(local);
    }

    Ok(written)
}

/// The `download` run: the engine once, then every grammar in registry
/// order. The first failure stops the run.
pub fn download(
    registry: &Registry,
    config: &Config,
    base: &Path,
    fetcher: &dyn Fetcher,
) -> Result<DownloadReport> {
    let root = config.vendor_root(base);
    let scratch = config.scratch_dir(base);

    let engine = sync_engine(
        registry.engine(),
        &config.upstream.git_base_url,
        &scratch,
        &root,
    )?;

    let mut grammars = Vec::with_capacity(registry.grammars().len());
    for descriptor in registry.grammars() {
        grammars.push(sync_grammar(descriptor, registry.remaps(), fetcher, &root)?);
    }

    Ok(DownloadReport { engine, grammars })
}
