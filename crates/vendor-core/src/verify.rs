//! Tree verifier.
//!
//! Checks a vendored tree on disk without touching the network: every
//! grammar directory holds exactly the files its descriptor names, no source
//! still uses the canonical parser include, and the per-variant copies of the
//! shared scanner header are identical.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::AGGREGATE_SOURCE;
use crate::grammar::{PARSER_HEADER, SHARED_SCANNER_HEADER};
use crate::patch::has_canonical_include;
use crate::registry::{GrammarDescriptor, Registry};
use crate::Result;

/// A single problem found in the vendored tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    MissingDirectory { path: PathBuf },
    MissingFile { path: PathBuf },
    UnexpectedFile { path: PathBuf },
    /// A declared file still includes `tree_sitter/parser.h`.
    CanonicalInclude { path: PathBuf },
    /// Variant copies of the shared scanner header differ.
    HeaderDivergence { grammar: String, paths: Vec<PathBuf> },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDirectory { path } => write!(f, "missing directory {}", path.display()),
            Self::MissingFile { path } => write!(f, "missing file {}", path.display()),
            Self::UnexpectedFile { path } => write!(f, "unexpected file {}", path.display()),
            Self::CanonicalInclude { path } => {
                write!(f, "{} still includes tree_sitter/parser.h", path.display())
            }
            Self::HeaderDivergence { grammar, .. } => {
                write!(f, "{grammar}: variant {SHARED_SCANNER_HEADER} copies differ")
            }
        }
    }
}

/// Outcome of [`verify_tree`].
#[derive(Debug, Clone, Default)]
pub struct VerifyReport {
    /// Number of grammar directories inspected.
    pub checked: usize,
    pub violations: Vec<Violation>,
}

impl VerifyReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Inspect the vendored tree under `root` against `registry`.
///
/// Problems are collected, not returned as errors; only I/O failures abort.
pub fn verify_tree(registry: &Registry, root: &Path) -> Result<VerifyReport> {
    let mut report = VerifyReport::default();

    // The aggregate source must never survive an engine sync.
    let aggregate = root.join(AGGREGATE_SOURCE);
    if aggregate.exists() {
        report.violations.push(Violation::UnexpectedFile { path: aggregate });
    }

    for grammar in registry.grammars() {
        let dir = root.join(registry.target_for(grammar));
        report.checked += 1;
        if !dir.is_dir() {
            report.violations.push(Violation::MissingDirectory { path: dir });
            continue;
        }

        if grammar.has_variants() {
            verify_variants(grammar, &dir, &mut report.violations)?;
        } else {
            verify_flat_dir(grammar, &dir, false, &mut report.violations)?;
        }
    }

    tracing::info!(
        checked = report.checked,
        violations = report.violations.len(),
        "verified vendored tree"
    );
    Ok(report)
}

fn verify_variants(
    grammar: &GrammarDescriptor,
    dir: &Path,
    violations: &mut Vec<Violation>,
) -> Result<()> {
    let expected: BTreeSet<String> = grammar.variants.iter().cloned().collect();
    for entry in entry_names(dir)? {
        if !expected.contains(&entry) {
            violations.push(Violation::UnexpectedFile {
                path: dir.join(entry),
            });
        }
    }

    let mut headers = Vec::new();
    for variant in &grammar.variants {
        let variant_dir = dir.join(variant);
        if !variant_dir.is_dir() {
            violations.push(Violation::MissingDirectory { path: variant_dir });
            continue;
        }
        verify_flat_dir(grammar, &variant_dir, true, violations)?;

        let header = variant_dir.join(SHARED_SCANNER_HEADER);
        if header.is_file() {
            headers.push(header);
        }
    }

    let mut checksums = BTreeSet::new();
    for header in &headers {
        checksums.insert(vendor_fs::compute_file_checksum(header)?);
    }
    if checksums.len() > 1 {
        violations.push(Violation::HeaderDivergence {
            grammar: grammar.name.clone(),
            paths: headers,
        });
    }
    Ok(())
}

/// One directory of sources: `parser.h`, the declared files and, for a
/// variant, the shared scanner header. Nothing else.
fn verify_flat_dir(
    grammar: &GrammarDescriptor,
    dir: &Path,
    with_shared_header: bool,
    violations: &mut Vec<Violation>,
) -> Result<()> {
    let mut expected: BTreeSet<String> = grammar.files.iter().cloned().collect();
    expected.insert(PARSER_HEADER.to_string());
    if with_shared_header {
        expected.insert(SHARED_SCANNER_HEADER.to_string());
    }

    let present: BTreeSet<String> = entry_names(dir)?.into_iter().collect();
    for missing in expected.difference(&present) {
        violations.push(Violation::MissingFile {
            path: dir.join(missing),
        });
    }
    for extra in present.difference(&expected) {
        violations.push(Violation::UnexpectedFile {
            path: dir.join(extra),
        });
    }

    for file in &grammar.files {
        let path = dir.join(file);
        if !path.is_file() {
            continue;
        }
        let bytes = fs::read(&path).map_err(|e| vendor_fs::Error::io(&path, e))?;
        if has_canonical_include(&String::from_utf8_lossy(&bytes)) {
            violations.push(Violation::CanonicalInclude { path });
        }
    }
    Ok(())
}

fn entry_names(dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir).map_err(|e| vendor_fs::Error::io(dir, e))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| vendor_fs::Error::io(dir, e))?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}
