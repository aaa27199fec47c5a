//! Registry of the pinned engine and grammar descriptors.
//!
//! The registry is built once at startup, either from [`Registry::builtin`]
//! or from the `[registry]` section of `vendor.toml`, and is then passed by
//! reference to every synchronizer. Bumping a pinned version is a data edit
//! here, never a code change elsewhere.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::version::is_release_tag;
use crate::{Error, Result};

/// Upstream repository of the parsing engine.
pub const ENGINE_REPOSITORY: &str = "tree-sitter/tree-sitter";

/// Pinned engine release.
pub const ENGINE_VERSION: &str = "v0.22.6";

fn default_engine_repository() -> String {
    ENGINE_REPOSITORY.to_string()
}

/// A one-off include the pinned engine release is missing.
///
/// Lives in data so dropping it after an engine bump is a one-line edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatFix {
    /// Path inside the engine checkout, e.g. `lib/src/parser.c`.
    pub file: String,
    /// Line to prepend, e.g. `#include <stdio.h>`.
    pub include: String,
}

/// The pinned parsing engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSpec {
    #[serde(default = "default_engine_repository")]
    pub repository: String,
    pub version: String,
    #[serde(default)]
    pub compat_fix: Option<CompatFix>,
}

impl EngineSpec {
    /// Short display name, the last segment of the repository.
    pub fn name(&self) -> &str {
        self.repository
            .rsplit('/')
            .next()
            .unwrap_or(&self.repository)
    }
}

/// One vendored grammar pinned to an upstream release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarDescriptor {
    /// Upstream grammar name, e.g. `go` or `c-sharp`.
    pub name: String,
    /// Release tag, e.g. `v0.21.0`.
    pub version: String,
    /// Files under the grammar's `src/` directory, in fetch order.
    pub files: Vec<String>,
    /// Sub-grammars sharing `common/scanner.h`, e.g. `typescript` and `tsx`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<String>,
    /// Upstream repository; defaults to `tree-sitter/tree-sitter-{name}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
}

impl GrammarDescriptor {
    pub fn new(name: &str, version: &str, files: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            files: files.iter().map(|f| f.to_string()).collect(),
            variants: Vec::new(),
            repository: None,
        }
    }

    pub fn with_variants(mut self, variants: &[&str]) -> Self {
        self.variants = variants.iter().map(|v| v.to_string()).collect();
        self
    }

    pub fn with_repository(mut self, repository: &str) -> Self {
        self.repository = Some(repository.to_string());
        self
    }

    /// Upstream repository identity used for fetching and tag listing.
    pub fn repository(&self) -> String {
        self.repository
            .clone()
            .unwrap_or_else(|| format!("tree-sitter/tree-sitter-{}", self.name))
    }

    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }
}

/// Grammar names that collide with reserved identifiers downstream, mapped
/// to the directory (and tag prefix) used instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemapTable {
    entries: BTreeMap<String, String>,
}

impl Default for RemapTable {
    fn default() -> Self {
        Self::from_pairs(&[("go", "golang"), ("c-sharp", "csharp")])
    }
}

impl RemapTable {
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            entries: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn from_map(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }

    /// Target directory name for a grammar; unmapped names map to themselves.
    pub fn target_for<'a>(&'a self, name: &'a str) -> &'a str {
        self.entries.get(name).map(String::as_str).unwrap_or(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Serialized form of a registry, the `[registry]` section of `vendor.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryManifest {
    pub engine: EngineSpec,
    /// Replaces the default remap table when present.
    #[serde(default)]
    pub remaps: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub grammars: Vec<GrammarDescriptor>,
}

/// The pinned engine plus the ordered grammar descriptors.
#[derive(Debug, Clone)]
pub struct Registry {
    engine: EngineSpec,
    grammars: Vec<GrammarDescriptor>,
    remaps: RemapTable,
}

impl Registry {
    /// Build a registry, checking its invariants.
    pub fn new(
        engine: EngineSpec,
        grammars: Vec<GrammarDescriptor>,
        remaps: RemapTable,
    ) -> Result<Self> {
        let registry = Self {
            engine,
            grammars,
            remaps,
        };
        registry.validate()?;
        Ok(registry)
    }

    pub fn from_manifest(manifest: RegistryManifest) -> Result<Self> {
        let remaps = manifest
            .remaps
            .map(RemapTable::from_map)
            .unwrap_or_default();
        Self::new(manifest.engine, manifest.grammars, remaps)
    }

    /// The compiled-in registry.
    pub fn builtin() -> Self {
        let engine = EngineSpec {
            repository: ENGINE_REPOSITORY.to_string(),
            version: ENGINE_VERSION.to_string(),
            compat_fix: Some(CompatFix {
                file: "lib/src/parser.c".to_string(),
                include: "#include <stdio.h>".to_string(),
            }),
        };

        let grammars = vec![
            GrammarDescriptor::new("bash", "v0.21.0", &["parser.c", "scanner.c"]),
            GrammarDescriptor::new("c", "v0.21.4", &["parser.c"]),
            GrammarDescriptor::new("c-sharp", "v0.21.3", &["parser.c", "scanner.c"]),
            GrammarDescriptor::new("cpp", "v0.22.3", &["parser.c", "scanner.c"]),
            GrammarDescriptor::new("css", "v0.21.1", &["parser.c", "scanner.c"]),
            GrammarDescriptor::new("go", "v0.21.2", &["parser.c"]),
            GrammarDescriptor::new("html", "v0.20.4", &["parser.c", "scanner.c", "tag.h"]),
            GrammarDescriptor::new("java", "v0.21.0", &["parser.c"]),
            GrammarDescriptor::new("javascript", "v0.21.4", &["parser.c", "scanner.c"]),
            GrammarDescriptor::new("json", "v0.21.0", &["parser.c"]),
            GrammarDescriptor::new("python", "v0.21.0", &["parser.c", "scanner.c"]),
            GrammarDescriptor::new("ruby", "v0.21.0", &["parser.c", "scanner.c"]),
            GrammarDescriptor::new("rust", "v0.21.2", &["parser.c", "scanner.c"]),
            GrammarDescriptor::new("typescript", "v0.21.2", &["parser.c", "scanner.c"])
                .with_variants(&["typescript", "tsx"]),
        ];

        Self {
            engine,
            grammars,
            remaps: RemapTable::default(),
        }
    }

    pub fn engine(&self) -> &EngineSpec {
        &self.engine
    }

    pub fn engine_version(&self) -> &str {
        &self.engine.version
    }

    pub fn grammars(&self) -> &[GrammarDescriptor] {
        &self.grammars
    }

    pub fn remaps(&self) -> &RemapTable {
        &self.remaps
    }

    /// Target directory name of a grammar.
    pub fn target_for<'a>(&'a self, descriptor: &'a GrammarDescriptor) -> &'a str {
        self.remaps.target_for(&descriptor.name)
    }

    pub fn find(&self, name: &str) -> Option<&GrammarDescriptor> {
        self.grammars.iter().find(|g| g.name == name)
    }

    /// Check every registry invariant, reporting the first violation.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| Err(Error::InvalidRegistry { message });

        if !is_release_tag(&self.engine.version) {
            return invalid(format!(
                "engine version '{}' is not a release tag",
                self.engine.version
            ));
        }

        let mut names = HashSet::new();
        let mut targets = HashSet::new();
        for grammar in &self.grammars {
            if grammar.name.trim().is_empty() {
                return invalid("grammar with empty name".to_string());
            }
            if !names.insert(grammar.name.as_str()) {
                return invalid(format!("grammar '{}' is declared twice", grammar.name));
            }
            let target = self.target_for(grammar);
            if !is_single_segment(target) {
                return invalid(format!(
                    "grammar '{}' target directory '{}' must be a single path segment",
                    grammar.name, target
                ));
            }
            if !targets.insert(target) {
                return invalid(format!(
                    "grammar '{}' maps to directory '{}' already in use",
                    grammar.name, target
                ));
            }
            if !is_release_tag(&grammar.version) {
                return invalid(format!(
                    "grammar '{}' version '{}' is not a release tag",
                    grammar.name, grammar.version
                ));
            }
            if grammar.files.is_empty() {
                return invalid(format!("grammar '{}' declares no files", grammar.name));
            }
            for file in &grammar.files {
                if !is_flat_relative(file) {
                    return invalid(format!(
                        "grammar '{}' file '{}' must be a plain relative path",
                        grammar.name, file
                    ));
                }
            }
            let mut variants = HashSet::new();
            for variant in &grammar.variants {
                if !is_single_segment(variant) {
                    return invalid(format!(
                        "grammar '{}' variant '{}' must be a single path segment",
                        grammar.name, variant
                    ));
                }
                if !variants.insert(variant.as_str()) {
                    return invalid(format!(
                        "grammar '{}' variant '{}' is declared twice",
                        grammar.name, variant
                    ));
                }
            }
        }
        Ok(())
    }
}

/// A directory name that stays inside its parent.
fn is_single_segment(name: &str) -> bool {
    !name.trim().is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\\')
}

fn is_flat_relative(path: &str) -> bool {
    !path.is_empty()
        && !path.starts_with('/')
        && !path.contains('\\')
        && path.split('/').all(|segment| !segment.is_empty() && segment != "..")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn engine() -> EngineSpec {
        EngineSpec {
            repository: ENGINE_REPOSITORY.to_string(),
            version: "v0.22.6".to_string(),
            compat_fix: None,
        }
    }

    #[test]
    fn test_builtin_registry_is_valid() {
        Registry::builtin().validate().unwrap();
    }

    #[test]
    fn test_builtin_is_alphabetical() {
        let registry = Registry::builtin();
        let names: Vec<_> = registry.grammars().iter().map(|g| g.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(names.first(), Some(&"bash"));
    }

    #[rstest]
    #[case("go", "golang")]
    #[case("c-sharp", "csharp")]
    #[case("rust", "rust")]
    fn test_default_remaps(#[case] name: &str, #[case] target: &str) {
        assert_eq!(RemapTable::default().target_for(name), target);
    }

    #[test]
    fn test_repository_defaults_to_tree_sitter_org() {
        let go = GrammarDescriptor::new("go", "v0.16.0", &["parser.c"]);
        assert_eq!(go.repository(), "tree-sitter/tree-sitter-go");

        let custom = go.with_repository("someone/tree-sitter-go-fork");
        assert_eq!(custom.repository(), "someone/tree-sitter-go-fork");
    }

    #[test]
    fn test_engine_name_is_last_segment() {
        assert_eq!(engine().name(), "tree-sitter");
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let err = Registry::new(
            engine(),
            vec![
                GrammarDescriptor::new("go", "v0.16.0", &["parser.c"]),
                GrammarDescriptor::new("go", "v0.17.0", &["parser.c"]),
            ],
            RemapTable::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("declared twice"), "got: {err}");
    }

    #[test]
    fn test_rejects_colliding_targets() {
        let err = Registry::new(
            engine(),
            vec![
                GrammarDescriptor::new("go", "v0.16.0", &["parser.c"]),
                GrammarDescriptor::new("golang", "v0.1.0", &["parser.c"]),
            ],
            RemapTable::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("golang"), "got: {err}");
    }

    #[rstest]
    #[case("0.16.0")]
    #[case("main")]
    #[case("")]
    fn test_rejects_non_release_versions(#[case] version: &str) {
        let err = Registry::new(
            engine(),
            vec![GrammarDescriptor::new("json", version, &["parser.c"])],
            RemapTable::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidRegistry { .. }));
    }

    #[rstest]
    #[case("../parser.c")]
    #[case("/etc/passwd")]
    #[case("")]
    fn test_rejects_escaping_file_paths(#[case] file: &str) {
        let err = Registry::new(
            engine(),
            vec![GrammarDescriptor::new("json", "v0.21.0", &[file])],
            RemapTable::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidRegistry { .. }));
    }

    #[test]
    fn test_rejects_empty_file_list() {
        let err = Registry::new(
            engine(),
            vec![GrammarDescriptor::new("json", "v0.21.0", &[])],
            RemapTable::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("no files"));
    }

    #[test]
    fn test_rejects_nested_variant() {
        let err = Registry::new(
            engine(),
            vec![
                GrammarDescriptor::new("typescript", "v0.21.2", &["parser.c"])
                    .with_variants(&["typescript", "a/b"]),
            ],
            RemapTable::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("a/b"));
    }

    #[rstest]
    #[case(".")]
    #[case("..")]
    #[case("a/b")]
    #[case("..\\up")]
    fn test_rejects_unsafe_grammar_names(#[case] name: &str) {
        let err = Registry::new(
            engine(),
            vec![GrammarDescriptor::new(name, "v0.21.0", &["parser.c"])],
            RemapTable::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("single path segment"), "{err}");
    }

    #[rstest]
    #[case("..")]
    #[case(".")]
    #[case("")]
    #[case("../outside")]
    fn test_rejects_unsafe_remap_targets(#[case] target: &str) {
        let err = Registry::new(
            engine(),
            vec![GrammarDescriptor::new("go", "v0.21.2", &["parser.c"])],
            RemapTable::from_pairs(&[("go", target)]),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidRegistry { .. }));
    }

    #[test]
    fn test_manifest_with_parent_remap_is_rejected() {
        let manifest: RegistryManifest = toml::from_str(
            r#"
            engine = { version = "v0.22.6" }
            remaps = { go = ".." }

            [[grammars]]
            name = "go"
            version = "v0.16.0"
            files = ["parser.c"]
            "#,
        )
        .unwrap();

        let err = Registry::from_manifest(manifest).unwrap_err();
        assert!(err.to_string().contains("'..'"), "{err}");
    }

    #[test]
    fn test_rejects_dot_variant() {
        let err = Registry::new(
            engine(),
            vec![
                GrammarDescriptor::new("typescript", "v0.21.2", &["parser.c"])
                    .with_variants(&["."]),
            ],
            RemapTable::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidRegistry { .. }));
    }

    #[test]
    fn test_manifest_without_remaps_uses_defaults() {
        let manifest: RegistryManifest = toml::from_str(
            r#"
            engine = { version = "v0.22.6" }

            [[grammars]]
            name = "go"
            version = "v0.16.0"
            files = ["parser.c"]
            "#,
        )
        .unwrap();

        let registry = Registry::from_manifest(manifest).unwrap();

        assert_eq!(registry.engine().repository, ENGINE_REPOSITORY);
        assert_eq!(registry.target_for(&registry.grammars()[0]), "golang");
    }

    #[test]
    fn test_manifest_remaps_replace_defaults() {
        let manifest: RegistryManifest = toml::from_str(
            r#"
            engine = { version = "v0.22.6" }
            remaps = { go = "gogrammar" }

            [[grammars]]
            name = "go"
            version = "v0.16.0"
            files = ["parser.c"]

            [[grammars]]
            name = "c-sharp"
            version = "v0.21.3"
            files = ["parser.c"]
            "#,
        )
        .unwrap();

        let registry = Registry::from_manifest(manifest).unwrap();
        let targets: Vec<_> = registry
            .grammars()
            .iter()
            .map(|g| registry.target_for(g))
            .collect();

        assert_eq!(targets, vec!["gogrammar", "c-sharp"]);
    }
}
