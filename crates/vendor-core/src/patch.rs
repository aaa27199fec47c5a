//! Textual include rewriting.
//!
//! Vendored sources live in one flat directory per language, so every
//! namespaced include (`"tree_sitter/api.h"`, `<tree_sitter/parser.h>`,
//! `"../../common/scanner.h"`) is rewritten to a same-directory reference.
//! Rules are plain regex substitutions applied in order; each one states how
//! many matches it expects so a rule that silently matches nothing is visible.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::{Error, Result};

/// Engine headers under `lib/include/tree_sitter/` become flat includes.
static ENGINE_NAMESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(#\s*include\s+)"tree_sitter/"#).unwrap());

/// Engine unicode headers under `lib/src/unicode/` become flat includes.
static UNICODE_NAMESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(#\s*include\s+)"unicode/"#).unwrap());

/// The grammar's canonical parser header include, in either bracket form.
pub static CANONICAL_PARSER_INCLUDE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(#\s*include\s+)[<"]tree_sitter/parser\.h[>"]"#).unwrap());

/// The relative include of a shared scanner header used by grammar variants.
pub static SHARED_SCANNER_INCLUDE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(#\s*include\s+)"(?:\.\./)*common/scanner\.h""#).unwrap());

/// How many matches a rule expects in one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    /// Zero matches is fine; it is logged as suspicious.
    Any,
    /// The file must contain the pattern.
    AtLeastOne,
    /// The file must contain the pattern exactly once.
    ExactlyOne,
}

impl Expect {
    fn check(self, count: usize) -> std::result::Result<(), String> {
        match self {
            Self::Any => Ok(()),
            Self::AtLeastOne if count >= 1 => Ok(()),
            Self::AtLeastOne => Err("expected at least one match, found none".to_string()),
            Self::ExactlyOne if count == 1 => Ok(()),
            Self::ExactlyOne => Err(format!("expected exactly one match, found {count}")),
        }
    }
}

/// One substitution: every match of `pattern` is replaced by `replacement`.
///
/// `replacement` may reference capture groups (`${1}`).
#[derive(Debug, Clone)]
pub struct RewriteRule {
    pattern: Regex,
    replacement: String,
    expect: Expect,
}

impl RewriteRule {
    pub fn new(pattern: &str, replacement: impl Into<String>, expect: Expect) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| Error::InvalidRule {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self::from_regex(pattern, replacement, expect))
    }

    pub fn from_regex(pattern: Regex, replacement: impl Into<String>, expect: Expect) -> Self {
        Self {
            pattern,
            replacement: replacement.into(),
            expect,
        }
    }

    /// Same rule with a different expectation.
    pub fn expecting(mut self, expect: Expect) -> Self {
        self.expect = expect;
        self
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

/// Rules flattening the engine's two include namespaces.
pub fn engine_rules() -> Vec<RewriteRule> {
    vec![
        RewriteRule::from_regex(ENGINE_NAMESPACE.clone(), "${1}\"", Expect::Any),
        RewriteRule::from_regex(UNICODE_NAMESPACE.clone(), "${1}\"", Expect::Any),
    ]
}

/// Rule turning the canonical parser include into `"parser.h"`.
pub fn canonical_include_rule() -> RewriteRule {
    RewriteRule::from_regex(
        CANONICAL_PARSER_INCLUDE.clone(),
        "${1}\"parser.h\"",
        Expect::Any,
    )
}

/// Rule turning the shared scanner header include into `"scanner.h"`.
pub fn shared_header_rule() -> RewriteRule {
    RewriteRule::from_regex(
        SHARED_SCANNER_INCLUDE.clone(),
        "${1}\"scanner.h\"",
        Expect::Any,
    )
}

/// Rules for one declared grammar file.
///
/// The generated `parser.c` always includes the parser header, so the
/// canonical rule must match there; other files may or may not include it.
pub fn grammar_rules(file: &str, with_shared_header: bool) -> Vec<RewriteRule> {
    let canonical = if file == "parser.c" {
        canonical_include_rule().expecting(Expect::AtLeastOne)
    } else {
        canonical_include_rule()
    };

    let mut rules = Vec::with_capacity(2);
    if with_shared_header {
        rules.push(shared_header_rule());
    }
    rules.push(canonical);
    rules
}

/// Apply `rules` in order to the file at `path`, rewriting it in place.
///
/// Returns the total number of replacements. The file is only written when
/// its content changed. A violated expectation aborts before anything is
/// written.
pub fn rewrite_includes(path: &Path, rules: &[RewriteRule]) -> Result<usize> {
    let original = vendor_fs::read_text(path)?;
    let mut content = original.clone();
    let mut total = 0;

    for rule in rules {
        let count = rule.pattern.find_iter(&content).count();
        rule.expect
            .check(count)
            .map_err(|message| Error::patch(path, format!("rule `{}`: {}", rule.pattern(), message)))?;

        if count == 0 {
            tracing::debug!(
                path = %path.display(),
                pattern = %rule.pattern(),
                "rewrite rule matched nothing"
            );
            continue;
        }

        content = rule
            .pattern
            .replace_all(&content, rule.replacement.as_str())
            .into_owned();
        total += count;
    }

    if content != original {
        vendor_fs::write_text(path, &content)?;
        tracing::debug!(path = %path.display(), replacements = total, "rewrote includes");
    }
    Ok(total)
}

/// Prepend `include_line` to the file at `path` unless it already has it.
///
/// The original content follows the inserted line verbatim. Returns whether
/// the file was changed. A missing file is a patch error: the fix targets a
/// specific engine release and its absence means the registry is stale.
pub fn insert_engine_compatibility_fix(path: &Path, include_line: &str) -> Result<bool> {
    if !path.is_file() {
        return Err(Error::patch(
            path,
            "compatibility fix target does not exist; drop or update the fix for this engine version",
        ));
    }

    let content = vendor_fs::read_text(path)?;
    let wanted = include_line.trim();
    if content.lines().any(|line| line.trim() == wanted) {
        tracing::debug!(path = %path.display(), include = %wanted, "compatibility include already present");
        return Ok(false);
    }

    vendor_fs::write_text(path, &format!("{wanted}\n{content}"))?;
    tracing::info!(path = %path.display(), include = %wanted, "applied engine compatibility fix");
    Ok(true)
}

/// Whether `content` still contains the canonical parser include.
pub fn has_canonical_include(content: &str) -> bool {
    CANONICAL_PARSER_INCLUDE.is_match(content)
}
