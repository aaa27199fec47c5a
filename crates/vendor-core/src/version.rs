//! Release tag parsing and ordering.
//!
//! Upstream repositories tag releases as `v<semver>`. Only those tags take
//! part in freshness checks; anything else (`nightly`, `rust-0.1`) is
//! ignored. Two-component tags such as `v0.20` are read as `v0.20.0`.

use semver::Version;

/// Parse a `v`-prefixed release tag into a semantic version.
///
/// Returns `None` for tags outside the release pattern.
pub fn parse_release_tag(tag: &str) -> Option<Version> {
    let rest = tag.strip_prefix('v')?;
    normalize_version(rest)
}

/// Check whether `tag` follows the release pattern.
pub fn is_release_tag(tag: &str) -> bool {
    parse_release_tag(tag).is_some()
}

/// Pick the newest release tag by semantic-version ordering.
///
/// Ties between equivalent spellings (`v0.20` and `v0.20.0`) resolve to the
/// lexically greater tag so the result does not depend on input order.
pub fn latest_release<'a, I>(tags: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    tags.into_iter()
        .filter_map(|tag| parse_release_tag(tag).map(|version| (version, tag)))
        .max_by(|(a, a_tag), (b, b_tag)| a.cmp(b).then_with(|| a_tag.cmp(b_tag)))
        .map(|(_, tag)| tag)
}

/// `"0.20.1"` parses directly, `"0.20"` gains a `.0` patch, `"0"` is rejected.
fn normalize_version(s: &str) -> Option<Version> {
    if let Ok(v) = Version::parse(s) {
        return Some(v);
    }
    Version::parse(&format!("{s}.0")).ok()
}
