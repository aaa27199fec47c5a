//! Remote tag listing, the `git ls-remote --tags` equivalent

use git2::{Direction, Remote};

use crate::{Error, Result};

/// List every tag name advertised by the repository at `url`.
///
/// Peeled entries (`v1.0.0^{}`) are folded into their tag. The result is
/// sorted lexically and deduplicated; version ordering is left to callers.
pub fn list_remote_tags(url: &str) -> Result<Vec<String>> {
    let query_error = |e: git2::Error| Error::RemoteQuery {
        url: url.to_string(),
        message: e.message().to_string(),
    };

    let mut remote = Remote::create_detached(url).map_err(query_error)?;
    remote.connect(Direction::Fetch).map_err(query_error)?;

    let mut tags: Vec<String> = remote
        .list()
        .map_err(query_error)?
        .iter()
        .filter_map(|head| head.name().strip_prefix("refs/tags/"))
        .map(|name| name.trim_end_matches("^{}").to_string())
        .collect();

    remote.disconnect().map_err(query_error)?;

    tags.sort();
    tags.dedup();
    tracing::debug!(url = %url, count = tags.len(), "listed remote tags");
    Ok(tags)
}
