//! Single-file retrieval from upstream.
//!
//! A fetch either returns the complete file or fails; there is no retry and
//! no partial result. A file missing at a pinned tag means the pin is wrong,
//! and the whole run must stop rather than leave a half-built tree.

use std::io::Read;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Retrieves `{repository}/{tag}/{remote_path}` from an upstream host.
pub trait Fetcher {
    fn fetch(&self, repository: &str, tag: &str, remote_path: &str) -> Result<Vec<u8>>;
}

/// Fetches from an HTTP raw-file host such as `raw.githubusercontent.com`.
pub struct HttpFetcher {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            agent: ureq::AgentBuilder::new().build(),
        }
    }

    pub fn url_for(&self, repository: &str, tag: &str, remote_path: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            repository.trim_matches('/'),
            tag,
            remote_path.trim_start_matches('/')
        )
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, repository: &str, tag: &str, remote_path: &str) -> Result<Vec<u8>> {
        let url = self.url_for(repository, tag, remote_path);
        tracing::debug!(url = %url, "fetching");

        let response = self.agent.get(&url).call().map_err(|e| Error::Transport {
            url: url.clone(),
            message: match e {
                ureq::Error::Status(code, _) => format!("HTTP {code}"),
                other => other.to_string(),
            },
        })?;

        let mut buffer = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut buffer)
            .map_err(|e| Error::Transport {
                url: url.clone(),
                message: format!("read failed: {e}"),
            })?;
        Ok(buffer)
    }
}

/// Serves files from a local directory laid out as
/// `{root}/{repository}/{tag}/{remote_path}`.
pub struct MirrorFetcher {
    root: PathBuf,
}

impl MirrorFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, repository: &str, tag: &str, remote_path: &str) -> PathBuf {
        self.root
            .join(repository.trim_matches('/'))
            .join(tag)
            .join(remote_path.trim_start_matches('/'))
    }
}

impl Fetcher for MirrorFetcher {
    fn fetch(&self, repository: &str, tag: &str, remote_path: &str) -> Result<Vec<u8>> {
        let path = self.path_for(repository, tag, remote_path);
        tracing::debug!(path = %path.display(), "fetching from mirror");

        std::fs::read(&path).map_err(|e| Error::Transport {
            url: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

/// Pick the fetcher for a configured raw base: HTTP(S) URLs go over the
/// network, anything else (optionally `file://`-prefixed) is a mirror path.
pub fn fetcher_for(raw_base_url: &str) -> Box<dyn Fetcher> {
    if raw_base_url.starts_with("http://") || raw_base_url.starts_with("https://") {
        Box::new(HttpFetcher::new(raw_base_url))
    } else {
        let root = raw_base_url.strip_prefix("file://").unwrap_or(raw_base_url);
        Box::new(MirrorFetcher::new(root))
    }
}

/// Fetch one file and write it atomically to `dest`.
pub fn fetch_to(
    fetcher: &dyn Fetcher,
    repository: &str,
    tag: &str,
    remote_path: &str,
    dest: &Path,
) -> Result<()> {
    let bytes = fetcher.fetch(repository, tag, remote_path)?;
    vendor_fs::write_atomic(dest, &bytes)?;
    tracing::debug!(
        repository = %repository,
        tag = %tag,
        remote_path = %remote_path,
        dest = %dest.display(),
        bytes = bytes.len(),
        "fetched file"
    );
    Ok(())
}
