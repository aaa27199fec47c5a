//! Shared test fixtures for the grammar-vendor workspace.
//!
//! Dev-dependency only, never published.
//!
//! - [`git`]: real git repositories built with `git2`, with commits and tags
//! - [`upstream`]: [`UpstreamMirror`], an offline stand-in for the upstream
//!   raw-file host and git host

pub mod git;
pub mod upstream;

pub use upstream::UpstreamMirror;
