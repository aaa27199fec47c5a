//! Vendoring synchronization and version tracking
//!
//! This crate keeps a patched local copy of the tree-sitter engine and a
//! fixed set of grammar source trees pinned to upstream release tags:
//!
//! - **Registry**: the pinned engine plus the ordered grammar descriptors
//! - **Patch engine**: ordered include rewrites with explicit match expectations
//! - **Fetcher**: single-file retrieval from the upstream raw host or a mirror
//! - **Synchronizers**: rebuild the engine and every grammar tree from scratch
//! - **Freshness**: compare pinned versions with the newest upstream release
//! - **Tags**: publish `{target}/{version}` tags for downstream consumers
//! - **Verify**: check the vendored tree on disk
//!
//! # Architecture
//!
//! ```text
//!              vendor-cli
//!                  |
//!             vendor-core
//!                  |
//!          +-------+-------+
//!          |               |
//!      vendor-fs      vendor-git
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod fetch;
pub mod freshness;
pub mod grammar;
pub mod patch;
pub mod registry;
pub mod runner;
pub mod tags;
pub mod verify;
pub mod version;

pub use config::{CONFIG_FILE_NAME, Config};
pub use engine::{EngineSyncReport, sync_engine};
pub use error::{Error, Result};
pub use fetch::{Fetcher, HttpFetcher, MirrorFetcher, fetch_to, fetcher_for};
pub use freshness::{FreshnessEntry, FreshnessStatus, GitTagSource, TagSource, check_updates};
pub use grammar::{DownloadReport, GrammarSyncReport, download, sync_grammar};
pub use patch::{Expect, RewriteRule, insert_engine_compatibility_fix, rewrite_includes};
pub use registry::{CompatFix, EngineSpec, GrammarDescriptor, Registry, RegistryManifest, RemapTable};
pub use runner::run_test_command;
pub use tags::{TagReport, planned_tags, publish_tags};
pub use verify::{VerifyReport, Violation, verify_tree};
pub use version::{latest_release, parse_release_tag};
