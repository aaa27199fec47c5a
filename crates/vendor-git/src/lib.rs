//! Git plumbing for grammar-vendor
//!
//! - [`clone`]: materialize an upstream repository at a release tag
//! - [`remote`]: list the tags an upstream repository advertises
//! - [`tags`]: create local tags idempotently

pub mod clone;
pub mod error;
pub mod remote;
pub mod tags;

pub use clone::clone_at_tag;
pub use error::{Error, Result};
pub use remote::list_remote_tags;
pub use tags::{TagOutcome, ensure_tag, open_repository, tag_exists};
