//! Filesystem primitives for grammar-vendor
//!
//! Atomic file writes, whole-tree delete/recreate, flat directory listing
//! and content checksums. Vendored trees are always rebuilt from scratch, so
//! nothing here attempts incremental updates.

pub mod checksum;
pub mod error;
pub mod io;
pub mod tree;

pub use checksum::{compute_content_checksum, compute_file_checksum};
pub use error::{Error, Result};
pub use io::{read_text, write_atomic, write_text};
pub use tree::{copy_into, list_files, recreate_dir, remove_file_if_exists, remove_tree};
