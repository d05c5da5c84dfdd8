//! Stateless filesystem predicates.
//!
//! These helpers never fail: any error while reading metadata (missing path,
//! permission denied, broken symlink target) is treated as "does not exist".

use std::fs::{self, Metadata};
use std::path::Path;

/// Returns the metadata for `path` if it exists, `None` on any stat failure.
pub fn exists(path: &Path) -> Option<Metadata> {
    fs::metadata(path).ok()
}

/// Returns true if `path` exists and denotes a directory.
pub fn is_directory(path: &Path) -> bool {
    match exists(path) {
        Some(metadata) => metadata.is_dir(),
        None => false,
    }
}
