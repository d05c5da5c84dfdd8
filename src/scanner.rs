//! Directory scanning: raw listing into grouped file entries.
//!
//! Each filename is split into a base name and a trailing extension, and
//! filenames sharing a base name fold into one [`FileEntry`]. A failure on a
//! single candidate never aborts the scan; it is recorded and the scan moves
//! on. Only failing to read the directory itself is fatal.

use crate::file_entry::{AddVariantError, FileEntry};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

/// One candidate filename that could not be folded into its entry.
#[derive(Debug)]
pub struct ScanFailure {
    /// The raw filename as listed.
    pub filename: String,
    /// Why the variant could not be recorded.
    pub error: AddVariantError,
}

impl std::fmt::Display for ScanFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Skipping '{}': {}", self.filename, self.error)
    }
}

/// The result of scanning one directory.
///
/// Entries are keyed by base name; the sorted map keeps iteration order
/// deterministic regardless of how the filesystem listed the files.
#[derive(Debug)]
pub struct ScanOutcome {
    pub entries: BTreeMap<String, FileEntry>,
    pub failures: Vec<ScanFailure>,
}

/// Groups a directory's files into logical entries.
pub struct DirectoryScanner;

impl DirectoryScanner {
    /// Scans `directory` (non-recursive) and groups its files by base name.
    ///
    /// Dotfiles (names whose base would be empty) are skipped silently.
    /// Candidates that exist but are not regular files, or whose metadata
    /// cannot be read, are recorded in `failures` and the scan continues.
    /// An entry whose every candidate failed stays in the map with zero
    /// extensions, so it still shows up in the report as degraded.
    ///
    /// # Errors
    ///
    /// Returns the underlying IO error when the directory itself cannot be
    /// read. This is the precondition check for the whole run.
    pub fn scan(directory: &Path) -> io::Result<ScanOutcome> {
        let listing = fs::read_dir(directory)?;

        let mut entries: BTreeMap<String, FileEntry> = BTreeMap::new();
        let mut failures = Vec::new();

        for dir_entry in listing.flatten() {
            let filename = dir_entry.file_name().to_string_lossy().to_string();

            let Some((base, ext)) = split_filename(&filename) else {
                continue;
            };

            let entry = entries
                .entry(base.to_string())
                .or_insert_with(|| FileEntry::new(directory.to_path_buf(), base.to_string()));

            if let Err(error) = entry.add_extension(ext) {
                failures.push(ScanFailure { filename, error });
            }
        }

        Ok(ScanOutcome { entries, failures })
    }
}

/// Splits a filename at its last dot into `(base, extension)`.
///
/// A name with no dot yields the whole name as the base and an empty
/// extension. Returns `None` when the base would be empty (dotfiles), which
/// callers treat as a deliberate skip.
pub fn split_filename(name: &str) -> Option<(&str, &str)> {
    let (base, ext) = match name.rsplit_once('.') {
        Some((base, ext)) => (base, ext),
        None => (name, ""),
    };

    if base.is_empty() { None } else { Some((base, ext)) }
}
