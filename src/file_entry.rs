//! Logical file entries: one base name with one or more extension variants.
//!
//! A `FileEntry` groups the physical files `report.txt`, `report.pdf`, ...
//! into a single organizational unit and tracks the min/max creation and
//! modification times seen across its variants.

use crate::config::Prefer;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Min/max bounds over a set of timestamps, in epoch milliseconds.
///
/// Both bounds are `None` until the first timestamp is recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeRange {
    min: Option<i64>,
    max: Option<i64>,
}

impl TimeRange {
    /// Extends the range to cover `timestamp_ms`.
    pub fn widen(&mut self, timestamp_ms: i64) {
        self.min = Some(self.min.map_or(timestamp_ms, |min| min.min(timestamp_ms)));
        self.max = Some(self.max.map_or(timestamp_ms, |max| max.max(timestamp_ms)));
    }

    pub fn min(&self) -> Option<i64> {
        self.min
    }

    pub fn max(&self) -> Option<i64> {
        self.max
    }

    /// Selects the preferred bound of the range.
    pub fn bound(&self, prefer: Prefer) -> Option<i64> {
        match prefer {
            Prefer::Min => self.min,
            Prefer::Max => self.max,
        }
    }
}

/// Errors that can occur while adding an extension variant to an entry.
///
/// Both are recoverable at the scan level: the scanner reports them and moves
/// on to the next filename.
#[derive(Debug)]
pub enum AddVariantError {
    /// The candidate path exists but is not a regular file.
    NotAFile { path: PathBuf },
    /// Filesystem metadata for the candidate path could not be read.
    Stat {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for AddVariantError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAFile { path } => {
                write!(f, "Not a file: {}", path.display())
            }
            Self::Stat { path, source } => {
                write!(f, "Failed to stat {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for AddVariantError {}

/// One logical file: a shared base name plus the extension variants that were
/// discovered for it, with aggregated timestamp ranges.
#[derive(Debug, Clone)]
pub struct FileEntry {
    directory: PathBuf,
    base_name: String,
    extensions: Vec<String>,
    ctime: TimeRange,
    mtime: TimeRange,
}

impl FileEntry {
    /// Creates an empty entry rooted at `directory`. Only the scanner
    /// constructs entries; everything downstream reads them.
    pub fn new(directory: PathBuf, base_name: String) -> Self {
        Self {
            directory,
            base_name,
            extensions: Vec::new(),
            ctime: TimeRange::default(),
            mtime: TimeRange::default(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Records one physical variant of this entry.
    ///
    /// Stats `{directory}/{base_name}.{ext}` (no dot when `ext` is empty),
    /// widens both timestamp ranges, and appends the extension. Fails without
    /// modifying the entry when the path is missing, unreadable, or not a
    /// regular file.
    pub fn add_extension(&mut self, ext: &str) -> Result<(), AddVariantError> {
        let path = self.directory.join(variant_filename(&self.base_name, ext));

        let stats = fs::symlink_metadata(&path).map_err(|source| AddVariantError::Stat {
            path: path.clone(),
            source,
        })?;

        if !stats.is_file() {
            return Err(AddVariantError::NotAFile { path });
        }

        let modified = stats.modified().map_err(|source| AddVariantError::Stat {
            path: path.clone(),
            source,
        })?;
        // Birth time is not available on every platform or filesystem.
        let created = stats.created().unwrap_or(modified);

        self.ctime.widen(epoch_millis(created));
        self.mtime.widen(epoch_millis(modified));
        self.extensions.push(ext.to_string());

        Ok(())
    }

    /// Extensions in discovery order, or `[""]` when none were recorded so
    /// callers always have at least one variant to act on.
    pub fn variant_extensions(&self) -> Vec<String> {
        if self.extensions.is_empty() {
            vec![String::new()]
        } else {
            self.extensions.clone()
        }
    }

    /// The physical filename of each variant, `{base}.{ext}` (bare `{base}`
    /// for the empty extension).
    pub fn variant_filenames(&self) -> Vec<String> {
        self.variant_extensions()
            .iter()
            .map(|ext| variant_filename(&self.base_name, ext))
            .collect()
    }

    /// The full path of each variant under the entry's directory.
    pub fn variant_paths(&self) -> Vec<PathBuf> {
        self.variant_filenames()
            .iter()
            .map(|name| self.directory.join(name))
            .collect()
    }

    pub fn creation_range(&self) -> TimeRange {
        self.ctime
    }

    pub fn modification_range(&self) -> TimeRange {
        self.mtime
    }
}

fn variant_filename(base_name: &str, ext: &str) -> String {
    if ext.is_empty() {
        base_name.to_string()
    } else {
        format!("{}.{}", base_name, ext)
    }
}

fn epoch_millis(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(duration) => duration.as_millis() as i64,
        Err(earlier) => -(earlier.duration().as_millis() as i64),
    }
}
