/// Timestamp resolution and best-effort relocation of file entries.
///
/// For each entry the organizer picks the representative timestamp
/// (`time` basis crossed with the `prefer` bound), formats the bucket label,
/// and in move mode creates the bucket directory and renames every variant
/// into it. Moves are deliberately non-transactional: each variant is
/// attempted independently and a failure neither rolls back earlier variants
/// nor stops other entries.
use crate::config::{Options, TimeBasis};
use crate::file_entry::FileEntry;
use crate::path_probe;
use crate::time_format::format_timestamp;
use std::fs;
use std::path::PathBuf;

/// Errors that can occur while organizing a single entry.
#[derive(Debug)]
pub enum OrganizeError {
    /// The bucket path exists but is not a directory.
    TargetNotDirectory { path: PathBuf },
    /// Failed to create the bucket directory.
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to move one variant into the bucket.
    FileMoveFailure {
        source: PathBuf,
        destination: PathBuf,
        source_error: std::io::Error,
    },
}

impl std::fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TargetNotDirectory { path } => {
                write!(f, "Target {} exists and is not a directory", path.display())
            }
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::FileMoveFailure {
                source,
                destination,
                source_error,
            } => {
                write!(
                    f,
                    "Failed to move {} to {}: {}",
                    source.display(),
                    destination.display(),
                    source_error
                )
            }
        }
    }
}

impl std::error::Error for OrganizeError {}

/// What happened to a single entry during the organize phase.
#[derive(Debug)]
pub struct EntryOutcome {
    /// The formatted bucket name the entry resolves to.
    pub bucket_label: String,
    /// The chosen timestamp, `None` when every variant add failed.
    pub resolved_timestamp: Option<i64>,
    /// True once the entry's move sequence was attempted. "Attempted", not
    /// "every variant confirmed moved".
    pub moved: bool,
    /// Per-variant and per-bucket errors collected along the way.
    pub errors: Vec<OrganizeError>,
}

/// Resolves bucket assignments and relocates entries.
pub struct Organizer<'a> {
    options: &'a Options,
}

impl<'a> Organizer<'a> {
    pub fn new(options: &'a Options) -> Self {
        Self { options }
    }

    /// The representative timestamp for an entry under the configured
    /// `time` basis and `prefer` bound.
    pub fn resolved_timestamp(&self, entry: &FileEntry) -> Option<i64> {
        let range = match self.options.time {
            TimeBasis::Created => entry.creation_range(),
            TimeBasis::Modified => entry.modification_range(),
        };
        range.bound(self.options.prefer)
    }

    /// The bucket name an entry resolves to under the configured format.
    pub fn bucket_label(&self, entry: &FileEntry) -> String {
        format_timestamp(self.resolved_timestamp(entry), &self.options.format)
    }

    /// Processes one entry: resolves its bucket and, in move mode, relocates
    /// its variants.
    ///
    /// In preview mode no filesystem call is made at all. In move mode the
    /// bucket directory is created if absent; if the bucket path exists as a
    /// non-directory the entry is left untouched and reported as not moved.
    /// Variant moves are best-effort and independent.
    pub fn organize(&self, entry: &FileEntry) -> EntryOutcome {
        let resolved_timestamp = self.resolved_timestamp(entry);
        let bucket_label = format_timestamp(resolved_timestamp, &self.options.format);

        let mut moved = false;
        let mut errors = Vec::new();

        if self.options.move_files {
            match self.ensure_bucket(&bucket_label) {
                Ok(target_dir) => {
                    moved = true;
                    for filename in entry.variant_filenames() {
                        let source = entry.directory().join(&filename);
                        let destination = target_dir.join(&filename);
                        if let Err(source_error) = fs::rename(&source, &destination) {
                            errors.push(OrganizeError::FileMoveFailure {
                                source,
                                destination,
                                source_error,
                            });
                        }
                    }
                }
                Err(error) => errors.push(error),
            }
        }

        EntryOutcome {
            bucket_label,
            resolved_timestamp,
            moved,
            errors,
        }
    }

    /// Resolves the bucket directory under the configured root, creating it
    /// (single level) when absent.
    fn ensure_bucket(&self, bucket_label: &str) -> Result<PathBuf, OrganizeError> {
        let target_dir = self.options.path.join(bucket_label);

        if path_probe::exists(&target_dir).is_none() {
            fs::create_dir(&target_dir).map_err(|source| {
                OrganizeError::DirectoryCreationFailed {
                    path: target_dir.clone(),
                    source,
                }
            })?;
        }

        if !path_probe::is_directory(&target_dir) {
            return Err(OrganizeError::TargetNotDirectory { path: target_dir });
        }

        Ok(target_dir)
    }
}
