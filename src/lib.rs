//! organizr - organize files into date-named subdirectories
//!
//! This library scans a directory, groups files that share a base name but
//! differ only by extension into logical entries, derives a representative
//! timestamp per entry, and optionally relocates each entry into a
//! subdirectory named after that timestamp.

pub mod cli;
pub mod config;
pub mod file_entry;
pub mod organizer;
pub mod output;
pub mod path_probe;
pub mod scanner;
pub mod time_format;

pub use config::{ConfigError, Options, Prefer, TimeBasis};
pub use file_entry::{AddVariantError, FileEntry, TimeRange};
pub use organizer::{EntryOutcome, OrganizeError, Organizer};
pub use scanner::{DirectoryScanner, ScanOutcome};

pub use cli::run_cli;
