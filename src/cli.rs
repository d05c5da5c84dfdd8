//! Run orchestration: banner, scan phase, organize phase, report.
//!
//! The scan completes fully before any entry is organized, and entries are
//! processed strictly one at a time. Per-file and per-entry failures are
//! reported inline and never abort the run; the only loud failure is an
//! unreadable root directory, surfaced before any table output.

use crate::config::Options;
use crate::organizer::Organizer;
use crate::output::{OutputFormatter, ReportRow};
use crate::scanner::DirectoryScanner;
use crate::time_format::format_timestamp;

/// Runs a full scan-then-organize pass with the given options.
///
/// # Errors
///
/// Returns an error only when the root directory cannot be read. Everything
/// else degrades per entry and is reported in the table.
pub fn run_cli(options: &Options) -> Result<(), String> {
    OutputFormatter::info("Welcome to Organizr!");
    OutputFormatter::plain(&format!("Selected output format: {}", options.format));

    if options.move_files {
        OutputFormatter::plain("Preparing to move files...");
    }

    OutputFormatter::plain(&format!(
        "Getting file listing for directory '{}'...",
        options.path.display()
    ));

    let scan = DirectoryScanner::scan(&options.path)
        .map_err(|e| format!("Error reading directory {}: {}", options.path.display(), e))?;

    for failure in &scan.failures {
        OutputFormatter::error(&failure.to_string());
    }

    OutputFormatter::plain(&format!(
        "Processing {} entries. This may take a while...",
        scan.entries.len()
    ));

    let organizer = Organizer::new(options);
    let progress = options
        .move_files
        .then(|| OutputFormatter::create_progress_bar(scan.entries.len() as u64));

    let mut rows = Vec::with_capacity(scan.entries.len());
    let mut entry_errors = Vec::new();

    for entry in scan.entries.values() {
        let outcome = organizer.organize(entry);
        entry_errors.extend(outcome.errors);

        rows.push(ReportRow {
            file: entry.base_name().to_string(),
            extensions: entry.variant_extensions().join(", "),
            output: outcome.bucket_label,
            created: format_timestamp(
                entry.creation_range().bound(options.prefer),
                &options.display,
            ),
            modified: format_timestamp(
                entry.modification_range().bound(options.prefer),
                &options.display,
            ),
            moved: outcome.moved,
        });

        if let Some(pb) = &progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    for error in &entry_errors {
        OutputFormatter::error(&error.to_string());
    }

    OutputFormatter::report_table(&rows);

    if options.move_files {
        OutputFormatter::success("Files moved.");
    } else {
        OutputFormatter::plain(
            "Running in preview mode. To actually move any files, add the 'move' argument.",
        );
    }

    Ok(())
}
