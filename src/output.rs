//! Output formatting and styling module.
//!
//! Provides a centralized interface for all CLI output, including colored
//! messages, a progress bar for the move phase, and the per-entry report
//! table. This module abstracts away output details, making it easy to
//! change formatting globally.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

/// One row of the report table, holding already-formatted cell text.
#[derive(Debug, Clone)]
pub struct ReportRow {
    /// The entry's base name.
    pub file: String,
    /// Comma-joined extension list.
    pub extensions: String,
    /// The bucket label the entry resolves to.
    pub output: String,
    /// Formatted creation timestamp (display pattern).
    pub created: String,
    /// Formatted modification timestamp (display pattern).
    pub modified: String,
    /// Whether the entry's move sequence was attempted.
    pub moved: bool,
}

/// Manages all CLI output with consistent styling and formatting.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a regular message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Creates a progress bar for the move phase.
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("█▓░"),
        );
        pb
    }

    /// Prints the per-entry report table.
    ///
    /// Columns: File, Extensions, Output, Created, Modified, Status. Column
    /// widths are computed from the widest cell so the table stays aligned
    /// for any date pattern.
    pub fn report_table(rows: &[ReportRow]) {
        let headers = ["File", "Extensions", "Output", "Created", "Modified", "Status"];

        let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
        for row in rows {
            let cells = [
                row.file.as_str(),
                row.extensions.as_str(),
                row.output.as_str(),
                row.created.as_str(),
                row.modified.as_str(),
            ];
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(cell.len());
            }
        }

        let separator_len = widths.iter().sum::<usize>() + 3 * widths.len();

        println!();
        for (header, width) in headers.iter().zip(&widths) {
            print!("{:<width$} | ", header.bold(), width = *width);
        }
        println!();
        println!("{}", "-".repeat(separator_len));

        for row in rows {
            let status = if row.moved {
                "Moved".green()
            } else {
                "Not Moved".yellow()
            };
            println!(
                "{:<w0$} | {:<w1$} | {:<w2$} | {:<w3$} | {:<w4$} | {}",
                row.file,
                row.extensions,
                row.output,
                row.created,
                row.modified,
                status,
                w0 = widths[0],
                w1 = widths[1],
                w2 = widths[2],
                w3 = widths[3],
                w4 = widths[4],
            );
        }
        println!("{}", "-".repeat(separator_len));
    }
}
