/// Integration tests for organizr
///
/// These tests simulate real-world usage scenarios, testing the complete
/// scan-then-organize pipeline end to end.
///
/// Test categories:
/// 1. Scanning and entry grouping
/// 2. Preview mode verification
/// 3. Move mode, success and blocked cases
/// 4. Degraded entries and scan resilience
/// 5. Full run via run_cli
use organizr::cli::run_cli;
use organizr::config::{Options, Prefer, TimeBasis};
use organizr::organizer::Organizer;
use organizr::scanner::DirectoryScanner;
use organizr::time_format::INVALID_DATE;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

/// A test fixture that sets up a temporary directory with configurable
/// file structure for testing.
struct TestFixture {
    temp_dir: TempDir,
}

impl TestFixture {
    /// Create a new test fixture with a temporary directory.
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        TestFixture { temp_dir }
    }

    /// Get the path to the test directory.
    fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a file with content in the test directory.
    fn create_file(&self, name: &str, content: &str) {
        let file_path = self.path().join(name);
        let mut file = File::create(&file_path).expect("Failed to create file");
        file.write_all(content.as_bytes())
            .expect("Failed to write file content");
    }

    /// Create multiple files at once.
    fn create_files(&self, names: &[&str]) {
        for name in names {
            self.create_file(name, "content");
        }
    }

    /// Create a subdirectory in the test directory.
    fn create_subdir(&self, name: &str) {
        let dir_path = self.path().join(name);
        fs::create_dir(&dir_path).expect("Failed to create subdirectory");
    }

    /// Options rooted at the test directory.
    fn options(&self, move_files: bool) -> Options {
        Options {
            move_files,
            path: self.path().to_path_buf(),
            ..Options::default()
        }
    }

    /// Assert that a file exists at the given relative path.
    fn assert_file_exists(&self, rel_path: &str) {
        let path = self.path().join(rel_path);
        assert!(
            path.exists() && path.is_file(),
            "File should exist: {}",
            path.display()
        );
    }

    /// Assert that a file does NOT exist at the given relative path.
    fn assert_file_not_exists(&self, rel_path: &str) {
        let path = self.path().join(rel_path);
        assert!(!path.exists(), "File should not exist: {}", path.display());
    }

    /// Count directories in the test directory (non-recursive).
    fn count_dirs(&self) -> usize {
        fs::read_dir(self.path())
            .expect("Failed to read directory")
            .filter_map(|entry| {
                entry.ok().and_then(|e| {
                    if e.metadata().ok()?.is_dir() {
                        Some(())
                    } else {
                        None
                    }
                })
            })
            .count()
    }
}

// ============================================================================
// Scanning and entry grouping
// ============================================================================

#[test]
fn test_scan_groups_files_sharing_a_base_name() {
    let fixture = TestFixture::new();
    fixture.create_files(&["report.txt", "report.pdf", "report.bak", "notes.md"]);

    let outcome = DirectoryScanner::scan(fixture.path()).expect("Scan failed");

    assert!(outcome.failures.is_empty());
    assert_eq!(outcome.entries.len(), 2);

    let report = &outcome.entries["report"];
    let mut extensions = report.variant_extensions();
    extensions.sort();
    assert_eq!(extensions, vec!["bak", "pdf", "txt"]);

    let notes = &outcome.entries["notes"];
    assert_eq!(notes.variant_extensions(), vec!["md".to_string()]);
}

#[test]
fn test_scan_extensionless_file_has_empty_extension() {
    let fixture = TestFixture::new();
    fixture.create_file("Makefile", "all:");

    let outcome = DirectoryScanner::scan(fixture.path()).expect("Scan failed");

    let entry = &outcome.entries["Makefile"];
    assert_eq!(entry.variant_extensions(), vec![String::new()]);
    assert_eq!(entry.variant_filenames(), vec!["Makefile".to_string()]);
}

#[test]
fn test_scan_skips_dotfiles_entirely() {
    let fixture = TestFixture::new();
    fixture.create_files(&[".gitignore", ".env", "kept.txt"]);

    let outcome = DirectoryScanner::scan(fixture.path()).expect("Scan failed");

    assert!(outcome.failures.is_empty());
    assert_eq!(outcome.entries.len(), 1);
    assert!(outcome.entries.contains_key("kept"));
}

#[test]
fn test_scan_multi_dot_names_split_at_last_dot() {
    let fixture = TestFixture::new();
    fixture.create_files(&["archive.tar.gz", "archive.tar.bz2"]);

    let outcome = DirectoryScanner::scan(fixture.path()).expect("Scan failed");

    let entry = &outcome.entries["archive.tar"];
    let mut extensions = entry.variant_extensions();
    extensions.sort();
    assert_eq!(extensions, vec!["bz2", "gz"]);
}

#[test]
fn test_scan_is_idempotent() {
    let fixture = TestFixture::new();
    fixture.create_files(&["a.txt", "a.log", "b.md", "c"]);

    let first = DirectoryScanner::scan(fixture.path()).expect("Scan failed");
    let second = DirectoryScanner::scan(fixture.path()).expect("Scan failed");

    assert_eq!(
        first.entries.keys().collect::<Vec<_>>(),
        second.entries.keys().collect::<Vec<_>>()
    );
    for (base, entry) in &first.entries {
        let mut lhs = entry.variant_extensions();
        let mut rhs = second.entries[base].variant_extensions();
        lhs.sort();
        rhs.sort();
        assert_eq!(lhs, rhs);
    }
}

#[test]
fn test_entry_timestamp_ranges_cover_all_variants() {
    let fixture = TestFixture::new();
    fixture.create_files(&["data.csv", "data.json", "data.xml"]);

    let outcome = DirectoryScanner::scan(fixture.path()).expect("Scan failed");
    let entry = &outcome.entries["data"];

    let mtime = entry.modification_range();
    assert!(mtime.min().expect("min set") <= mtime.max().expect("max set"));
    let ctime = entry.creation_range();
    assert!(ctime.min().expect("min set") <= ctime.max().expect("max set"));
}

// ============================================================================
// Preview mode
// ============================================================================

#[test]
fn test_preview_mode_makes_no_changes() {
    let fixture = TestFixture::new();
    fixture.create_files(&["report.txt", "report.pdf", "notes.md"]);

    let options = fixture.options(false);
    run_cli(&options).expect("Preview run failed");

    fixture.assert_file_exists("report.txt");
    fixture.assert_file_exists("report.pdf");
    fixture.assert_file_exists("notes.md");
    assert_eq!(fixture.count_dirs(), 0);
}

// ============================================================================
// Move mode
// ============================================================================

#[test]
fn test_move_mode_relocates_entries_into_buckets() {
    let fixture = TestFixture::new();
    fixture.create_files(&["report.txt", "report.pdf"]);

    let options = fixture.options(true);

    // Compute the expected bucket through the same resolution path.
    let scan = DirectoryScanner::scan(fixture.path()).expect("Scan failed");
    let label = Organizer::new(&options).bucket_label(&scan.entries["report"]);
    assert_ne!(label, INVALID_DATE);

    run_cli(&options).expect("Move run failed");

    fixture.assert_file_not_exists("report.txt");
    fixture.assert_file_not_exists("report.pdf");
    fixture.assert_file_exists(&format!("{}/report.txt", label));
    fixture.assert_file_exists(&format!("{}/report.pdf", label));
}

#[test]
fn test_move_mode_moves_extensionless_files() {
    let fixture = TestFixture::new();
    fixture.create_file("LICENSE", "MIT");

    let options = fixture.options(true);
    let scan = DirectoryScanner::scan(fixture.path()).expect("Scan failed");
    let label = Organizer::new(&options).bucket_label(&scan.entries["LICENSE"]);

    run_cli(&options).expect("Move run failed");

    fixture.assert_file_not_exists("LICENSE");
    fixture.assert_file_exists(&format!("{}/LICENSE", label));
}

#[test]
fn test_blocked_bucket_leaves_entry_and_run_continues() {
    let fixture = TestFixture::new();
    fixture.create_files(&["report.txt", "report.pdf"]);

    let options = fixture.options(true);
    let scan = DirectoryScanner::scan(fixture.path()).expect("Scan failed");
    let organizer = Organizer::new(&options);
    let label = organizer.bucket_label(&scan.entries["report"]);

    // Occupy the bucket path with a plain file. The bucket label carries no
    // dot for the default format, so the blocker itself scans as its own
    // entry with an empty extension.
    fixture.create_file(&label, "blocker");

    run_cli(&options).expect("Run should not abort on a blocked entry");

    fixture.assert_file_exists("report.txt");
    fixture.assert_file_exists("report.pdf");
    fixture.assert_file_exists(&label);
}

#[test]
fn test_blocked_entry_does_not_disturb_other_entries() {
    let fixture = TestFixture::new();
    fixture.create_files(&["report.txt", "report.pdf"]);

    let options = fixture.options(true);
    let scan = DirectoryScanner::scan(fixture.path()).expect("Scan failed");
    let organizer = Organizer::new(&options);

    let report = scan.entries["report"].clone();
    let label = organizer.bucket_label(&report);
    let blocked = fixture.path().join(&label);
    fs::write(&blocked, "in the way").expect("Failed to write blocker");

    let outcome = organizer.organize(&report);
    assert!(!outcome.moved);

    // A second, unblocked entry in the same run still organizes fine once
    // the blocker is gone from its path: use a different format so its
    // bucket differs.
    fixture.create_file("journal.md", "entry");
    let mut other_options = fixture.options(true);
    other_options.format = "yyyy".to_string();
    let scan = DirectoryScanner::scan(fixture.path()).expect("Scan failed");
    let other = Organizer::new(&other_options).organize(&scan.entries["journal"]);
    assert!(other.moved);
    assert!(other.errors.is_empty());
}

// ============================================================================
// Degraded entries and resilience
// ============================================================================

#[test]
fn test_scan_resilience_one_bad_candidate_among_many() {
    let fixture = TestFixture::new();
    for i in 0..9 {
        fixture.create_file(&format!("file{}.txt", i), "content");
    }
    // A directory that parses as a variant candidate; statting succeeds but
    // it is not a regular file.
    fixture.create_subdir("stash.d");

    let outcome = DirectoryScanner::scan(fixture.path()).expect("Scan failed");

    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].filename, "stash.d");

    for i in 0..9 {
        let entry = &outcome.entries[&format!("file{}", i)];
        assert_eq!(entry.variant_extensions(), vec!["txt".to_string()]);
    }
}

#[test]
fn test_zero_variant_entry_still_gets_a_row() {
    let fixture = TestFixture::new();
    fixture.create_subdir("orphan.d");

    let options = fixture.options(false);
    let scan = DirectoryScanner::scan(fixture.path()).expect("Scan failed");

    // The failed candidate still produced an entry.
    let entry = &scan.entries["orphan"];
    assert!(entry.modification_range().min().is_none());

    let outcome = Organizer::new(&options).organize(entry);
    assert_eq!(outcome.bucket_label, INVALID_DATE);
    assert_eq!(outcome.resolved_timestamp, None);
    assert!(!outcome.moved);

    // And the whole run completes.
    run_cli(&options).expect("Run should tolerate degraded entries");
}

// ============================================================================
// Option wiring through a full run
// ============================================================================

#[test]
fn test_created_basis_and_max_bound_resolve_to_range_end() {
    let fixture = TestFixture::new();
    fixture.create_files(&["log.txt", "log.old"]);

    let mut options = fixture.options(false);
    options.time = TimeBasis::Created;
    options.prefer = Prefer::Max;

    let scan = DirectoryScanner::scan(fixture.path()).expect("Scan failed");
    let entry = &scan.entries["log"];

    let resolved = Organizer::new(&options).resolved_timestamp(entry);
    assert_eq!(resolved, entry.creation_range().max());
}

#[test]
fn test_custom_format_names_the_bucket() {
    let fixture = TestFixture::new();
    fixture.create_file("photo.jpg", "pixels");

    let mut options = fixture.options(true);
    options.format = "yyyy-mm".to_string();

    let scan = DirectoryScanner::scan(fixture.path()).expect("Scan failed");
    let label = Organizer::new(&options).bucket_label(&scan.entries["photo"]);
    assert_eq!(label.len(), 7); // yyyy-mm

    run_cli(&options).expect("Move run failed");
    fixture.assert_file_exists(&format!("{}/photo.jpg", label));
}

#[test]
fn test_run_cli_fails_loudly_for_unreadable_root() {
    let fixture = TestFixture::new();
    let mut options = fixture.options(false);
    options.path = fixture.path().join("does-not-exist");

    let result = run_cli(&options);
    assert!(result.is_err());
}
