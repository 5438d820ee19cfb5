//! Report generation.
//!
//! Renders a [`DirectoryReport`] as a plain-text table and a [`RunSummary`]
//! as a short triage block. Output carries no color so columns stay aligned
//! when written to a file.

use crate::models::entry::{FileEntry, FileStatus};
use crate::models::report::{DirectoryReport, RunSummary};
use std::fmt::Write;

const DIVIDER_MIN: usize = 40;

/// Render one directory's report.
pub fn render_directory(report: &DirectoryReport) -> String {
    let rows: Vec<&FileEntry> = report.entries.iter().chain(report.ignored.iter()).collect();

    let name_width = rows
        .iter()
        .map(|e| e.original_name.chars().count())
        .chain(std::iter::once("Original name".len()))
        .max()
        .unwrap_or(0);
    let new_width = rows
        .iter()
        .filter_map(|e| e.new_name.as_ref().map(|n| n.chars().count()))
        .chain(std::iter::once("New name".len()))
        .max()
        .unwrap_or(0);
    let width = (name_width + new_width + 2 + 2 + "Unprocessed".len()).max(DIVIDER_MIN);

    let heavy = "=".repeat(width);
    let light = "-".repeat(width);
    let mut out = String::new();

    let _ = writeln!(out, "{}", heavy);
    let _ = writeln!(
        out,
        "Directory: {}{}",
        report.directory.display(),
        if report.dry_run { " (dry run)" } else { "" }
    );
    let _ = writeln!(out, "{}", light);
    let _ = writeln!(
        out,
        "{:<nw$}  {:<ww$}  {}",
        "Original name",
        "New name",
        "Status",
        nw = name_width,
        ww = new_width
    );
    let _ = writeln!(out, "{}", light);

    for entry in &rows {
        let line = format!(
            "{:<nw$}  {:<ww$}  {}",
            entry.original_name,
            entry.new_name.as_deref().unwrap_or(""),
            entry.status,
            nw = name_width,
            ww = new_width
        );
        let _ = writeln!(out, "{}", line.trim_end());
    }

    if rows.is_empty() {
        let _ = writeln!(out, "(no files)");
    }

    let _ = writeln!(out, "{}", light);
    let _ = writeln!(out, "{}", render_counts(report));
    if let Some(ref failure) = report.failure {
        let stage = if report.unreadable { "Listing" } else { "Planning" };
        let _ = writeln!(out, "{} failed: {}", stage, failure);
    }
    for entry in report.entries.iter().filter(|e| e.status.is_failure()) {
        if let Some(ref reason) = entry.reason {
            let _ = writeln!(out, "  {}: {}", entry.original_name, reason);
        }
    }
    let _ = writeln!(out, "{}", heavy);

    out
}

/// One-line status tally, skipping zero counts.
pub fn render_counts(report: &DirectoryReport) -> String {
    let parts: Vec<String> = FileStatus::ALL
        .iter()
        .filter_map(|&status| {
            let n = report.counts.get(status);
            (n > 0).then(|| format!("{}: {}", status, n))
        })
        .collect();

    if parts.is_empty() {
        "No files".to_string()
    } else {
        parts.join("  ")
    }
}

/// Render the cross-directory triage summary.
pub fn render_summary(summary: &RunSummary) -> String {
    let completed_label = if summary.dry_run {
        "Ready (dry run)"
    } else {
        "Fully renamed"
    };

    let mut out = String::new();
    let _ = writeln!(out, "Directories processed: {}", summary.directories);
    let _ = writeln!(out, "  {:<18}{}", "With errors:", summary.with_errors);
    let _ = writeln!(out, "  {:<18}{}", "With rejections:", summary.with_rejections);
    let _ = writeln!(out, "  {:<18}{}", format!("{}:", completed_label), summary.completed);
    let _ = writeln!(out, "  {:<18}{}", "No change:", summary.unchanged);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::entry::Batch;
    use std::path::PathBuf;

    fn entry(name: &str, status: FileStatus, new_name: Option<&str>) -> FileEntry {
        let mut e = FileEntry::new(name, PathBuf::from("/p").join(name), "jpg");
        e.status = status;
        e.new_name = new_name.map(String::from);
        e
    }

    fn report() -> DirectoryReport {
        let mut batch = Batch::new("/p");
        batch.entries = vec![
            entry("b.jpg", FileStatus::Renamed, Some("Party_0002.jpg")),
            entry("A.jpg", FileStatus::Renamed, Some("Party_0001.jpg")),
        ];
        batch.ignored = vec![FileEntry::ignored("notes.txt", PathBuf::from("/p/notes.txt"), "txt")];
        DirectoryReport::from_batch(batch, false, None)
    }

    #[test]
    fn test_rows_sorted_case_insensitively() {
        let text = render_directory(&report());
        let a = text.find("A.jpg").unwrap();
        let b = text.find("b.jpg").unwrap();
        let notes = text.find("notes.txt").unwrap();
        assert!(a < b && b < notes);
        assert!(text.contains("Party_0001.jpg"));
    }

    #[test]
    fn test_counts_line() {
        assert_eq!(render_counts(&report()), "Renamed: 2  Ignored: 1");
    }

    #[test]
    fn test_empty_directory() {
        let r = DirectoryReport::from_batch(Batch::new("/empty"), false, None);
        let text = render_directory(&r);
        assert!(text.contains("(no files)"));
        assert!(text.contains("No files"));
    }

    #[test]
    fn test_failure_is_shown() {
        let mut batch = Batch::new("/p");
        let mut e = entry("Foo-1.jpg", FileStatus::Unprocessed, None);
        e.fail(FileStatus::Rejected, "does not follow the 'Bar' naming convention")
            .unwrap();
        batch.entries = vec![e];
        let r = DirectoryReport::from_batch(batch, true, Some("1 file(s) do not match".into()));
        let text = render_directory(&r);
        assert!(text.contains("(dry run)"));
        assert!(text.contains("Planning failed: 1 file(s) do not match"));
        assert!(text.contains("Foo-1.jpg: does not follow the 'Bar' naming convention"));
    }

    #[test]
    fn test_unreadable_directory_is_shown() {
        let r = DirectoryReport::unreadable("/p/gone", false, "Path not found: /p/gone");
        let text = render_directory(&r);
        assert!(text.contains("Listing failed: Path not found: /p/gone"));
    }

    #[test]
    fn test_summary_labels() {
        let summary = RunSummary {
            directories: 3,
            with_errors: 1,
            completed: 2,
            ..Default::default()
        };
        let text = render_summary(&summary);
        assert!(text.contains("Directories processed: 3"));
        assert!(text.contains("Fully renamed:"));
        assert!(!text.contains("dry run"));
    }
}
