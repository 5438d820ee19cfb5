//! Report data model.

use super::entry::{Batch, FileEntry, FileStatus};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Number of files per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub unprocessed: usize,
    pub ready: usize,
    pub renamed: usize,
    pub error: usize,
    pub rejected: usize,
    pub ignored: usize,
}

impl StatusCounts {
    /// Count one more file with the given status.
    pub fn record(&mut self, status: FileStatus) {
        match status {
            FileStatus::Unprocessed => self.unprocessed += 1,
            FileStatus::Ready => self.ready += 1,
            FileStatus::Renamed => self.renamed += 1,
            FileStatus::Error => self.error += 1,
            FileStatus::Rejected => self.rejected += 1,
            FileStatus::Ignored => self.ignored += 1,
        }
    }

    /// Count for a single status.
    pub fn get(&self, status: FileStatus) -> usize {
        match status {
            FileStatus::Unprocessed => self.unprocessed,
            FileStatus::Ready => self.ready,
            FileStatus::Renamed => self.renamed,
            FileStatus::Error => self.error,
            FileStatus::Rejected => self.rejected,
            FileStatus::Ignored => self.ignored,
        }
    }

    /// Candidate files (everything but ignored).
    pub fn candidates(&self) -> usize {
        self.unprocessed + self.ready + self.renamed + self.error + self.rejected
    }
}

/// Outcome of processing one directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryReport {
    /// Directory that was processed.
    pub directory: PathBuf,
    /// Whether the run was a dry run.
    pub dry_run: bool,
    /// Candidate files, sorted case-insensitively by original name.
    pub entries: Vec<FileEntry>,
    /// Files with unrecognized extensions.
    pub ignored: Vec<FileEntry>,
    /// Why planning failed, if it did.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
    /// The directory could not be listed, so none of its files were seen.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub unreadable: bool,
    /// Per-status counts over entries and ignored files.
    pub counts: StatusCounts,
}

impl DirectoryReport {
    /// Freeze a processed batch into a report.
    pub fn from_batch(batch: Batch, dry_run: bool, failure: Option<String>) -> Self {
        let Batch {
            directory,
            mut entries,
            mut ignored,
            ..
        } = batch;

        entries.sort_by_cached_key(|e| (e.original_name.to_lowercase(), e.original_name.clone()));
        ignored.sort_by_cached_key(|e| (e.original_name.to_lowercase(), e.original_name.clone()));

        let mut counts = StatusCounts::default();
        for entry in entries.iter().chain(ignored.iter()) {
            counts.record(entry.status);
        }

        Self {
            directory,
            dry_run,
            entries,
            ignored,
            failure,
            unreadable: false,
            counts,
        }
    }

    /// Report for a directory that could not be listed.
    pub fn unreadable(directory: impl Into<PathBuf>, dry_run: bool, reason: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            dry_run,
            entries: Vec::new(),
            ignored: Vec::new(),
            failure: Some(reason.into()),
            unreadable: true,
            counts: StatusCounts::default(),
        }
    }

    /// Candidates that ended `Ready` or `Renamed`.
    pub fn successes(&self) -> usize {
        self.entries.iter().filter(|e| e.status.is_success()).count()
    }

    /// Triage bucket of this directory.
    pub fn outcome(&self) -> DirectoryOutcome {
        let c = &self.counts;
        if c.error > 0 || self.unreadable {
            DirectoryOutcome::HasErrors
        } else if c.rejected > 0 {
            DirectoryOutcome::HasRejections
        } else if c.candidates() > 0 && self.successes() == c.candidates() {
            DirectoryOutcome::Completed
        } else {
            DirectoryOutcome::NoChange
        }
    }
}

/// Triage bucket for one directory, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectoryOutcome {
    /// At least one file ended as `Error`, or the directory was unreadable.
    HasErrors,
    /// At least one file ended as `Rejected`.
    HasRejections,
    /// Every candidate was renamed (or is ready, in a dry run).
    Completed,
    /// Nothing happened, or the directory had no candidates.
    NoChange,
}

/// Aggregate over several directories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub directories: usize,
    pub with_errors: usize,
    pub with_rejections: usize,
    pub completed: usize,
    pub unchanged: usize,
    pub dry_run: bool,
}

impl RunSummary {
    /// Classify every report into exactly one bucket.
    pub fn from_reports(reports: &[DirectoryReport]) -> Self {
        let mut summary = RunSummary {
            directories: reports.len(),
            dry_run: reports.iter().any(|r| r.dry_run),
            ..Default::default()
        };
        for report in reports {
            match report.outcome() {
                DirectoryOutcome::HasErrors => summary.with_errors += 1,
                DirectoryOutcome::HasRejections => summary.with_rejections += 1,
                DirectoryOutcome::Completed => summary.completed += 1,
                DirectoryOutcome::NoChange => summary.unchanged += 1,
            }
        }
        summary
    }
}
