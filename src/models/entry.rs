//! File entry and batch data model.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Lifecycle status of a single file.
///
/// `Unprocessed` is the only non-terminal state. `Ignored` is assigned when the
/// directory is listed and never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Unprocessed,
    Ready,
    Renamed,
    Error,
    Rejected,
    Ignored,
}

impl FileStatus {
    /// All statuses, in report order.
    pub const ALL: [FileStatus; 6] = [
        FileStatus::Unprocessed,
        FileStatus::Ready,
        FileStatus::Renamed,
        FileStatus::Error,
        FileStatus::Rejected,
        FileStatus::Ignored,
    ];

    /// Whether no further transition is allowed.
    pub fn is_terminal(self) -> bool {
        !matches!(self, FileStatus::Unprocessed)
    }

    /// Whether this is a terminal success.
    pub fn is_success(self) -> bool {
        matches!(self, FileStatus::Ready | FileStatus::Renamed)
    }

    /// Whether this is a terminal failure.
    pub fn is_failure(self) -> bool {
        matches!(self, FileStatus::Error | FileStatus::Rejected)
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FileStatus::Unprocessed => "Unprocessed",
            FileStatus::Ready => "Ready",
            FileStatus::Renamed => "Renamed",
            FileStatus::Error => "Error",
            FileStatus::Rejected => "Rejected",
            FileStatus::Ignored => "Ignored",
        };
        f.write_str(label)
    }
}

/// One file found in a directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    /// File name as found on disk.
    pub original_name: String,
    /// Absolute path.
    pub path: PathBuf,
    /// Extension as found on disk (case preserved).
    pub extension: String,
    /// Current status.
    pub status: FileStatus,
    /// Assigned ordinal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence_number: Option<u64>,
    /// Planned new name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_name: Option<String>,
    /// Reason attached to a failure status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl FileEntry {
    /// Create an unprocessed candidate entry.
    pub fn new(original_name: impl Into<String>, path: PathBuf, extension: impl Into<String>) -> Self {
        Self {
            original_name: original_name.into(),
            path,
            extension: extension.into(),
            status: FileStatus::Unprocessed,
            sequence_number: None,
            new_name: None,
            reason: None,
        }
    }

    /// Create an entry that is ignored from the start.
    pub fn ignored(original_name: impl Into<String>, path: PathBuf, extension: impl Into<String>) -> Self {
        Self {
            status: FileStatus::Ignored,
            ..Self::new(original_name, path, extension)
        }
    }

    /// Move to a new status. Only `Unprocessed` may transition, and never to
    /// `Unprocessed` or `Ignored`.
    pub fn transition(&mut self, to: FileStatus) -> Result<()> {
        let legal = !self.status.is_terminal()
            && !matches!(to, FileStatus::Unprocessed | FileStatus::Ignored);
        if !legal {
            return Err(Error::InvalidTransition {
                name: self.original_name.clone(),
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }

    /// Move to a failure status and remember why.
    pub fn fail(&mut self, to: FileStatus, reason: impl Into<String>) -> Result<()> {
        self.transition(to)?;
        self.reason = Some(reason.into());
        Ok(())
    }

    /// Lowercased extension used in generated names.
    pub fn output_extension(&self) -> String {
        self.extension.to_lowercase()
    }
}

/// All files of one directory, owned by the batch that processes it.
#[derive(Debug, Clone, Default)]
pub struct Batch {
    /// Directory being processed.
    pub directory: PathBuf,
    /// Candidate media files.
    pub entries: Vec<FileEntry>,
    /// Files with unrecognized extensions.
    pub ignored: Vec<FileEntry>,
    /// Every name present in the directory (files and subdirectories).
    pub on_disk: Vec<String>,
}

impl Batch {
    /// Create an empty batch for a directory.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            ..Self::default()
        }
    }

    /// Candidate file names, in entry order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.original_name.as_str()).collect()
    }

    /// Find a candidate by its current name.
    pub fn entry_mut(&mut self, name: &str) -> Option<&mut FileEntry> {
        self.entries.iter_mut().find(|e| e.original_name == name)
    }
}
