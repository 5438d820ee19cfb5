//! Rename plan data model.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A validated, not-yet-applied set of renames for one directory.
///
/// A plan only exists once every destination has been checked: no two items
/// share a destination (case-insensitively) and no destination collides with
/// another file on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenamePlan {
    /// Directory the plan applies to.
    pub directory: PathBuf,
    /// Plan items, in ordinal order.
    pub items: Vec<PlanItem>,
}

/// A single planned rename.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanItem {
    /// Current file name.
    pub original_name: String,
    /// Assigned ordinal.
    pub sequence_number: u64,
    /// New file name.
    pub new_name: String,
    /// Current path.
    pub source: PathBuf,
    /// Destination path.
    pub destination: PathBuf,
}

impl PlanItem {
    /// Whether the file already carries its planned name.
    pub fn is_unchanged(&self) -> bool {
        self.original_name == self.new_name
    }
}

impl RenamePlan {
    /// Number of files that actually change name.
    pub fn changes(&self) -> usize {
        self.items.iter().filter(|i| !i.is_unchanged()).count()
    }
}
