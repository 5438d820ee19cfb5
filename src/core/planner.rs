//! Rename planner module.
//!
//! Builds a [`RenamePlan`] for one directory in two phases:
//! 1. assign ordinals and compute every new name without touching disk
//! 2. check the whole batch for destination collisions
//!
//! If either phase fails, the offending entries are flagged and no plan is
//! returned, so nothing in the directory gets renamed.

use super::sequencer::{self, Ranking};
use crate::models::config::{RenameConfig, SortStrategy};
use crate::models::entry::{Batch, FileStatus};
use crate::models::plan::{PlanItem, RenamePlan};
use crate::services::metadata::MetadataReader;
use crate::{Error, Result};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static BASE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Za-z0-9_]*$").expect("base name pattern is valid"));

/// Check that a base name starts with an uppercase letter and only holds
/// letters, digits and underscores.
pub fn validate_base_name(base: &str) -> Result<()> {
    if BASE_NAME_RE.is_match(base) {
        Ok(())
    } else {
        Err(Error::InvalidBaseName(base.to_string()))
    }
}

/// Generate a new file name.
///
/// Format: `${base}_${ordinal:0width}.${extension}` with the extension lowercased.
pub fn generate_name(base: &str, ordinal: u64, width: usize, extension: &str) -> String {
    format!(
        "{}_{:0width$}.{}",
        base,
        ordinal,
        extension.to_lowercase(),
        width = width
    )
}

/// Find entries whose destination is unsafe.
///
/// `candidates` holds `(current name, new name)` pairs. A candidate conflicts
/// when another candidate has the same destination (case-insensitively) or
/// when a different file already exists on disk under that name. A
/// destination equal to the file's own current name, ignoring case, is fine.
/// Returns the indices of the offending candidates, sorted.
pub fn find_conflicts(candidates: &[(&str, &str)], on_disk: &[String]) -> Vec<usize> {
    let mut by_destination: HashMap<String, Vec<usize>> = HashMap::new();
    for (idx, (_, new_name)) in candidates.iter().enumerate() {
        by_destination
            .entry(new_name.to_lowercase())
            .or_default()
            .push(idx);
    }

    let mut existing: HashMap<String, Vec<&str>> = HashMap::new();
    for name in on_disk {
        existing
            .entry(name.to_lowercase())
            .or_default()
            .push(name.as_str());
    }

    let mut conflicts = Vec::new();
    for (idx, (original, new_name)) in candidates.iter().enumerate() {
        let key = new_name.to_lowercase();

        let shared = by_destination.get(&key).map_or(0, |v| v.len()) > 1;
        let occupied = existing
            .get(&key)
            .is_some_and(|names| names.iter().any(|n| n != original));

        if shared || occupied {
            conflicts.push(idx);
        }
    }
    conflicts
}

/// Rename planner.
pub struct Planner<'a> {
    config: &'a RenameConfig,
    metadata: &'a dyn MetadataReader,
}

impl<'a> Planner<'a> {
    /// Create a planner for one run configuration.
    pub fn new(config: &'a RenameConfig, metadata: &'a dyn MetadataReader) -> Self {
        Self { config, metadata }
    }

    /// Plan the renames of one directory batch.
    ///
    /// On failure, entries responsible for it are marked `Rejected` or `Error`
    /// and the error is returned; no entry is marked as renamed or ready.
    pub fn plan(&self, batch: &mut Batch) -> Result<RenamePlan> {
        self.config.validate()?;

        let names: Vec<String> = batch.names().into_iter().map(String::from).collect();
        let name_refs: Vec<&str> = names.iter().map(|n| n.as_str()).collect();

        let timestamps = if self.config.strategy == SortStrategy::Time {
            Some(self.read_timestamps(batch))
        } else {
            None
        };

        tracing::debug!(
            "Ranking {} files in {} by {}",
            names.len(),
            batch.directory.display(),
            self.config.strategy
        );

        let mut ranking = match sequencer::assign(
            &name_refs,
            self.config.strategy,
            self.config.force,
            timestamps.as_deref(),
        ) {
            Ok(ranking) => ranking,
            Err(e) => {
                reject_offenders(batch, &e)?;
                return Err(e);
            }
        };

        self.reject_excluded(batch, &ranking, &names)?;

        if let Some(origin) = self.config.renumber_from {
            sequencer::compact(&mut ranking, origin)?;
        }

        if let Err(e) = sequencer::check_width(&ranking, self.config.max_digits) {
            let reason = e.to_string();
            for (idx, ordinal) in ranking.ordinals.iter().enumerate() {
                if ordinal.is_some() {
                    batch.entries[idx].fail(FileStatus::Error, reason.clone())?;
                }
            }
            return Err(e);
        }

        // Phase 1: compute every destination.
        let mut items: Vec<(usize, PlanItem)> = Vec::new();
        for (idx, ordinal) in ranking.ordinals.iter().enumerate() {
            let Some(ordinal) = *ordinal else { continue };
            let entry = &batch.entries[idx];
            let new_name = generate_name(
                &self.config.base_name,
                ordinal,
                self.config.max_digits,
                &entry.output_extension(),
            );
            items.push((
                idx,
                PlanItem {
                    original_name: entry.original_name.clone(),
                    sequence_number: ordinal,
                    destination: batch.directory.join(&new_name),
                    new_name,
                    source: entry.path.clone(),
                },
            ));
        }

        // Phase 2: validate the batch as a whole.
        let candidates: Vec<(&str, &str)> = items
            .iter()
            .map(|(_, item)| (item.original_name.as_str(), item.new_name.as_str()))
            .collect();
        let conflicts = find_conflicts(&candidates, &batch.on_disk);

        if !conflicts.is_empty() {
            let mut offenders = Vec::with_capacity(conflicts.len());
            for &c in &conflicts {
                let (idx, item) = &items[c];
                let entry = &mut batch.entries[*idx];
                entry.sequence_number = Some(item.sequence_number);
                entry.new_name = Some(item.new_name.clone());
                entry.fail(
                    FileStatus::Error,
                    format!("destination {} is already taken", item.new_name),
                )?;
                tracing::warn!("Collision: {} -> {}", item.original_name, item.new_name);
                offenders.push(item.original_name.clone());
            }
            return Err(Error::DestinationCollision(offenders));
        }

        for (idx, item) in &items {
            let entry = &mut batch.entries[*idx];
            entry.sequence_number = Some(item.sequence_number);
            entry.new_name = Some(item.new_name.clone());
        }

        let mut items: Vec<PlanItem> = items.into_iter().map(|(_, item)| item).collect();
        items.sort_by_key(|item| item.sequence_number);

        let plan = RenamePlan {
            directory: batch.directory.clone(),
            items,
        };
        tracing::info!(
            "Planned {} renames in {} ({} unchanged)",
            plan.changes(),
            plan.directory.display(),
            plan.items.len() - plan.changes()
        );

        Ok(plan)
    }

    fn read_timestamps(&self, batch: &Batch) -> Vec<Option<String>> {
        batch
            .entries
            .iter()
            .map(|entry| {
                let ts = self.metadata.capture_time(&entry.path);
                if ts.is_none() {
                    tracing::debug!("No capture time: {}", entry.original_name);
                }
                ts
            })
            .collect()
    }

    /// Mark files excluded by force mode.
    fn reject_excluded(&self, batch: &mut Batch, ranking: &Ranking, names: &[String]) -> Result<()> {
        let reason = match &ranking.convention {
            Some(conv) => format!("does not follow the '{}' naming convention", conv),
            None => "does not follow a recognizable naming convention".to_string(),
        };
        for &idx in &ranking.rejected {
            tracing::warn!("Rejected: {} {}", names[idx], reason);
            batch.entries[idx].fail(FileStatus::Rejected, reason.clone())?;
        }
        Ok(())
    }
}

/// Reject the whole batch after a sequencing failure. Offenders get their
/// own reason; everyone else is rejected with the batch failure.
fn reject_offenders(batch: &mut Batch, err: &Error) -> Result<()> {
    let (offenders, reason): (&[String], String) = match err {
        Error::ConventionMismatch { expected, offenders } => (
            offenders.as_slice(),
            format!("does not follow the '{}' naming convention", expected),
        ),
        Error::NoConvention(offenders) => (
            offenders.as_slice(),
            "does not follow a recognizable naming convention".to_string(),
        ),
        Error::MissingTimestamps(offenders) => (offenders.as_slice(), "no capture timestamp".to_string()),
        _ => return Ok(()),
    };

    for name in offenders {
        if let Some(entry) = batch.entry_mut(name) {
            entry.fail(FileStatus::Rejected, reason.clone())?;
        }
    }

    // The strategy failed for the whole batch, so nobody else is ranked either.
    let batch_reason = format!("batch rejected: {}", err);
    for entry in &mut batch.entries {
        if entry.status == FileStatus::Unprocessed {
            entry.fail(FileStatus::Rejected, batch_reason.clone())?;
        }
    }
    Ok(())
}

/// Plan the renames of one directory batch (convenience function).
pub fn plan(
    batch: &mut Batch,
    config: &RenameConfig,
    metadata: &dyn MetadataReader,
) -> Result<RenamePlan> {
    Planner::new(config, metadata).plan(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::entry::FileEntry;
    use crate::services::metadata::NoMetadata;
    use std::path::PathBuf;

    #[test]
    fn test_generate_name() {
        assert_eq!(generate_name("Party", 7, 4, "JPG"), "Party_0007.jpg");
        assert_eq!(generate_name("Party", 12345, 4, "mp4"), "Party_12345.mp4");
        assert_eq!(generate_name("Trip_2020", 1, 2, "Wmv"), "Trip_2020_01.wmv");
    }

    #[test]
    fn test_validate_base_name() {
        assert!(validate_base_name("Party").is_ok());
        assert!(validate_base_name("Trip_2020").is_ok());
        assert!(validate_base_name("party").is_err());
        assert!(validate_base_name("1Party").is_err());
        assert!(validate_base_name("My Party").is_err());
        assert!(validate_base_name("Party-1").is_err());
        assert!(validate_base_name("").is_err());
    }

    fn batch_of(names: &[&str]) -> Batch {
        let mut batch = Batch::new("/photos");
        for name in names {
            let ext = name.rsplit('.').next().unwrap_or_default();
            batch
                .entries
                .push(FileEntry::new(*name, PathBuf::from("/photos").join(name), ext));
            batch.on_disk.push(name.to_string());
        }
        batch
    }

    #[test]
    fn test_no_convention_rejects_every_file() {
        let mut batch = batch_of(&["my photo.jpg", "another one.jpg"]);
        let config = RenameConfig::new("Trip", SortStrategy::Number);

        let result = plan(&mut batch, &config, &NoMetadata);
        assert!(matches!(result, Err(Error::NoConvention(_))));
        assert!(batch.entries.iter().all(|e| e.status == FileStatus::Rejected));
    }

    #[test]
    fn test_mismatch_rejects_matching_files_too() {
        let mut batch = batch_of(&["Trip-1.jpg", "Trip-2.jpg", "Other-3.jpg"]);
        let config = RenameConfig::new("Trip", SortStrategy::Number);

        assert!(plan(&mut batch, &config, &NoMetadata).is_err());
        for entry in &batch.entries {
            assert_eq!(entry.status, FileStatus::Rejected);
            assert!(entry.new_name.is_none());
        }
        // "Other" sorts first, so it fixes the convention and the Trip files mismatch.
        let other = batch.entry_mut("Other-3.jpg").unwrap();
        assert!(other.reason.as_deref().unwrap().starts_with("batch rejected"));
        let trip = batch.entry_mut("Trip-1.jpg").unwrap();
        assert!(trip.reason.as_deref().unwrap().contains("naming convention"));
    }

    fn disk(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_no_conflicts() {
        let candidates = [("a.jpg", "Base_0001.jpg"), ("b.jpg", "Base_0002.jpg")];
        assert!(find_conflicts(&candidates, &disk(&["a.jpg", "b.jpg"])).is_empty());
    }

    #[test]
    fn test_duplicate_destinations_ignore_case() {
        let candidates = [
            ("a.jpg", "Base_0001.jpg"),
            ("b.JPG", "base_0001.JPG"),
            ("c.jpg", "Base_0002.jpg"),
        ];
        assert_eq!(
            find_conflicts(&candidates, &disk(&["a.jpg", "b.JPG", "c.jpg"])),
            vec![0, 1]
        );
    }

    #[test]
    fn test_destination_taken_by_other_file() {
        let candidates = [("a.jpg", "Base_0001.jpg")];
        let on_disk = disk(&["a.jpg", "BASE_0001.JPG"]);
        assert_eq!(find_conflicts(&candidates, &on_disk), vec![0]);
    }

    #[test]
    fn test_own_name_differing_in_case_is_fine() {
        let candidates = [("BASE_0001.JPG", "Base_0001.jpg"), ("Base_0002.jpg", "Base_0002.jpg")];
        let on_disk = disk(&["BASE_0001.JPG", "Base_0002.jpg"]);
        assert!(find_conflicts(&candidates, &on_disk).is_empty());
    }

    #[test]
    fn test_case_twin_on_disk_still_conflicts() {
        // Case-sensitive host with both spellings present.
        let candidates = [("Base_0001.jpg", "Base_0001.jpg")];
        let on_disk = disk(&["Base_0001.jpg", "base_0001.jpg"]);
        assert_eq!(find_conflicts(&candidates, &on_disk), vec![0]);
    }
}
