//! Plan executor module.
//!
//! Applies a validated [`RenamePlan`]. In dry-run mode every planned file
//! becomes `Ready` and nothing is touched. Otherwise each file is moved in
//! turn; a failed move marks only that file as `Error` and the rest of the
//! batch continues, since destinations were already proven unique.

use crate::models::entry::{Batch, FileStatus};
use crate::models::plan::RenamePlan;
use crate::models::report::DirectoryReport;
use crate::utils::fs as fsutil;
use crate::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Primitive that performs a single rename.
pub trait FileMover {
    fn move_file(&self, from: &Path, to: &Path) -> Result<()>;
}

/// Mover backed by the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsMover;

impl FileMover for FsMover {
    fn move_file(&self, from: &Path, to: &Path) -> Result<()> {
        fsutil::move_file(from, to)
    }
}

/// Executor configuration.
#[derive(Debug, Clone, Default)]
pub struct ExecutorConfig {
    /// Mark files ready instead of renaming them.
    pub dry_run: bool,
    /// Draw a progress bar while renaming.
    pub show_progress: bool,
}

/// Plan executor.
pub struct Executor {
    config: ExecutorConfig,
    mover: Box<dyn FileMover>,
}

impl Executor {
    /// Create an executor that renames on the local filesystem.
    pub fn new(dry_run: bool) -> Self {
        Self::with_config(
            ExecutorConfig {
                dry_run,
                show_progress: false,
            },
            Box::new(FsMover),
        )
    }

    /// Create an executor with a custom configuration and move primitive.
    pub fn with_config(config: ExecutorConfig, mover: Box<dyn FileMover>) -> Self {
        Self { config, mover }
    }

    /// Apply a plan to its batch and freeze the outcome into a report.
    pub fn execute(&self, mut batch: Batch, plan: &RenamePlan) -> Result<DirectoryReport> {
        let pb = if self.config.show_progress && !self.config.dry_run {
            let pb = ProgressBar::new(plan.items.len() as u64);
            if let Ok(style) =
                ProgressStyle::with_template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            {
                pb.set_style(style.progress_chars("=>-"));
            }
            pb
        } else {
            ProgressBar::hidden()
        };

        let mut renamed = 0usize;
        let mut failed = 0usize;

        for item in &plan.items {
            let Some(entry) = batch.entry_mut(&item.original_name) else {
                tracing::warn!("Plan item not in batch: {}", item.original_name);
                continue;
            };

            if self.config.dry_run {
                entry.transition(FileStatus::Ready)?;
                tracing::debug!("Ready: {} -> {}", item.original_name, item.new_name);
                continue;
            }

            pb.set_message(item.new_name.clone());
            pb.inc(1);

            if item.is_unchanged() {
                tracing::debug!("Already named: {}", item.original_name);
                entry.transition(FileStatus::Renamed)?;
                renamed += 1;
                continue;
            }

            match self.mover.move_file(&item.source, &item.destination) {
                Ok(()) => {
                    tracing::debug!("Renamed: {} -> {}", item.original_name, item.new_name);
                    entry.path = item.destination.clone();
                    entry.transition(FileStatus::Renamed)?;
                    renamed += 1;
                }
                Err(e) => {
                    tracing::error!("Rename failed: {} -> {}: {}", item.original_name, item.new_name, e);
                    entry.fail(FileStatus::Error, e.to_string())?;
                    failed += 1;
                }
            }
        }

        pb.finish_and_clear();

        if !self.config.dry_run {
            tracing::info!(
                "{}: {} renamed, {} failed",
                plan.directory.display(),
                renamed,
                failed
            );
        }

        Ok(DirectoryReport::from_batch(batch, self.config.dry_run, None))
    }
}
