//! Directory pipeline.
//!
//! Runs listing → planning → execution for one directory, and for every
//! directory of a tree one after another when recursive. A directory's batch
//! is fully resolved before the next one is listed.

use super::executor::{Executor, ExecutorConfig, FileMover, FsMover};
use super::planner::Planner;
use super::scanner;
use crate::models::config::{Config, RenameConfig};
use crate::models::report::{DirectoryReport, RunSummary};
use crate::services::metadata::MetadataReader;
use crate::Result;
use serde::Serialize;
use std::path::Path;

/// Reports of every processed directory plus their aggregate.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub reports: Vec<DirectoryReport>,
    pub summary: RunSummary,
}

impl RunReport {
    /// Whether any directory ended with an `Error` entry.
    pub fn has_errors(&self) -> bool {
        self.summary.with_errors > 0
    }
}

/// Rename pipeline for one run configuration.
pub struct Runner<'a> {
    config: &'a RenameConfig,
    settings: &'a Config,
    metadata: &'a dyn MetadataReader,
    executor: Executor,
}

impl<'a> Runner<'a> {
    /// Create a runner that renames on the local filesystem.
    pub fn new(config: &'a RenameConfig, settings: &'a Config, metadata: &'a dyn MetadataReader) -> Self {
        Self {
            config,
            settings,
            metadata,
            executor: Executor::with_config(Self::executor_config(config, false), Box::new(FsMover)),
        }
    }

    /// Use a different move primitive.
    pub fn with_mover(mut self, mover: Box<dyn FileMover>, show_progress: bool) -> Self {
        self.executor = Executor::with_config(Self::executor_config(self.config, show_progress), mover);
        self
    }

    fn executor_config(config: &RenameConfig, show_progress: bool) -> ExecutorConfig {
        ExecutorConfig {
            dry_run: config.dry_run,
            show_progress,
        }
    }

    /// Plan and apply renames in a single directory.
    ///
    /// Listing and planning failures are recorded in the report; only broken
    /// invariants are returned as errors.
    pub fn process_directory(&self, directory: &Path) -> Result<DirectoryReport> {
        let mut batch = match scanner::scan_directory(directory, self.settings) {
            Ok(batch) => batch,
            Err(e) => {
                tracing::error!("Cannot list {}: {}", directory.display(), e);
                return Ok(DirectoryReport::unreadable(
                    directory,
                    self.config.dry_run,
                    e.to_string(),
                ));
            }
        };
        let planner = Planner::new(self.config, self.metadata);

        match planner.plan(&mut batch) {
            Ok(plan) => self.executor.execute(batch, &plan),
            Err(e) if e.is_planning_failure() => {
                tracing::warn!("{}: {}", directory.display(), e);
                Ok(DirectoryReport::from_batch(
                    batch,
                    self.config.dry_run,
                    Some(e.to_string()),
                ))
            }
            Err(e) => Err(e),
        }
    }

    /// Process the root directory, and its subdirectories when recursive.
    pub fn run(&self, root: &Path) -> Result<RunReport> {
        self.config.validate()?;

        let directories = scanner::collect_directories(root, self.config.recursive)?;
        let mut reports = Vec::with_capacity(directories.len());

        for dir in &directories {
            tracing::info!("Processing {}", dir.display());
            reports.push(self.process_directory(dir)?);
        }

        let summary = RunSummary::from_reports(&reports);
        Ok(RunReport { reports, summary })
    }
}
