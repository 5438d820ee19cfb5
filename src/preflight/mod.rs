//! Preflight checks module.
//!
//! Cheap checks run before any directory is listed, so a run that cannot
//! succeed stops before printing partial reports.

mod ffprobe;

use crate::models::config::{Config, SortStrategy};
use colored::Colorize;
use std::path::Path;

/// Outcome of one preflight check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    pub name: &'static str,
    pub passed: bool,
    pub detail: String,
    pub hint: Option<&'static str>,
}

impl Check {
    pub fn pass(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            passed: true,
            detail: detail.into(),
            hint: None,
        }
    }

    pub fn fail(name: &'static str, detail: impl Into<String>, hint: &'static str) -> Self {
        Self {
            name,
            passed: false,
            detail: detail.into(),
            hint: Some(hint),
        }
    }
}

/// Target directory must exist and be a directory.
fn check_directory(dir: &Path) -> Check {
    if !dir.exists() {
        Check::fail(
            "directory",
            format!("{} not found", dir.display()),
            "Check the path passed to the rename command",
        )
    } else if !dir.is_dir() {
        Check::fail(
            "directory",
            format!("{} is not a directory", dir.display()),
            "Pass the folder holding the media files, not a file inside it",
        )
    } else {
        Check::pass("directory", dir.display().to_string())
    }
}

/// Run the checks needed to rename `dir` with a sort strategy.
pub fn run_preflight_checks(dir: &Path, strategy: SortStrategy, settings: &Config) -> Vec<Check> {
    let mut checks = vec![check_directory(dir)];

    // Only time sorting reads video metadata
    if strategy == SortStrategy::Time {
        checks.push(ffprobe::check(&settings.ffprobe));
    }

    checks
}

/// Print check outcomes, with a hint under every failure.
pub fn print_results(checks: &[Check]) {
    for check in checks {
        let tag = if check.passed {
            "[OK]".green()
        } else {
            "[FAIL]".red()
        };
        println!("{} {}: {}", tag, check.name.bold(), check.detail);
        if let Some(hint) = check.hint {
            println!("  {} {}", "->".yellow(), hint);
        }
    }
}

/// Whether every check passed.
pub fn all_passed(checks: &[Check]) -> bool {
    checks.iter().all(|c| c.passed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_name_sort_only_checks_directory() {
        let temp_dir = TempDir::new().unwrap();
        let checks = run_preflight_checks(temp_dir.path(), SortStrategy::Name, &Config::default());
        assert_eq!(checks.len(), 1);
        assert!(all_passed(&checks));
    }

    #[test]
    fn test_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let checks = run_preflight_checks(
            &temp_dir.path().join("missing"),
            SortStrategy::Number,
            &Config::default(),
        );
        assert!(!all_passed(&checks));
        assert!(checks[0].hint.is_some());
    }

    #[test]
    fn test_file_is_not_a_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.jpg");
        std::fs::write(&file, b"x").unwrap();
        let check = check_directory(&file);
        assert!(!check.passed);
        assert!(check.detail.contains("not a directory"));
    }

    #[test]
    fn test_missing_binary_fails() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Config {
            ffprobe: "definitely-not-a-real-ffprobe-binary".to_string(),
            ..Config::default()
        };
        let checks = run_preflight_checks(temp_dir.path(), SortStrategy::Time, &settings);
        assert_eq!(checks.len(), 2);
        assert!(!checks[1].passed);
        assert!(!all_passed(&checks));
    }
}
