//! Configuration model.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Default maximum number of digits in a sequence number.
pub const DEFAULT_MAX_DIGITS: usize = 4;

/// Largest width that can hold any `u64` ordinal without ambiguity.
pub const MAX_SUPPORTED_DIGITS: usize = 19;

/// Default media extensions (matched case-insensitively).
pub const DEFAULT_EXTENSIONS: &[&str] = &["jpg", "mp4", "wmv"];

/// Application configuration, loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum sequence width.
    pub max_digits: usize,
    /// Media file extensions to rename.
    pub extensions: Vec<String>,
    /// ffprobe binary used to read video creation times.
    pub ffprobe: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_digits: DEFAULT_MAX_DIGITS,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            ffprobe: "ffprobe".to_string(),
        }
    }
}

impl Config {
    /// Whether a file extension belongs to a media file.
    pub fn is_media_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}

/// How ordinals are assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortStrategy {
    /// Case-insensitive file name order.
    Name,
    /// Number embedded in the file name.
    #[value(name = "num")]
    #[serde(rename = "num")]
    Number,
    /// Capture timestamp from embedded metadata.
    Time,
}

impl fmt::Display for SortStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortStrategy::Name => write!(f, "name"),
            SortStrategy::Number => write!(f, "num"),
            SortStrategy::Time => write!(f, "time"),
        }
    }
}

/// Settings for one rename run, passed explicitly to the planner and executor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameConfig {
    /// Base of every new file name.
    pub base_name: String,
    /// Ordinal assignment strategy.
    pub strategy: SortStrategy,
    /// Plan only, never touch the filesystem.
    pub dry_run: bool,
    /// Zero-pad width, also the maximum ordinal width.
    pub max_digits: usize,
    /// Exclude convention mismatches instead of failing (number strategy).
    pub force: bool,
    /// Process subdirectories too.
    pub recursive: bool,
    /// Compact ordinals into a dense run starting here.
    pub renumber_from: Option<u64>,
}

impl RenameConfig {
    /// Create a configuration with defaults for everything but the base and strategy.
    pub fn new(base_name: impl Into<String>, strategy: SortStrategy) -> Self {
        Self {
            base_name: base_name.into(),
            strategy,
            dry_run: false,
            max_digits: DEFAULT_MAX_DIGITS,
            force: false,
            recursive: false,
            renumber_from: None,
        }
    }

    /// Check the settings that do not depend on any directory.
    pub fn validate(&self) -> Result<()> {
        crate::core::planner::validate_base_name(&self.base_name)?;
        if self.max_digits == 0 || self.max_digits > MAX_SUPPORTED_DIGITS {
            return Err(Error::InvalidMaxDigits(self.max_digits));
        }
        Ok(())
    }
}

/// Get the configuration directory path.
fn dirs_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("media_renamer")
}

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs_config_path().join("config.toml")
}

/// Load configuration from the default location, falling back to defaults.
pub fn load_config() -> Config {
    let config_path = default_config_path();

    if config_path.exists() {
        match load_config_from(&config_path) {
            Ok(config) => return config,
            Err(e) => tracing::warn!("Ignoring {}: {}", config_path.display(), e),
        }
    }

    Config::default()
}

/// Load configuration from an explicit file.
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Err(Error::PathNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| Error::Config(e.to_string()))
}
