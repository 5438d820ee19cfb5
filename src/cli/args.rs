//! Command line argument definitions.

use crate::models::config::SortStrategy;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Media Renamer - Give photo and video batches names that sort correctly
#[derive(Parser, Debug)]
#[command(name = "media-renamer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip preflight checks
    #[arg(long, global = true)]
    pub skip_preflight: bool,

    /// Configuration file (default: <config dir>/media_renamer/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rename media files into a padded, correctly sorting sequence
    Rename(RenameArgs),

    /// Show how file names split into base and number
    Inspect {
        /// Directory to inspect
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
pub struct RenameArgs {
    /// Directory containing the files
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Base of the new names (e.g. Party -> Party_0001.jpg)
    #[arg(short, long, value_name = "BASE")]
    pub base: String,

    /// Sort order
    #[arg(short, long, value_enum, default_value = "name")]
    pub sort: SortStrategy,

    /// Dry run - show what would be done
    #[arg(long)]
    pub dry_run: bool,

    /// Maximum digits in the sequence number (default from config, else 4)
    #[arg(long, value_name = "N")]
    pub max_digits: Option<usize>,

    /// With --sort num, skip files that break the naming convention
    #[arg(short, long)]
    pub force: bool,

    /// Also process every subdirectory
    #[arg(short, long)]
    pub recursive: bool,

    /// Compact the sequence so it starts at START
    #[arg(long, value_name = "START")]
    pub renumber: Option<u64>,

    /// Print reports as JSON
    #[arg(long)]
    pub json: bool,
}
