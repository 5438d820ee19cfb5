//! Rename command implementation.
//!
//! Resolves the run configuration, runs the pipeline over one directory (or a
//! tree), and prints the per-directory tables and the triage summary.

use crate::cli::args::RenameArgs;
use crate::core::executor::FsMover;
use crate::core::report;
use crate::core::runner::{RunReport, Runner};
use crate::models::config::{Config, RenameConfig};
use crate::models::report::DirectoryOutcome;
use crate::services::metadata::MediaMetadataReader;
use crate::Result;
use colored::Colorize;

/// Build the run configuration from arguments and loaded settings.
pub fn build_config(args: &RenameArgs, settings: &Config) -> Result<RenameConfig> {
    let config = RenameConfig {
        base_name: args.base.clone(),
        strategy: args.sort,
        dry_run: args.dry_run,
        max_digits: args.max_digits.unwrap_or(settings.max_digits),
        force: args.force,
        recursive: args.recursive,
        renumber_from: args.renumber,
    };
    config.validate()?;
    Ok(config)
}

/// Execute the rename command.
pub fn rename(args: &RenameArgs, settings: &Config) -> Result<RunReport> {
    let config = build_config(args, settings)?;

    if !args.json {
        let header = if config.dry_run {
            "[DRY-RUN] Planning renames...".bold().yellow()
        } else {
            "[RENAME] Renaming files...".bold().cyan()
        };
        println!("{}", header);
        println!("  {} {}", "Directory:".bold(), args.dir.display());
        println!("  {} {}", "Base:".bold(), config.base_name);
        println!("  {} {}", "Sort:".bold(), config.strategy);
        println!("  {} {}", "Digits:".bold(), config.max_digits);
        if config.force {
            println!("  {} on", "Force:".bold());
        }
        if let Some(start) = config.renumber_from {
            println!("  {} from {}", "Renumber:".bold(), start);
        }
        println!();
    }

    let metadata = MediaMetadataReader::new(settings.ffprobe.clone());
    let runner = Runner::new(&config, settings, &metadata).with_mover(Box::new(FsMover), !args.json);
    let run = runner.run(&args.dir)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&run)?);
        return Ok(run);
    }

    for dir_report in &run.reports {
        print!("{}", report::render_directory(dir_report));
        let verdict = match dir_report.outcome() {
            DirectoryOutcome::HasErrors => "[FAILED] Some files could not be renamed".red(),
            DirectoryOutcome::HasRejections => "[WARNING] Some files were rejected".yellow(),
            DirectoryOutcome::Completed if config.dry_run => "[OK] Ready to rename".green(),
            DirectoryOutcome::Completed => "[OK] All files renamed".green(),
            DirectoryOutcome::NoChange => "[INFO] Nothing to do".normal(),
        };
        println!("{}", verdict);
        println!();
    }

    if config.recursive {
        println!("{}", "[Summary]".bold().green());
        print!("{}", report::render_summary(&run.summary));
        println!();
    }

    if config.dry_run {
        println!("{}", "[OK] Dry run complete - no changes were made".green());
    }

    Ok(run)
}
