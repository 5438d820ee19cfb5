//! Media Renamer CLI
//!
//! A command-line tool for renaming photo and video batches so that they sort correctly.

use clap::Parser;
use media_renamer::cli::{
    args::{Cli, Commands},
    commands::{inspect, rename},
};
use media_renamer::models::config::{self, Config, SortStrategy};
use media_renamer::preflight;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    // Load settings
    let settings = match cli.config.as_deref() {
        Some(path) => config::load_config_from(path)?,
        None => config::load_config(),
    };

    // Run the appropriate command
    match cli.command {
        Commands::Rename(args) => {
            // Run preflight checks unless skipped
            if !cli.skip_preflight {
                run_preflight_checks(&args.dir, args.sort, &settings)?;
            }

            let run = rename::rename(&args, &settings)?;
            if run.has_errors() {
                anyhow::bail!("Some files could not be renamed. See the report above.");
            }
        }

        Commands::Inspect { dir } => {
            inspect::inspect(&dir, &settings)?;
        }
    }

    Ok(())
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("media_renamer=debug")
    } else {
        EnvFilter::new("media_renamer=info")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Run preflight checks and exit if any fail.
fn run_preflight_checks(dir: &Path, strategy: SortStrategy, settings: &Config) -> anyhow::Result<()> {
    use colored::Colorize;

    let checks = preflight::run_preflight_checks(dir, strategy, settings);
    if preflight::all_passed(&checks) {
        tracing::debug!("Preflight checks passed");
        return Ok(());
    }

    println!("{}", "Preflight checks".bold());
    preflight::print_results(&checks);
    println!();

    anyhow::bail!("Preflight checks failed. Fix the issues above and try again.")
}
