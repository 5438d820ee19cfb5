//! Inspect command implementation.
//!
//! Shows how each media file name splits into base and number, so the user
//! can tell in advance whether `--sort num` will accept the folder.

use crate::core::convention::{is_consistent, match_convention};
use crate::core::scanner;
use crate::core::sequencer::filename_order;
use crate::models::config::Config;
use crate::Result;
use colored::Colorize;
use std::path::Path;

/// Inspect the naming convention of a directory.
pub fn inspect(dir: &Path, settings: &Config) -> Result<()> {
    println!("{}", "[INSPECT] Naming convention".bold().cyan());
    println!("  {} {}", "Directory:".bold(), dir.display());
    println!();

    let batch = scanner::scan_directory(dir, settings)?;
    if batch.entries.is_empty() {
        println!("No media files found.");
        return Ok(());
    }

    let names = batch.names();
    let width = names.iter().map(|n| n.chars().count()).max().unwrap_or(0);

    let mut reference: Option<String> = None;
    let mut mismatches = 0usize;

    for idx in filename_order(&names) {
        let name = names[idx];
        match match_convention(name) {
            Some(conv) => {
                let base = reference.get_or_insert_with(|| conv.base_token.clone());
                let marker = if *base == conv.base_token {
                    "ok".green()
                } else {
                    mismatches += 1;
                    "mismatch".red()
                };
                println!(
                    "  {:<w$}  base={:<16} number={:<8} {}",
                    name,
                    conv.display_base,
                    conv.number,
                    marker,
                    w = width
                );
            }
            None => {
                mismatches += 1;
                println!("  {:<w$}  {}", name, "no match".red(), w = width);
            }
        }
    }

    println!();
    if is_consistent(names.iter().copied()) {
        println!("{}", "[OK] Consistent naming convention, --sort num will work".green());
    } else {
        println!(
            "{} {} file(s) break the convention; --sort num needs --force",
            "[WARNING]".yellow(),
            mismatches
        );
    }

    Ok(())
}
