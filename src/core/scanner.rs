//! Directory scanner module.
//!
//! Lists a directory, splits its regular files into rename candidates and
//! ignored files by extension, and walks subdirectories for recursive runs.

use crate::models::config::Config;
use crate::models::entry::{Batch, FileEntry};
use crate::utils::fs::{ensure_directory, get_extension};
use crate::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    pub name: String,
    pub is_dir: bool,
    pub is_file: bool,
    /// False when the on-disk name is not valid UTF-8 and `name` is lossy.
    pub utf8: bool,
}

/// List the immediate entries of a directory.
pub fn list_directory(path: &Path) -> Result<Vec<DirEntryInfo>> {
    ensure_directory(path)?;

    let mut entries = Vec::new();
    for entry in std::fs::read_dir(path)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let (name, utf8) = match entry.file_name().into_string() {
            Ok(name) => (name, true),
            Err(raw) => (raw.to_string_lossy().into_owned(), false),
        };
        entries.push(DirEntryInfo {
            name,
            is_dir: file_type.is_dir(),
            is_file: file_type.is_file(),
            utf8,
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Directories to process: the root, then (when recursive) every
/// subdirectory in sorted depth-first order.
pub fn collect_directories(root: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    ensure_directory(root)?;

    if !recursive {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut dirs = Vec::new();
    for entry in WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if entry.file_type().is_dir() {
            dirs.push(entry.into_path());
        }
    }

    tracing::debug!("Found {} directories under {}", dirs.len(), root.display());
    Ok(dirs)
}

/// Build the batch for one directory from its listing.
pub fn build_batch(directory: &Path, listing: &[DirEntryInfo], config: &Config) -> Batch {
    let mut batch = Batch::new(directory);

    for info in listing {
        batch.on_disk.push(info.name.clone());
        if !info.is_file {
            continue;
        }

        let path = directory.join(&info.name);
        let extension = get_extension(Path::new(&info.name)).unwrap_or_default();

        if !info.utf8 {
            // A lossy name points at no real file; never plan a move for it.
            tracing::debug!("Ignored non-UTF-8 name: {}", info.name);
            batch.ignored.push(FileEntry::ignored(&info.name, path, extension));
        } else if config.is_media_extension(&extension) {
            batch.entries.push(FileEntry::new(&info.name, path, extension));
        } else {
            tracing::debug!("Ignored: {}", info.name);
            batch.ignored.push(FileEntry::ignored(&info.name, path, extension));
        }
    }

    tracing::debug!(
        "{}: {} media files, {} ignored",
        directory.display(),
        batch.entries.len(),
        batch.ignored.len()
    );

    batch
}

/// List a directory and build its batch.
pub fn scan_directory(directory: &Path, config: &Config) -> Result<Batch> {
    let listing = list_directory(directory)?;
    Ok(build_batch(directory, &listing, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> DirEntryInfo {
        DirEntryInfo {
            name: name.to_string(),
            is_dir: false,
            is_file: true,
            utf8: true,
        }
    }

    fn dir(name: &str) -> DirEntryInfo {
        DirEntryInfo {
            is_dir: true,
            is_file: false,
            ..file(name)
        }
    }

    #[test]
    fn test_build_batch_classifies_by_extension() {
        let listing = vec![
            file("a.JPG"),
            file("b.mp4"),
            file("c.Wmv"),
            file("notes.txt"),
            file("README"),
            dir("sub.jpg"),
        ];
        let batch = build_batch(Path::new("/photos"), &listing, &Config::default());

        let names: Vec<_> = batch.entries.iter().map(|e| e.original_name.as_str()).collect();
        assert_eq!(names, vec!["a.JPG", "b.mp4", "c.Wmv"]);
        assert_eq!(batch.ignored.len(), 2);
        assert_eq!(batch.on_disk.len(), 6);
        assert_eq!(batch.entries[0].path, PathBuf::from("/photos/a.JPG"));
        assert_eq!(batch.entries[0].extension, "JPG");
    }

    #[test]
    fn test_build_batch_custom_extensions() {
        let config = Config {
            extensions: vec!["png".to_string()],
            ..Config::default()
        };
        let listing = vec![file("a.png"), file("b.jpg")];
        let batch = build_batch(Path::new("/x"), &listing, &config);
        assert_eq!(batch.entries.len(), 1);
        assert_eq!(batch.ignored.len(), 1);
    }

    #[test]
    fn test_non_utf8_names_are_ignored() {
        let mut lossy = file("caf\u{FFFD}.jpg");
        lossy.utf8 = false;
        let listing = vec![lossy, file("a.jpg")];
        let batch = build_batch(Path::new("/x"), &listing, &Config::default());

        assert_eq!(batch.names(), vec!["a.jpg"]);
        assert_eq!(batch.ignored.len(), 1);
        assert_eq!(batch.on_disk.len(), 2);
    }
}
