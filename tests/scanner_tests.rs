//! Integration tests for the scanner module.
//!
//! Tests cover:
//! - Classification of media and ignored files
//! - Directory listing of subdirectories
//! - Recursive directory collection
//! - Error handling for non-existent paths

use media_renamer::core::scanner::{collect_directories, list_directory, scan_directory};
use media_renamer::models::config::Config;
use media_renamer::models::entry::FileStatus;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_scan_empty_directory() {
    let temp_dir = TempDir::new().unwrap();
    let batch = scan_directory(temp_dir.path(), &Config::default()).unwrap();

    assert!(batch.entries.is_empty());
    assert!(batch.ignored.is_empty());
    assert!(batch.on_disk.is_empty());
}

#[test]
fn test_scan_with_media_and_other_files() {
    let temp_dir = TempDir::new().unwrap();

    fs::write(temp_dir.path().join("IMG_0001.JPG"), "fake").unwrap();
    fs::write(temp_dir.path().join("clip.mp4"), "fake").unwrap();
    fs::write(temp_dir.path().join("old.wmv"), "fake").unwrap();
    fs::write(temp_dir.path().join("notes.txt"), "not media").unwrap();
    fs::write(temp_dir.path().join("Thumbs.db"), "not media").unwrap();

    let batch = scan_directory(temp_dir.path(), &Config::default()).unwrap();

    assert_eq!(batch.entries.len(), 3);
    assert!(batch.entries.iter().all(|e| e.status == FileStatus::Unprocessed));
    assert_eq!(batch.ignored.len(), 2);
    assert!(batch.ignored.iter().all(|e| e.status == FileStatus::Ignored));
}

#[test]
fn test_subdirectories_are_listed_but_not_candidates() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join("Party_0001.jpg")).unwrap();
    fs::write(temp_dir.path().join("a.jpg"), "fake").unwrap();

    let listing = list_directory(temp_dir.path()).unwrap();
    assert_eq!(listing.len(), 2);
    assert!(listing.iter().any(|e| e.name == "Party_0001.jpg" && e.is_dir && !e.is_file));

    let batch = scan_directory(temp_dir.path(), &Config::default()).unwrap();
    assert_eq!(batch.entries.len(), 1);
    assert!(batch.on_disk.contains(&"Party_0001.jpg".to_string()));
}

#[test]
fn test_scan_nonexistent_path() {
    let result = scan_directory(Path::new("/nonexistent/path"), &Config::default());
    assert!(result.is_err());
}

#[test]
fn test_scan_file_is_not_a_directory() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("a.jpg");
    fs::write(&file, "fake").unwrap();

    let result = scan_directory(&file, &Config::default());
    assert!(matches!(result, Err(media_renamer::Error::NotADirectory(_))));
}

#[test]
fn test_collect_directories() {
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("2020").join("Summer");
    fs::create_dir_all(&nested).unwrap();
    fs::create_dir_all(temp_dir.path().join("2019")).unwrap();

    let flat = collect_directories(temp_dir.path(), false).unwrap();
    assert_eq!(flat, vec![temp_dir.path().to_path_buf()]);

    let all = collect_directories(temp_dir.path(), true).unwrap();
    assert_eq!(
        all,
        vec![
            temp_dir.path().to_path_buf(),
            temp_dir.path().join("2019"),
            temp_dir.path().join("2020"),
            nested,
        ]
    );
}

#[cfg(target_os = "linux")]
#[test]
fn test_non_utf8_file_is_ignored() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(OsStr::from_bytes(b"caf\xe9.jpg")), "x").unwrap();
    fs::write(temp_dir.path().join(OsStr::from_bytes(b"caf\xe8.jpg")), "x").unwrap();
    fs::write(temp_dir.path().join("a.jpg"), "x").unwrap();

    let listing = list_directory(temp_dir.path()).unwrap();
    assert_eq!(listing.iter().filter(|e| !e.utf8).count(), 2);

    let batch = scan_directory(temp_dir.path(), &Config::default()).unwrap();
    assert_eq!(batch.names(), vec!["a.jpg"]);
    assert_eq!(batch.ignored.len(), 2);
    assert!(batch.ignored.iter().all(|e| e.status == FileStatus::Ignored));
}
