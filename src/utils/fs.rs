//! File system utilities.

use crate::Result;
use std::path::Path;

/// Check if a path exists and is a directory.
pub fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(crate::Error::PathNotFound(path.display().to_string()));
    }
    if !path.is_dir() {
        return Err(crate::Error::NotADirectory(path.display().to_string()));
    }
    Ok(())
}

/// Move a file from one location to another.
///
/// Refuses to replace a different existing file. A destination that differs
/// from the source only in case is treated as the same file.
pub fn move_file(from: &Path, to: &Path) -> Result<()> {
    if to.exists() && !same_name_ignoring_case(from, to) {
        return Err(crate::Error::FileAlreadyExists(to.display().to_string()));
    }

    // Try rename first (fast, same filesystem)
    if let Err(e) = std::fs::rename(from, to) {
        tracing::debug!("rename failed ({}), using copy+delete", e);
    } else {
        return Ok(());
    }

    // Fall back to copy + delete (cross filesystem)
    std::fs::copy(from, to)?;
    std::fs::remove_file(from)?;
    Ok(())
}

/// Whether two paths name the same entry of the same directory, ignoring case.
pub fn same_name_ignoring_case(a: &Path, b: &Path) -> bool {
    a.parent() == b.parent()
        && match (a.file_name(), b.file_name()) {
            (Some(x), Some(y)) => x.to_string_lossy().to_lowercase() == y.to_string_lossy().to_lowercase(),
            _ => false,
        }
}

/// Get file extension, case preserved.
pub fn get_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_get_extension() {
        assert_eq!(get_extension(&PathBuf::from("photo.JPG")).as_deref(), Some("JPG"));
        assert_eq!(get_extension(&PathBuf::from("a.b.mp4")).as_deref(), Some("mp4"));
        assert_eq!(get_extension(&PathBuf::from("README")), None);
    }

    #[test]
    fn test_same_name_ignoring_case() {
        assert!(same_name_ignoring_case(Path::new("/d/A.JPG"), Path::new("/d/a.jpg")));
        assert!(!same_name_ignoring_case(Path::new("/d/A.JPG"), Path::new("/e/a.jpg")));
        assert!(!same_name_ignoring_case(Path::new("/d/A.JPG"), Path::new("/d/b.jpg")));
    }

    #[test]
    fn test_move_file() {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("a.jpg");
        let to = dir.path().join("Base_0001.jpg");
        std::fs::write(&from, "x").unwrap();

        move_file(&from, &to).unwrap();
        assert!(!from.exists());
        assert_eq!(std::fs::read_to_string(&to).unwrap(), "x");
    }

    #[test]
    fn test_move_file_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("a.jpg");
        let to = dir.path().join("b.jpg");
        std::fs::write(&from, "a").unwrap();
        std::fs::write(&to, "b").unwrap();

        assert!(move_file(&from, &to).is_err());
        assert_eq!(std::fs::read_to_string(&to).unwrap(), "b");
        assert!(from.exists());
    }
}
