//! Capture timestamp reader.
//!
//! Images are read through their EXIF block, videos through ffprobe. Every
//! timestamp is normalized to `YYYY:MM:DD HH:MM:SS`, so plain string order is
//! chronological order.

use super::ffprobe;
use chrono::{DateTime, NaiveDateTime};
use exif::{In, Reader, Tag, Value};
use std::fs;
use std::io::BufReader;
use std::path::Path;

/// Normalized timestamp format.
pub const TIMESTAMP_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "tif", "tiff", "heic", "png", "webp"];

/// Source of capture timestamps.
pub trait MetadataReader {
    /// Capture time of a file, or `None` when it has none.
    fn capture_time(&self, path: &Path) -> Option<String>;
}

/// Reader that never finds a timestamp.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoMetadata;

impl MetadataReader for NoMetadata {
    fn capture_time(&self, _path: &Path) -> Option<String> {
        None
    }
}

/// EXIF for images, ffprobe for videos.
#[derive(Debug, Clone)]
pub struct MediaMetadataReader {
    ffprobe: String,
}

impl MediaMetadataReader {
    pub fn new(ffprobe: impl Into<String>) -> Self {
        Self {
            ffprobe: ffprobe.into(),
        }
    }

    fn read_image(&self, path: &Path) -> Option<String> {
        let file = fs::File::open(path).ok()?;
        let mut reader = BufReader::new(file);
        let exif = match Reader::new().read_from_container(&mut reader) {
            Ok(exif) => exif,
            Err(e) => {
                tracing::debug!("No EXIF in {}: {}", path.display(), e);
                return None;
            }
        };
        let field = exif
            .get_field(Tag::DateTimeOriginal, In::PRIMARY)
            .or_else(|| exif.get_field(Tag::DateTime, In::PRIMARY))?;
        match &field.value {
            Value::Ascii(values) => {
                let raw = values.first()?;
                normalize_timestamp(&String::from_utf8_lossy(raw))
            }
            _ => None,
        }
    }

    fn read_video(&self, path: &Path) -> Option<String> {
        match ffprobe::creation_time(&self.ffprobe, path) {
            Ok(raw) => raw.as_deref().and_then(normalize_timestamp),
            Err(e) => {
                tracing::debug!("{}", e);
                None
            }
        }
    }
}

impl Default for MediaMetadataReader {
    fn default() -> Self {
        Self::new("ffprobe")
    }
}

impl MetadataReader for MediaMetadataReader {
    fn capture_time(&self, path: &Path) -> Option<String> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            self.read_image(path)
        } else {
            self.read_video(path)
        }
    }
}

/// Normalize EXIF, ISO 8601 and RFC 3339 timestamps to [`TIMESTAMP_FORMAT`].
pub fn normalize_timestamp(raw: &str) -> Option<String> {
    let raw = raw.trim().trim_end_matches('\0');

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local().format(TIMESTAMP_FORMAT).to_string());
    }

    const NAIVE_FORMATS: &[&str] = &[
        "%Y:%m:%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
    ];
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.format(TIMESTAMP_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_exif() {
        assert_eq!(
            normalize_timestamp("2020:01:01 10:00:07").as_deref(),
            Some("2020:01:01 10:00:07")
        );
    }

    #[test]
    fn test_normalize_rfc3339() {
        assert_eq!(
            normalize_timestamp("2020-01-01T10:00:07.000000Z").as_deref(),
            Some("2020:01:01 10:00:07")
        );
    }

    #[test]
    fn test_normalize_iso_without_zone() {
        assert_eq!(
            normalize_timestamp("2019-06-30 12:00:00").as_deref(),
            Some("2019:06:30 12:00:00")
        );
    }

    #[test]
    fn test_normalize_garbage() {
        assert_eq!(normalize_timestamp("0000:00:00 00:00:00"), None);
        assert_eq!(normalize_timestamp(""), None);
        assert_eq!(normalize_timestamp("yesterday"), None);
    }

    #[test]
    fn test_image_without_exif() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("plain.jpg");
        std::fs::write(&path, b"not really a jpeg").unwrap();
        assert_eq!(MediaMetadataReader::default().capture_time(&path), None);
    }
}
