//! FFprobe service for reading video creation times.

use crate::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::process::Command;

/// FFprobe output format.
#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: FfprobeFormat,
}

/// FFprobe format information.
#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    #[serde(default)]
    tags: HashMap<String, String>,
}

/// Check if ffprobe is installed.
pub fn is_installed(bin: &str) -> bool {
    Command::new(bin)
        .arg("-version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Get ffprobe version.
pub fn get_version(bin: &str) -> Result<String> {
    let output = Command::new(bin).arg("-version").output()?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let first_line = stdout.lines().next().unwrap_or("unknown");

    Ok(first_line.to_string())
}

/// Read the raw `creation_time` tag of a video container.
pub fn creation_time(bin: &str, path: &Path) -> Result<Option<String>> {
    let output = Command::new(bin)
        .args(["-v", "quiet", "-print_format", "json", "-show_format"])
        .arg(path)
        .output()?;

    if !output.status.success() {
        return Err(crate::Error::Metadata(format!(
            "ffprobe failed for: {:?}",
            path
        )));
    }

    let ffprobe: FfprobeOutput = serde_json::from_slice(&output.stdout)?;
    Ok(parse_creation_time(&ffprobe.format.tags))
}

/// Tag names differ in case between muxers.
fn parse_creation_time(tags: &HashMap<String, String>) -> Option<String> {
    tags.iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("creation_time"))
        .map(|(_, v)| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ffprobe_json() {
        let json = r#"{"format": {"filename": "a.mp4", "tags": {"major_brand": "isom", "creation_time": "2020-01-01T10:00:07.000000Z"}}}"#;
        let out: FfprobeOutput = serde_json::from_str(json).unwrap();
        assert_eq!(
            parse_creation_time(&out.format.tags).as_deref(),
            Some("2020-01-01T10:00:07.000000Z")
        );
    }

    #[test]
    fn test_uppercase_tag_and_missing_tags() {
        let json = r#"{"format": {"tags": {"CREATION_TIME": "2019-06-30 12:00:00"}}}"#;
        let out: FfprobeOutput = serde_json::from_str(json).unwrap();
        assert!(parse_creation_time(&out.format.tags).is_some());

        let json = r#"{"format": {"filename": "a.wmv"}}"#;
        let out: FfprobeOutput = serde_json::from_str(json).unwrap();
        assert!(parse_creation_time(&out.format.tags).is_none());
    }
}
