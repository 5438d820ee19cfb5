//! ffprobe availability check.

use super::Check;
use crate::services::ffprobe;

/// ffprobe must run when sorting by capture time.
pub fn check(bin: &str) -> Check {
    if !ffprobe::is_installed(bin) {
        return Check::fail(
            "ffprobe",
            format!("'{}' not found (needed to read video capture times)", bin),
            "Install FFmpeg, set `ffprobe` in config.toml, or pass --skip-preflight for photo-only folders",
        );
    }
    match ffprobe::get_version(bin) {
        Ok(version) => Check::pass("ffprobe", version),
        Err(_) => Check::pass("ffprobe", "installed"),
    }
}
