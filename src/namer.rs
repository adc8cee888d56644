use {
    chrono::{DateTime, Local},
    std::path::{Path, PathBuf},
};

/// Extension marking a file that is still being written.
pub const WORKING_EXT: &str = "rotee";

/// Path for a new in-progress file: `dir/prefix.<timestamp>.rotee`.
///
/// Deterministic for a given timestamp and configuration. A coarse format
/// can make successive rotations target the same path; the file is then
/// continued in place rather than rejected.
pub fn working_path(dir: &Path, prefix: &str, format: &str, now: DateTime<Local>) -> PathBuf {
    let ts = now.format(format);
    dir.join(format!("{prefix}.{ts}.{WORKING_EXT}"))
}

/// Permanent name for `path`: strips a trailing working extension, if any.
/// A path that already lacks the extension comes back unchanged.
pub fn final_path(path: &Path) -> PathBuf {
    if is_working(path) {
        path.with_extension("")
    } else {
        path.to_path_buf()
    }
}

/// Whether `path` names an in-progress file.
pub fn is_working(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == WORKING_EXT)
}
