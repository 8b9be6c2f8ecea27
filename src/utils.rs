//! Path helpers shared by the metadata query and the directory scan
//!
//! Game installs routinely sit under deep directories, so every filesystem
//! call retries with the extended-length prefix when Windows reports
//! ERROR_PATH_NOT_FOUND.

use std::path::{Path, PathBuf};

/// ERROR_PATH_NOT_FOUND, returned when a path exceeds MAX_PATH
#[cfg(windows)]
pub(crate) const ERROR_PATH_NOT_FOUND: i32 = 3;

/// Normalize a path for display (strip Windows long-path prefixes).
pub fn display_path(path: &Path) -> String {
    let path_str = path.to_string_lossy().to_string();
    #[cfg(windows)]
    {
        if let Some(stripped) = path_str.strip_prefix(r"\\?\UNC\") {
            return format!(r"\\{}", stripped);
        }
        if let Some(stripped) = path_str.strip_prefix(r"\\?\") {
            return stripped.to_string();
        }
    }
    path_str
}

/// Convert to long path format for Windows (\\?\)
///
/// The \\?\ prefix lifts the 260 character MAX_PATH limit to ~32,767.
#[cfg(windows)]
pub fn to_long_path(path: &Path) -> PathBuf {
    if let Some(s) = path.to_str() {
        if s.starts_with(r"\\?\") {
            return path.to_path_buf();
        }
    }

    // The prefix disables relative path resolution, so resolve first
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    if let Some(s) = absolute.to_str() {
        if let Some(unc) = s.strip_prefix(r"\\") {
            return PathBuf::from(format!(r"\\?\UNC\{}", unc));
        }
        PathBuf::from(format!(r"\\?\{}", s.replace('/', "\\")))
    } else {
        path.to_path_buf()
    }
}

#[cfg(not(windows))]
pub fn to_long_path(path: &Path) -> PathBuf {
    path.to_path_buf()
}

/// Safe read_dir that falls back to long path on Windows
#[cfg(windows)]
pub fn safe_read_dir(path: &Path) -> std::io::Result<std::fs::ReadDir> {
    match std::fs::read_dir(path) {
        Ok(rd) => Ok(rd),
        Err(e) if e.raw_os_error() == Some(ERROR_PATH_NOT_FOUND) => {
            std::fs::read_dir(to_long_path(path))
        }
        Err(e) => Err(e),
    }
}

#[cfg(not(windows))]
pub fn safe_read_dir(path: &Path) -> std::io::Result<std::fs::ReadDir> {
    std::fs::read_dir(path)
}
