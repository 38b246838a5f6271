//! Platform-specific directory utilities
//!
//! Provides consistent directory paths across different operating systems,
//! following platform conventions for cache and data directories.

use std::path::PathBuf;

const APPLICATION: &str = "hdc";

/// Get the platform-specific log directory
///
/// - macOS: `~/Library/Caches/hdc/logs`
/// - Linux: `~/.cache/hdc/logs` (or `$XDG_CACHE_HOME/hdc/logs`)
/// - Windows: `%LOCALAPPDATA%\hdc\logs`
/// - Fallback: `/tmp/hdc/logs`
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", APPLICATION)
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/hdc"))
        .join("logs")
}

/// Get the platform-specific data directory
///
/// - macOS: `~/Library/Application Support/hdc`
/// - Linux: `~/.local/share/hdc` (or `$XDG_DATA_HOME/hdc`)
/// - Windows: `%APPDATA%\hdc`
/// - Fallback: `./hdc_data`
pub fn data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", APPLICATION)
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./hdc_data"))
}
