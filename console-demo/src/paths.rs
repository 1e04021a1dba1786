//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "payments";
const APPLICATION: &str = "console";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the config directory, home of the preferences file.
///
/// - Linux: `$XDG_CONFIG_HOME/console` or `~/.config/console`
/// - macOS: `~/Library/Application Support/dev.payments.console`
/// - Windows: `C:\Users\<User>\AppData\Roaming\payments\console\config`
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the cache directory for logs.
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the path to the user preferences file.
pub fn preferences_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("preferences.json"))
}

/// Get the path to the latest log file.
pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("latest.log"))
}
