//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "ledger";
const APPLICATION: &str = "ledger";

/// Get project directories, or None if home directory cannot be determined.
fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the config directory for configuration files.
///
/// - Linux: `$XDG_CONFIG_HOME/ledger` or `~/.config/ledger`
/// - macOS: `~/Library/Application Support/dev.ledger.ledger`
/// - Windows: `C:\Users\<User>\AppData\Roaming\ledger\ledger\config`
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the table config file.
pub fn table_config() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("table.json"))
}
