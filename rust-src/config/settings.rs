//! Application settings and path constants.

use std::path::PathBuf;


/// Directory name used under the platform data directory.
pub const APP_DIR_NAME: &str = "daytally";

/// Profile database holding the fast sink.
pub const PROFILE_FILE_NAME: &str = "profile.db";

/// Folder created under the documents directory for the durable mirror.
pub const BACKUP_DIR_NAME: &str = "DayTally Backups";

/// Durable mirror file name.
pub const BACKUP_FILE_NAME: &str = "calendar-backup.json";


/// Whether a desktop host bridge is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostMode {
    Desktop,
    Browser,
}


/// Process-wide settings, resolved once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub profile_path: PathBuf,
    pub backup_dir: PathBuf,
    pub download_dir: PathBuf,
    pub host_mode: HostMode,
}


/// Values supplied on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub profile_path: Option<PathBuf>,
    pub backup_dir: Option<PathBuf>,
    pub download_dir: Option<PathBuf>,
    pub browser: bool,
}


impl Settings {
    pub fn resolve(overrides: Overrides) -> Self {
        Self {
            profile_path: overrides.profile_path.unwrap_or_else(default_profile_path),
            backup_dir: overrides.backup_dir.unwrap_or_else(default_backup_dir),
            download_dir: overrides.download_dir.unwrap_or_else(default_download_dir),
            host_mode: if overrides.browser { HostMode::Browser } else { HostMode::Desktop },
        }
    }
}


fn home_or_current() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}


/// Get the default profile database path.
pub fn default_profile_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| home_or_current().join(".local").join("share"))
        .join(APP_DIR_NAME)
        .join(PROFILE_FILE_NAME)
}


/// Get the default durable backup directory.
pub fn default_backup_dir() -> PathBuf {
    dirs::document_dir()
        .unwrap_or_else(|| home_or_current().join("Documents"))
        .join(BACKUP_DIR_NAME)
}


/// Get the folder exports land in when no host is available.
pub fn default_download_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| home_or_current().join("Downloads"))
}
