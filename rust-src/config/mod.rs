//! Configuration and settings for DayTally.

mod settings;

#[allow(unused_imports)]
pub use settings::{
    default_backup_dir,
    default_download_dir,
    default_profile_path,
    HostMode,
    Overrides,
    Settings,
    APP_DIR_NAME,
    BACKUP_DIR_NAME,
    BACKUP_FILE_NAME,
    PROFILE_FILE_NAME,
};
