//! Data models for calendar day values.

mod backup;
mod day_key;

#[allow(unused_imports)]
pub use backup::{
    export_file_name,
    iso_timestamp,
    parse_backup_data,
    BackupEnvelope,
    BackupFormatError,
    DayValues,
    BACKUP_VERSION,
    EXPORT_DESCRIPTION,
};
#[allow(unused_imports)]
pub use day_key::{days_in_month, first_of_month, month_prefix, year_prefix, DayKey, DayKeyError};
