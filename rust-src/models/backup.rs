//! Backup envelope shared by the mirror file and user exports.

use std::collections::BTreeMap;

use chrono::{NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;


/// Literal schema version written into every envelope.
pub const BACKUP_VERSION: &str = "1.0.0";


/// Description written into user exports.
pub const EXPORT_DESCRIPTION: &str = "DayTally calendar values backup";


/// Day key to free-text value, ordered by key.
pub type DayValues = BTreeMap<String, String>;


/// Why a document was rejected as a backup.
#[derive(Debug, Error)]
pub enum BackupFormatError {
    #[error("document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document has no `data` object")]
    MissingData,

    #[error("`data` entry {0:?} is not a string")]
    NonStringValue(String),
}


/// Versioned, timestamped wrapper around a full store snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupEnvelope {
    pub data: DayValues,
    pub timestamp: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}


impl BackupEnvelope {
    /// Wrap a snapshot, stamping it with the current time.
    pub fn new(data: DayValues) -> Self {
        Self {
            data,
            timestamp: iso_timestamp(),
            version: BACKUP_VERSION.to_string(),
            description: None,
        }
    }

    /// Attach the human-readable description used on exports.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}


/// Extract the `data` mapping from a backup document.
///
/// Only the `data` field is required; `timestamp`, `version` and any
/// unknown fields are ignored so older exports keep importing.
pub fn parse_backup_data(text: &str) -> Result<DayValues, BackupFormatError> {
    let document: Value = serde_json::from_str(text)?;

    let Some(Value::Object(data)) = document.get("data") else {
        return Err(BackupFormatError::MissingData);
    };

    let mut values = DayValues::new();
    for (key, value) in data {
        match value {
            Value::String(text) => {
                values.insert(key.clone(), text.clone());
            }
            _ => return Err(BackupFormatError::NonStringValue(key.clone())),
        }
    }

    Ok(values)
}


/// Suggested file name for an export made on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("daytally-backup-{}.json", date.format("%Y-%m-%d"))
}


/// Current UTC time in the `2024-01-15T09:30:00.000Z` form.
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}


#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DayValues {
        DayValues::from([
            ("2024-0-15".to_string(), "100".to_string()),
            ("2024-1-2".to_string(), "lunch 12.5".to_string()),
        ])
    }

    #[test]
    fn test_envelope_layout() {
        let json = BackupEnvelope::new(sample()).to_json().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["version"], "1.0.0");
        assert_eq!(value["data"]["2024-0-15"], "100");
        assert!(value["timestamp"].as_str().unwrap().ends_with('Z'));
        assert!(value.get("description").is_none());
    }

    #[test]
    fn test_description_is_serialized_when_set() {
        let json = BackupEnvelope::new(sample())
            .with_description("exported")
            .to_json()
            .unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["description"], "exported");
    }

    #[test]
    fn test_parse_reads_back_exported_document() {
        let json = BackupEnvelope::new(sample())
            .with_description("exported")
            .to_json()
            .unwrap();
        assert_eq!(parse_backup_data(&json).unwrap(), sample());
    }

    #[test]
    fn test_parse_requires_data_object() {
        assert!(matches!(
            parse_backup_data(r#"{"foo": "bar"}"#),
            Err(BackupFormatError::MissingData)
        ));
        assert!(matches!(
            parse_backup_data(r#"{"data": ["a"]}"#),
            Err(BackupFormatError::MissingData)
        ));
        assert!(matches!(parse_backup_data("not json"), Err(BackupFormatError::Json(_))));
    }

    #[test]
    fn test_parse_rejects_non_string_values() {
        assert!(matches!(
            parse_backup_data(r#"{"data": {"2024-0-1": 10}}"#),
            Err(BackupFormatError::NonStringValue(key)) if key == "2024-0-1"
        ));
    }

    #[test]
    fn test_export_file_name_embeds_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(export_file_name(date), "daytally-backup-2024-03-07.json");
    }

    #[test]
    fn test_parse_accepts_bare_data_field() {
        let values = parse_backup_data(r#"{"data": {}}"#).unwrap();
        assert!(values.is_empty());
    }
}
