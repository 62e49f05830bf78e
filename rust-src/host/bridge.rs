//! Capabilities a desktop host exposes to the calendar core.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::broadcast;

use crate::models::{BackupFormatError, DayValues};


#[derive(Debug, Error)]
pub enum HostError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed backup file {path}: {source}")]
    Format {
        path: PathBuf,
        source: BackupFormatError,
    },

    #[error("failed to serialize backup: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("file dialog failed: {0}")]
    Dialog(String),
}


impl HostError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}


/// Result of a host-driven export.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportResult {
    Saved(PathBuf),
    Cancelled,
    Failed(String),
}


/// Result of a host-driven import.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportResult {
    Loaded(DayValues),
    Cancelled,
    /// The file parsed but carried no `data` mapping.
    Invalid,
    Failed(String),
}


/// One-shot notifications the host may deliver at any time.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// The user asked the host (e.g. from a menu) to export everything.
    ExportRequested,
    /// A host-initiated import finished.
    ImportCompleted(ImportResult),
}


/// Optional desktop capability. Absent when running without a host.
#[async_trait]
pub trait HostBridge: Send + Sync {
    /// Write the durable mirror file, returning where it landed.
    async fn save_backup(&self, data: &DayValues) -> Result<PathBuf, HostError>;

    /// Read the durable mirror file. `Ok(None)` when it does not exist yet.
    async fn load_backup(&self) -> Result<Option<DayValues>, HostError>;

    /// Ask the user for a destination and write an export there.
    async fn export_data(&self, data: &DayValues) -> ExportResult;

    /// Ask the user for a backup file and read it.
    async fn import_data(&self) -> ImportResult;

    /// Location of the durable mirror file.
    fn backup_path(&self) -> PathBuf;

    fn subscribe(&self) -> broadcast::Receiver<HostEvent>;
}
