//! User-initiated export and import of the whole store.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Local;
use thiserror::Error;
use tracing::{info, warn};

use crate::host::{ExportResult, FileDialog, HostBridge, ImportResult, IMPORT_FILTERS};
use crate::models::{export_file_name, parse_backup_data, BackupEnvelope, DayValues, EXPORT_DESCRIPTION};


#[derive(Debug, Error)]
pub enum TransferError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid backup file")]
    InvalidBackup,

    #[error("failed to serialize backup: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("{0}")]
    Host(String),
}


#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    /// Written where the user chose through the host dialog.
    Saved(PathBuf),
    /// Written to the downloads folder because no host is available.
    Downloaded(PathBuf),
    Cancelled,
}


#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    Imported(DayValues),
    Cancelled,
}


/// One-shot transfers that bypass the persistence mirror.
pub struct ImportExportGateway {
    host: Option<Arc<dyn HostBridge>>,
    download_dir: PathBuf,
    picker: Arc<dyn FileDialog>,
}


impl ImportExportGateway {
    /// `picker` chooses the import file when no host is present.
    pub fn new(host: Option<Arc<dyn HostBridge>>, download_dir: PathBuf, picker: Arc<dyn FileDialog>) -> Self {
        Self {
            host,
            download_dir,
            picker,
        }
    }

    pub async fn export_all(&self, values: &DayValues) -> Result<ExportOutcome, TransferError> {
        match &self.host {
            Some(host) => match host.export_data(values).await {
                ExportResult::Saved(path) => Ok(ExportOutcome::Saved(path)),
                ExportResult::Cancelled => Ok(ExportOutcome::Cancelled),
                ExportResult::Failed(message) => Err(TransferError::Host(message)),
            },
            None => self.download(values).await.map(ExportOutcome::Downloaded),
        }
    }

    /// Emulates a browser download: same document, same file name, saved
    /// into the downloads folder.
    async fn download(&self, values: &DayValues) -> Result<PathBuf, TransferError> {
        let path = self.download_dir.join(export_file_name(Local::now().date_naive()));
        let json = BackupEnvelope::new(values.clone())
            .with_description(EXPORT_DESCRIPTION)
            .to_json()?;

        tokio::fs::create_dir_all(&self.download_dir)
            .await
            .map_err(|source| TransferError::Io {
                path: self.download_dir.clone(),
                source,
            })?;
        tokio::fs::write(&path, json)
            .await
            .map_err(|source| TransferError::Io {
                path: path.clone(),
                source,
            })?;

        info!("Downloaded {} entries to {}", values.len(), path.display());
        Ok(path)
    }

    pub async fn import_all(&self) -> Result<ImportOutcome, TransferError> {
        match &self.host {
            Some(host) => import_result(host.import_data().await),
            None => self.upload().await,
        }
    }

    async fn upload(&self) -> Result<ImportOutcome, TransferError> {
        let picker = Arc::clone(&self.picker);
        let picked = tokio::task::spawn_blocking(move || picker.pick_open_path(IMPORT_FILTERS))
            .await
            .map_err(|e| TransferError::Host(e.to_string()))?
            .map_err(|e| TransferError::Host(e.to_string()))?;

        let Some(path) = picked else {
            return Ok(ImportOutcome::Cancelled);
        };

        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| TransferError::Io {
                path: path.clone(),
                source,
            })?;

        match parse_backup_data(&text) {
            Ok(values) => {
                info!("Imported {} entries from {}", values.len(), path.display());
                Ok(ImportOutcome::Imported(values))
            }
            Err(e) => {
                warn!("Rejected {}: {e}", path.display());
                Err(TransferError::InvalidBackup)
            }
        }
    }
}


/// Map a host import result onto the gateway's outcome.
pub fn import_result(result: ImportResult) -> Result<ImportOutcome, TransferError> {
    match result {
        ImportResult::Loaded(values) => Ok(ImportOutcome::Imported(values)),
        ImportResult::Cancelled => Ok(ImportOutcome::Cancelled),
        ImportResult::Invalid => Err(TransferError::InvalidBackup),
        ImportResult::Failed(message) => Err(TransferError::Host(message)),
    }
}
