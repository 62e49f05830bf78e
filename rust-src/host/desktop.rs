//! File-system host: durable mirror file plus dialog-driven transfers.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Local;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use super::{FileDialog, HostBridge, HostError, HostEvent, ExportResult, ImportResult, IMPORT_FILTERS};
use crate::models::{export_file_name, parse_backup_data, BackupEnvelope, DayValues, EXPORT_DESCRIPTION};


const EVENT_CAPACITY: usize = 16;

static STAGING_SEQ: AtomicU64 = AtomicU64::new(0);


pub struct DesktopHost {
    backup_dir: PathBuf,
    backup_file: String,
    dialog: Arc<dyn FileDialog>,
    events: broadcast::Sender<HostEvent>,
}


impl DesktopHost {
    pub fn new(backup_dir: PathBuf, backup_file: impl Into<String>, dialog: Arc<dyn FileDialog>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            backup_dir,
            backup_file: backup_file.into(),
            dialog,
            events,
        }
    }

    /// Menu action: ask the calendar to run an export.
    pub fn request_export(&self) {
        self.publish(HostEvent::ExportRequested);
    }

    /// Menu action: run an import and broadcast its result.
    pub async fn import_from_menu(&self) -> ImportResult {
        let result = self.import_data().await;
        self.publish(HostEvent::ImportCompleted(result.clone()));
        result
    }

    fn publish(&self, event: HostEvent) {
        if self.events.send(event).is_err() {
            debug!("Host event dropped: no subscribers");
        }
    }

    async fn pick_save_path(&self, default_name: String) -> Result<Option<PathBuf>, HostError> {
        let dialog = Arc::clone(&self.dialog);
        tokio::task::spawn_blocking(move || dialog.pick_save_path(&default_name))
            .await
            .map_err(|e| HostError::Dialog(e.to_string()))?
    }

    async fn pick_open_path(&self) -> Result<Option<PathBuf>, HostError> {
        let dialog = Arc::clone(&self.dialog);
        tokio::task::spawn_blocking(move || dialog.pick_open_path(IMPORT_FILTERS))
            .await
            .map_err(|e| HostError::Dialog(e.to_string()))?
    }
}


#[async_trait]
impl HostBridge for DesktopHost {
    async fn save_backup(&self, data: &DayValues) -> Result<PathBuf, HostError> {
        tokio::fs::create_dir_all(&self.backup_dir)
            .await
            .map_err(|e| HostError::io(&self.backup_dir, e))?;

        let path = self.backup_path();
        let json = BackupEnvelope::new(data.clone()).to_json()?;
        write_file(&path, json).await?;

        debug!("Mirrored {} entries to {}", data.len(), path.display());
        Ok(path)
    }

    async fn load_backup(&self) -> Result<Option<DayValues>, HostError> {
        let path = self.backup_path();
        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(HostError::io(&path, e)),
        };

        parse_backup_data(&text)
            .map(Some)
            .map_err(|source| HostError::Format { path, source })
    }

    async fn export_data(&self, data: &DayValues) -> ExportResult {
        let default_name = export_file_name(Local::now().date_naive());

        let path = match self.pick_save_path(default_name).await {
            Ok(Some(path)) => path,
            Ok(None) => return ExportResult::Cancelled,
            Err(e) => return ExportResult::Failed(e.to_string()),
        };

        let envelope = BackupEnvelope::new(data.clone()).with_description(EXPORT_DESCRIPTION);
        let written = match envelope.to_json() {
            Ok(json) => write_file(&path, json).await,
            Err(e) => Err(e.into()),
        };

        match written {
            Ok(()) => {
                info!("Exported {} entries to {}", data.len(), path.display());
                ExportResult::Saved(path)
            }
            Err(e) => {
                warn!("Export failed: {e}");
                ExportResult::Failed(e.to_string())
            }
        }
    }

    async fn import_data(&self) -> ImportResult {
        let path = match self.pick_open_path().await {
            Ok(Some(path)) => path,
            Ok(None) => return ImportResult::Cancelled,
            Err(e) => return ImportResult::Failed(e.to_string()),
        };

        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Import failed reading {}: {e}", path.display());
                return ImportResult::Failed(HostError::io(&path, e).to_string());
            }
        };

        match parse_backup_data(&text) {
            Ok(values) => {
                info!("Imported {} entries from {}", values.len(), path.display());
                ImportResult::Loaded(values)
            }
            Err(e) => {
                warn!("Rejected {}: {e}", path.display());
                ImportResult::Invalid
            }
        }
    }

    fn backup_path(&self) -> PathBuf {
        self.backup_dir.join(&self.backup_file)
    }

    fn subscribe(&self) -> broadcast::Receiver<HostEvent> {
        self.events.subscribe()
    }
}


/// Write through a uniquely named sibling file and rename it into place,
/// so overlapping writers never leave a torn document behind.
async fn write_file(path: &Path, contents: String) -> Result<(), HostError> {
    let staging = staging_path(path);

    if let Err(e) = tokio::fs::write(&staging, contents).await {
        let _ = tokio::fs::remove_file(&staging).await;
        return Err(HostError::io(path, e));
    }

    if let Err(e) = tokio::fs::rename(&staging, path).await {
        let _ = tokio::fs::remove_file(&staging).await;
        return Err(HostError::io(path, e));
    }

    Ok(())
}


fn staging_path(path: &Path) -> PathBuf {
    let seq = STAGING_SEQ.fetch_add(1, Ordering::Relaxed);
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.{}.{seq}.tmp", std::process::id()))
}
