//! Write-through persistence of the day value store.
//!
//! Every change goes synchronously to the fast sink and, when a desktop
//! host is present, to the durable mirror file in a detached task whose
//! outcome is only logged.

use std::sync::{Arc, Mutex};

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::host::HostBridge;
use crate::models::DayValues;
use crate::storage::{KeyValueStore, DAY_VALUES_KEY};
use crate::store::DayValueStore;


pub struct PersistenceMirror {
    fast: Mutex<Box<dyn KeyValueStore>>,
    host: Option<Arc<dyn HostBridge>>,
    pending: Mutex<Vec<JoinHandle<()>>>,
}


impl PersistenceMirror {
    pub fn new(fast: Box<dyn KeyValueStore>, host: Option<Arc<dyn HostBridge>>) -> Self {
        Self {
            fast: Mutex::new(fast),
            host,
            pending: Mutex::new(Vec::new()),
        }
    }

    pub fn has_host(&self) -> bool {
        self.host.is_some()
    }

    /// Read both sinks and merge them, the durable mirror winning on
    /// conflicts. An unreadable sink counts as empty.
    pub async fn load(&self) -> DayValues {
        let local = self.load_fast();

        let durable = match &self.host {
            Some(host) => match host.load_backup().await {
                Ok(Some(values)) => values,
                Ok(None) => DayValues::new(),
                Err(e) => {
                    warn!("Ignoring durable backup: {e}");
                    DayValues::new()
                }
            },
            None => DayValues::new(),
        };

        debug!("Loaded {} local and {} durable entries", local.len(), durable.len());
        DayValueStore::merge(&local, &durable)
    }

    fn load_fast(&self) -> DayValues {
        let stored = match self.lock_fast().get_item(DAY_VALUES_KEY) {
            Ok(stored) => stored,
            Err(e) => {
                warn!("Ignoring local store: {e}");
                return DayValues::new();
            }
        };

        match stored.map(|text| serde_json::from_str::<DayValues>(&text)) {
            Some(Ok(values)) => values,
            Some(Err(e)) => {
                warn!("Discarding malformed local store: {e}");
                if let Err(e) = self.lock_fast().remove_item(DAY_VALUES_KEY) {
                    warn!("Failed to clear local store: {e}");
                }
                DayValues::new()
            }
            None => DayValues::new(),
        }
    }

    /// Persist a snapshot. Never fails; errors are logged.
    ///
    /// An empty snapshot is skipped so an empty state cannot overwrite data
    /// that has not been loaded yet.
    pub fn persist(&self, values: &DayValues) {
        if values.is_empty() {
            debug!("Skipping persistence of empty store");
            return;
        }

        match serde_json::to_string(values) {
            Ok(json) => {
                if let Err(e) = self.lock_fast().set_item(DAY_VALUES_KEY, &json) {
                    warn!("Failed to write local store: {e}");
                }
            }
            Err(e) => warn!("Failed to serialize day values: {e}"),
        }

        if let Some(host) = &self.host {
            self.spawn_durable_write(Arc::clone(host), values.clone());
        }
    }

    fn spawn_durable_write(&self, host: Arc<dyn HostBridge>, values: DayValues) {
        let Ok(runtime) = Handle::try_current() else {
            warn!("No async runtime; durable backup skipped");
            return;
        };

        let handle = runtime.spawn(async move {
            if let Err(e) = host.save_backup(&values).await {
                warn!("Durable backup failed: {e}");
            }
        });

        let mut pending = self.lock_pending();
        pending.retain(|task| !task.is_finished());
        pending.push(handle);
    }

    /// Wait for outstanding durable writes. Used before the process exits.
    pub async fn settle(&self) {
        let tasks: Vec<JoinHandle<()>> = std::mem::take(&mut *self.lock_pending());
        for task in tasks {
            if let Err(e) = task.await {
                warn!("Durable backup task aborted: {e}");
            }
        }
    }

    fn lock_fast(&self) -> std::sync::MutexGuard<'_, Box<dyn KeyValueStore>> {
        self.fast.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_pending(&self) -> std::sync::MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
