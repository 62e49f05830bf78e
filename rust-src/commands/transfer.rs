//! Export and import commands.
//!
//! With a desktop host both go through its menu actions: the host raises
//! an event and the calendar handles it. Without one the calendar talks
//! to the gateway directly.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::broadcast;

use super::{current_dir, open_app, Session};
use crate::app::{CalendarApp, HostEventOutcome};
use crate::config::Settings;
use crate::host::{FileDialog, HostBridge, HostEvent, PresetDialog, PromptDialog};
use crate::transfer::{ExportOutcome, ImportOutcome};


fn dialog(save: Option<PathBuf>, open: Option<PathBuf>) -> Arc<dyn FileDialog> {
    if save.is_none() && open.is_none() {
        Arc::new(PromptDialog::stdin(current_dir()))
    } else {
        Arc::new(PresetDialog::new(save, open))
    }
}


async fn next_event(app: &mut CalendarApp, events: &mut broadcast::Receiver<HostEvent>) -> Result<HostEventOutcome> {
    let event = events.recv().await.context("Host event channel closed")?;
    Ok(app.handle_host_event(event).await?)
}


/// Export every note to a backup file.
pub async fn export(settings: &Settings, output: Option<PathBuf>) -> Result<()> {
    let Session { mut app, host } = open_app(settings, dialog(output, None)).await?;

    let outcome = match &host {
        Some(host) => {
            let mut events = host.subscribe();
            host.request_export();
            next_event(&mut app, &mut events).await
        }
        None => app.export().await.map(HostEventOutcome::Exported).map_err(anyhow::Error::from),
    }
    .context("Export failed")?;

    match outcome {
        HostEventOutcome::Exported(ExportOutcome::Saved(path)) => {
            println!("\x1b[32m+ Exported to: {}\x1b[0m", path.display())
        }
        HostEventOutcome::Exported(ExportOutcome::Downloaded(path)) => {
            println!("\x1b[32m+ Downloaded to: {}\x1b[0m", path.display())
        }
        _ => println!("\x1b[33mCancelled\x1b[0m"),
    }

    app.shutdown().await;
    Ok(())
}


/// Replace every note with a backup file's contents.
pub async fn import(settings: &Settings, path: Option<PathBuf>) -> Result<()> {
    let Session { mut app, host } = open_app(settings, dialog(None, path)).await?;

    let outcome = match &host {
        Some(host) => {
            let mut events = host.subscribe();
            host.import_from_menu().await;
            next_event(&mut app, &mut events).await
        }
        None => match app.import().await {
            Ok(ImportOutcome::Imported(values)) => Ok(HostEventOutcome::Imported(values.len())),
            Ok(ImportOutcome::Cancelled) => Ok(HostEventOutcome::Cancelled),
            Err(e) => Err(anyhow::Error::from(e)),
        },
    }
    .context("Import failed")?;

    match outcome {
        HostEventOutcome::Imported(count) => println!("\x1b[32m+ Imported {count} entries\x1b[0m"),
        _ => println!("\x1b[33mCancelled\x1b[0m"),
    }

    app.shutdown().await;
    Ok(())
}
