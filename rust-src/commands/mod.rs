//! CLI command implementations.

pub mod backup_path;
pub mod entry;
pub mod show;
pub mod totals;
pub mod transfer;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::debug;

use crate::app::{CalendarApp, MonthView};
use crate::config::{HostMode, Settings, BACKUP_FILE_NAME};
use crate::host::{DesktopHost, FileDialog, HostBridge, PresetDialog};
use crate::models::DayKey;
use crate::storage::ProfileStore;
use crate::sync::PersistenceMirror;
use crate::transfer::ImportExportGateway;


/// Build the desktop host for the configured mode, checked once.
pub fn build_host(settings: &Settings, dialog: Arc<dyn FileDialog>) -> Option<Arc<DesktopHost>> {
    match settings.host_mode {
        HostMode::Desktop => Some(Arc::new(DesktopHost::new(
            settings.backup_dir.clone(),
            BACKUP_FILE_NAME,
            dialog,
        ))),
        HostMode::Browser => None,
    }
}


/// A started calendar and the desktop host it mirrors to, if any.
pub struct Session {
    pub app: CalendarApp,
    pub host: Option<Arc<DesktopHost>>,
}


/// Open the profile, load persisted values and start the calendar.
pub async fn open_app(settings: &Settings, dialog: Arc<dyn FileDialog>) -> Result<Session> {
    let profile = ProfileStore::open(&settings.profile_path)
        .with_context(|| format!("Failed to open profile: {}", settings.profile_path.display()))?;
    debug!("Opened profile {}", profile.path().display());

    let host = build_host(settings, Arc::clone(&dialog));
    let bridge = host.clone().map(|host| host as Arc<dyn HostBridge>);
    let mirror = Arc::new(PersistenceMirror::new(Box::new(profile), bridge.clone()));
    let gateway = ImportExportGateway::new(bridge, settings.download_dir.clone(), dialog);

    let app = CalendarApp::start(mirror, gateway, Local::now().date_naive()).await;
    Ok(Session { app, host })
}


/// Open the calendar for commands that never show a dialog.
pub async fn open_quiet(settings: &Settings) -> Result<CalendarApp> {
    Ok(open_app(settings, Arc::new(PresetDialog::cancelled())).await?.app)
}


/// Parse a `YYYY-MM-DD` argument.
pub fn parse_day(date: &str) -> Result<DayKey> {
    DayKey::parse_date(date).with_context(|| format!("Invalid date: {date}"))
}


/// Open the calendar on the month holding `key`.
pub async fn open_on_day(settings: &Settings, key: &DayKey) -> Result<CalendarApp> {
    let mut app = open_quiet(settings).await?;
    app.go_to(MonthView::of_key(key));
    Ok(app)
}


/// Resolve optional year/month arguments against today.
pub fn resolve_view(year: Option<i32>, month: Option<u32>) -> Result<MonthView> {
    let today = MonthView::containing(Local::now().date_naive());
    let year = year.unwrap_or(today.year);

    let view = match month {
        Some(month) => MonthView::from_human(year, month),
        None => MonthView::new(year, today.month),
    };
    view.with_context(|| format!("Invalid period: {year}"))
}


/// Directory prompts resolve relative answers against.
pub fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
