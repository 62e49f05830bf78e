//! Calendar controller: the displayed month, day editing and transfers.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use tracing::{debug, info};

use crate::aggregation::{summarize_period, PeriodSummary};
use crate::host::HostEvent;
use crate::models::{days_in_month, first_of_month, DayKey, DayKeyError, DayValues};
use crate::store::{DayValueStore, SubscriptionId};
use crate::sync::PersistenceMirror;
use crate::transfer::{import_result, ExportOutcome, ImportExportGateway, ImportOutcome, TransferError};


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}


/// The month currently on screen. `month` is zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
}


impl MonthView {
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month0(),
        }
    }

    /// Build a view from a zero-based month, rejecting months chrono cannot represent.
    pub fn new(year: i32, month: u32) -> Result<Self, DayKeyError> {
        first_of_month(year, month)?;
        Ok(Self { year, month })
    }

    /// Build a view from a one-based month number.
    pub fn from_human(year: i32, month: u32) -> Result<Self, DayKeyError> {
        if !(1..=12).contains(&month) {
            return Err(DayKeyError::MonthNumberOutOfRange(month));
        }
        Self::new(year, month - 1)
    }

    /// The month holding `key`.
    pub fn of_key(key: &DayKey) -> Self {
        Self {
            year: key.year,
            month: key.month,
        }
    }

    /// The adjacent month, or `self` at the edge of the representable calendar.
    pub fn step(self, direction: Direction) -> Self {
        let stepped = match (direction, self.month) {
            (Direction::Prev, 0) => self.year.checked_sub(1).map(|year| (year, 11)),
            (Direction::Prev, m) => Some((self.year, m - 1)),
            (Direction::Next, 11) => self.year.checked_add(1).map(|year| (year, 0)),
            (Direction::Next, m) => Some((self.year, m + 1)),
        };

        stepped
            .and_then(|(year, month)| Self::new(year, month).ok())
            .unwrap_or(self)
    }

    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    /// Weekday of the 1st, Sunday = 0.
    pub fn first_weekday(&self) -> u32 {
        first_of_month(self.year, self.month)
            .map(|d| d.weekday().num_days_from_sunday())
            .unwrap_or(0)
    }

    pub fn key(&self, day: u32) -> Result<DayKey, DayKeyError> {
        DayKey::new(self.year, self.month, day)
    }
}


/// What handling a host event did to the calendar.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEventOutcome {
    Exported(ExportOutcome),
    Imported(usize),
    Cancelled,
}


pub struct CalendarApp {
    store: DayValueStore,
    mirror: Arc<PersistenceMirror>,
    gateway: ImportExportGateway,
    view: MonthView,
    today: NaiveDate,
    mirroring: SubscriptionId,
}


impl CalendarApp {
    /// Load persisted values and start mirroring every later change.
    pub async fn start(mirror: Arc<PersistenceMirror>, gateway: ImportExportGateway, today: NaiveDate) -> Self {
        let mut store = DayValueStore::from_values(mirror.load().await);
        info!(
            "Calendar started with {} entries (durable mirror: {})",
            store.len(),
            mirror.has_host()
        );

        let sink = Arc::clone(&mirror);
        let mirroring = store.subscribe(move |values| sink.persist(values));

        Self {
            store,
            mirror,
            gateway,
            view: MonthView::containing(today),
            today,
            mirroring,
        }
    }

    pub fn store(&self) -> &DayValueStore {
        &self.store
    }

    pub fn view(&self) -> MonthView {
        self.view
    }

    pub fn navigate(&mut self, direction: Direction) -> MonthView {
        self.view = self.view.step(direction);
        self.view
    }

    pub fn go_to(&mut self, view: MonthView) {
        self.view = view;
    }

    pub fn is_today(&self, day: u32) -> bool {
        self.view.key(day).ok().and_then(|key| key.to_date()) == Some(self.today)
    }

    /// Text to pre-fill when a day of the displayed month is opened.
    pub fn open_day(&self, day: u32) -> Result<String, DayKeyError> {
        let key = self.view.key(day)?;
        Ok(self.get(&key).unwrap_or_default().to_string())
    }

    pub fn save_day(&mut self, day: u32, text: &str) -> Result<bool, DayKeyError> {
        let key = self.view.key(day)?;
        Ok(self.set(&key, text))
    }

    pub fn remove_day(&mut self, day: u32) -> Result<bool, DayKeyError> {
        let key = self.view.key(day)?;
        Ok(self.remove(&key))
    }

    fn get(&self, key: &DayKey) -> Option<&str> {
        self.store.get(&key.to_string())
    }

    fn set(&mut self, key: &DayKey, text: &str) -> bool {
        debug!("Setting {key}");
        self.store.set(&key.to_string(), text)
    }

    fn remove(&mut self, key: &DayKey) -> bool {
        debug!("Removing {key}");
        self.store.remove(&key.to_string())
    }

    /// Totals for the displayed month and year.
    pub fn summary(&self) -> PeriodSummary {
        summarize_period(self.store.values(), self.view.year, self.view.month)
    }

    pub async fn export(&self) -> Result<ExportOutcome, TransferError> {
        self.gateway.export_all(self.store.values()).await
    }

    /// Import a backup, replacing every entry on success.
    pub async fn import(&mut self) -> Result<ImportOutcome, TransferError> {
        let outcome = self.gateway.import_all().await?;
        if let ImportOutcome::Imported(values) = &outcome {
            self.replace_all(values.clone());
        }
        Ok(outcome)
    }

    pub async fn handle_host_event(&mut self, event: HostEvent) -> Result<HostEventOutcome, TransferError> {
        match event {
            HostEvent::ExportRequested => self.export().await.map(HostEventOutcome::Exported),
            HostEvent::ImportCompleted(result) => match import_result(result)? {
                ImportOutcome::Imported(values) => {
                    let count = values.len();
                    self.replace_all(values);
                    Ok(HostEventOutcome::Imported(count))
                }
                ImportOutcome::Cancelled => Ok(HostEventOutcome::Cancelled),
            },
        }
    }

    fn replace_all(&mut self, values: DayValues) {
        info!("Replacing store with {} imported entries", values.len());
        self.store.replace_all(values);
    }

    /// Stop mirroring and wait for background backups before exiting.
    pub async fn shutdown(mut self) {
        self.store.unsubscribe(self.mirroring);
        self.mirror.settle().await;
    }
}
