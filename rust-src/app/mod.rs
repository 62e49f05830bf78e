//! Calendar application state.

mod calendar;

#[allow(unused_imports)]
pub use calendar::{CalendarApp, Direction, HostEventOutcome, MonthView};
