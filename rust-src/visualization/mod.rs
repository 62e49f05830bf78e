//! Terminal rendering of the calendar.

mod month_grid;

#[allow(unused_imports)]
pub use month_grid::{month_title, render_month, MONTH_NAMES};
