//! Totals command.

use anyhow::Result;

use super::{open_quiet, resolve_view};
use crate::aggregation::{format_total, month_total, year_total};
use crate::app::MonthView;
use crate::config::Settings;
use crate::visualization::month_title;


/// Print one month's total, or every month of a year.
pub async fn run(settings: &Settings, year: Option<i32>, month: Option<u32>) -> Result<()> {
    let view = resolve_view(year, month)?;
    let app = open_quiet(settings).await?;
    let values = app.store().values();

    match month {
        Some(_) => {
            println!("{}: {}", month_title(view), format_total(month_total(values, view.year, view.month)));
        }
        None => {
            for month in 0..12 {
                let period = MonthView { year: view.year, month };
                println!(
                    "{:<16} {:>12}",
                    month_title(period),
                    format_total(month_total(values, view.year, month))
                );
            }
        }
    }
    println!("\x1b[1mYear total ({}): {}\x1b[0m", view.year, format_total(year_total(values, view.year)));

    app.shutdown().await;
    Ok(())
}
