//! Month view command.

use std::io::IsTerminal;

use anyhow::Result;

use super::{open_quiet, resolve_view};
use crate::app::Direction;
use crate::config::Settings;
use crate::visualization::render_month;


/// Render a month grid with notes and totals, optionally one month over.
pub async fn run(settings: &Settings, year: Option<i32>, month: Option<u32>, step: Option<Direction>) -> Result<()> {
    let view = resolve_view(year, month)?;
    let mut app = open_quiet(settings).await?;
    app.go_to(view);
    if let Some(direction) = step {
        app.navigate(direction);
    }

    let view = app.view();
    let today = (1..=view.days_in_month()).find(|&day| app.is_today(day));
    let color = std::io::stdout().is_terminal();
    print!(
        "{}",
        render_month(view, app.store().values(), &app.summary(), today, color)
    );
    if app.store().is_empty() {
        println!("\x1b[2mNo entries yet. Add one with: daytally set YYYY-MM-DD <text>\x1b[0m");
    }

    app.shutdown().await;
    Ok(())
}
