//! Single-day commands.

use anyhow::Result;

use super::{open_on_day, parse_day};
use crate::config::Settings;


/// Print the note stored for a day.
pub async fn get(settings: &Settings, date: &str) -> Result<()> {
    let key = parse_day(date)?;
    let app = open_on_day(settings, &key).await?;

    let text = app.open_day(key.day)?;
    if text.is_empty() {
        println!("\x1b[2mNo entry for {date}\x1b[0m");
    } else {
        println!("{text}");
    }

    app.shutdown().await;
    Ok(())
}


/// Store a note; blank text removes the day.
pub async fn set(settings: &Settings, date: &str, text: &str) -> Result<()> {
    let key = parse_day(date)?;
    let mut app = open_on_day(settings, &key).await?;

    let changed = app.save_day(key.day, text)?;
    match (changed, text.trim().is_empty()) {
        (true, false) => println!("\x1b[32m+ Saved {date}\x1b[0m"),
        (true, true) => println!("\x1b[32m+ Removed {date}\x1b[0m"),
        (false, false) => println!("\x1b[2mUnchanged {date}\x1b[0m"),
        (false, true) => println!("\x1b[33mNo entry for {date}\x1b[0m"),
    }

    app.shutdown().await;
    Ok(())
}


/// Remove the note stored for a day.
pub async fn remove(settings: &Settings, date: &str) -> Result<()> {
    let key = parse_day(date)?;
    let mut app = open_on_day(settings, &key).await?;

    if app.remove_day(key.day)? {
        println!("\x1b[32m+ Removed {date}\x1b[0m");
    } else {
        println!("\x1b[33mNo entry for {date}\x1b[0m");
    }

    app.shutdown().await;
    Ok(())
}
