//! DayTally CLI
//!
//! Notes per calendar day with monthly and yearly totals, mirrored to a
//! local profile and an optional durable backup file.

mod aggregation;
mod app;
mod cli;
mod commands;
mod config;
mod host;
mod logging;
mod models;
mod storage;
mod store;
mod sync;
mod transfer;
mod visualization;


#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
