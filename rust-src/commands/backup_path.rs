//! Backup location command.

use std::sync::Arc;

use super::build_host;
use crate::config::Settings;
use crate::host::{HostBridge, PresetDialog};


/// Print where the durable mirror lives.
pub fn run(settings: &Settings) {
    match build_host(settings, Arc::new(PresetDialog::cancelled())) {
        Some(host) => println!("{}", host.backup_path().display()),
        None => println!("\x1b[33mNo desktop host: durable backups are disabled\x1b[0m"),
    }
}
