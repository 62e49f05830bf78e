//! Optional desktop host capability.

mod bridge;
mod desktop;
mod dialog;

#[allow(unused_imports)]
pub use bridge::{ExportResult, HostBridge, HostError, HostEvent, ImportResult};
pub use desktop::DesktopHost;
#[allow(unused_imports)]
pub use dialog::{FileDialog, FileFilter, PresetDialog, PromptDialog, IMPORT_FILTERS};
