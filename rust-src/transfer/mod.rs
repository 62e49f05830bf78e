//! Import and export of full backups.

mod gateway;

#[allow(unused_imports)]
pub use gateway::{import_result, ExportOutcome, ImportExportGateway, ImportOutcome, TransferError};
