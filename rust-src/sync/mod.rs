//! Persistence mirror keeping the store durable across restarts.

mod mirror;

pub use mirror::PersistenceMirror;
