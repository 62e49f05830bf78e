//! Fast local persistence for the day value mapping.

#[cfg(test)]
mod memory_store;
mod profile_store;

#[cfg(test)]
pub use memory_store::MemoryStore;
#[allow(unused_imports)]
pub use profile_store::{
    KeyValueStore,
    ProfileStore,
    StorageError,
    DAY_VALUES_KEY,
};
