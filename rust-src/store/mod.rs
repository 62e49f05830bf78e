//! Day value store.

mod day_values;

#[allow(unused_imports)]
pub use day_values::{DayValueStore, Listener, SubscriptionId};
