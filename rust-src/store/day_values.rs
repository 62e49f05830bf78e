//! In-memory day value store with change subscriptions.

use crate::models::DayValues;


/// Callback invoked with the post-mutation snapshot.
pub type Listener = Box<dyn FnMut(&DayValues) + Send>;


/// Handle returned by [`DayValueStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);


/// Mapping from day key to note text; the source of truth for the view.
///
/// Blank values are never stored: saving whitespace-only text removes the
/// key instead.
#[derive(Default)]
pub struct DayValueStore {
    values: DayValues,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}


impl DayValueStore {
    /// Seed a store without notifying anyone. Blank values are dropped.
    pub fn from_values(values: DayValues) -> Self {
        Self {
            values: without_blank_values(values),
            ..Self::default()
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Store `text` under `key`, or remove the key when `text` is blank.
    ///
    /// Returns whether the store changed.
    pub fn set(&mut self, key: &str, text: &str) -> bool {
        if is_blank(text) {
            return self.remove(key);
        }

        if self.get(key) == Some(text) {
            return false;
        }

        self.values.insert(key.to_string(), text.to_string());
        self.notify();
        true
    }

    /// Remove `key`. Removing an absent key is not an error.
    pub fn remove(&mut self, key: &str) -> bool {
        if self.values.remove(key).is_none() {
            return false;
        }
        self.notify();
        true
    }

    /// Discard every entry and adopt `values` wholesale.
    pub fn replace_all(&mut self, values: DayValues) {
        self.values = without_blank_values(values);
        self.notify();
    }

    /// Union of both maps where `overlay` wins on key collisions.
    pub fn merge(base: &DayValues, overlay: &DayValues) -> DayValues {
        let mut merged = base.clone();
        merged.extend(overlay.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
    }

    pub fn values(&self) -> &DayValues {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Register a listener for every effective mutation.
    pub fn subscribe(&mut self, listener: impl FnMut(&DayValues) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn notify(&mut self) {
        for (_, listener) in &mut self.listeners {
            listener(&self.values);
        }
    }
}


fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}


fn without_blank_values(mut values: DayValues) -> DayValues {
    values.retain(|_, v| !is_blank(v));
    values
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn values(pairs: &[(&str, &str)]) -> DayValues {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_set_then_get() {
        let mut store = DayValueStore::default();
        assert!(store.set("2024-0-15", "100"));
        assert_eq!(store.get("2024-0-15"), Some("100"));
    }

    #[test]
    fn test_set_keeps_text_untrimmed() {
        let mut store = DayValueStore::default();
        store.set("2024-0-15", "  note  ");
        assert_eq!(store.get("2024-0-15"), Some("  note  "));
    }

    #[test]
    fn test_set_empty_removes_key() {
        let mut store = DayValueStore::default();
        store.set("2024-0-15", "100");
        assert!(store.set("2024-0-15", ""));
        assert_eq!(store.get("2024-0-15"), None);
    }

    #[test]
    fn test_set_whitespace_removes_existing_key() {
        let mut store = DayValueStore::default();
        store.set("2024-0-15", "100");
        store.set("2024-0-15", "   ");
        assert_eq!(store.get("2024-0-15"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_absent_key_is_noop() {
        let mut store = DayValueStore::default();
        assert!(!store.remove("2024-0-1"));
    }

    #[test]
    fn test_merge_is_right_biased() {
        let base = values(&[("2024-0-1", "10"), ("2024-0-2", "base only")]);
        let overlay = values(&[("2024-0-1", "20"), ("2024-0-3", "overlay only")]);

        let merged = DayValueStore::merge(&base, &overlay);

        assert_eq!(merged.len(), 3);
        assert_eq!(merged["2024-0-1"], "20");
        assert_eq!(merged["2024-0-2"], "base only");
        assert_eq!(merged["2024-0-3"], "overlay only");
    }

    #[test]
    fn test_replace_all_discards_previous_entries() {
        let mut store = DayValueStore::from_values(values(&[("2023-5-5", "old")]));
        store.replace_all(values(&[("2024-0-1", "new"), ("2024-0-2", " ")]));

        assert_eq!(store.get("2023-5-5"), None);
        assert_eq!(store.get("2024-0-1"), Some("new"));
        assert_eq!(store.get("2024-0-2"), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_listeners_see_effective_mutations_only() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut store = DayValueStore::default();

        let sink = Arc::clone(&seen);
        store.subscribe(move |values| sink.lock().unwrap().push(values.len()));

        store.set("2024-0-1", "a");
        store.set("2024-0-1", "a");
        store.set("2024-0-2", "b");
        store.remove("2024-0-9");
        store.remove("2024-0-1");

        assert_eq!(*seen.lock().unwrap(), vec![1, 2, 1]);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let count = Arc::new(Mutex::new(0));
        let mut store = DayValueStore::default();

        let sink = Arc::clone(&count);
        let id = store.subscribe(move |_| *sink.lock().unwrap() += 1);
        store.set("2024-0-1", "a");
        assert!(store.unsubscribe(id));
        store.set("2024-0-2", "b");

        assert_eq!(*count.lock().unwrap(), 1);
        assert!(!store.unsubscribe(id));
    }
}
