//! The locale store: per-attribute-path maps of locale code to string value.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Source of truth for every tracked attribute across all locales.
///
/// Keys are attribute paths (`"header"`, `"banner.title"`,
/// `"items.0.header"`); values map locale codes to strings. Once a path is
/// tracked, reading it for a locale without an explicit entry yields `""`,
/// never a missing value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct LocaleStore {
    entries: BTreeMap<String, BTreeMap<String, String>>,
}

impl LocaleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether `path` has a slot, populated or not.
    pub fn is_tracked(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// The per-locale values for `path`, if tracked.
    pub fn slot(&self, path: &str) -> Option<&BTreeMap<String, String>> {
        self.entries.get(path)
    }

    /// The stored value for `(path, locale)`. Tracked paths without an
    /// explicit entry for `locale` read as `""`.
    pub fn value(&self, path: &str, locale: &str) -> Option<&str> {
        let slot = self.entries.get(path)?;
        Some(slot.get(locale).map(String::as_str).unwrap_or(""))
    }

    /// Every tracked attribute path.
    pub fn paths(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// Every locale that appears in any tracked attribute.
    pub fn locales(&self) -> BTreeSet<String> {
        self.entries
            .values()
            .flat_map(|slot| slot.keys().cloned())
            .collect()
    }

    /// Creates the slot for `path` if absent, keeping existing entries.
    pub(crate) fn ensure(&mut self, path: &str) -> &mut BTreeMap<String, String> {
        self.entries.entry(path.to_string()).or_default()
    }

    /// Replaces any existing slot for `path` with an empty one.
    pub(crate) fn replace(&mut self, path: &str) -> &mut BTreeMap<String, String> {
        let slot = self.entries.entry(path.to_string()).or_default();
        slot.clear();
        slot
    }

    /// Writes `value` for `(path, locale)`, creating the slot if needed.
    pub(crate) fn set(&mut self, path: &str, locale: &str, value: String) {
        self.ensure(path).insert(locale.to_string(), value);
    }

    /// Ensures `(path, locale)` has an entry, defaulting to `""`, and
    /// returns it.
    pub(crate) fn backfill(&mut self, path: &str, locale: &str) -> String {
        self.ensure(path)
            .entry(locale.to_string())
            .or_default()
            .clone()
    }

    /// Drops every entry whose path starts with `prefix`.
    pub(crate) fn remove_prefix(&mut self, prefix: &str) {
        self.entries.retain(|path, _| !path.starts_with(prefix));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_value() {
        let mut store = LocaleStore::new();
        store.set("header", "en", "hello".to_string());
        assert_eq!(store.value("header", "en"), Some("hello"));
    }

    #[test]
    fn test_value_untracked_path_is_none() {
        let store = LocaleStore::new();
        assert_eq!(store.value("header", "en"), None);
    }

    #[test]
    fn test_value_missing_locale_reads_empty() {
        let mut store = LocaleStore::new();
        store.set("header", "en", "hello".to_string());
        assert_eq!(store.value("header", "fr"), Some(""));
    }

    #[test]
    fn test_ensure_keeps_existing_entries() {
        let mut store = LocaleStore::new();
        store.set("header", "en", "hello".to_string());
        store.ensure("header");
        assert_eq!(store.value("header", "en"), Some("hello"));
    }

    #[test]
    fn test_replace_clears_slot() {
        let mut store = LocaleStore::new();
        store.set("header", "en", "hello".to_string());
        store.replace("header");
        assert!(store.is_tracked("header"));
        assert_eq!(store.slot("header").map(BTreeMap::len), Some(0));
    }

    #[test]
    fn test_backfill_defaults_to_empty_and_sticks() {
        let mut store = LocaleStore::new();
        store.set("header", "en", "hello".to_string());
        assert_eq!(store.backfill("header", "fr"), "");
        assert_eq!(store.slot("header").unwrap().get("fr").unwrap(), "");
        assert_eq!(store.backfill("header", "en"), "hello");
    }

    #[test]
    fn test_remove_prefix() {
        let mut store = LocaleStore::new();
        store.set("items.0.header", "en", "a".to_string());
        store.set("items.0.title", "en", "b".to_string());
        store.set("items.1.header", "en", "c".to_string());
        store.remove_prefix("items.0.");
        assert!(!store.is_tracked("items.0.header"));
        assert!(!store.is_tracked("items.0.title"));
        assert!(store.is_tracked("items.1.header"));
    }

    #[test]
    fn test_locales_unions_all_slots() {
        let mut store = LocaleStore::new();
        store.set("header", "en", "hello".to_string());
        store.set("title", "fr", "salut".to_string());
        let locales = store.locales();
        assert!(locales.contains("en"));
        assert!(locales.contains("fr"));
        assert_eq!(locales.len(), 2);
    }

    #[test]
    fn test_serde_transparent_roundtrip() {
        let mut store = LocaleStore::new();
        store.set("header", "en", "hello".to_string());
        let json = serde_json::to_string(&store).unwrap();
        assert_eq!(json, r#"{"header":{"en":"hello"}}"#);
        let back: LocaleStore = serde_json::from_str(&json).unwrap();
        assert_eq!(back, store);
    }
}
