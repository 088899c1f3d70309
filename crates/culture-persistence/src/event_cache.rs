//! Best-effort durable mirror of the event collection.
//!
//! The whole collection is serialized as one JSON array under a fixed key on
//! every mutation and read back once at startup. The cache is never the
//! source of truth: when it is missing or unreadable the caller falls back
//! to another collection and carries on.

use std::sync::Arc;

use culture_models::CulturalEvent;
use tracing::{debug, warn};

use crate::error::Result;
use crate::kv::KeyValueStore;

/// Storage key holding the serialized catalogue.
pub const STORAGE_KEY: &str = "cultural-events";

/// Reads and writes the event collection through a [`KeyValueStore`].
#[derive(Clone)]
pub struct EventCache {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl EventCache {
    /// Creates a cache writing under [`STORAGE_KEY`].
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, STORAGE_KEY)
    }

    /// Creates a cache writing under a custom key.
    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Returns the storage key in use.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Serializes the full collection under the cache key.
    pub fn save(&self, events: &[CulturalEvent]) -> Result<()> {
        let json = serde_json::to_string(events)?;
        self.store.set(&self.key, &json)?;
        debug!(key = %self.key, count = events.len(), "persisted event collection");
        Ok(())
    }

    /// Loads the collection, `None` when nothing was stored yet.
    ///
    /// Date fields are parsed back from their ISO-8601 form.
    pub fn load(&self) -> Result<Option<Vec<CulturalEvent>>> {
        let Some(json) = self.store.get(&self.key)? else {
            return Ok(None);
        };
        let events = serde_json::from_str(&json)?;
        Ok(Some(events))
    }

    /// Loads the collection, degrading to `fallback` when the stored data is
    /// absent, corrupt or unreachable. Failures are logged, never returned.
    pub fn load_or(&self, fallback: Vec<CulturalEvent>) -> Vec<CulturalEvent> {
        match self.load() {
            Ok(Some(events)) => {
                debug!(key = %self.key, count = events.len(), "rehydrated event collection");
                events
            }
            Ok(None) => fallback,
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to load events from storage");
                fallback
            }
        }
    }

    /// Saves the collection, logging instead of returning failures.
    pub fn save_best_effort(&self, events: &[CulturalEvent]) {
        if let Err(e) = self.save(events) {
            warn!(key = %self.key, error = %e, "failed to persist events to storage");
        }
    }
}

impl std::fmt::Debug for EventCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventCache").field("key", &self.key).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PersistenceError;
    use crate::kv::{FileKeyValueStore, MemoryKeyValueStore};
    use chrono::{TimeZone, Utc};
    use culture_models::{EventBuilder, EventCategory, EventId};
    use tempfile::tempdir;

    fn sample_events() -> Vec<CulturalEvent> {
        let created = Utc.with_ymd_and_hms(2026, 1, 10, 9, 15, 30).unwrap();
        let date = Utc.with_ymd_and_hms(2026, 5, 2, 20, 0, 0).unwrap();
        vec![
            EventBuilder::new("Jazz Night", EventCategory::Concert)
                .description("An evening of modern jazz")
                .venue("Blue Note")
                .date(date)
                .price(25.0)
                .seats(50)
                .build()
                .into_event(EventId::from_string("evt-1"), created),
            EventBuilder::new("Tosca", EventCategory::Opera)
                .description("Puccini in three acts")
                .venue("La Scala")
                .date(date)
                .price(120.0)
                .seats(0)
                .image_url("https://example.com/tosca.jpg")
                .build()
                .into_event(EventId::from_string("evt-2"), created),
        ]
    }

    #[test]
    fn test_load_missing_is_none() {
        let cache = EventCache::new(Arc::new(MemoryKeyValueStore::new()));
        assert!(cache.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load_on_disk() {
        let dir = tempdir().unwrap();
        let events = sample_events();

        let cache = EventCache::new(Arc::new(FileKeyValueStore::new(dir.path())));
        cache.save(&events).unwrap();
        assert!(dir.path().join("cultural-events.json").exists());

        // A fresh cache over the same directory sees the same collection.
        let reopened = EventCache::new(Arc::new(FileKeyValueStore::new(dir.path())));
        let loaded = reopened.load().unwrap().unwrap();
        assert_eq!(loaded, events);
        assert_eq!(loaded[0].date, events[0].date);
        assert_eq!(loaded[1].created_at, events[1].created_at);
    }

    #[test]
    fn test_corrupt_data_is_an_error() {
        let store = MemoryKeyValueStore::with_entry(STORAGE_KEY, "{not json");
        let cache = EventCache::new(Arc::new(store));
        assert!(matches!(cache.load(), Err(PersistenceError::SerializeError(_))));
    }

    #[test]
    fn test_load_or_degrades_on_corruption() {
        let store = MemoryKeyValueStore::with_entry(STORAGE_KEY, "[{\"id\": 42}]");
        let cache = EventCache::new(Arc::new(store));

        let fallback = sample_events();
        assert_eq!(cache.load_or(fallback.clone()), fallback);
    }

    #[test]
    fn test_load_or_degrades_when_unavailable() {
        let cache = EventCache::new(Arc::new(MemoryKeyValueStore::unavailable()));
        assert!(cache.load_or(Vec::new()).is_empty());
        // Saving is swallowed as well.
        cache.save_best_effort(&sample_events());
    }

    #[test]
    fn test_load_or_prefers_stored_data() {
        let cache = EventCache::new(Arc::new(MemoryKeyValueStore::new()));
        let events = sample_events();
        cache.save(&events[..1]).unwrap();

        let loaded = cache.load_or(events.clone());
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id.as_str(), "evt-1");
    }

    #[test]
    fn test_custom_key_is_isolated() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let cache = EventCache::with_key(store.clone(), "other-key");
        cache.save(&sample_events()).unwrap();

        assert_eq!(cache.key(), "other-key");
        assert!(EventCache::new(store).load().unwrap().is_none());
    }
}
