//! Persistence layer for the cultural events catalogue.
//!
//! This crate provides a small key-value storage abstraction with a
//! crash-safe file backend (write to temp file, then rename) and an
//! in-memory backend, plus the [`EventCache`] that mirrors the event
//! collection into it.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use culture_persistence::{EventCache, FileKeyValueStore};
//!
//! let cache = EventCache::new(Arc::new(FileKeyValueStore::new("/tmp/culture")));
//!
//! // Absent or corrupt data degrades to the fallback collection.
//! let events = cache.load_or(Vec::new());
//! cache.save_best_effort(&events);
//! ```

pub mod atomic;
pub mod error;
pub mod event_cache;
pub mod kv;

pub use error::{PersistenceError, Result};
pub use event_cache::{EventCache, STORAGE_KEY};
pub use kv::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
