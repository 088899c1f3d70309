//! Event repository - canonical storage of the catalogue.
//!
//! The in-memory implementation stands in for a REST backend: every call
//! waits for a configurable latency before answering, and every mutation
//! mirrors the whole collection into an optional [`EventCache`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use culture_models::{CulturalEvent, EventId, EventPatch, NewEvent};
use culture_persistence::EventCache;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::error::{EventError, Result};

/// Async CRUD access to the event collection.
///
/// Results are snapshots: mutating a returned value never affects storage.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Returns a copy of every event, in insertion order.
    async fn list_all(&self) -> Result<Vec<CulturalEvent>>;

    /// Returns the event with `id`, or `NotFound`.
    async fn get_by_id(&self, id: &EventId) -> Result<CulturalEvent>;

    /// Stores a new event with a fresh id and both timestamps set to now.
    async fn create(&self, draft: NewEvent) -> Result<CulturalEvent>;

    /// Merges `patch` onto the event with `id` and bumps `updated_at`.
    async fn update(&self, id: &EventId, patch: EventPatch) -> Result<CulturalEvent>;

    /// Removes the event with `id`.
    async fn delete(&self, id: &EventId) -> Result<()>;
}

/// Configuration for the in-memory repository.
#[derive(Debug, Clone)]
pub struct RepositoryConfig {
    /// Artificial delay applied to every call.
    pub latency: Duration,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            latency: Duration::from_millis(800),
        }
    }
}

impl RepositoryConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Config without any artificial delay.
    pub fn instant() -> Self {
        Self {
            latency: Duration::ZERO,
        }
    }

    /// Sets the simulated latency.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

/// Repository keeping the catalogue in memory with a best-effort durable mirror.
///
/// Storage failures are logged and otherwise ignored; the in-memory
/// collection stays authoritative.
pub struct InMemoryEventRepository {
    events: RwLock<Vec<CulturalEvent>>,
    cache: Option<EventCache>,
    clock: Arc<dyn Clock>,
    config: RepositoryConfig,
}

impl InMemoryEventRepository {
    /// Creates an empty repository without persistence.
    pub fn new(config: RepositoryConfig) -> Self {
        Self::with_events(config, Vec::new())
    }

    /// Creates a repository holding `events`, without persistence.
    pub fn with_events(config: RepositoryConfig, events: Vec<CulturalEvent>) -> Self {
        Self {
            events: RwLock::new(events),
            cache: None,
            clock: Arc::new(SystemClock),
            config,
        }
    }

    /// Opens a repository mirrored into `cache`.
    ///
    /// The stored collection is rehydrated if present; otherwise, or when it
    /// cannot be read, `fallback` is used instead.
    pub fn open(config: RepositoryConfig, cache: EventCache, fallback: Vec<CulturalEvent>) -> Self {
        let events = cache.load_or(fallback);
        info!(count = events.len(), key = cache.key(), "opened event repository");
        Self {
            events: RwLock::new(events),
            cache: Some(cache),
            clock: Arc::new(SystemClock),
            config,
        }
    }

    /// Replaces the clock used for timestamps.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Returns the repository configuration.
    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    /// Returns the number of stored events without simulated latency.
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    /// Returns true if no events are stored.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn simulate_latency(&self) {
        if !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }
    }

    fn persist(&self, events: &[CulturalEvent]) {
        if let Some(ref cache) = self.cache {
            cache.save_best_effort(events);
        }
    }

    /// Next `updated_at` for an event: now, but strictly after `previous`.
    fn next_update_time(&self, previous: DateTime<Utc>) -> DateTime<Utc> {
        let now = self.clock.now();
        if now > previous {
            now
        } else {
            previous + chrono::Duration::milliseconds(1)
        }
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn list_all(&self) -> Result<Vec<CulturalEvent>> {
        let events = self.events.read().await.clone();
        self.simulate_latency().await;
        Ok(events)
    }

    async fn get_by_id(&self, id: &EventId) -> Result<CulturalEvent> {
        let event = {
            let events = self.events.read().await;
            events
                .iter()
                .find(|e| &e.id == id)
                .cloned()
                .ok_or_else(|| EventError::NotFound(id.clone()))?
        };
        self.simulate_latency().await;
        Ok(event)
    }

    async fn create(&self, draft: NewEvent) -> Result<CulturalEvent> {
        let event = draft.into_event(EventId::new(), self.clock.now());
        {
            let mut events = self.events.write().await;
            events.push(event.clone());
            self.persist(&events);
        }
        debug!(event_id = %event.id, title = %event.title, "created event");

        self.simulate_latency().await;
        Ok(event)
    }

    async fn update(&self, id: &EventId, patch: EventPatch) -> Result<CulturalEvent> {
        let updated = {
            let mut events = self.events.write().await;
            let index = events
                .iter()
                .position(|e| &e.id == id)
                .ok_or_else(|| EventError::NotFound(id.clone()))?;

            let mut event = events[index].clone();
            patch.apply(&mut event);
            event.updated_at = self.next_update_time(event.updated_at);

            events[index] = event.clone();
            self.persist(&events);
            event
        };
        debug!(event_id = %id, "updated event");

        self.simulate_latency().await;
        Ok(updated)
    }

    async fn delete(&self, id: &EventId) -> Result<()> {
        {
            let mut events = self.events.write().await;
            let before = events.len();
            events.retain(|e| &e.id != id);
            if events.len() == before {
                return Err(EventError::NotFound(id.clone()));
            }
            self.persist(&events);
        }
        debug!(event_id = %id, "deleted event");

        self.simulate_latency().await;
        Ok(())
    }
}
