//! The reactive event store.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use culture_events::{EventError, EventFilters, EventRepository, FiltersPatch, Result};
use culture_models::{CulturalEvent, EventId, EventPatch, EventStatus, NewEvent};

use crate::state::{AppState, EventCounts};

/// Holds the current [`AppState`] and turns repository calls into state
/// transitions.
///
/// Each transition replaces the whole snapshot and notifies every
/// subscriber, so a view never sees a half-applied change.
pub struct EventStore {
    repository: Arc<dyn EventRepository>,
    state: watch::Sender<AppState>,
}

impl EventStore {
    /// Creates a store with an empty initial state.
    pub fn new(repository: Arc<dyn EventRepository>) -> Self {
        let (state, _) = watch::channel(AppState::default());
        Self { repository, state }
    }

    /// Returns a copy of the current state.
    pub fn snapshot(&self) -> AppState {
        self.state.borrow().clone()
    }

    /// Receives every subsequent snapshot. Dropping the receiver unsubscribes.
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.state.subscribe()
    }

    /// Events passing the current filters, in catalogue order.
    pub fn filtered_events(&self) -> Vec<CulturalEvent> {
        self.state.borrow().filtered_events()
    }

    /// Per-status totals over the whole catalogue, ignoring filters.
    pub fn counts(&self) -> EventCounts {
        self.state.borrow().counts()
    }

    /// The selected event, or `None` if nothing is selected or the id is unknown.
    pub fn selected_event(&self) -> Option<CulturalEvent> {
        self.state.borrow().selected_event().cloned()
    }

    /// Replaces the catalogue with the repository's contents.
    ///
    /// Failures are recorded in the state and also returned.
    pub async fn load(&self) -> Result<()> {
        self.transition(|s| {
            s.loading = true;
            s.error = None;
        });

        match self.repository.list_all().await {
            Ok(events) => {
                info!(count = events.len(), "loaded events");
                self.transition(move |s| {
                    s.events = events;
                    s.loading = false;
                });
                Ok(())
            }
            Err(e) => Err(self.fail("load", e)),
        }
    }

    /// Marks an event as selected, or clears the selection.
    pub fn select(&self, id: Option<EventId>) {
        debug!(event_id = ?id, "selection changed");
        self.transition(move |s| s.selected_event_id = id);
    }

    /// Merges a partial filter update into the active filters.
    pub fn set_filters(&self, patch: FiltersPatch) {
        self.transition(move |s| s.filters = s.filters.merge(patch));
    }

    /// Restores the default filters.
    pub fn reset_filters(&self) {
        self.transition(|s| s.filters = EventFilters::default());
    }

    /// Stars or unstars an event. Returns whether it is now a favorite.
    pub fn toggle_favorite(&self, id: &EventId) -> bool {
        let mut starred = false;
        self.transition(|s| {
            starred = if s.favorites.remove(id) {
                false
            } else {
                s.favorites.insert(id.clone())
            };
        });
        starred
    }

    /// Creates an event and appends it to the catalogue.
    pub async fn create(&self, draft: NewEvent) -> Result<CulturalEvent> {
        self.transition(|s| s.loading = true);

        match self.repository.create(draft).await {
            Ok(event) => {
                info!(event_id = %event.id, title = %event.title, "event created");
                let added = event.clone();
                self.transition(move |s| {
                    s.events.push(added);
                    s.loading = false;
                });
                Ok(event)
            }
            Err(e) => Err(self.fail("create", e)),
        }
    }

    /// Applies a patch and replaces the event in place.
    pub async fn update(&self, id: &EventId, patch: EventPatch) -> Result<CulturalEvent> {
        self.transition(|s| s.loading = true);

        match self.repository.update(id, patch).await {
            Ok(event) => {
                info!(event_id = %event.id, status = %event.status, "event updated");
                let replacement = event.clone();
                self.transition(move |s| {
                    if let Some(slot) = s.events.iter_mut().find(|e| e.id == replacement.id) {
                        *slot = replacement;
                    }
                    s.loading = false;
                });
                Ok(event)
            }
            Err(e) => Err(self.fail("update", e)),
        }
    }

    /// Deletes an event, dropping it from the selection and favorites.
    pub async fn remove(&self, id: &EventId) -> Result<()> {
        self.transition(|s| s.loading = true);

        match self.repository.delete(id).await {
            Ok(()) => {
                info!(event_id = %id, "event deleted");
                self.transition(|s| {
                    s.events.retain(|e| &e.id != id);
                    if s.selected_event_id.as_ref() == Some(id) {
                        s.selected_event_id = None;
                    }
                    s.favorites.remove(id);
                    s.loading = false;
                });
                Ok(())
            }
            Err(e) => Err(self.fail("delete", e)),
        }
    }

    /// Flips an event between published and draft.
    ///
    /// Cancelled events are rejected without touching the repository.
    pub async fn toggle_status(&self, id: &EventId) -> Result<CulturalEvent> {
        let current = self.state.borrow().find(id).map(|e| e.status);
        let next = match current {
            Some(EventStatus::Published) => EventStatus::Draft,
            Some(EventStatus::Draft) => EventStatus::Published,
            Some(EventStatus::Cancelled) => {
                warn!(event_id = %id, "refusing to toggle a cancelled event");
                return Err(EventError::InvalidState(format!(
                    "event {} is cancelled and cannot be published or unpublished",
                    id
                )));
            }
            None => return Err(EventError::NotFound(id.clone())),
        };

        self.update(id, EventPatch::status(next)).await
    }

    /// Records a failed call and hands the error back.
    fn fail(&self, operation: &'static str, error: EventError) -> EventError {
        warn!(operation, error = %error, "repository call failed");
        let message = error.to_string();
        self.transition(move |s| {
            s.loading = false;
            s.error = Some(message);
        });
        error
    }

    /// Publishes the next snapshot, built from a copy of the current one.
    fn transition(&self, change: impl FnOnce(&mut AppState)) {
        self.state.send_modify(|current| {
            let mut next = current.clone();
            change(&mut next);
            next.version = current.version + 1;
            *current = next;
        });
    }
}

impl std::fmt::Debug for EventStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventStore")
            .field("version", &self.state.borrow().version)
            .finish()
    }
}
