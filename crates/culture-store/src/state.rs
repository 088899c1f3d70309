//! Application state snapshots and the views derived from them.

use std::collections::BTreeSet;

use culture_events::EventFilters;
use culture_models::{CulturalEvent, EventId, EventStatus};

/// Tallies over the whole collection, regardless of active filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventCounts {
    pub total: usize,
    pub published: usize,
    pub draft: usize,
    pub cancelled: usize,
}

impl EventCounts {
    /// Counts events per status.
    pub fn from_events(events: &[CulturalEvent]) -> Self {
        events.iter().fold(
            Self {
                total: events.len(),
                ..Self::default()
            },
            |mut counts, event| {
                match event.status {
                    EventStatus::Published => counts.published += 1,
                    EventStatus::Draft => counts.draft += 1,
                    EventStatus::Cancelled => counts.cancelled += 1,
                }
                counts
            },
        )
    }
}

/// One observed version of everything the views can see.
///
/// Never mutated once published; every transition produces a new value with
/// a higher `version`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// Store-owned copy of the catalogue.
    pub events: Vec<CulturalEvent>,
    pub filters: EventFilters,
    pub selected_event_id: Option<EventId>,
    /// True while a repository call is outstanding.
    pub loading: bool,
    /// Message of the last failed repository call.
    pub error: Option<String>,
    /// Events starred during this session. Not persisted.
    pub favorites: BTreeSet<EventId>,
    pub version: u64,
}

impl AppState {
    /// Events passing the active filters, in collection order.
    pub fn filtered_events(&self) -> Vec<CulturalEvent> {
        self.filters.apply(&self.events)
    }

    /// Status tallies over the full collection.
    pub fn counts(&self) -> EventCounts {
        EventCounts::from_events(&self.events)
    }

    /// The selected event, if one is selected and still present.
    pub fn selected_event(&self) -> Option<&CulturalEvent> {
        let id = self.selected_event_id.as_ref()?;
        self.find(id)
    }

    /// Looks up an event in the store's copy.
    pub fn find(&self, id: &EventId) -> Option<&CulturalEvent> {
        self.events.iter().find(|e| &e.id == id)
    }

    /// Returns true if the event is starred.
    pub fn is_favorite(&self, id: &EventId) -> bool {
        self.favorites.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use culture_models::{EventBuilder, EventCategory};

    fn event(title: &str, status: EventStatus) -> CulturalEvent {
        EventBuilder::new(title, EventCategory::Theater)
            .status(status)
            .venue("Globe")
            .build()
            .into_event(EventId::new(), Utc::now())
    }

    #[test]
    fn test_counts_one_of_each_status() {
        let events = vec![
            event("A", EventStatus::Draft),
            event("B", EventStatus::Published),
            event("C", EventStatus::Cancelled),
        ];

        let counts = EventCounts::from_events(&events);
        assert_eq!(counts.total, 3);
        assert_eq!(counts.published, 1);
        assert_eq!(counts.draft, 1);
        assert_eq!(counts.cancelled, 1);
    }

    #[test]
    fn test_counts_ignore_filters() {
        let state = AppState {
            events: vec![event("A", EventStatus::Draft), event("B", EventStatus::Draft)],
            filters: EventFilters::new().with_status(EventStatus::Published),
            ..AppState::default()
        };

        assert!(state.filtered_events().is_empty());
        assert_eq!(state.counts().total, 2);
        assert_eq!(state.counts().draft, 2);
    }

    #[test]
    fn test_selected_event_resolution() {
        let a = event("A", EventStatus::Draft);
        let mut state = AppState {
            events: vec![a.clone()],
            ..AppState::default()
        };
        assert!(state.selected_event().is_none());

        state.selected_event_id = Some(a.id.clone());
        assert_eq!(state.selected_event().map(|e| e.title.as_str()), Some("A"));

        state.selected_event_id = Some(EventId::from_string("evt-gone"));
        assert!(state.selected_event().is_none());
    }
}
