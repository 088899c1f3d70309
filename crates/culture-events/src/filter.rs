//! Event filtering for list views.

use culture_models::{CulturalEvent, EventCategory, EventStatus};

/// Filter criteria narrowing the visible events.
///
/// `None` for status or category means "all"; an empty search term matches
/// everything. The default value therefore matches every event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilters {
    /// Filter by status.
    pub status: Option<EventStatus>,
    /// Filter by category.
    pub category: Option<EventCategory>,
    /// Case-insensitive text searched in title, description and venue.
    pub search_term: String,
}

impl EventFilters {
    /// Creates a new empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the status filter.
    pub fn with_status(mut self, status: EventStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the category filter.
    pub fn with_category(mut self, category: EventCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Sets the search term.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    /// Returns true if no criterion is active.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Returns a copy with the present fields of `patch` applied.
    pub fn merge(&self, patch: FiltersPatch) -> Self {
        Self {
            status: patch.status.unwrap_or(self.status),
            category: patch.category.unwrap_or(self.category),
            search_term: patch
                .search_term
                .unwrap_or_else(|| self.search_term.clone()),
        }
    }

    /// Returns true if the event matches this filter.
    pub fn matches(&self, event: &CulturalEvent) -> bool {
        if let Some(status) = self.status {
            if event.status != status {
                return false;
            }
        }

        if let Some(category) = self.category {
            if event.category != category {
                return false;
            }
        }

        if !self.search_term.is_empty() {
            let term = self.search_term.to_lowercase();
            let found = [&event.title, &event.description, &event.venue]
                .iter()
                .any(|field| field.to_lowercase().contains(&term));
            if !found {
                return false;
            }
        }

        true
    }

    /// Returns the matching events, keeping their original order.
    pub fn apply(&self, events: &[CulturalEvent]) -> Vec<CulturalEvent> {
        events.iter().filter(|e| self.matches(e)).cloned().collect()
    }
}

/// Field-by-field update of [`EventFilters`]; `None` leaves a field as is.
///
/// The inner `Option` of status and category is the new value, where `None`
/// resets the criterion to "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FiltersPatch {
    pub status: Option<Option<EventStatus>>,
    pub category: Option<Option<EventCategory>>,
    pub search_term: Option<String>,
}

impl FiltersPatch {
    /// Creates a patch that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the status criterion (`None` = all).
    pub fn status(mut self, status: Option<EventStatus>) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the category criterion (`None` = all).
    pub fn category(mut self, category: Option<EventCategory>) -> Self {
        self.category = Some(category);
        self
    }

    /// Sets the search term.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }
}
