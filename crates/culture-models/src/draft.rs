//! Input shapes for creating and updating events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::{CulturalEvent, EventCategory, EventStatus};
use crate::ids::EventId;

/// User-supplied fields of a new event.
///
/// Identifier and timestamps are assigned by the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub status: EventStatus,
    pub category: EventCategory,
    pub venue: String,
    pub date: DateTime<Utc>,
    pub ticket_price: f64,
    pub available_seats: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl NewEvent {
    /// Materializes the event with the given identity and creation time.
    ///
    /// Both timestamps are set to `now`.
    pub fn into_event(self, id: EventId, now: DateTime<Utc>) -> CulturalEvent {
        CulturalEvent {
            id,
            title: self.title,
            description: self.description,
            status: self.status,
            category: self.category,
            venue: self.venue,
            date: self.date,
            ticket_price: self.ticket_price,
            available_seats: self.available_seats,
            image_url: self.image_url,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<&CulturalEvent> for NewEvent {
    /// The editable fields of an existing event, as the edit form shows them.
    fn from(event: &CulturalEvent) -> Self {
        Self {
            title: event.title.clone(),
            description: event.description.clone(),
            status: event.status,
            category: event.category,
            venue: event.venue.clone(),
            date: event.date,
            ticket_price: event.ticket_price,
            available_seats: event.available_seats,
            image_url: event.image_url.clone(),
        }
    }
}

/// Partial update of an event. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<EventStatus>,
    pub category: Option<EventCategory>,
    pub venue: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub ticket_price: Option<f64>,
    pub available_seats: Option<u32>,
    pub image_url: Option<String>,
}

impl EventPatch {
    /// Creates an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Patch that only changes the status.
    pub fn status(status: EventStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Patch that only changes the seat count.
    pub fn seats(available_seats: u32) -> Self {
        Self {
            available_seats: Some(available_seats),
            ..Self::default()
        }
    }

    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merges the present fields onto `event`.
    ///
    /// Never touches `id`, `created_at` or `updated_at`; the repository owns those.
    pub fn apply(&self, event: &mut CulturalEvent) {
        if let Some(ref title) = self.title {
            event.title = title.clone();
        }
        if let Some(ref description) = self.description {
            event.description = description.clone();
        }
        if let Some(status) = self.status {
            event.status = status;
        }
        if let Some(category) = self.category {
            event.category = category;
        }
        if let Some(ref venue) = self.venue {
            event.venue = venue.clone();
        }
        if let Some(date) = self.date {
            event.date = date;
        }
        if let Some(price) = self.ticket_price {
            event.ticket_price = price;
        }
        if let Some(seats) = self.available_seats {
            event.available_seats = seats;
        }
        if let Some(ref image_url) = self.image_url {
            event.image_url = Some(image_url.clone());
        }
    }
}

impl From<NewEvent> for EventPatch {
    /// A full form submission replaces every editable field.
    fn from(draft: NewEvent) -> Self {
        Self {
            title: Some(draft.title),
            description: Some(draft.description),
            status: Some(draft.status),
            category: Some(draft.category),
            venue: Some(draft.venue),
            date: Some(draft.date),
            ticket_price: Some(draft.ticket_price),
            available_seats: Some(draft.available_seats),
            image_url: draft.image_url,
        }
    }
}
