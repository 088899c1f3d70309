//! Builder patterns for event drafts.

use chrono::{DateTime, Utc};

use crate::draft::NewEvent;
use crate::event::{EventCategory, EventStatus};

/// Builder for creating `NewEvent` instances with a fluent API.
///
/// Defaults: draft status, empty description and venue, free entry, no seats,
/// dated at construction time.
#[derive(Debug, Clone)]
pub struct EventBuilder {
    title: String,
    category: EventCategory,
    description: String,
    status: EventStatus,
    venue: String,
    date: DateTime<Utc>,
    ticket_price: f64,
    available_seats: u32,
    image_url: Option<String>,
}

impl EventBuilder {
    /// Creates a new EventBuilder with required fields.
    pub fn new(title: impl Into<String>, category: EventCategory) -> Self {
        Self {
            title: title.into(),
            category,
            description: String::new(),
            status: EventStatus::Draft,
            venue: String::new(),
            date: Utc::now(),
            ticket_price: 0.0,
            available_seats: 0,
            image_url: None,
        }
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the status.
    pub fn status(mut self, status: EventStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the venue.
    pub fn venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = venue.into();
        self
    }

    /// Sets the date the event takes place.
    pub fn date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    /// Sets the ticket price.
    pub fn price(mut self, ticket_price: f64) -> Self {
        self.ticket_price = ticket_price;
        self
    }

    /// Sets the number of available seats.
    pub fn seats(mut self, available_seats: u32) -> Self {
        self.available_seats = available_seats;
        self
    }

    /// Sets the image reference.
    pub fn image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Builds the draft.
    pub fn build(self) -> NewEvent {
        NewEvent {
            title: self.title,
            description: self.description,
            status: self.status,
            category: self.category,
            venue: self.venue,
            date: self.date,
            ticket_price: self.ticket_price,
            available_seats: self.available_seats,
            image_url: self.image_url,
        }
    }
}

/// Convenience methods on NewEvent for creating builders.
impl NewEvent {
    /// Creates a builder for a new event draft.
    pub fn builder(title: impl Into<String>, category: EventCategory) -> EventBuilder {
        EventBuilder::new(title, category)
    }
}
