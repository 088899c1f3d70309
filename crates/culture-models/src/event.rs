//! Cultural event entity and its enumerations.
//!
//! Events are serialized in camelCase with RFC 3339 timestamps so a persisted
//! catalogue reads the same as the JSON a browser client would produce.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::ids::EventId;

/// Error returned when parsing a status or category name fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

/// Publication status of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    /// Not yet visible to the public.
    #[default]
    Draft,
    /// Visible and bookable.
    Published,
    /// Called off; kept for the record.
    Cancelled,
}

impl EventStatus {
    /// All statuses in display order.
    pub const ALL: [EventStatus; 3] = [
        EventStatus::Draft,
        EventStatus::Published,
        EventStatus::Cancelled,
    ];

    /// Returns the lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Draft => "draft",
            EventStatus::Published => "published",
            EventStatus::Cancelled => "cancelled",
        }
    }

    /// Returns the human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            EventStatus::Draft => "Draft",
            EventStatus::Published => "Published",
            EventStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseEnumError {
                kind: "status",
                value: s.to_string(),
            })
    }
}

/// Kind of cultural happening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Concert,
    Opera,
    Theater,
    Exhibition,
}

impl EventCategory {
    /// All categories in display order.
    pub const ALL: [EventCategory; 4] = [
        EventCategory::Concert,
        EventCategory::Opera,
        EventCategory::Theater,
        EventCategory::Exhibition,
    ];

    /// Returns the lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Concert => "concert",
            EventCategory::Opera => "opera",
            EventCategory::Theater => "theater",
            EventCategory::Exhibition => "exhibition",
        }
    }

    /// Returns the human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            EventCategory::Concert => "Concert",
            EventCategory::Opera => "Opera",
            EventCategory::Theater => "Theater",
            EventCategory::Exhibition => "Exhibition",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventCategory {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventCategory::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseEnumError {
                kind: "category",
                value: s.to_string(),
            })
    }
}

/// A single cultural happening in the catalogue.
///
/// The repository owns the canonical copy; everyone else works on clones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CulturalEvent {
    /// Unique identifier, immutable once assigned.
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub status: EventStatus,
    pub category: EventCategory,
    pub venue: String,
    /// When the event takes place; may be in the past.
    pub date: DateTime<Utc>,
    /// Ticket price in euros, never negative.
    pub ticket_price: f64,
    pub available_seats: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Always `>= created_at`.
    pub updated_at: DateTime<Utc>,
}

impl CulturalEvent {
    /// Returns true when no seats are left.
    pub fn is_sold_out(&self) -> bool {
        self.available_seats == 0
    }

    /// Returns true if the event is published.
    pub fn is_published(&self) -> bool {
        self.status == EventStatus::Published
    }

    /// Returns true if the event starts after `now`.
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.date > now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> CulturalEvent {
        let at = Utc.with_ymd_and_hms(2026, 3, 14, 19, 30, 0).unwrap();
        CulturalEvent {
            id: EventId::from_string("evt-1"),
            title: "La Traviata".to_string(),
            description: "Verdi's classic in three acts".to_string(),
            status: EventStatus::Published,
            category: EventCategory::Opera,
            venue: "Opéra Garnier".to_string(),
            date: at,
            ticket_price: 89.5,
            available_seats: 0,
            image_url: None,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("draft".parse::<EventStatus>().unwrap(), EventStatus::Draft);
        assert_eq!(
            "Published".parse::<EventStatus>().unwrap(),
            EventStatus::Published
        );
        assert!("archived".parse::<EventStatus>().is_err());
    }

    #[test]
    fn test_category_parse_and_label() {
        let category: EventCategory = "theater".parse().unwrap();
        assert_eq!(category, EventCategory::Theater);
        assert_eq!(category.label(), "Theater");

        let err = "ballet".parse::<EventCategory>().unwrap_err();
        assert_eq!(err.to_string(), "unknown category: ballet");
    }

    #[test]
    fn test_event_serializes_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["ticketPrice"], 89.5);
        assert_eq!(json["availableSeats"], 0);
        assert_eq!(json["status"], "published");
        assert_eq!(json["category"], "opera");
        assert_eq!(json["date"], "2026-03-14T19:30:00Z");
        assert!(json.get("imageUrl").is_none());
    }

    #[test]
    fn test_event_dates_survive_json() {
        let event = sample();
        let json = serde_json::to_string(&event).unwrap();
        let parsed: CulturalEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn test_sold_out_and_upcoming() {
        let event = sample();
        assert!(event.is_sold_out());
        assert!(event.is_published());
        assert!(event.is_upcoming(event.date - chrono::Duration::seconds(1)));
        assert!(!event.is_upcoming(event.date));
    }
}
