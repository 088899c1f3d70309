//! Form-level validation for event drafts.
//!
//! The repository stores whatever it is given; these rules are applied by
//! whoever collects the input.

use chrono::{DateTime, Utc};
use std::fmt;

use crate::draft::NewEvent;

/// Minimum title length in characters.
pub const TITLE_MIN_CHARS: usize = 3;

/// Minimum description length in characters.
pub const DESCRIPTION_MIN_CHARS: usize = 10;

/// A single violated rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Name of the offending field.
    pub field: &'static str,
    /// Human-readable message.
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Checks a draft against the form rules, returning every violation.
pub fn validate(draft: &NewEvent) -> Vec<FieldError> {
    let mut errors = Vec::new();

    let title = draft.title.trim();
    if title.is_empty() {
        errors.push(FieldError::new("title", "is required"));
    } else if title.chars().count() < TITLE_MIN_CHARS {
        errors.push(FieldError::new(
            "title",
            format!("must be at least {} characters", TITLE_MIN_CHARS),
        ));
    }

    let description = draft.description.trim();
    if description.is_empty() {
        errors.push(FieldError::new("description", "is required"));
    } else if description.chars().count() < DESCRIPTION_MIN_CHARS {
        errors.push(FieldError::new(
            "description",
            format!("must be at least {} characters", DESCRIPTION_MIN_CHARS),
        ));
    }

    if draft.venue.trim().is_empty() {
        errors.push(FieldError::new("venue", "is required"));
    }

    if !draft.ticket_price.is_finite() || draft.ticket_price < 0.0 {
        errors.push(FieldError::new("ticketPrice", "must be zero or more"));
    }

    errors
}

/// Placeholder image used when a form leaves the image empty.
pub fn placeholder_image_url(at: DateTime<Utc>) -> String {
    format!(
        "https://picsum.photos/seed/{}/400/300",
        at.timestamp_millis()
    )
}

impl NewEvent {
    /// Validates the draft, returning every violated rule.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let errors = validate(self);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Fills an empty image reference with a placeholder.
    pub fn with_placeholder_image(mut self, at: DateTime<Utc>) -> Self {
        let missing = self
            .image_url
            .as_deref()
            .map_or(true, |url| url.trim().is_empty());
        if missing {
            self.image_url = Some(placeholder_image_url(at));
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::EventBuilder;
    use crate::event::EventCategory;
    use chrono::TimeZone;

    fn valid_draft() -> EventBuilder {
        EventBuilder::new("Jazz Night", EventCategory::Concert)
            .description("An evening of modern jazz")
            .venue("Blue Note")
            .price(25.0)
            .seats(50)
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(valid_draft().build().validate().is_ok());
    }

    #[test]
    fn test_short_title_and_description() {
        let mut draft = valid_draft().description("short").build();
        draft.title = "Up".to_string();

        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "title");
        assert_eq!(errors[1].field, "description");
        assert_eq!(errors[1].to_string(), "description: must be at least 10 characters");
    }

    #[test]
    fn test_missing_venue_and_negative_price() {
        let draft = valid_draft().venue("   ").price(-1.0).build();

        let fields: Vec<_> = validate(&draft).into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["venue", "ticketPrice"]);
    }

    #[test]
    fn test_nan_price_rejected() {
        let draft = valid_draft().price(f64::NAN).build();
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_placeholder_image() {
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let draft = valid_draft().build().with_placeholder_image(at);
        assert_eq!(
            draft.image_url.as_deref(),
            Some("https://picsum.photos/seed/1767225600000/400/300")
        );

        let kept = valid_draft()
            .image_url("https://example.com/a.jpg")
            .build()
            .with_placeholder_image(at);
        assert_eq!(kept.image_url.as_deref(), Some("https://example.com/a.jpg"));
    }
}
