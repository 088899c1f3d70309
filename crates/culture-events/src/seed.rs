//! Built-in starter catalogue used when nothing has been persisted yet.

use chrono::{DateTime, Duration, Utc};
use culture_models::{CulturalEvent, EventBuilder, EventCategory, EventId, EventStatus};

/// Returns the starter catalogue with dates relative to `now`.
///
/// Covers every category and status, includes one sold-out event and one
/// that already took place.
pub fn seed_events(now: DateTime<Utc>) -> Vec<CulturalEvent> {
    let created = now - Duration::days(30);
    let drafts = [
        (
            "evt-seed-0001",
            EventBuilder::new("Jazz at Midnight", EventCategory::Concert)
                .description("A late-night session with a rotating line-up of quartet players.")
                .status(EventStatus::Published)
                .venue("Blue Note Jazz Club")
                .date(now + Duration::days(12))
                .price(35.0)
                .seats(120),
        ),
        (
            "evt-seed-0002",
            EventBuilder::new("La Traviata", EventCategory::Opera)
                .description("Verdi's tragedy of love and sacrifice in a new staging.")
                .status(EventStatus::Published)
                .venue("Royal Opera House")
                .date(now + Duration::days(40))
                .price(95.0)
                .seats(0),
        ),
        (
            "evt-seed-0003",
            EventBuilder::new("Hamlet", EventCategory::Theater)
                .description("Shakespeare's prince of Denmark, performed in the round.")
                .status(EventStatus::Draft)
                .venue("The Globe")
                .date(now + Duration::days(65))
                .price(48.5)
                .seats(300),
        ),
        (
            "evt-seed-0004",
            EventBuilder::new("Impressionist Light", EventCategory::Exhibition)
                .description("Monet, Renoir and Pissarro on loan from private collections.")
                .status(EventStatus::Published)
                .venue("Musée de l'Orangerie")
                .date(now - Duration::days(10))
                .price(18.0)
                .seats(500),
        ),
        (
            "evt-seed-0005",
            EventBuilder::new("Symphony Under the Stars", EventCategory::Concert)
                .description("Open-air programme of Dvořák and Sibelius, weather permitting.")
                .status(EventStatus::Cancelled)
                .venue("City Park Amphitheatre")
                .date(now + Duration::days(20))
                .price(0.0)
                .seats(2000),
        ),
    ];

    drafts
        .into_iter()
        .map(|(id, builder)| {
            builder
                .image_url(format!("https://picsum.photos/seed/{}/400/300", id))
                .build()
                .into_event(EventId::from_string(id), created)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_covers_every_category_and_status() {
        let now = Utc::now();
        let events = seed_events(now);

        let categories: HashSet<_> = events.iter().map(|e| e.category).collect();
        let statuses: HashSet<_> = events.iter().map(|e| e.status).collect();
        assert_eq!(categories.len(), EventCategory::ALL.len());
        assert_eq!(statuses.len(), EventStatus::ALL.len());

        assert!(events.iter().any(|e| e.is_sold_out()));
        assert!(events.iter().any(|e| !e.is_upcoming(now)));
    }

    #[test]
    fn test_seed_ids_are_unique_and_stable() {
        let first = seed_events(Utc::now());
        let second = seed_events(Utc::now());

        let ids: HashSet<_> = first.iter().map(|e| e.id.clone()).collect();
        assert_eq!(ids.len(), first.len());
        assert_eq!(first[0].id, second[0].id);
        assert!(first.iter().all(|e| e.updated_at >= e.created_at));
    }
}
