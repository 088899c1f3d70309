//! Text rendering of list, detail and form views.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use culture_models::{CulturalEvent, EventCategory, EventStatus, FieldError};
use culture_store::{Countdown, EventCounts};

/// Long form used on the detail page, e.g. `Monday, January 5, 2026, 08:00 PM`.
pub fn format_date_long(date: DateTime<Utc>) -> String {
    date.format("%A, %B %-d, %Y, %I:%M %p").to_string()
}

/// Short form used on cards, e.g. `Jan 5, 08:00 PM`.
pub fn format_date_short(date: DateTime<Utc>) -> String {
    date.format("%b %-d, %I:%M %p").to_string()
}

/// Value for a `datetime-local` style input.
pub fn format_date_input(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%dT%H:%M").to_string()
}

/// `€25`, `€48.5`, `€0`.
pub fn format_price(price: f64) -> String {
    format!("€{}", price)
}

/// Seat availability on cards and table rows.
pub fn seats_label(available: u32) -> String {
    if available == 0 {
        "Sold out".to_string()
    } else {
        format!("{} seats left", available)
    }
}

/// The status action offered for an event, if any.
pub fn toggle_label(status: EventStatus) -> Option<&'static str> {
    match status {
        EventStatus::Published => Some("Unpublish"),
        EventStatus::Draft => Some("Publish"),
        EventStatus::Cancelled => None,
    }
}

/// Summary line above the list. Cancelled events count toward the total only.
pub fn render_counts(counts: &EventCounts) -> String {
    format!(
        "Total: {}  Published: {}  Draft: {}",
        counts.total, counts.published, counts.draft
    )
}

/// One card of the list view.
pub fn render_card(event: &CulturalEvent, favorite: bool) -> String {
    let star = if favorite { "★" } else { "☆" };
    let mut actions = vec!["Edit"];
    actions.extend(toggle_label(event.status));
    actions.push("Delete");

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} [{}] {}  ({})",
        star,
        event.category.label(),
        event.title,
        event.id
    );
    let _ = writeln!(
        out,
        "    {} | {}",
        event.status.label(),
        format_date_short(event.date)
    );
    let _ = writeln!(out, "    {}", event.venue);
    let _ = writeln!(out, "    {}", truncate(&event.description, 72));
    let _ = writeln!(
        out,
        "    {} | {}",
        format_price(event.ticket_price),
        seats_label(event.available_seats)
    );
    let _ = writeln!(out, "    {}", actions.join(" | "));
    out
}

/// Output of `list --format table`. The id column fits `evt-<uuid>`.
pub fn render_table(events: &[CulturalEvent]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<40}  {:<24}  {:<10}  {:<9}  {:<16}  {:>8}  SEATS",
        "ID", "TITLE", "CATEGORY", "STATUS", "DATE", "PRICE"
    );
    let _ = writeln!(out, "{}", "-".repeat(124));
    for event in events {
        let _ = writeln!(
            out,
            "{:<40}  {:<24}  {:<10}  {:<9}  {:<16}  {:>8}  {}",
            event.id,
            truncate(&event.title, 24),
            event.category.label(),
            event.status.label(),
            format_date_short(event.date),
            format_price(event.ticket_price),
            seats_label(event.available_seats)
        );
    }
    out
}

pub fn render_brief(events: &[CulturalEvent]) -> String {
    events
        .iter()
        .map(|e| format!("{}\t{}\n", e.id, e.title))
        .collect()
}

/// The detail page. `countdown` is shown while the event is upcoming.
pub fn render_detail(event: &CulturalEvent, countdown: Option<Countdown>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", event.title);
    let _ = writeln!(out, "{} | {}", event.category.label(), event.venue);
    if let Some(url) = &event.image_url {
        let _ = writeln!(out, "{}", url);
    }

    let _ = writeln!(out, "\nAbout this Event");
    let _ = writeln!(out, "  {}", event.description);

    let _ = writeln!(out, "\nEvent Details");
    let _ = writeln!(out, "  Date & Time: {}", format_date_long(event.date));
    let _ = writeln!(out, "  Venue:       {}", event.venue);
    let _ = writeln!(out, "  Category:    {}", event.category.label());
    let _ = writeln!(out, "  Status:      {}", event.status);

    let _ = writeln!(out, "\n{}", format_price(event.ticket_price));
    if event.is_sold_out() {
        let _ = writeln!(out, "Sold Out");
    } else {
        let _ = writeln!(out, "{} seats available", event.available_seats);
    }
    if let Some(countdown) = countdown {
        let _ = writeln!(out, "Starts in {}", countdown);
    }

    let mut actions = vec!["Edit"];
    actions.extend(toggle_label(event.status));
    actions.push("Delete");
    let _ = writeln!(out, "\n{}", actions.join(" | "));
    out
}

/// The creation form, or the edit form prefilled from `existing`.
pub fn render_form(existing: Option<&CulturalEvent>) -> String {
    let heading = if existing.is_some() {
        "Edit Event"
    } else {
        "Create New Event"
    };
    let options = |labels: Vec<&str>| labels.join(" / ");

    let mut out = String::new();
    let _ = writeln!(out, "{}\n", heading);
    let field = |out: &mut String, label: &str, value: String| {
        let _ = writeln!(out, "  {:<20} {}", label, value);
    };

    field(&mut out, "Title *", existing.map(|e| e.title.clone()).unwrap_or_default());
    field(
        &mut out,
        "Description *",
        existing.map(|e| e.description.clone()).unwrap_or_default(),
    );
    field(
        &mut out,
        "Category *",
        existing.map_or_else(
            || options(EventCategory::ALL.iter().map(|c| c.as_str()).collect()),
            |e| e.category.as_str().to_string(),
        ),
    );
    field(
        &mut out,
        "Status *",
        existing.map_or_else(
            || options(EventStatus::ALL.iter().map(|s| s.as_str()).collect()),
            |e| e.status.as_str().to_string(),
        ),
    );
    field(&mut out, "Venue *", existing.map(|e| e.venue.clone()).unwrap_or_default());
    field(
        &mut out,
        "Date & Time *",
        existing
            .map(|e| format_date_input(e.date))
            .unwrap_or_else(|| "YYYY-MM-DDTHH:MM".to_string()),
    );
    field(
        &mut out,
        "Ticket Price (€) *",
        existing.map_or_else(|| "0".to_string(), |e| e.ticket_price.to_string()),
    );
    field(
        &mut out,
        "Available Seats *",
        existing.map_or_else(|| "0".to_string(), |e| e.available_seats.to_string()),
    );
    field(
        &mut out,
        "Image URL",
        existing
            .and_then(|e| e.image_url.clone())
            .unwrap_or_else(|| "https://...".to_string()),
    );

    let _ = match existing {
        Some(e) => writeln!(out, "\nSave with: culture update {} --<field> <value>", e.id),
        None => writeln!(
            out,
            "\nCreate with: culture create --title <title> --description <text> \
             --category <category> --venue <venue> --date <date>"
        ),
    };
    out
}

pub fn render_field_errors(errors: &[FieldError]) -> String {
    errors.iter().map(|e| format!("  {}\n", e)).collect()
}

/// Truncates to `max_chars` characters, adding "..." if truncated.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
