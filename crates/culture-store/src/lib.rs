//! Reactive state for the cultural events catalogue.
//!
//! [`EventStore`] wraps an [`EventRepository`](culture_events::EventRepository)
//! and publishes an immutable [`AppState`] after every transition. Views read
//! [`EventStore::snapshot`] or hold a receiver from [`EventStore::subscribe`].
//!
//! [`CountdownTimer`] drives the live countdown shown on an event's detail page.

pub mod countdown;
pub mod state;
pub mod store;

pub use countdown::{Countdown, CountdownTimer};
pub use state::{AppState, EventCounts};
pub use store::EventStore;
