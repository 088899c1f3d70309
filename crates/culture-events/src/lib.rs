//! Event repository and filtering for the cultural events catalogue.
//!
//! This crate provides:
//! - the [`EventRepository`] trait and its in-memory implementation with
//!   simulated latency and a best-effort durable mirror
//! - [`EventFilters`], the pure predicate behind every list view
//! - the [`Clock`] abstraction used for timestamps
//! - a starter catalogue for first runs
//!
//! # Example
//!
//! ```no_run
//! use culture_events::{EventFilters, EventRepository, InMemoryEventRepository, RepositoryConfig};
//! use culture_models::{EventBuilder, EventCategory, EventStatus};
//!
//! # async fn demo() -> culture_events::Result<()> {
//! let repo = InMemoryEventRepository::new(RepositoryConfig::default());
//!
//! let draft = EventBuilder::new("Jazz Night", EventCategory::Concert)
//!     .venue("Blue Note")
//!     .build();
//! let created = repo.create(draft).await?;
//!
//! let filter = EventFilters::new().with_status(EventStatus::Draft);
//! let drafts = filter.apply(&repo.list_all().await?);
//! assert_eq!(drafts[0].id, created.id);
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod error;
pub mod filter;
pub mod repository;
pub mod seed;

pub use clock::{Clock, FixedClock, SteppingClock, SystemClock};
pub use error::{EventError, Result};
pub use filter::{EventFilters, FiltersPatch};
pub use repository::{EventRepository, InMemoryEventRepository, RepositoryConfig};
pub use seed::seed_events;
