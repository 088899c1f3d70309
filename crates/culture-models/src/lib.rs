//! Core data models for the cultural events catalogue.
//!
//! This crate provides the fundamental data types shared by the repository,
//! the store and the command-line views: the event entity, its status and
//! category enumerations, input drafts and patches, and form validation.

pub mod builders;
pub mod draft;
pub mod event;
pub mod ids;
pub mod validation;

// Re-export main types
pub use builders::EventBuilder;
pub use draft::{EventPatch, NewEvent};
pub use event::{CulturalEvent, EventCategory, EventStatus, ParseEnumError};
pub use ids::EventId;
pub use validation::{placeholder_image_url, validate, FieldError};
