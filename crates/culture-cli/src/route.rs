//! Navigable paths and the views they resolve to.

use std::fmt;

use culture_models::EventId;
use tracing::debug;

/// A page the view layer can show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`: the filtered list with counts.
    List,
    /// `/events/new`: the empty creation form.
    NewEvent,
    /// `/events/:id`: one event with its countdown.
    Detail(EventId),
    /// `/events/:id/edit`: the form prefilled with the event.
    Edit(EventId),
}

impl Route {
    /// Resolves a path. Anything unrecognised redirects to the list.
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::List,
            ["events", "new"] => Route::NewEvent,
            ["events", id] => Route::Detail(EventId::from_string(*id)),
            ["events", id, "edit"] => Route::Edit(EventId::from_string(*id)),
            _ => {
                debug!(path, "unknown route, redirecting to list");
                Route::List
            }
        }
    }

    /// Returns the canonical path for this route.
    pub fn path(&self) -> String {
        match self {
            Route::List => "/".to_string(),
            Route::NewEvent => "/events/new".to_string(),
            Route::Detail(id) => format!("/events/{}", id),
            Route::Edit(id) => format!("/events/{}/edit", id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
