//! Event catalog loading.
//!
//! Catalogs are JSON arrays of events using the camelCase field names of
//! [`Event`]. The built-in catalog is compiled into the binary.

use crate::types::{Event, EventId};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

const DEFAULT_CATALOG: &str = include_str!("../data/events.json");

/// Catalog loading errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Catalog file could not be read
    #[error("failed to read catalog {path}: {source}")]
    Io {
        /// File that was being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Catalog is not a valid JSON event list
    #[error("invalid catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// Catalog has no events
    #[error("catalog contains no events")]
    Empty,

    /// Two events share an id
    #[error("duplicate event id {0}")]
    DuplicateId(EventId),

    /// An event is free or has no price
    #[error("event {0} must have a positive ticket price")]
    NonPositivePrice(EventId),
}

/// The built-in four-event catalog
///
/// # Errors
///
/// Returns [`CatalogError`] only if the embedded data is malformed.
pub fn default_events() -> Result<Vec<Event>, CatalogError> {
    parse_catalog(DEFAULT_CATALOG)
}

/// Parses and checks a JSON catalog
///
/// # Errors
///
/// Returns [`CatalogError::Parse`] for malformed JSON, or the first
/// consistency problem found.
pub fn parse_catalog(json: &str) -> Result<Vec<Event>, CatalogError> {
    let events: Vec<Event> = serde_json::from_str(json)?;
    check_catalog(&events)?;
    Ok(events)
}

/// Reads a catalog file
///
/// # Errors
///
/// Returns [`CatalogError::Io`] if the file cannot be read, otherwise as
/// [`parse_catalog`].
pub fn load_catalog(path: &Path) -> Result<Vec<Event>, CatalogError> {
    let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let events = parse_catalog(&json)?;
    tracing::debug!(path = %path.display(), events = events.len(), "Loaded event catalog");
    Ok(events)
}

fn check_catalog(events: &[Event]) -> Result<(), CatalogError> {
    if events.is_empty() {
        return Err(CatalogError::Empty);
    }

    let mut seen = HashSet::with_capacity(events.len());
    for event in events {
        if !seen.insert(event.id) {
            return Err(CatalogError::DuplicateId(event.id));
        }
        if event.ticket_price == 0 {
            return Err(CatalogError::NonPositivePrice(event.id));
        }
    }
    Ok(())
}
