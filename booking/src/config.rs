//! Configuration management for the booking application.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::catalog::{self, CatalogError};
use crate::types::Event;
use std::env;
use std::path::PathBuf;

/// Default currency symbol
pub const DEFAULT_CURRENCY: &str = "₹";

/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "matchday=info,matchday_booking=info";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// JSON catalog replacing the built-in events (`MATCHDAY_CATALOG`)
    pub catalog_path: Option<PathBuf>,
    /// Currency symbol shown before amounts (`MATCHDAY_CURRENCY`)
    pub currency: String,
    /// Tracing filter directives (`RUST_LOG`)
    pub log_filter: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Falls back to defaults for anything unset.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through a variable lookup
    ///
    /// Empty values count as unset.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            catalog_path: var("MATCHDAY_CATALOG").map(PathBuf::from),
            currency: var("MATCHDAY_CURRENCY").unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            log_filter: var("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }

    /// Events to start with: the configured catalog, or the built-in one
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the catalog cannot be read or is invalid.
    pub fn load_events(&self) -> Result<Vec<Event>, CatalogError> {
        match &self.catalog_path {
            Some(path) => catalog::load_catalog(path),
            None => catalog::default_events(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
