//! # Matchday Booking
//!
//! Ticket booking for inter-department sports events.
//!
//! The user browses a catalog of events, selects one, fills in a validated
//! booking form and receives a summary of the confirmed booking. Confirmed
//! bookings decrement the event's remaining inventory.
//!
//! ## Architecture
//!
//! - [`validation`]: pure field rules and their messages
//! - [`form`]: the booking form as an effect-free reducer
//! - [`reducer`]: screens, inventory and submission, driving the form
//! - [`catalog`] / [`config`]: startup data and settings
//! - [`render`] / [`cli`]: the terminal front end
//!
//! ## Example
//!
//! ```no_run
//! use matchday_booking::{
//!     catalog, BookingAction, BookingEnvironment, BookingReducer, BookingState, EventId,
//!     StdoutPrinter,
//! };
//! use matchday_core::environment::SystemClock;
//! use matchday_runtime::Store;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let env = BookingEnvironment::new(Arc::new(SystemClock), Arc::new(StdoutPrinter), "₹");
//! let store = Store::new(BookingState::new(catalog::default_events()?), BookingReducer::new(), env);
//!
//! store.send(BookingAction::SelectEvent { event_id: EventId::new(1) }).await?;
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod form;
pub mod reducer;
pub mod render;
pub mod types;
pub mod validation;

pub use catalog::CatalogError;
pub use cli::{Command, CommandError};
pub use config::Config;
pub use form::{FormAction, FormReducer, FormState};
pub use reducer::{
    BookingAction, BookingEnvironment, BookingReducer, BookingState, ReceiptPrinter, Screen,
    StdoutPrinter,
};
pub use types::{Booking, BookingReference, Department, Event, EventId};
pub use validation::{Field, FormValues, ValidationError};
