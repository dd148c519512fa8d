//! The booking form as a reducer.
//!
//! Holds the raw field text, a touched flag and an optional error per field.
//! An error is only shown once its field has been touched. The form knows
//! nothing about events: callers pass the selected event's remaining
//! inventory with each action that validates tickets.

use crate::validation::{self, Field, FormValues, ValidationError};
use matchday_core::{effect::Effect, reducer::Reducer, SmallVec};
use matchday_macros::Action;
use serde::{Deserialize, Serialize};

/// Current error, if any, for every field
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormErrors {
    /// Name error
    pub name: Option<ValidationError>,
    /// Email error
    pub email: Option<ValidationError>,
    /// Department error
    pub department: Option<ValidationError>,
    /// Ticket count error
    pub tickets: Option<ValidationError>,
}

impl FormErrors {
    /// Error currently recorded for `field`
    #[must_use]
    pub const fn get(&self, field: Field) -> Option<&ValidationError> {
        match field {
            Field::Name => self.name.as_ref(),
            Field::Email => self.email.as_ref(),
            Field::Department => self.department.as_ref(),
            Field::Tickets => self.tickets.as_ref(),
        }
    }

    /// Records (or clears, with `None`) the error for `field`
    pub fn set(&mut self, field: Field, error: Option<ValidationError>) {
        match field {
            Field::Name => self.name = error,
            Field::Email => self.email = error,
            Field::Department => self.department = error,
            Field::Tickets => self.tickets = error,
        }
    }

    /// Returns true when no field has an error
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.department.is_none()
            && self.tickets.is_none()
    }
}

/// Which fields the user has left at least once
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)] // One flag per form field
pub struct Touched {
    /// Name touched
    pub name: bool,
    /// Email touched
    pub email: bool,
    /// Department touched
    pub department: bool,
    /// Ticket count touched
    pub tickets: bool,
}

impl Touched {
    /// Whether `field` has been touched
    #[must_use]
    pub const fn get(&self, field: Field) -> bool {
        match field {
            Field::Name => self.name,
            Field::Email => self.email,
            Field::Department => self.department,
            Field::Tickets => self.tickets,
        }
    }

    /// Marks `field` as touched
    pub fn mark(&mut self, field: Field) {
        match field {
            Field::Name => self.name = true,
            Field::Email => self.email = true,
            Field::Department => self.department = true,
            Field::Tickets => self.tickets = true,
        }
    }

    /// Marks every field as touched
    pub fn mark_all(&mut self) {
        for field in Field::ALL {
            self.mark(field);
        }
    }
}

/// Complete form state
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    /// Field text
    pub values: FormValues,
    /// Per-field errors
    pub errors: FormErrors,
    /// Per-field touched flags
    pub touched: Touched,
}

impl FormState {
    /// Error to display for `field`: present only once the field is touched
    #[must_use]
    pub const fn visible_error(&self, field: Field) -> Option<&ValidationError> {
        if self.touched.get(field) {
            self.errors.get(field)
        } else {
            None
        }
    }

    /// Ticket count for the live total, if the field currently holds a
    /// positive whole number and has no error
    #[must_use]
    pub fn preview_tickets(&self) -> Option<u32> {
        if self.errors.tickets.is_some() {
            return None;
        }
        match self.values.tickets.trim().parse::<u32>() {
            Ok(0) | Err(_) => None,
            Ok(tickets) => Some(tickets),
        }
    }

    /// Returns true when nothing has been entered or validated
    #[must_use]
    pub fn is_pristine(&self) -> bool {
        *self == Self::default()
    }
}

/// Inputs to the booking form
#[derive(Action, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormAction {
    /// Command: Replace a field's text, clearing its error
    #[command]
    Edit {
        /// Field being edited
        field: Field,
        /// New text
        value: String,
    },

    /// Command: Leave a field, validating it alone
    #[command]
    Blur {
        /// Field being left
        field: Field,
        /// Remaining inventory of the selected event
        available: Option<u32>,
    },

    /// Command: Validate every field at once, as on submit
    #[command]
    Validate {
        /// Remaining inventory of the selected event
        available: Option<u32>,
    },

    /// Command: Empty the form
    #[command]
    Clear,
}

/// Reducer for the booking form
///
/// Produces no effects; all of its work is a state update.
#[derive(Clone, Copy, Debug, Default)]
pub struct FormReducer;

impl FormReducer {
    /// Creates a new `FormReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for FormReducer {
    type State = FormState;
    type Action = FormAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            FormAction::Edit { field, value } => {
                state.values.set(field, value);
                state.errors.set(field, None);
            },
            FormAction::Blur { field, available } => {
                state.touched.mark(field);
                let error = validation::validate_field(field, &state.values, available);
                state.errors.set(field, error);
            },
            FormAction::Validate { available } => {
                state.touched.mark_all();
                let mut errors = FormErrors::default();
                for (field, error) in validation::validate_all(&state.values, available) {
                    errors.set(field, Some(error));
                }
                state.errors = errors;
            },
            FormAction::Clear => *state = FormState::default(),
        }

        SmallVec::new()
    }
}
