//! Field validation for the booking form.
//!
//! Every rule is a pure function over the raw field text. The checked
//! variants return the parsed value so that a passing form can be turned
//! into a [`BookingRequest`] without parsing twice.

use crate::types::Department;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Deliberately loose: something, an `@`, something, a dot, something.
#[allow(clippy::expect_used)] // Pattern is a compile-time constant
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// A booking form field
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    /// Attendee name
    Name,
    /// Attendee email
    Email,
    /// Attendee department
    Department,
    /// Number of tickets
    Tickets,
}

impl Field {
    /// Every field, in form order
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Department, Self::Tickets];

    /// Label shown next to the field and used in messages
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Department => "Department",
            Self::Tickets => "Number of tickets",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a string names no form field
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            "department" | "dept" => Ok(Self::Department),
            "tickets" | "ticket" => Ok(Self::Tickets),
            _ => Err(UnknownField(s.to_string())),
        }
    }
}

/// Why a field value was rejected
///
/// The `Display` text is the message shown next to the field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum ValidationError {
    /// Nothing usable was entered
    #[error("{} is required", .0.label())]
    Required(Field),

    /// Email does not look like an address
    #[error("Please enter a valid email address")]
    InvalidFormat,

    /// Ticket count is not a whole number above zero
    #[error("Please enter a positive number")]
    NotPositiveInteger,

    /// Ticket count is larger than the remaining inventory
    #[error("Only {available} tickets available")]
    ExceedsAvailability {
        /// Tickets remaining on the selected event
        available: u32,
    },
}

/// Raw text of every form field, exactly as entered
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormValues {
    /// Attendee name
    pub name: String,
    /// Attendee email
    pub email: String,
    /// Attendee department, by display name
    pub department: String,
    /// Number of tickets
    pub tickets: String,
}

impl FormValues {
    /// Current text of `field`
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Department => &self.department,
            Field::Tickets => &self.tickets,
        }
    }

    /// Replaces the text of `field`
    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Department => self.department = value,
            Field::Tickets => self.tickets = value,
        }
    }
}

/// Validated form contents, ready to become a booking
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookingRequest {
    /// Attendee name, as entered
    pub name: String,
    /// Attendee email
    pub email: String,
    /// Attendee department
    pub department: Department,
    /// Number of tickets, at least one
    pub tickets: u32,
}

/// Checks the name field and returns it as entered
///
/// # Errors
///
/// [`ValidationError::Required`] if the name is empty or whitespace only.
pub fn check_name(value: &str) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required(Field::Name));
    }
    Ok(value.to_string())
}

/// Checks the email field
///
/// # Errors
///
/// [`ValidationError::Required`] if the trimmed value is empty,
/// [`ValidationError::InvalidFormat`] if the value does not match the pattern.
pub fn check_email(value: &str) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required(Field::Email));
    }
    if !EMAIL_PATTERN.is_match(value) {
        return Err(ValidationError::InvalidFormat);
    }
    Ok(value.to_string())
}

/// Checks the department field
///
/// # Errors
///
/// [`ValidationError::Required`] unless the value names one of the
/// eight departments.
pub fn check_department(value: &str) -> Result<Department, ValidationError> {
    value
        .parse()
        .map_err(|_| ValidationError::Required(Field::Department))
}

/// Checks the ticket count
///
/// `available` is the selected event's remaining inventory; with no event
/// selected only the shape of the number is checked.
///
/// # Errors
///
/// [`ValidationError::Required`] if empty, [`ValidationError::NotPositiveInteger`]
/// if not a whole number above zero, [`ValidationError::ExceedsAvailability`]
/// if more than `available`.
pub fn check_tickets(value: &str, available: Option<u32>) -> Result<u32, ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Required(Field::Tickets));
    }

    let tickets = match value.trim().parse::<u64>() {
        Ok(0) | Err(_) => return Err(ValidationError::NotPositiveInteger),
        Ok(n) => n,
    };

    match available {
        Some(available) if tickets > u64::from(available) => {
            Err(ValidationError::ExceedsAvailability { available })
        },
        // Fits in u32 whenever an availability bound applied
        _ => u32::try_from(tickets).map_err(|_| ValidationError::NotPositiveInteger),
    }
}

/// Validates a single field
#[must_use]
pub fn validate_field(
    field: Field,
    values: &FormValues,
    available: Option<u32>,
) -> Option<ValidationError> {
    let value = values.get(field);
    match field {
        Field::Name => check_name(value).err(),
        Field::Email => check_email(value).err(),
        Field::Department => check_department(value).err(),
        Field::Tickets => check_tickets(value, available).err(),
    }
}

/// Validates every field, returning the errors in form order
#[must_use]
pub fn validate_all(values: &FormValues, available: Option<u32>) -> Vec<(Field, ValidationError)> {
    Field::ALL
        .into_iter()
        .filter_map(|field| validate_field(field, values, available).map(|error| (field, error)))
        .collect()
}

/// Turns a fully valid form into a [`BookingRequest`]
///
/// # Errors
///
/// Every failing field with its error, in form order.
pub fn validate_request(
    values: &FormValues,
    available: Option<u32>,
) -> Result<BookingRequest, Vec<(Field, ValidationError)>> {
    match (
        check_name(&values.name),
        check_email(&values.email),
        check_department(&values.department),
        check_tickets(&values.tickets, available),
    ) {
        (Ok(name), Ok(email), Ok(department), Ok(tickets)) => Ok(BookingRequest {
            name,
            email,
            department,
            tickets,
        }),
        _ => Err(validate_all(values, available)),
    }
}
