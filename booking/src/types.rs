//! Domain types for sports event booking.
//!
//! Events form the bookable inventory; a [`Booking`] is the immutable record
//! produced when a validated form is submitted against one of them.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for an event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(u32);

impl EventId {
    /// Creates an `EventId` from its numeric value
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the numeric value
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Organising department of an event, and the attendee's own department
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    /// Computer Science
    #[serde(rename = "Computer Science")]
    ComputerScience,
    /// Mechanical Engineering
    #[serde(rename = "Mechanical Engineering")]
    MechanicalEngineering,
    /// Electronics & Communication
    #[serde(rename = "Electronics & Communication")]
    ElectronicsCommunication,
    /// Civil Engineering
    #[serde(rename = "Civil Engineering")]
    CivilEngineering,
    /// Electrical Engineering
    #[serde(rename = "Electrical Engineering")]
    ElectricalEngineering,
    /// Information Technology
    #[serde(rename = "Information Technology")]
    InformationTechnology,
    /// Chemical Engineering
    #[serde(rename = "Chemical Engineering")]
    ChemicalEngineering,
    /// Biotechnology
    #[serde(rename = "Biotechnology")]
    Biotechnology,
}

impl Department {
    /// Every department, in the order they are offered on the form
    pub const ALL: [Self; 8] = [
        Self::ComputerScience,
        Self::MechanicalEngineering,
        Self::ElectronicsCommunication,
        Self::CivilEngineering,
        Self::ElectricalEngineering,
        Self::InformationTechnology,
        Self::ChemicalEngineering,
        Self::Biotechnology,
    ];

    /// Display name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ComputerScience => "Computer Science",
            Self::MechanicalEngineering => "Mechanical Engineering",
            Self::ElectronicsCommunication => "Electronics & Communication",
            Self::CivilEngineering => "Civil Engineering",
            Self::ElectricalEngineering => "Electrical Engineering",
            Self::InformationTechnology => "Information Technology",
            Self::ChemicalEngineering => "Chemical Engineering",
            Self::Biotechnology => "Biotechnology",
        }
    }

    /// Looks up a department by its 1-based position in [`Department::ALL`]
    #[must_use]
    pub fn from_position(position: usize) -> Option<Self> {
        position
            .checked_sub(1)
            .and_then(|index| Self::ALL.get(index).copied())
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known department
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown department: {0}")]
pub struct UnknownDepartment(pub String);

impl FromStr for Department {
    type Err = UnknownDepartment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|department| department.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownDepartment(s.to_string()))
    }
}

/// Events with fewer remaining tickets than this are flagged as low stock
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// A bookable sports event
///
/// Serialized with the camelCase field names used by catalog files.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique identifier
    pub id: EventId,
    /// Event title
    #[serde(rename = "eventName")]
    pub name: String,
    /// Organising department
    pub department: Department,
    /// Day the event takes place
    #[serde(rename = "eventDate")]
    pub date: NaiveDate,
    /// Start time, local to the venue
    #[serde(rename = "eventTime", with = "hour_minute")]
    pub time: NaiveTime,
    /// Where the event is held
    pub venue: String,
    /// Price of one ticket, in whole currency units
    pub ticket_price: u32,
    /// Tickets still for sale
    pub available_tickets: u32,
}

impl Event {
    /// Returns true when no tickets remain
    #[must_use]
    pub const fn is_sold_out(&self) -> bool {
        self.available_tickets == 0
    }

    /// Returns true when tickets remain but fewer than [`LOW_STOCK_THRESHOLD`]
    #[must_use]
    pub const fn is_low_stock(&self) -> bool {
        self.available_tickets > 0 && self.available_tickets < LOW_STOCK_THRESHOLD
    }

    /// Price of `tickets` tickets
    #[must_use]
    pub fn total_for(&self, tickets: u32) -> u64 {
        u64::from(tickets) * u64::from(self.ticket_price)
    }
}

/// Sequential booking reference, rendered as `MD-000001`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingReference(u32);

impl BookingReference {
    /// Creates a reference from its sequence number
    #[must_use]
    pub const fn new(sequence: u32) -> Self {
        Self(sequence)
    }

    /// Returns the sequence number
    #[must_use]
    pub const fn sequence(self) -> u32 {
        self.0
    }
}

impl fmt::Display for BookingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MD-{:06}", self.0)
    }
}

/// A confirmed booking
///
/// Event name and total are snapshots taken at submission time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Sequential reference
    pub reference: BookingReference,
    /// Attendee name
    pub user_name: String,
    /// Attendee email
    pub email: String,
    /// Attendee department
    pub department: Department,
    /// Booked event
    pub event_id: EventId,
    /// Name of the booked event
    pub event_name: String,
    /// Number of tickets
    pub tickets_booked: u32,
    /// `tickets_booked` times the ticket price
    pub total_amount: u64,
    /// When the booking was confirmed
    pub booked_at: DateTime<Utc>,
}

/// Event start time (de)serialization
///
/// Written as `HH:MM`; `10:00 AM` style twelve-hour times are also accepted.
mod hour_minute {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";
    const TWELVE_HOUR: &str = "%I:%M %p";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let raw = raw.trim();
        NaiveTime::parse_from_str(raw, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(raw, TWELVE_HOUR))
            .map_err(serde::de::Error::custom)
    }
}
