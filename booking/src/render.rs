//! Plain-text views of the booking state.
//!
//! Each view borrows what it shows and renders through `Display`, so the
//! same text can go to the terminal or to a [`ReceiptPrinter`].
//!
//! [`ReceiptPrinter`]: crate::reducer::ReceiptPrinter

use crate::form::FormState;
use crate::reducer::{BookingState, Screen};
use crate::types::{Booking, Department, Event};
use crate::validation::Field;
use chrono::{NaiveDate, NaiveTime};
use std::fmt;

/// Long date, e.g. `Sunday, March 15, 2026`
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Twelve-hour time, e.g. `10:00 AM`
#[must_use]
pub fn format_time(time: NaiveTime) -> String {
    time.format("%I:%M %p").to_string()
}

/// One event card
pub struct EventCard<'a> {
    event: &'a Event,
    currency: &'a str,
    selected: bool,
}

impl<'a> EventCard<'a> {
    /// Creates a card for `event`
    #[must_use]
    pub const fn new(event: &'a Event, currency: &'a str, selected: bool) -> Self {
        Self {
            event,
            currency,
            selected,
        }
    }
}

impl fmt::Display for EventCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let event = self.event;
        let marker = if self.selected { '>' } else { ' ' };

        writeln!(f, "{marker} [{}] {}  ({})", event.id, event.name, event.department)?;
        writeln!(
            f,
            "      {} at {}, {}",
            format_date(event.date),
            format_time(event.time),
            event.venue
        )?;
        write!(f, "      {}{} per ticket  |  ", self.currency, event.ticket_price)?;
        if event.is_sold_out() {
            write!(f, "Sold Out")
        } else if event.is_low_stock() {
            write!(f, "Only {} tickets left!", event.available_tickets)
        } else {
            write!(f, "{} tickets available", event.available_tickets)
        }
    }
}

/// The event list
pub struct EventListView<'a> {
    state: &'a BookingState,
    currency: &'a str,
}

impl<'a> EventListView<'a> {
    /// Creates the list view
    #[must_use]
    pub const fn new(state: &'a BookingState, currency: &'a str) -> Self {
        Self { state, currency }
    }
}

impl fmt::Display for EventListView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Upcoming Events")?;
        writeln!(f, "===============")?;
        let selected = self.state.screen.selected_event_id();
        for event in &self.state.events {
            writeln!(
                f,
                "{}",
                EventCard::new(event, self.currency, selected == Some(event.id))
            )?;
        }
        Ok(())
    }
}

/// The booking form for the selected event
pub struct FormView<'a> {
    state: &'a BookingState,
    currency: &'a str,
}

impl<'a> FormView<'a> {
    /// Creates the form view
    #[must_use]
    pub const fn new(state: &'a BookingState, currency: &'a str) -> Self {
        Self { state, currency }
    }

    fn field_line(f: &mut fmt::Formatter<'_>, form: &FormState, field: Field, key: &str) -> fmt::Result {
        let value = form.values.get(field);
        let shown = if value.is_empty() { "-" } else { value };
        writeln!(f, "  {:<18} {shown}   (set {key} ...)", format!("{}:", field.label()))?;
        if let Some(error) = form.visible_error(field) {
            writeln!(f, "  {:<18} ! {error}", "")?;
        }
        Ok(())
    }
}

impl fmt::Display for FormView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(event) = self.state.selected_event() else {
            return writeln!(f, "Please select an event to book tickets");
        };
        let form = &self.state.form;

        writeln!(f, "Book Tickets: {}", event.name)?;
        writeln!(
            f,
            "  {} at {}  |  {}{} per ticket  |  {} available",
            format_date(event.date),
            format_time(event.time),
            self.currency,
            event.ticket_price,
            event.available_tickets
        )?;
        writeln!(f)?;

        Self::field_line(f, form, Field::Name, "name")?;
        Self::field_line(f, form, Field::Email, "email")?;
        Self::field_line(f, form, Field::Department, "department")?;
        Self::field_line(f, form, Field::Tickets, "tickets")?;

        if let Some(tickets) = form.preview_tickets() {
            writeln!(f)?;
            writeln!(f, "  Total Amount: {}{}", self.currency, event.total_for(tickets))?;
        }

        writeln!(f)?;
        writeln!(f, "  Departments:")?;
        for (position, department) in Department::ALL.iter().enumerate() {
            writeln!(f, "    {}. {department}", position + 1)?;
        }
        Ok(())
    }
}

/// Summary of a confirmed booking
pub struct SummaryView<'a> {
    booking: &'a Booking,
    currency: &'a str,
}

impl<'a> SummaryView<'a> {
    /// Creates the summary view
    #[must_use]
    pub const fn new(booking: &'a Booking, currency: &'a str) -> Self {
        Self { booking, currency }
    }
}

impl fmt::Display for SummaryView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let booking = self.booking;

        writeln!(f, "Booking Confirmed!")?;
        writeln!(f, "==================")?;
        writeln!(f, "  Reference:    {}", booking.reference)?;
        writeln!(f, "  Name:         {}", booking.user_name)?;
        writeln!(f, "  Email:        {}", booking.email)?;
        writeln!(f, "  Department:   {}", booking.department)?;
        writeln!(f, "  Event:        {}", booking.event_name)?;
        writeln!(f, "  Tickets:      {}", booking.tickets_booked)?;
        writeln!(f, "  Total Amount: {}{}", self.currency, booking.total_amount)?;
        writeln!(f, "  Booked at:    {}", booking.booked_at.format("%Y-%m-%d %H:%M UTC"))?;
        writeln!(f)?;
        writeln!(
            f,
            "A confirmation email has been sent to {} with your ticket details. \
             Please present this confirmation at the venue entrance.",
            booking.email
        )?;
        write!(f, "All tickets are non-refundable.")
    }
}

/// Whatever the current screen shows
pub struct ScreenView<'a> {
    state: &'a BookingState,
    currency: &'a str,
}

impl<'a> ScreenView<'a> {
    /// Creates the view for the current screen
    #[must_use]
    pub const fn new(state: &'a BookingState, currency: &'a str) -> Self {
        Self { state, currency }
    }
}

impl fmt::Display for ScreenView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let (Screen::SummaryShown { .. }, Some(booking)) = (self.state.screen, &self.state.last_booking) {
            writeln!(f, "{}", SummaryView::new(booking, self.currency))?;
            return writeln!(f, "(print | close)");
        }

        writeln!(f, "{}", EventListView::new(self.state, self.currency))?;
        write!(f, "{}", FormView::new(self.state, self.currency))
    }
}
