//! Property tests for submission and inventory.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect

use chrono::{NaiveDate, NaiveTime};
use matchday_booking::{
    BookingAction, BookingEnvironment, BookingReducer, BookingState, Department, Event, EventId,
    Field, ReceiptPrinter, Screen, ValidationError,
};
use matchday_core::reducer::Reducer;
use matchday_testing::test_clock;
use proptest::prelude::*;
use std::sync::Arc;

struct DiscardPrinter;

impl ReceiptPrinter for DiscardPrinter {
    fn print(&self, _receipt: &str) -> std::io::Result<()> {
        Ok(())
    }
}

fn env() -> BookingEnvironment {
    BookingEnvironment::new(Arc::new(test_clock()), Arc::new(DiscardPrinter), "₹")
}

fn event(id: u32, price: u32, available: u32) -> Event {
    Event {
        id: EventId::new(id),
        name: format!("Event {id}"),
        department: Department::CivilEngineering,
        date: NaiveDate::from_ymd_opt(2026, 3, 28).unwrap(),
        time: NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
        venue: "Main Football Stadium".to_string(),
        ticket_price: price,
        available_tickets: available,
    }
}

/// Selects event 1, fills the form and submits it
fn book(state: &mut BookingState, department: Department, tickets: &str) {
    let reducer = BookingReducer::new();
    let env = env();
    let mut actions = vec![BookingAction::SelectEvent {
        event_id: EventId::new(1),
    }];
    for (field, value) in [
        (Field::Name, "Asha Rao".to_string()),
        (Field::Email, "asha@uni.edu".to_string()),
        (Field::Department, department.to_string()),
        (Field::Tickets, tickets.to_string()),
    ] {
        actions.push(BookingAction::EditField { field, value });
    }
    actions.push(BookingAction::SubmitBooking);

    for action in actions {
        let _ = reducer.reduce(state, action, &env);
    }
}

fn department() -> impl Strategy<Value = Department> {
    prop::sample::select(Department::ALL.to_vec())
}

proptest! {
    #[test]
    fn valid_bookings_always_submit(
        price in 1u32..10_000,
        available in 1u32..1_000,
        pick in 0u32..1_000,
        other_available in 0u32..1_000,
        department in department(),
    ) {
        let tickets = pick % available + 1;
        let mut state = BookingState::new(vec![event(1, price, available), event(2, 50, other_available)]);

        book(&mut state, department, &tickets.to_string());

        prop_assert_eq!(state.screen, Screen::SummaryShown { event_id: EventId::new(1) });
        let booking = state.last_booking.clone().unwrap();
        prop_assert_eq!(booking.total_amount, u64::from(tickets) * u64::from(price));
        prop_assert_eq!(booking.department, department);
        prop_assert_eq!(state.event(EventId::new(1)).unwrap().available_tickets, available - tickets);
        prop_assert_eq!(state.event(EventId::new(2)).unwrap().available_tickets, other_available);
        prop_assert!(state.form.is_pristine());
    }

    #[test]
    fn over_inventory_always_rejected(
        available in 0u32..1_000,
        excess in 1u32..1_000,
    ) {
        let mut state = BookingState::new(vec![event(1, 150, available)]);

        book(&mut state, Department::Biotechnology, &(available + excess).to_string());

        prop_assert_eq!(state.screen, Screen::EventSelected { event_id: EventId::new(1) });
        prop_assert_eq!(
            state.form.visible_error(Field::Tickets),
            Some(&ValidationError::ExceedsAvailability { available })
        );
        prop_assert_eq!(state.event(EventId::new(1)).unwrap().available_tickets, available);
        prop_assert!(state.last_booking.is_none());
    }

    #[test]
    fn repeated_bookings_never_oversell(
        available in 1u32..200,
        requests in prop::collection::vec(1u32..60, 1..12),
    ) {
        let mut state = BookingState::new(vec![event(1, 10, available)]);
        let mut sold = 0u32;

        for tickets in requests {
            let remaining = state.event(EventId::new(1)).unwrap().available_tickets;
            book(&mut state, Department::ComputerScience, &tickets.to_string());
            if tickets <= remaining {
                sold += tickets;
            }
            prop_assert_eq!(state.event(EventId::new(1)).unwrap().available_tickets, available - sold);
        }
    }
}
