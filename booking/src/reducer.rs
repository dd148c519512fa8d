//! Root reducer for the booking flow.
//!
//! Drives the screen state machine (`NoEventSelected`, `EventSelected`,
//! `SummaryShown`), owns the event inventory and delegates field handling to
//! [`FormReducer`]. Commands are validated against the current screen; a
//! passing submission produces a `BookingConfirmed` event that is applied
//! as a single state change.

use crate::form::{FormAction, FormReducer, FormState};
use crate::render::SummaryView;
use crate::types::{Booking, BookingReference, Event, EventId};
use crate::validation::{self, Field};
use matchday_core::{effect::Effect, environment::Clock, reducer::Reducer, smallvec, SmallVec};
use matchday_macros::Action;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::sync::Arc;

/// Which screen the user is looking at
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    /// Event list, no booking form
    #[default]
    NoEventSelected,
    /// Event list with the booking form for one event
    EventSelected {
        /// Event the form books
        event_id: EventId,
    },
    /// Summary of the booking just confirmed
    SummaryShown {
        /// Event that was booked
        event_id: EventId,
    },
}

impl Screen {
    /// The selected event, if any
    #[must_use]
    pub const fn selected_event_id(self) -> Option<EventId> {
        match self {
            Self::NoEventSelected => None,
            Self::EventSelected { event_id } | Self::SummaryShown { event_id } => Some(event_id),
        }
    }
}

/// State of the booking application
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingState {
    /// Event inventory, in catalog order
    pub events: Vec<Event>,
    /// Current screen; holds the selected event by id
    pub screen: Screen,
    /// Booking form
    pub form: FormState,
    /// Most recent confirmed booking
    pub last_booking: Option<Booking>,
    /// Number of bookings confirmed this session
    pub bookings_confirmed: u32,
    /// Why the last command was refused (if it was)
    pub last_error: Option<String>,
}

impl BookingState {
    /// Creates the initial state over an event catalog
    #[must_use]
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events,
            screen: Screen::NoEventSelected,
            form: FormState::default(),
            last_booking: None,
            bookings_confirmed: 0,
            last_error: None,
        }
    }

    /// Returns an event by ID
    #[must_use]
    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|event| event.id == id)
    }

    /// The selected event, looked up in the inventory
    #[must_use]
    pub fn selected_event(&self) -> Option<&Event> {
        self.screen
            .selected_event_id()
            .and_then(|id| self.event(id))
    }

    /// Total tickets still for sale across all events
    #[must_use]
    pub fn tickets_remaining(&self) -> u64 {
        self.events
            .iter()
            .map(|event| u64::from(event.available_tickets))
            .sum()
    }
}

/// Actions representing user commands and the events they produce
#[derive(Action, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingAction {
    // ========== Commands ==========
    /// Command: Open the booking form for an event
    #[command]
    SelectEvent {
        /// Event to book
        event_id: EventId,
    },

    /// Command: Change a form field
    #[command]
    EditField {
        /// Field being edited
        field: Field,
        /// New text
        value: String,
    },

    /// Command: Leave a form field, validating it
    #[command]
    BlurField {
        /// Field being left
        field: Field,
    },

    /// Command: Submit the booking form
    #[command]
    SubmitBooking,

    /// Command: Empty the booking form
    #[command]
    ResetForm,

    /// Command: Close the booking summary
    #[command]
    CloseSummary,

    /// Command: Print the booking summary
    #[command]
    PrintSummary,

    // ========== Events ==========
    /// Event: A booking was confirmed
    #[event]
    BookingConfirmed {
        /// The booking record
        booking: Booking,
    },

    /// Event: Submission failed form validation
    #[event]
    SubmissionRejected {
        /// Fields with errors, in form order
        invalid_fields: Vec<Field>,
    },

    /// Event: A command did not apply to the current screen
    #[event]
    CommandRejected {
        /// Why it was refused
        reason: String,
    },
}

/// Destination for printed booking summaries
pub trait ReceiptPrinter: Send + Sync {
    /// Prints one rendered summary
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the receipt could not be written.
    fn print(&self, receipt: &str) -> std::io::Result<()>;
}

/// Prints receipts to standard output
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutPrinter;

impl ReceiptPrinter for StdoutPrinter {
    fn print(&self, receipt: &str) -> std::io::Result<()> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{receipt}")?;
        out.flush()
    }
}

/// Environment dependencies for the booking reducer
#[derive(Clone)]
pub struct BookingEnvironment {
    /// Clock for booking timestamps
    pub clock: Arc<dyn Clock>,
    /// Where printed summaries go
    pub printer: Arc<dyn ReceiptPrinter>,
    /// Currency symbol used in printed summaries
    pub currency: String,
}

impl BookingEnvironment {
    /// Creates a new `BookingEnvironment`
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        printer: Arc<dyn ReceiptPrinter>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            clock,
            printer,
            currency: currency.into(),
        }
    }
}

/// Reducer for the booking application
#[derive(Clone, Debug, Default)]
pub struct BookingReducer {
    form: FormReducer,
}

impl BookingReducer {
    /// Creates a new `BookingReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            form: FormReducer::new(),
        }
    }

    /// The event whose form is open
    fn form_event(state: &BookingState) -> Result<&Event, String> {
        let Screen::EventSelected { event_id } = state.screen else {
            return Err("No event selected".to_string());
        };
        state
            .event(event_id)
            .ok_or_else(|| format!("Event {event_id} not found"))
    }

    /// Runs a form action against the booking form
    fn update_form(&self, state: &mut BookingState, action: FormAction) {
        let effects = self.form.reduce(&mut state.form, action, &());
        debug_assert!(
            effects.iter().all(Effect::is_none),
            "form reducer produced effects"
        );
    }

    /// Validates the form and decides the outcome of a submission
    fn submit(&self, state: &mut BookingState, env: &BookingEnvironment) -> BookingAction {
        let event = match Self::form_event(state).cloned() {
            Ok(event) => event,
            Err(reason) => return BookingAction::CommandRejected { reason },
        };
        let available = Some(event.available_tickets);

        self.update_form(state, FormAction::Validate { available });

        match validation::validate_request(&state.form.values, available) {
            Ok(request) => {
                let total_amount = event.total_for(request.tickets);
                BookingAction::BookingConfirmed {
                    booking: Booking {
                        reference: BookingReference::new(
                            state.bookings_confirmed.saturating_add(1),
                        ),
                        user_name: request.name,
                        email: request.email,
                        department: request.department,
                        event_id: event.id,
                        event_name: event.name,
                        tickets_booked: request.tickets,
                        total_amount,
                        booked_at: env.clock.now(),
                    },
                }
            },
            Err(errors) => BookingAction::SubmissionRejected {
                invalid_fields: errors.into_iter().map(|(field, _)| field).collect(),
            },
        }
    }

    /// Checks a confirmed booking against the open form and inventory
    ///
    /// Returns the tickets left for the event once the booking is applied.
    fn check_confirmation(state: &BookingState, booking: &Booking) -> Result<u32, String> {
        let event = Self::form_event(state)?;
        if event.id != booking.event_id {
            return Err(format!(
                "Booking is for event {} but event {} is selected",
                booking.event_id, event.id
            ));
        }
        if booking.tickets_booked == 0 {
            return Err("Booking must include at least one ticket".to_string());
        }
        if booking.event_name != event.name {
            return Err(format!("Booking names a different event than {}", event.name));
        }
        if booking.total_amount != event.total_for(booking.tickets_booked) {
            return Err(format!(
                "Booking total {} does not match {} tickets at {}",
                booking.total_amount, booking.tickets_booked, event.ticket_price
            ));
        }
        event
            .available_tickets
            .checked_sub(booking.tickets_booked)
            .ok_or_else(|| {
                format!(
                    "Only {} tickets available for event {}",
                    event.available_tickets, event.id
                )
            })
    }

    /// Applies an event to state
    fn apply_event(state: &mut BookingState, action: &BookingAction) {
        match action {
            BookingAction::BookingConfirmed { booking } => {
                let remaining = match Self::check_confirmation(state, booking) {
                    Ok(remaining) => remaining,
                    Err(reason) => {
                        Self::apply_event(state, &BookingAction::CommandRejected { reason });
                        return;
                    },
                };
                if let Some(event) = state
                    .events
                    .iter_mut()
                    .find(|event| event.id == booking.event_id)
                {
                    event.available_tickets = remaining;
                }
                state.last_booking = Some(booking.clone());
                state.bookings_confirmed = state.bookings_confirmed.saturating_add(1);
                state.form = FormState::default();
                state.screen = Screen::SummaryShown {
                    event_id: booking.event_id,
                };
                state.last_error = None;

                tracing::info!(
                    reference = %booking.reference,
                    event_id = %booking.event_id,
                    tickets = booking.tickets_booked,
                    total = booking.total_amount,
                    remaining,
                    "Booking confirmed"
                );
            },
            BookingAction::SubmissionRejected { invalid_fields } => {
                state.last_error = None;
                tracing::debug!(?invalid_fields, "Submission failed validation");
            },
            BookingAction::CommandRejected { reason } => {
                tracing::warn!(%reason, "Command rejected");
                state.last_error = Some(reason.clone());
            },
            // Commands are not applied to state
            BookingAction::SelectEvent { .. }
            | BookingAction::EditField { .. }
            | BookingAction::BlurField { .. }
            | BookingAction::SubmitBooking
            | BookingAction::ResetForm
            | BookingAction::CloseSummary
            | BookingAction::PrintSummary => {},
        }
    }

    fn reject(state: &mut BookingState, reason: impl Into<String>) -> SmallVec<[Effect<BookingAction>; 4]> {
        Self::apply_event(
            state,
            &BookingAction::CommandRejected {
                reason: reason.into(),
            },
        );
        SmallVec::new()
    }
}

impl Reducer for BookingReducer {
    type State = BookingState;
    type Action = BookingAction;
    type Environment = BookingEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Commands ==========
            BookingAction::SelectEvent { event_id } => {
                if state.event(event_id).is_none() {
                    return Self::reject(state, format!("Event {event_id} not found"));
                }
                tracing::debug!(from = ?state.screen, %event_id, "Event selected");
                state.screen = Screen::EventSelected { event_id };
                state.last_error = None;
                SmallVec::new()
            },

            BookingAction::EditField { field, value } => {
                if let Err(reason) = Self::form_event(state).map(|_| ()) {
                    return Self::reject(state, reason);
                }
                self.update_form(state, FormAction::Edit { field, value });
                state.last_error = None;
                SmallVec::new()
            },

            BookingAction::BlurField { field } => {
                let available = match Self::form_event(state).map(|event| event.available_tickets) {
                    Ok(available) => available,
                    Err(reason) => return Self::reject(state, reason),
                };
                self.update_form(
                    state,
                    FormAction::Blur {
                        field,
                        available: Some(available),
                    },
                );
                state.last_error = None;
                SmallVec::new()
            },

            BookingAction::SubmitBooking => {
                let event = self.submit(state, env);
                Self::apply_event(state, &event);
                SmallVec::new()
            },

            BookingAction::ResetForm => {
                if let Err(reason) = Self::form_event(state).map(|_| ()) {
                    return Self::reject(state, reason);
                }
                self.update_form(state, FormAction::Clear);
                state.last_error = None;
                tracing::debug!("Booking form reset");
                SmallVec::new()
            },

            BookingAction::CloseSummary => {
                if !matches!(state.screen, Screen::SummaryShown { .. }) {
                    return Self::reject(state, "No booking summary to close");
                }
                tracing::debug!(from = ?state.screen, "Booking summary closed");
                state.screen = Screen::NoEventSelected;
                state.last_error = None;
                SmallVec::new()
            },

            BookingAction::PrintSummary => {
                let receipt = state
                    .last_booking
                    .as_ref()
                    .filter(|_| matches!(state.screen, Screen::SummaryShown { .. }))
                    .map(|booking| SummaryView::new(booking, &env.currency).to_string());
                let Some(receipt) = receipt else {
                    return Self::reject(state, "No booking summary to print");
                };

                let printer = Arc::clone(&env.printer);
                state.last_error = None;

                smallvec![Effect::future(async move {
                    if let Err(error) = printer.print(&receipt) {
                        tracing::warn!(%error, "Failed to print booking summary");
                    }
                    None
                })]
            },

            // ========== Events ==========
            BookingAction::BookingConfirmed { .. }
            | BookingAction::SubmissionRejected { .. }
            | BookingAction::CommandRejected { .. } => {
                Self::apply_event(state, &action);
                SmallVec::new()
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use crate::types::Department;
    use crate::validation::ValidationError;
    use chrono::{NaiveDate, NaiveTime};
    use matchday_testing::{assertions, test_clock, ReducerTest};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingPrinter {
        receipts: Mutex<Vec<String>>,
    }

    impl ReceiptPrinter for RecordingPrinter {
        fn print(&self, receipt: &str) -> std::io::Result<()> {
            self.receipts.lock().unwrap().push(receipt.to_string());
            Ok(())
        }
    }

    fn event(id: u32, price: u32, available: u32) -> Event {
        Event {
            id: EventId::new(id),
            name: format!("Match {id}"),
            department: Department::ComputerScience,
            date: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
            time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            venue: "University Cricket Ground".to_string(),
            ticket_price: price,
            available_tickets: available,
        }
    }

    fn create_test_env() -> BookingEnvironment {
        BookingEnvironment::new(
            Arc::new(test_clock()),
            Arc::new(RecordingPrinter::default()),
            "₹",
        )
    }

    fn initial_state() -> BookingState {
        BookingState::new(vec![event(1, 150, 50), event(2, 100, 75)])
    }

    fn selected_state(event_id: u32) -> BookingState {
        let mut state = initial_state();
        state.screen = Screen::EventSelected {
            event_id: EventId::new(event_id),
        };
        state
    }

    fn fill(tickets: &str) -> Vec<BookingAction> {
        [
            (Field::Name, "Asha Rao"),
            (Field::Email, "asha@uni.edu"),
            (Field::Department, "Computer Science"),
            (Field::Tickets, tickets),
        ]
        .into_iter()
        .map(|(field, value)| BookingAction::EditField {
            field,
            value: value.to_string(),
        })
        .collect()
    }

    #[test]
    fn test_select_event() {
        ReducerTest::new(BookingReducer::new())
            .with_env(create_test_env())
            .given_state(initial_state())
            .when_action(BookingAction::SelectEvent {
                event_id: EventId::new(2),
            })
            .then_state(|state| {
                assert_eq!(
                    state.screen,
                    Screen::EventSelected {
                        event_id: EventId::new(2)
                    }
                );
                assert_eq!(state.selected_event().unwrap().ticket_price, 100);
                assert!(state.last_error.is_none());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_select_unknown_event_rejected() {
        ReducerTest::new(BookingReducer::new())
            .with_env(create_test_env())
            .given_state(initial_state())
            .when_action(BookingAction::SelectEvent {
                event_id: EventId::new(9),
            })
            .then_state(|state| {
                assert_eq!(state.screen, Screen::NoEventSelected);
                assert_eq!(state.last_error.as_deref(), Some("Event 9 not found"));
            })
            .run();
    }

    #[test]
    fn test_successful_submission() {
        ReducerTest::new(BookingReducer::new())
            .with_env(create_test_env())
            .given_state(selected_state(1))
            .when_actions(fill("3"))
            .when_action(BookingAction::SubmitBooking)
            .then_state(|state| {
                assert_eq!(
                    state.screen,
                    Screen::SummaryShown {
                        event_id: EventId::new(1)
                    }
                );
                assert_eq!(state.event(EventId::new(1)).unwrap().available_tickets, 47);
                assert_eq!(state.event(EventId::new(2)).unwrap().available_tickets, 75);
                assert!(state.form.is_pristine());

                let booking = state.last_booking.as_ref().unwrap();
                assert_eq!(booking.total_amount, 450);
                assert_eq!(booking.tickets_booked, 3);
                assert_eq!(booking.user_name, "Asha Rao");
                assert_eq!(booking.event_name, "Match 1");
                assert_eq!(booking.department, Department::ComputerScience);
                assert_eq!(booking.reference.to_string(), "MD-000001");
                assert_eq!(booking.booked_at, test_clock().now());
                assert_eq!(state.bookings_confirmed, 1);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_submission_over_inventory_rejected() {
        ReducerTest::new(BookingReducer::new())
            .with_env(create_test_env())
            .given_state(selected_state(1))
            .when_actions(fill("51"))
            .when_action(BookingAction::SubmitBooking)
            .then_state(|state| {
                assert_eq!(
                    state.screen,
                    Screen::EventSelected {
                        event_id: EventId::new(1)
                    }
                );
                assert_eq!(state.event(EventId::new(1)).unwrap().available_tickets, 50);
                assert!(state.last_booking.is_none());
                assert_eq!(
                    state.form.visible_error(Field::Tickets),
                    Some(&ValidationError::ExceedsAvailability { available: 50 })
                );
                assert_eq!(state.form.values.tickets, "51");
            })
            .run();
    }

    #[test]
    fn test_failed_submission_touches_every_field() {
        ReducerTest::new(BookingReducer::new())
            .with_env(create_test_env())
            .given_state(selected_state(2))
            .when_action(BookingAction::SubmitBooking)
            .then_state(|state| {
                for field in Field::ALL {
                    assert!(state.form.touched.get(field));
                    assert!(state.form.visible_error(field).is_some());
                }
                assert!(state.last_booking.is_none());
            })
            .run();
    }

    #[test]
    fn test_blur_checks_selected_event_inventory() {
        ReducerTest::new(BookingReducer::new())
            .with_env(create_test_env())
            .given_state(selected_state(1))
            .when_action(BookingAction::EditField {
                field: Field::Tickets,
                value: "60".to_string(),
            })
            .when_action(BookingAction::BlurField {
                field: Field::Tickets,
            })
            .then_state(|state| {
                assert_eq!(
                    state.form.visible_error(Field::Tickets),
                    Some(&ValidationError::ExceedsAvailability { available: 50 })
                );
                assert!(!state.form.touched.name);
            })
            .run();
    }

    #[test]
    fn test_form_survives_event_switch() {
        ReducerTest::new(BookingReducer::new())
            .with_env(create_test_env())
            .given_state(selected_state(1))
            .when_actions(fill("60"))
            .when_action(BookingAction::SelectEvent {
                event_id: EventId::new(2),
            })
            .when_action(BookingAction::SubmitBooking)
            .then_state(|state| {
                assert_eq!(state.event(EventId::new(2)).unwrap().available_tickets, 15);
                assert_eq!(state.last_booking.as_ref().unwrap().total_amount, 6000);
            })
            .run();
    }

    #[test]
    fn test_submit_without_selection_rejected() {
        ReducerTest::new(BookingReducer::new())
            .with_env(create_test_env())
            .given_state(initial_state())
            .when_action(BookingAction::SubmitBooking)
            .then_state(|state| {
                assert_eq!(state.screen, Screen::NoEventSelected);
                assert_eq!(state.last_error.as_deref(), Some("No event selected"));
                assert!(state.form.is_pristine());
            })
            .run();
    }

    #[test]
    fn test_edit_without_selection_rejected() {
        ReducerTest::new(BookingReducer::new())
            .with_env(create_test_env())
            .given_state(initial_state())
            .when_action(BookingAction::EditField {
                field: Field::Name,
                value: "Asha".to_string(),
            })
            .then_state(|state| {
                assert!(state.form.values.name.is_empty());
                assert!(state.last_error.is_some());
            })
            .run();
    }

    #[test]
    fn test_reset_keeps_selection() {
        ReducerTest::new(BookingReducer::new())
            .with_env(create_test_env())
            .given_state(selected_state(1))
            .when_actions(fill("2"))
            .when_action(BookingAction::BlurField { field: Field::Email })
            .when_action(BookingAction::ResetForm)
            .then_state(|state| {
                assert!(state.form.is_pristine());
                assert_eq!(
                    state.screen,
                    Screen::EventSelected {
                        event_id: EventId::new(1)
                    }
                );
            })
            .run();
    }

    #[test]
    fn test_reset_outside_form_rejected() {
        ReducerTest::new(BookingReducer::new())
            .with_env(create_test_env())
            .given_state(initial_state())
            .when_action(BookingAction::ResetForm)
            .then_state(|state| {
                assert_eq!(state.screen, Screen::NoEventSelected);
                assert!(state.last_error.is_some());
            })
            .run();
    }

    #[test]
    fn test_close_summary_keeps_inventory() {
        ReducerTest::new(BookingReducer::new())
            .with_env(create_test_env())
            .given_state(selected_state(1))
            .when_actions(fill("3"))
            .when_action(BookingAction::SubmitBooking)
            .when_action(BookingAction::CloseSummary)
            .then_state(|state| {
                assert_eq!(state.screen, Screen::NoEventSelected);
                assert!(state.selected_event().is_none());
                assert_eq!(state.event(EventId::new(1)).unwrap().available_tickets, 47);
                assert!(state.last_booking.is_some());
            })
            .run();
    }

    #[test]
    fn test_close_without_summary_rejected() {
        ReducerTest::new(BookingReducer::new())
            .with_env(create_test_env())
            .given_state(selected_state(1))
            .when_action(BookingAction::CloseSummary)
            .then_state(|state| {
                assert_eq!(
                    state.screen,
                    Screen::EventSelected {
                        event_id: EventId::new(1)
                    }
                );
                assert!(state.last_error.is_some());
            })
            .run();
    }

    #[test]
    fn test_select_from_summary_opens_form() {
        ReducerTest::new(BookingReducer::new())
            .with_env(create_test_env())
            .given_state(selected_state(1))
            .when_actions(fill("1"))
            .when_action(BookingAction::SubmitBooking)
            .when_action(BookingAction::SelectEvent {
                event_id: EventId::new(2),
            })
            .then_state(|state| {
                assert_eq!(
                    state.screen,
                    Screen::EventSelected {
                        event_id: EventId::new(2)
                    }
                );
                assert!(state.form.is_pristine());
            })
            .run();
    }

    #[test]
    fn test_print_summary_returns_future() {
        ReducerTest::new(BookingReducer::new())
            .with_env(create_test_env())
            .given_state(selected_state(1))
            .when_actions(fill("2"))
            .when_action(BookingAction::SubmitBooking)
            .when_action(BookingAction::PrintSummary)
            .then_state(|state| {
                assert!(state.last_error.is_none());
                assert_eq!(state.event(EventId::new(1)).unwrap().available_tickets, 48);
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn test_print_without_summary_rejected() {
        ReducerTest::new(BookingReducer::new())
            .with_env(create_test_env())
            .given_state(selected_state(1))
            .when_action(BookingAction::PrintSummary)
            .then_state(|state| {
                assert_eq!(
                    state.last_error.as_deref(),
                    Some("No booking summary to print")
                );
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_sold_out_event_can_be_selected_but_not_booked() {
        let mut state = BookingState::new(vec![event(1, 150, 0)]);
        state.screen = Screen::EventSelected {
            event_id: EventId::new(1),
        };

        ReducerTest::new(BookingReducer::new())
            .with_env(create_test_env())
            .given_state(state)
            .when_actions(fill("1"))
            .when_action(BookingAction::SubmitBooking)
            .then_state(|state| {
                assert_eq!(
                    state.form.visible_error(Field::Tickets),
                    Some(&ValidationError::ExceedsAvailability { available: 0 })
                );
                assert!(state.last_booking.is_none());
            })
            .run();
    }

    fn confirmed(tickets: u32, total_amount: u64) -> BookingAction {
        BookingAction::BookingConfirmed {
            booking: Booking {
                reference: BookingReference::new(1),
                user_name: "Asha".to_string(),
                email: "asha@uni.edu".to_string(),
                department: Department::Biotechnology,
                event_id: EventId::new(1),
                event_name: "Match 1".to_string(),
                tickets_booked: tickets,
                total_amount,
                booked_at: test_clock().now(),
            },
        }
    }

    #[test]
    fn test_replayed_booking_beyond_inventory_ignored() {
        ReducerTest::new(BookingReducer::new())
            .with_env(create_test_env())
            .given_state(selected_state(1))
            .when_action(confirmed(51, 7650))
            .then_state(|state| {
                assert_eq!(state.event(EventId::new(1)).unwrap().available_tickets, 50);
                assert!(state.last_booking.is_none());
                assert_eq!(
                    state.screen,
                    Screen::EventSelected {
                        event_id: EventId::new(1)
                    }
                );
                assert!(state.last_error.is_some());
            })
            .run();
    }

    #[test]
    fn test_booking_without_open_form_rejected() {
        ReducerTest::new(BookingReducer::new())
            .with_env(create_test_env())
            .given_state(initial_state())
            .when_action(confirmed(0, 999_999))
            .then_state(|state| {
                assert_eq!(state.screen, Screen::NoEventSelected);
                assert!(state.last_booking.is_none());
                assert_eq!(state.bookings_confirmed, 0);
                assert_eq!(state.events, initial_state().events);
                assert_eq!(state.last_error.as_deref(), Some("No event selected"));
            })
            .then_effects(|effects| assert!(effects.is_empty()))
            .run();
    }

    #[test]
    fn test_zero_ticket_booking_rejected() {
        ReducerTest::new(BookingReducer::new())
            .with_env(create_test_env())
            .given_state(selected_state(1))
            .when_action(confirmed(0, 0))
            .then_state(|state| {
                assert!(state.last_booking.is_none());
                assert_eq!(
                    state.last_error.as_deref(),
                    Some("Booking must include at least one ticket")
                );
            })
            .run();
    }

    #[test]
    fn test_booking_with_wrong_total_rejected() {
        ReducerTest::new(BookingReducer::new())
            .with_env(create_test_env())
            .given_state(selected_state(1))
            .when_action(confirmed(2, 999_999))
            .then_state(|state| {
                assert!(state.last_booking.is_none());
                assert_eq!(state.event(EventId::new(1)).unwrap().available_tickets, 50);
                assert!(state.last_error.as_deref().unwrap().contains("999999"));
            })
            .run();
    }

    #[test]
    fn test_booking_for_other_event_rejected() {
        ReducerTest::new(BookingReducer::new())
            .with_env(create_test_env())
            .given_state(selected_state(2))
            .when_action(confirmed(2, 300))
            .then_state(|state| {
                assert!(state.last_booking.is_none());
                assert_eq!(state.event(EventId::new(1)).unwrap().available_tickets, 50);
                assert_eq!(state.event(EventId::new(2)).unwrap().available_tickets, 75);
            })
            .run();
    }

    #[test]
    fn test_consistent_booking_event_applies() {
        ReducerTest::new(BookingReducer::new())
            .with_env(create_test_env())
            .given_state(selected_state(1))
            .when_action(confirmed(2, 300))
            .then_state(|state| {
                assert_eq!(state.event(EventId::new(1)).unwrap().available_tickets, 48);
                assert_eq!(state.last_booking.as_ref().unwrap().total_amount, 300);
                assert!(state.last_error.is_none());
            })
            .run();
    }

    #[test]
    fn test_name_kept_as_entered() {
        ReducerTest::new(BookingReducer::new())
            .with_env(create_test_env())
            .given_state(selected_state(1))
            .when_actions(fill("1"))
            .when_action(BookingAction::EditField {
                field: Field::Name,
                value: "  Asha Rao ".to_string(),
            })
            .when_action(BookingAction::SubmitBooking)
            .then_state(|state| {
                assert_eq!(state.last_booking.as_ref().unwrap().user_name, "  Asha Rao ");
            })
            .run();
    }

    #[test]
    fn test_references_are_sequential() {
        ReducerTest::new(BookingReducer::new())
            .with_env(create_test_env())
            .given_state(selected_state(1))
            .when_actions(fill("1"))
            .when_action(BookingAction::SubmitBooking)
            .when_action(BookingAction::SelectEvent {
                event_id: EventId::new(1),
            })
            .when_actions(fill("2"))
            .when_action(BookingAction::SubmitBooking)
            .then_state(|state| {
                let booking = state.last_booking.as_ref().unwrap();
                assert_eq!(booking.reference.to_string(), "MD-000002");
                assert_eq!(state.event(EventId::new(1)).unwrap().available_tickets, 47);
            })
            .run();
    }

    #[test]
    fn test_action_kinds() {
        assert!(BookingAction::SubmitBooking.is_command());
        assert!(BookingAction::CommandRejected {
            reason: String::new()
        }
        .is_event());
        assert_eq!(
            BookingAction::SubmissionRejected {
                invalid_fields: vec![]
            }
            .event_type(),
            "SubmissionRejected.v1"
        );
    }
}
