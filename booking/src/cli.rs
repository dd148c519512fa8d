//! Terminal command parsing.
//!
//! Each input line becomes a [`Command`]; commands that change state expand
//! into the [`BookingAction`]s sent to the store.

use crate::reducer::BookingAction;
use crate::types::{Department, EventId};
use crate::validation::Field;
use std::str::FromStr;

/// One line of user input
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Show the event list
    List,
    /// Re-render the current screen
    Show,
    /// Open the form for an event
    Select(EventId),
    /// Enter a value into a field and leave it
    Set {
        /// Field to change
        field: Field,
        /// New text
        value: String,
    },
    /// Submit the form
    Submit,
    /// Empty the form
    Reset,
    /// Close the summary
    Close,
    /// Print the summary
    Print,
    /// Show usage
    Help,
    /// Leave the program
    Quit,
}

/// Command parsing errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// Blank line
    #[error("no command given")]
    Empty,

    /// First word is not a command
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    /// Command needs an argument that was not given
    #[error("missing {0}")]
    MissingArgument(&'static str),

    /// Event id is not a number
    #[error("'{0}' is not an event id")]
    InvalidEventId(String),

    /// Field name is not one of the form fields
    #[error("unknown field '{0}' (name, email, department, tickets)")]
    UnknownField(String),
}

/// Usage text
pub const HELP: &str = "\
Commands:
  list                      show all events
  select <id>               open the booking form for an event
  set name <text>           enter your name
  set email <text>          enter your email
  set department <n|name>   pick a department by number (1-8) or name
  set tickets <n>           number of tickets
  submit                    confirm the booking
  reset                     clear the form
  close                     close the booking summary
  print                     print the booking summary
  show                      show the current screen
  help                      show this help
  quit                      exit";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match word.to_ascii_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "list" | "ls" => Ok(Self::List),
            "show" => Ok(Self::Show),
            "select" | "book" => parse_select(rest),
            "set" => parse_set(rest),
            "submit" => Ok(Self::Submit),
            "reset" => Ok(Self::Reset),
            "close" => Ok(Self::Close),
            "print" => Ok(Self::Print),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn parse_select(rest: &str) -> Result<Command, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::MissingArgument("event id"));
    }
    rest.parse::<u32>()
        .map(|id| Command::Select(EventId::new(id)))
        .map_err(|_| CommandError::InvalidEventId(rest.to_string()))
}

fn parse_set(rest: &str) -> Result<Command, CommandError> {
    let (name, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    if name.is_empty() {
        return Err(CommandError::MissingArgument("field name"));
    }
    let field: Field = name
        .parse()
        .map_err(|_| CommandError::UnknownField(name.to_string()))?;

    let value = value.trim();
    let value = match field {
        // Departments may be picked by their position in the list
        Field::Department => value
            .parse::<usize>()
            .ok()
            .and_then(Department::from_position)
            .map_or_else(|| value.to_string(), |department| department.as_str().to_string()),
        Field::Name | Field::Email | Field::Tickets => value.to_string(),
    };

    Ok(Command::Set { field, value })
}

impl Command {
    /// Actions this command sends to the store
    ///
    /// Commands that only affect the terminal produce none.
    #[must_use]
    pub fn into_actions(self) -> Vec<BookingAction> {
        match self {
            Self::Select(event_id) => vec![BookingAction::SelectEvent { event_id }],
            Self::Set { field, value } => vec![
                BookingAction::EditField { field, value },
                BookingAction::BlurField { field },
            ],
            Self::Submit => vec![BookingAction::SubmitBooking],
            Self::Reset => vec![BookingAction::ResetForm],
            Self::Close => vec![BookingAction::CloseSummary],
            Self::Print => vec![BookingAction::PrintSummary],
            Self::List | Self::Show | Self::Help | Self::Quit => Vec::new(),
        }
    }
}
