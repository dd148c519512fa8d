//! Terminal front end for Matchday booking.
//!
//! Reads one command per line from stdin and renders the current screen to
//! stdout. Logs go to stderr.

use matchday_booking::cli::HELP;
use matchday_booking::render::{EventListView, ScreenView};
use matchday_booking::{
    BookingEnvironment, BookingReducer, BookingState, Command, Config, StdoutPrinter,
};
use matchday_core::environment::SystemClock;
use matchday_runtime::Store;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log_filter)?)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let events = config.load_events()?;
    tracing::info!(
        events = events.len(),
        catalog = ?config.catalog_path,
        "Starting Matchday booking"
    );

    let env = BookingEnvironment::new(
        Arc::new(SystemClock),
        Arc::new(StdoutPrinter),
        config.currency.clone(),
    );
    let store = Store::new(BookingState::new(events), BookingReducer::new(), env);
    let currency = config.currency.as_str();

    println!("=== Matchday: Sports Event Booking ===\n");
    println!("{HELP}\n");
    println!("{}", store.state(|s| ScreenView::new(s, currency).to_string()).await);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(matchday_booking::CommandError::Empty) => continue,
            Err(error) => {
                println!("{error}");
                continue;
            },
        };

        match command {
            Command::Quit => break,
            Command::Help => {
                println!("{HELP}");
                continue;
            },
            Command::List => {
                println!("{}", store.state(|s| EventListView::new(s, currency).to_string()).await);
                continue;
            },
            _ => {},
        }

        let printing = command == Command::Print;
        let actions = command.into_actions();
        let sent = !actions.is_empty();
        for action in actions {
            let mut handle = store.send(action).await?;
            // Printed receipts must appear before the next prompt
            handle.wait().await;
        }

        let (screen, error) = store
            .state(|s| (ScreenView::new(s, currency).to_string(), s.last_error.clone()))
            .await;
        match error {
            Some(error) if sent => println!("! {error}\n"),
            _ if printing => continue,
            _ => {},
        }
        println!("{screen}");
    }

    store.shutdown(Duration::from_secs(5)).await?;
    println!("Goodbye!");
    Ok(())
}
