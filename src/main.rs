// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! # Flight Search TUI.
//!
//! A terminal front end for choosing the origin and destination of a flight
//! from a remote airport directory.
//!
//! This application coordinates a TUI frontend built with `ratatui` and a
//! background processing layer.
//!
//! It uses an event-driven architecture where:
//!
//! * The **Main Thread** manages the terminal lifecycle, UI rendering and all
//!   lookup state.
//! * **Background Workers** run the directory requests and the debounce
//!   timers, and report back through the event channel.
//! * **Event Loops** capture user input and system ticks to drive the UI
//!   state.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern to ensure the
//! terminal state is preserved even in the event of a crash. Communication
//! between the UI and background workers is handled via `std::sync::mpsc`
//! channels.

mod cli;
mod components;
mod config;
mod directory;
mod events;
mod logging;
mod lookup;
mod model;
mod render;
mod tasks;
mod theme;
mod util;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self},
    sync::{
        Arc,
        mpsc::{self, Receiver, Sender},
    },
    thread,
    time::Duration,
};
use tracing::info;

use crate::{
    cli::Args,
    components::CityField,
    config::AppConfig,
    directory::HttpCityDirectory,
    events::{AppChannels, AppEvent, process_events},
    lookup::{CityLookup, LookupId},
    model::{Route, RouteEnd},
    tasks::AppTask,
    theme::Theme,
};

const TICK_RATE: Duration = Duration::from_millis(250);

/// Application state.
pub(crate) struct App {
    pub config: AppConfig,

    pub theme: Theme,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,

    pub channels: AppChannels,

    pub origin: CityField,
    pub destination: CityField,
    pub focus: RouteEnd,

    pub route: Route,

    pub status: Option<String>,
    pub spinner_frame: usize,

    next_lookup_id: u64,
}

impl App {
    /// Create a new instance of application state.
    pub fn new(config: AppConfig, task_tx: Sender<AppTask>) -> Self {
        let (event_tx, event_rx) = mpsc::channel();

        let channels = AppChannels {
            event_tx: event_tx.clone(),
            task_tx,
        };

        let settings = config.lookup_settings();
        let mut origin = CityField::new(
            RouteEnd::Origin,
            CityLookup::new(LookupId(1), settings, channels.clone()),
        );
        origin.lookup.open();
        let destination = CityField::new(
            RouteEnd::Destination,
            CityLookup::new(LookupId(2), settings, channels.clone()),
        );

        Self {
            config,
            theme: Theme::default(),
            event_tx,
            event_rx,
            channels,
            origin,
            destination,
            focus: RouteEnd::Origin,
            route: Route::new(),
            status: None,
            spinner_frame: 0,
            next_lookup_id: 3,
        }
    }

    pub fn field_mut(&mut self, end: RouteEnd) -> &mut CityField {
        match end {
            RouteEnd::Origin => &mut self.origin,
            RouteEnd::Destination => &mut self.destination,
        }
    }

    pub fn focused_field_mut(&mut self) -> &mut CityField {
        self.field_mut(self.focus)
    }

    /// Finds the live field a lookup event is addressed to. Events for
    /// torn-down lookups find nothing.
    pub fn field_by_lookup_mut(&mut self, lookup: LookupId) -> Option<&mut CityField> {
        if self.origin.lookup.id() == lookup {
            Some(&mut self.origin)
        } else if self.destination.lookup.id() == lookup {
            Some(&mut self.destination)
        } else {
            None
        }
    }

    /// Tears both lookups down and starts over with fresh ones.
    pub fn reset_form(&mut self) {
        self.teardown();

        let settings = self.config.lookup_settings();
        for end in [RouteEnd::Origin, RouteEnd::Destination] {
            let id = LookupId(self.next_lookup_id);
            self.next_lookup_id += 1;

            let lookup = CityLookup::new(id, settings, self.channels.clone());
            *self.field_mut(end) = CityField::new(end, lookup);
        }

        self.route.clear();
        self.focus = RouteEnd::Origin;
        self.origin.lookup.open();
    }

    /// Cancels pending timers and stops both lookups from accepting results.
    pub fn teardown(&mut self) {
        self.origin.lookup.teardown();
        self.destination.lookup.teardown();
    }
}

/// The entry point of the application.
///
/// Sets up logging and the communication channels, initializes the
/// application state, manages the terminal lifecycle, and returns an error if
/// any part of the execution fails.
fn main() -> Result<()> {
    let args = Args::parse();
    let config = config::load_config().apply_args(&args);

    let _logging = logging::init_logging(&config.log_dir, args.debug)
        .context("Failed to initialise logging")?;
    info!(endpoint = %config.endpoint, "starting flyui");

    let directory = HttpCityDirectory::new(&config.endpoint, config.request_timeout())
        .context("Failed to create airport directory client")?;

    let (task_tx, task_rx) = mpsc::channel();

    let mut app = App::new(config, task_tx);

    let mut terminal = setup_terminal(&app)?;
    let res = run(&mut terminal, &mut app, Arc::new(directory), task_rx);
    restore_terminal(&mut terminal);

    res.context("Application error occurred")
}

/// Prepares the terminal for the TUI application.
///
/// This function performs the following side effects:
/// * Sets the terminal background color based on the provided theme.
/// * Enables raw mode to capture all keyboard input.
/// * Switches the terminal to the alternate screen buffer.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal(app: &App) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    // Set the background of the entire terminal window, without this we'd get
    // a thin black outline
    if let Some(hex) = Theme::to_hex(app.theme.background_colour) {
        util::term::set_terminal_bg(&hex);
    }

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`], including disabling
/// raw mode, leaving the alternate screen, and resetting the background color.
/// It also ensures the cursor is made visible again.
///
/// This function is designed to be "best-effort" and does not return a result,
/// as it is typically called during cleanup or panic handling.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    util::term::reset_terminal_bg();
    terminal.show_cursor().ok();
}

/// Starts the application's background workers and enters the main event loop.
///
/// This function spawns several long-running background threads:
/// * A task worker to run directory lookups.
/// * An input thread to poll for system keyboard events.
/// * A tick thread to trigger periodic UI refreshes.
///
/// After spawning the workers, it hands control to [`process_events`] to
/// manage the UI and state updates.
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an unrecoverable
/// application error.
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    directory: Arc<HttpCityDirectory>,
    task_rx: Receiver<AppTask>,
) -> Result<()> {
    let task_event_tx = app.event_tx.clone();
    tasks::spawn_task_worker(directory, task_rx, task_event_tx);

    // Spawn a thread to translate raw key events to application events.
    let tx_keys = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(event::Event::Key(key)) => {
                    if tx_keys.send(AppEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    let _ = tx_keys.send(AppEvent::Error(format!("Input error: {}", e)));
                    break;
                }
            }
        }
    });

    // Spawn a thread to send a periodic tick application event, this drives
    // the loading spinner.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        while tx_tick.send(AppEvent::Tick).is_ok() {
            thread::sleep(TICK_RATE);
        }
    });

    // Application event loop, process events until the user quits
    process_events(terminal, app)
}
