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

//! Application event distribution and orchestration.
//!
//! This module defines the central event-handling logic for the application,
//! bridging user input (keyboard), background updates (settle timers, lookup
//! results) and the UI rendering pipeline.
//!
//! # Architecture
//!
//! The system follows a reactive event-loop pattern:
//!
//! 1. **Capture**: Events are received via the [`AppEvent`] enum through an
//!    mpsc channel fed by the input, tick, timer and request threads.
//! 2. **Process**: The [`process_events`] function updates the [`App`] state
//!    and posts [`AppTask`]s to the background worker.
//! 3. **Render**: After each event is processed, the UI is re-drawn using the
//!    `ratatui` terminal.
//!
//! Lookup state is only ever touched here, on the UI thread.

mod handlers;
use handlers::*;

use std::{
    io::Stdout,
    sync::mpsc::{SendError, Sender},
};

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, prelude::CrosstermBackend};

use crate::{
    App,
    directory::LookupError,
    lookup::{LookupDelegate, LookupId, SearchRequest},
    model::City,
    render::draw,
    tasks::{AppTask, post_lookup_failure},
};

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),

    LookupSettled {
        lookup: LookupId,
        revision: u64,
    },
    LookupResolved {
        request: SearchRequest,
        outcome: Result<Vec<City>, LookupError>,
    },
    SelectionChanged {
        lookup: LookupId,
        selection: Option<City>,
    },

    Tick,

    ExitApplication,

    Error(String),
}

/// The pair of channels a lookup field talks through.
///
/// Settle notifications and selection changes come back to the event loop;
/// dispatched requests go to the task worker.
#[derive(Clone)]
pub(crate) struct AppChannels {
    pub(crate) event_tx: Sender<AppEvent>,
    pub(crate) task_tx: Sender<AppTask>,
}

impl LookupDelegate for AppChannels {
    fn on_settled(&self, lookup: LookupId, revision: u64) {
        let _ = self.event_tx.send(AppEvent::LookupSettled { lookup, revision });
    }

    fn on_dispatch(&self, request: SearchRequest) {
        if let Err(SendError(AppTask::LookupCities(request))) =
            self.task_tx.send(AppTask::LookupCities(request))
        {
            post_lookup_failure(&self.event_tx, request, "lookup worker is not running");
            let _ = self.event_tx.send(AppEvent::Error("Lookup worker is not running".to_string()));
        }
    }

    fn on_selection_changed(&self, lookup: LookupId, selection: Option<City>) {
        let _ = self.event_tx.send(AppEvent::SelectionChanged { lookup, selection });
    }
}

/// Runs the main application loop, handling events and rendering the UI in the
/// terminal.
///
/// This function loops until a 'quit' event is received or the event channel
/// is closed.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    terminal.draw(|f| draw(f, app))?;

    while let Ok(event) = app.event_rx.recv() {
        if matches!(event, AppEvent::ExitApplication) {
            break;
        }

        dispatch_event(app, event)?;

        terminal.draw(|f| draw(f, app))?;
    }

    app.teardown();

    Ok(())
}

pub(crate) fn dispatch_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => process_key_event(app, key)?,
        AppEvent::LookupSettled { lookup, revision } => handle_lookup_settled(app, lookup, revision),
        AppEvent::LookupResolved { request, outcome } => handle_lookup_resolved(app, request, outcome),
        AppEvent::SelectionChanged { lookup, selection } => handle_selection_changed(app, lookup, selection),
        AppEvent::Error(message) => handle_error(app, message),
        AppEvent::Tick => handle_tick(app),
        AppEvent::ExitApplication => {}
    }

    Ok(())
}

/// Maps keyboard input to form actions.
///
/// Global chords are handled here; everything else goes to the focused
/// field, which owns its own editing and list navigation keys.
///
/// # Errors
///
/// Returns an error if an event cannot be posted back to the event loop.
fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.kind != KeyEventKind::Press {
        return Ok(());
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.event_tx.send(AppEvent::ExitApplication)?;
        }

        (KeyCode::Char('r'), KeyModifiers::CONTROL) => handle_reset_form(app),
        (KeyCode::Char('s'), KeyModifiers::CONTROL) => handle_submit_route(app),

        (KeyCode::Tab, _) | (KeyCode::BackTab, _) => handle_switch_focus(app),

        _ => {
            app.status = None;
            app.focused_field_mut().process_event(&Event::Key(key));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::{self, Receiver};

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;
    use crate::{
        config::AppConfig,
        directory::LookupError,
        model::{RouteEnd, city},
    };

    /// An app whose settle timers never fire on their own.
    fn app() -> (App, Receiver<AppTask>) {
        let (task_tx, task_rx) = mpsc::channel();
        let config = AppConfig {
            settle_delay_ms: 60_000,
            ..AppConfig::default()
        };
        (App::new(config, task_tx), task_rx)
    }

    fn press_with(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
        dispatch_event(app, AppEvent::Key(KeyEvent::new(code, modifiers))).unwrap();
    }

    fn press(app: &mut App, code: KeyCode) {
        press_with(app, code, KeyModifiers::NONE);
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    /// Delivers whatever the lookups posted back to the event loop.
    fn pump(app: &mut App) {
        let pending: Vec<AppEvent> = app.event_rx.try_iter().collect();
        for event in pending {
            dispatch_event(app, event).unwrap();
        }
    }

    fn settle_focused(app: &mut App, task_rx: &Receiver<AppTask>) -> SearchRequest {
        let lookup = app.focused_field_mut().lookup.id();
        let revision = app.focused_field_mut().lookup.current_revision();
        dispatch_event(app, AppEvent::LookupSettled { lookup, revision }).unwrap();

        let AppTask::LookupCities(request) = task_rx.try_recv().unwrap();
        request
    }

    #[test]
    fn typed_query_is_looked_up_and_selected_into_the_route() {
        let (mut app, task_rx) = app();

        type_text(&mut app, "bog");
        let request = settle_focused(&mut app, &task_rx);
        assert_eq!(request.query, "bog");
        assert!(task_rx.try_recv().is_err());

        dispatch_event(
            &mut app,
            AppEvent::LookupResolved {
                request,
                outcome: Ok(vec![city("Bogotá", "BOG", "Colombia")]),
            },
        )
        .unwrap();
        assert_eq!(app.origin.lookup.options().len(), 1);
        assert!(!app.origin.lookup.is_loading());

        press(&mut app, KeyCode::Enter);
        pump(&mut app);

        assert_eq!(app.origin.input.value(), "Bogotá (BOG)");
        assert_eq!(app.route.get(RouteEnd::Origin).map(|c| c.code.as_str()), Some("BOG"));
        assert!(!app.route.is_complete());
    }

    #[test]
    fn settle_for_an_old_revision_sends_nothing() {
        let (mut app, task_rx) = app();

        type_text(&mut app, "bo");
        let lookup = app.origin.lookup.id();
        let stale = app.origin.lookup.current_revision();
        type_text(&mut app, "g");

        dispatch_event(&mut app, AppEvent::LookupSettled { lookup, revision: stale }).unwrap();
        assert!(task_rx.try_recv().is_err());
    }

    #[test]
    fn failed_lookup_shows_no_options() {
        let (mut app, task_rx) = app();

        type_text(&mut app, "xyz");
        let request = settle_focused(&mut app, &task_rx);
        dispatch_event(
            &mut app,
            AppEvent::LookupResolved {
                request,
                outcome: Err(LookupError::Status(500)),
            },
        )
        .unwrap();

        assert!(app.origin.lookup.options().is_empty());
        assert!(!app.origin.lookup.is_loading());
        assert_eq!(app.status, None);
    }

    #[test]
    fn reset_ignores_responses_for_the_old_form() {
        let (mut app, task_rx) = app();

        type_text(&mut app, "bog");
        let request = settle_focused(&mut app, &task_rx);
        let old_id = app.origin.lookup.id();

        press_with(&mut app, KeyCode::Char('r'), KeyModifiers::CONTROL);
        assert_ne!(app.origin.lookup.id(), old_id);
        assert_eq!(app.status.as_deref(), Some("Form cleared"));

        dispatch_event(
            &mut app,
            AppEvent::LookupResolved {
                request,
                outcome: Ok(vec![city("Bogotá", "BOG", "Colombia")]),
            },
        )
        .unwrap();

        assert!(app.origin.lookup.options().is_empty());
        assert_eq!(app.origin.input.value(), "");
        assert!(app.origin.lookup.is_open());
    }

    #[test]
    fn tab_moves_focus_and_opens_the_other_list() {
        let (mut app, _task_rx) = app();
        assert!(app.origin.lookup.is_open());

        press(&mut app, KeyCode::Tab);

        assert_eq!(app.focus, RouteEnd::Destination);
        assert!(app.destination.lookup.is_open());
        assert!(!app.origin.lookup.is_open());

        type_text(&mut app, "me");
        assert_eq!(app.destination.lookup.text(), "me");
        assert_eq!(app.origin.lookup.text(), "");
    }

    #[test]
    fn submit_requires_both_ends() {
        let (mut app, _task_rx) = app();

        press_with(&mut app, KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(
            app.status.as_deref(),
            Some("Choose both an origin and a destination")
        );

        app.route.set(RouteEnd::Origin, Some(city("Bogotá", "BOG", "Colombia")));
        app.route.set(RouteEnd::Destination, Some(city("Medellín", "MDE", "Colombia")));
        press_with(&mut app, KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(app.status.as_deref(), Some("Route BOG \u{2192} MDE submitted"));
    }

    #[test]
    fn dead_worker_does_not_leave_the_field_loading() {
        let (mut app, task_rx) = app();
        drop(task_rx);

        type_text(&mut app, "bog");
        let lookup = app.origin.lookup.id();
        let revision = app.origin.lookup.current_revision();
        dispatch_event(&mut app, AppEvent::LookupSettled { lookup, revision }).unwrap();
        assert!(app.origin.lookup.is_loading());

        pump(&mut app);

        assert!(!app.origin.lookup.is_loading());
        assert!(app.origin.lookup.options().is_empty());
        assert_eq!(app.status.as_deref(), Some("Lookup worker is not running"));
    }

    #[test]
    fn ctrl_c_requests_exit() {
        let (mut app, _task_rx) = app();

        press_with(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL);

        assert!(matches!(app.event_rx.try_recv(), Ok(AppEvent::ExitApplication)));
    }
}
