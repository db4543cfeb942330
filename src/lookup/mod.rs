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

//! # Debounced remote city lookup.
//!
//! [`CityLookup`] turns a stream of text edits into a stream of
//! `{loading, options}` states for a field to render.
//!
//! ## Lifecycle of a query
//!
//! 1. **Edit**: [`CityLookup::input_changed`] stores the text immediately and
//!    (re)starts the settle timer. Every edit bumps the *revision*.
//! 2. **Settle**: when the timer fires, the delegate posts the revision back
//!    to the UI thread, which calls [`CityLookup::settle`]. A settle for any
//!    revision but the current one is ignored, so a burst of keystrokes
//!    produces at most one request.
//! 3. **Dispatch**: settling allocates the next *sequence number* and hands
//!    a [`SearchRequest`] to the delegate. That request becomes the only one
//!    whose response may be applied.
//! 4. **Resolve**: [`CityLookup::resolve`] applies a response only if its
//!    sequence number is still the awaited one. Late responses from
//!    superseded requests are dropped, whatever order the network delivers
//!    them in.
//!
//! All methods run on the UI thread. The only other threads involved are the
//! timer thread, which owns nothing but a delegate clone, and the request
//! threads of the task worker.

mod timer;

pub(crate) use timer::SettleTimer;

use std::{io, time::Duration};

use tracing::{debug, info, warn};

use crate::{directory::LookupError, model::City};

/// Identifies one lookup instance for the lifetime of the process.
///
/// Ids are never reused, so a response addressed to a torn-down lookup can
/// not be mistaken for one addressed to its replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct LookupId(pub(crate) u64);

/// One outstanding lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SearchRequest {
    pub(crate) lookup: LookupId,
    pub(crate) seq: u64,
    pub(crate) query: String,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct LookupSettings {
    pub(crate) min_query_len: usize,
    pub(crate) settle_delay: Duration,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            min_query_len: 2,
            settle_delay: Duration::from_millis(300),
        }
    }
}

/// What a field renders.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LookupState<'a> {
    pub(crate) loading: bool,
    pub(crate) options: &'a [City],
}

/// Where a lookup sends its side effects.
///
/// The timer thread holds its own clone, so implementations must be cheap to
/// clone and safe to move across threads.
pub(crate) trait LookupDelegate: Clone + Send + 'static {
    /// The settle timer for `revision` elapsed. Called from the timer thread.
    fn on_settled(&self, lookup: LookupId, revision: u64);

    /// A settled query must be sent to the directory.
    fn on_dispatch(&self, request: SearchRequest);

    /// The user committed to a city, or cleared the field.
    fn on_selection_changed(&self, lookup: LookupId, selection: Option<City>);
}

pub(crate) struct CityLookup<D: LookupDelegate> {
    id: LookupId,
    settings: LookupSettings,
    delegate: D,

    text: String,
    options: Vec<City>,
    selection: Option<City>,
    open: bool,

    revision: u64,
    last_seq: u64,
    awaiting: Option<u64>,
    timer: Option<SettleTimer>,

    torn_down: bool,
}

impl<D: LookupDelegate> CityLookup<D> {
    pub(crate) fn new(id: LookupId, settings: LookupSettings, delegate: D) -> Self {
        Self {
            id,
            settings,
            delegate,
            text: String::new(),
            options: vec![],
            selection: None,
            open: false,
            revision: 0,
            last_seq: 0,
            awaiting: None,
            timer: None,
            torn_down: false,
        }
    }

    pub(crate) fn id(&self) -> LookupId {
        self.id
    }

    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn options(&self) -> &[City] {
        &self.options
    }

    pub(crate) fn selection(&self) -> Option<&City> {
        self.selection.as_ref()
    }

    /// The revision a settle must carry to be acted upon.
    pub(crate) fn current_revision(&self) -> u64 {
        self.revision
    }

    pub(crate) fn is_loading(&self) -> bool {
        self.awaiting.is_some()
    }

    pub(crate) fn is_open(&self) -> bool {
        self.open
    }

    pub(crate) fn state(&self) -> LookupState<'_> {
        LookupState {
            loading: self.is_loading(),
            options: &self.options,
        }
    }

    /// True when the text is too short to be worth a request.
    pub(crate) fn below_threshold(&self) -> bool {
        self.text.chars().count() < self.settings.min_query_len
    }

    pub(crate) fn open(&mut self) {
        if !self.torn_down {
            self.open = true;
        }
    }

    pub(crate) fn close(&mut self) {
        self.open = false;
    }

    /// Records a raw edit of the field's text.
    pub(crate) fn input_changed(&mut self, text: &str) {
        if self.torn_down {
            return;
        }

        self.text = text.to_string();
        self.open = true;
        self.revision += 1;

        if self.selection.take().is_some() {
            self.delegate.on_selection_changed(self.id, None);
        }

        if self.below_threshold() {
            self.timer = None;
            self.awaiting = None;
            self.options.clear();
            return;
        }

        // Cancel the running timer before arming its replacement.
        self.timer = None;

        let delegate = self.delegate.clone();
        let id = self.id;
        let revision = self.revision;

        let started = SettleTimer::start(self.settings.settle_delay, move || {
            delegate.on_settled(id, revision);
        });
        self.arm_settle(started, revision);
    }

    /// Keeps a started settle timer. Without one the query settles at once,
    /// so an edit is never left waiting for a timer that does not exist.
    fn arm_settle(&mut self, started: io::Result<SettleTimer>, revision: u64) {
        match started {
            Ok(timer) => self.timer = Some(timer),
            Err(e) => {
                self.timer = None;
                warn!(lookup = self.id.0, "failed to start settle timer, settling now: {}", e);
                self.delegate.on_settled(self.id, revision);
            }
        }
    }

    /// The settle timer for `revision` fired. Returns the dispatched request,
    /// if any.
    pub(crate) fn settle(&mut self, revision: u64) -> Option<SearchRequest> {
        if self.torn_down || revision != self.revision {
            return None;
        }

        self.timer = None;

        if self.below_threshold() {
            return None;
        }

        self.last_seq += 1;
        self.awaiting = Some(self.last_seq);

        let request = SearchRequest {
            lookup: self.id,
            seq: self.last_seq,
            query: self.text.clone(),
        };

        debug!(lookup = self.id.0, seq = request.seq, query = %request.query, "dispatching city lookup");
        self.delegate.on_dispatch(request.clone());

        Some(request)
    }

    /// Applies the outcome of request `seq`. Returns whether it was applied.
    ///
    /// Failures are logged and leave an empty option list; they never reach
    /// the caller.
    pub(crate) fn resolve(&mut self, seq: u64, outcome: Result<Vec<City>, LookupError>) -> bool {
        if self.torn_down || self.awaiting != Some(seq) {
            debug!(lookup = self.id.0, seq, awaiting = ?self.awaiting, "dropping stale city lookup response");
            return false;
        }

        self.awaiting = None;

        match outcome {
            Ok(cities) => self.options = cities,
            Err(e) => {
                warn!(lookup = self.id.0, seq, query = %self.text, "city lookup failed: {}", e);
                self.options.clear();
            }
        }

        true
    }

    /// Commits to the option at `index` of the current result set.
    ///
    /// Nothing can be selected while a newer query is outstanding, since the
    /// options on screen still belong to the previous one.
    pub(crate) fn select(&mut self, index: usize) -> Option<&City> {
        if self.torn_down || self.is_loading() {
            return None;
        }

        let city = self.options.get(index)?.clone();

        self.text = city.label();
        self.open = false;
        self.revision += 1;
        self.timer = None;
        self.awaiting = None;

        info!(
            lookup = self.id.0,
            code = %city.code,
            city_id = ?city.id,
            timezone = ?city.timezone,
            "city selected"
        );
        self.delegate.on_selection_changed(self.id, Some(city.clone()));
        self.selection = Some(city);

        self.selection.as_ref()
    }

    /// Empties the field: text, options and selection.
    pub(crate) fn clear(&mut self) {
        if self.torn_down {
            return;
        }

        self.text.clear();
        self.options.clear();
        self.selection = None;
        self.open = false;
        self.revision += 1;
        self.timer = None;
        self.awaiting = None;

        self.delegate.on_selection_changed(self.id, None);
    }

    /// Stops the lookup for good: the pending timer is cancelled and every
    /// later edit, settle or response is ignored.
    pub(crate) fn teardown(&mut self) {
        self.timer = None;
        self.awaiting = None;
        self.open = false;
        self.torn_down = true;
    }
}
