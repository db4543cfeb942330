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

//! City typeahead field.
//!
//! A text input over a [`CityLookup`], with the option list drawn beneath it.
//! The input widget is the editing buffer; the lookup is the source of truth
//! for the query, so the buffer is re-synced whenever the lookup rewrites the
//! text (selection, clear).

mod event;
mod render;

use ratatui::widgets::ListState;
use tui_input::Input;

use crate::{
    events::AppChannels,
    lookup::{CityLookup, LookupDelegate},
    model::RouteEnd,
};

pub(crate) struct CityField<D: LookupDelegate = AppChannels> {
    pub(crate) end: RouteEnd,
    pub(crate) lookup: CityLookup<D>,
    pub(crate) input: Input,
    pub(crate) list_state: ListState,
}

impl<D: LookupDelegate> CityField<D> {
    pub(crate) fn new(end: RouteEnd, lookup: CityLookup<D>) -> Self {
        Self {
            end,
            lookup,
            input: Input::default(),
            list_state: ListState::default(),
        }
    }

    /// Forgets the highlighted option, e.g. after the result set changed.
    pub(crate) fn reset_highlight(&mut self) {
        self.list_state.select(None);
    }

    fn highlight_next(&mut self) {
        self.lookup.open();

        let len = self.lookup.options().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => if i >= len - 1 { 0 } else { i + 1 },
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn highlight_previous(&mut self) {
        self.lookup.open();

        let len = self.lookup.options().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => if i == 0 { len - 1 } else { i - 1 },
            None => len - 1,
        };
        self.list_state.select(Some(i));
    }

    /// Selects the highlighted option, or the first one when nothing is
    /// highlighted.
    fn commit_highlighted(&mut self) {
        if !self.lookup.is_open() {
            return;
        }

        let index = self.list_state.selected().unwrap_or(0);
        if self.lookup.select(index).is_some() {
            self.sync_input();
            self.reset_highlight();
        }
    }

    fn clear(&mut self) {
        self.lookup.clear();
        self.input.reset();
        self.reset_highlight();
    }

    fn sync_input(&mut self) {
        self.input = Input::new(self.lookup.text().to_string());
    }
}
