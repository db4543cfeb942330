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

use crossterm::event::{Event, KeyCode, KeyModifiers};
use tui_input::backend::crossterm::EventHandler;

use crate::{components::CityField, lookup::LookupDelegate};

impl<D: LookupDelegate> CityField<D> {
    pub(crate) fn process_event(&mut self, event: &Event) {
        let Event::Key(key_event) = event else {
            return;
        };

        match (key_event.code, key_event.modifiers) {
            (KeyCode::Down, _) | (KeyCode::Char('n'), KeyModifiers::CONTROL) => self.highlight_next(),
            (KeyCode::Up, _) | (KeyCode::Char('p'), KeyModifiers::CONTROL) => self.highlight_previous(),

            (KeyCode::Enter, _) => self.commit_highlighted(),
            (KeyCode::Esc, _) => self.lookup.close(),
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => self.clear(),

            _ => {
                // Delegate everything else to the managed input component,
                // and only treat it as an edit if the text actually changed.
                let before = self.input.value().to_string();
                self.input.handle_event(event);

                if self.input.value() != before {
                    self.reset_highlight();
                    self.lookup.input_changed(self.input.value());
                }
            }
        }
    }
}
