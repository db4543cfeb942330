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

//! Terminal background control via OSC escape sequences.
//!
//! Terminals that do not understand OSC 11/111 simply ignore them.

use std::io::{self, Write};

const OSC_SET_BG: &str = "\x1b]11;";
const OSC_RESET_BG: &str = "\x1b]111";
const BEL: &str = "\x07";

fn set_bg_sequence(hex_color: &str) -> String {
    format!("{OSC_SET_BG}{hex_color}{BEL}")
}

/// Paints the whole terminal window in the theme background, so the form is
/// not framed by the user's own background colour.
pub(crate) fn set_terminal_bg(hex_color: &str) {
    write_sequence(&set_bg_sequence(hex_color));
}

/// Puts the user's own background colour back.
pub(crate) fn reset_terminal_bg() {
    write_sequence(&format!("{OSC_RESET_BG}{BEL}"));
}

fn write_sequence(sequence: &str) {
    let mut stdout = io::stdout();
    // Best effort, a terminal we cannot write to has nothing to restore.
    let _ = stdout.write_all(sequence.as_bytes()).and_then(|_| stdout.flush());
}
