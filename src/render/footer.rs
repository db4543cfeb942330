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

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::Paragraph,
};

use crate::App;

const KEY_HELP: &str = "Tab switch \u{b7} \u{2191}\u{2193} choose \u{b7} Enter select \u{b7} Ctrl+U clear \u{b7} Ctrl+R reset \u{b7} Ctrl+C quit";

pub(crate) fn draw_footer(f: &mut Frame, area: Rect, app: &App) {
    let container = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(24)])
        .horizontal_margin(1)
        .split(area);

    let style = Style::default().bg(app.theme.status_bar_bg);

    let message = app.status.as_deref().unwrap_or(KEY_HELP);
    f.render_widget(
        Paragraph::new(message).style(style.fg(app.theme.text_fg)),
        container[0],
    );

    let route = if app.route.is_complete() {
        format!("{}  Ctrl+S", app.route)
    } else {
        app.route.to_string()
    };
    f.render_widget(
        Paragraph::new(route)
            .alignment(Alignment::Right)
            .style(style.fg(app.theme.accent_colour).add_modifier(Modifier::BOLD)),
        container[1],
    );
}
