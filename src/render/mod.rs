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

mod footer;
pub(crate) mod icons;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{App, model::RouteEnd, render::footer::draw_footer};

pub(crate) fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();

    // Outer layout: header, fields, option list, footer
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let header = Line::from(vec![
        Span::styled(format!(" {} ", icons::ICON_PLANE), Style::default().fg(app.theme.accent_colour)),
        Span::styled("Flight Search", Style::default().add_modifier(Modifier::BOLD)),
    ]);
    f.render_widget(Paragraph::new(header), outer[0]);

    // Origin on the left, destination on the right; each field's list drops
    // down in its own column.
    let columns = [Constraint::Percentage(50), Constraint::Percentage(50)];
    let inputs = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(columns)
        .split(outer[1]);
    let lists = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(columns)
        .split(outer[2]);

    let focus = app.focus;
    let spinner_frame = app.spinner_frame;
    let theme = app.theme;

    for (end, column) in [(RouteEnd::Origin, 0), (RouteEnd::Destination, 1)] {
        let focused = end == focus;
        let field = app.field_mut(end);

        field.draw_input(f, inputs[column], focused, spinner_frame, &theme);
        if focused {
            field.draw_options(f, lists[column], &theme);
        }
    }

    draw_footer(f, outer[3], app);
}
