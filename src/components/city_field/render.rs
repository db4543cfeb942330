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
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
};

use crate::{
    components::CityField,
    lookup::LookupDelegate,
    model::RouteEnd,
    render::icons::{ICON_ARRIVAL, ICON_DEPARTURE, spinner},
    theme::Theme,
};

const SEARCHING_TEXT: &str = "Searching...";
const TYPE_TO_SEARCH_TEXT: &str = "Type to search...";
const NO_RESULTS_TEXT: &str = "No cities found";

impl<D: LookupDelegate> CityField<D> {
    /// Draws the bordered input line, with a spinner while a lookup is
    /// outstanding.
    pub(crate) fn draw_input(
        &self,
        f: &mut Frame,
        area: Rect,
        focused: bool,
        spinner_frame: usize,
        theme: &Theme,
    ) {
        let icon = match self.end {
            RouteEnd::Origin => ICON_DEPARTURE,
            RouteEnd::Destination => ICON_ARRIVAL,
        };

        let border_colour = if focused {
            theme.accent_colour
        } else {
            theme.border_colour
        };

        let block = Block::default()
            .title(format!(" {} {} ", icon, self.end.title()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_colour))
            .padding(Padding::horizontal(1));

        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(2)])
            .split(inner);

        let text = if self.input.value().is_empty() {
            Line::from(self.end.placeholder()).style(Style::default().fg(theme.placeholder_fg))
        } else {
            Line::from(self.input.value()).style(Style::default().fg(theme.text_fg))
        };

        // Keep the cursor in view on narrow terminals.
        let width = chunks[0].width.max(1) as usize;
        let scroll = self.input.visual_scroll(width);
        f.render_widget(Paragraph::new(text).scroll((0, scroll as u16)), chunks[0]);

        if self.lookup.is_loading() {
            f.render_widget(
                Paragraph::new(spinner(spinner_frame)).style(Style::default().fg(theme.accent_colour)),
                chunks[1],
            );
        }

        if focused {
            let cursor = self.input.visual_cursor().saturating_sub(scroll) as u16;
            f.set_cursor_position((chunks[0].x + cursor, chunks[0].y));
        }
    }

    /// Draws the option list, or the reason there is nothing to pick from.
    pub(crate) fn draw_options(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        if !self.lookup.is_open() {
            return;
        }

        let block = Block::default()
            .borders(Borders::LEFT | Borders::RIGHT | Borders::BOTTOM)
            .border_style(Style::default().fg(theme.border_colour))
            .padding(Padding::horizontal(1));

        let state = self.lookup.state();

        if state.options.is_empty() {
            let message = if state.loading {
                SEARCHING_TEXT
            } else if self.lookup.below_threshold() {
                TYPE_TO_SEARCH_TEXT
            } else {
                NO_RESULTS_TEXT
            };

            f.render_widget(
                Paragraph::new(message)
                    .style(Style::default().fg(theme.placeholder_fg))
                    .block(block),
                area,
            );
            return;
        }

        let selection = self.lookup.selection();

        // Options from the previous query are dimmed until the pending one
        // answers.
        let dim = |style: Style| {
            if state.loading {
                style.fg(theme.placeholder_fg)
            } else {
                style
            }
        };

        let items: Vec<ListItem> = state
            .options
            .iter()
            .map(|city| {
                let chosen = selection.is_some_and(|s| s.is_same_place(city));
                let name_style = if chosen {
                    Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.text_fg)
                };

                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(city.name.as_str(), dim(name_style)),
                        Span::styled(format!(" ({})", city.code), dim(Style::default().fg(theme.code_fg))),
                    ]),
                    Line::from(Span::styled(city.region(), dim(Style::default().fg(theme.country_fg)))),
                ])
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(theme.highlight_bg))
            .highlight_symbol("> ");

        f.render_stateful_widget(list, area, &mut self.list_state);
    }
}
