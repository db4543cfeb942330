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

use tracing::{debug, info};

use crate::{
    App,
    directory::LookupError,
    lookup::{LookupId, SearchRequest},
    model::City,
};

pub(super) fn handle_lookup_settled(app: &mut App, lookup: LookupId, revision: u64) {
    match app.field_by_lookup_mut(lookup) {
        Some(field) => {
            field.lookup.settle(revision);
        }
        None => debug!(lookup = lookup.0, "settle for a torn-down lookup ignored"),
    }
}

pub(super) fn handle_lookup_resolved(
    app: &mut App,
    request: SearchRequest,
    outcome: Result<Vec<City>, LookupError>,
) {
    match app.field_by_lookup_mut(request.lookup) {
        Some(field) => {
            if field.lookup.resolve(request.seq, outcome) {
                field.reset_highlight();
            }
        }
        None => debug!(
            lookup = request.lookup.0,
            seq = request.seq,
            "response for a torn-down lookup ignored"
        ),
    }
}

pub(super) fn handle_selection_changed(app: &mut App, lookup: LookupId, selection: Option<City>) {
    let Some(end) = app.field_by_lookup_mut(lookup).map(|f| f.end) else {
        return;
    };

    app.route.set(end, selection);
}

pub(super) fn handle_switch_focus(app: &mut App) {
    app.focused_field_mut().lookup.close();
    app.focus = app.focus.other();
    app.focused_field_mut().lookup.open();
}

pub(super) fn handle_reset_form(app: &mut App) {
    app.reset_form();
    app.status = Some("Form cleared".to_string());
}

pub(super) fn handle_submit_route(app: &mut App) {
    if app.route.is_complete() {
        info!(route = %app.route, "route submitted");
        app.status = Some(format!("Route {} submitted", app.route));
    } else {
        app.status = Some("Choose both an origin and a destination".to_string());
    }
}

pub(super) fn handle_error(app: &mut App, message: String) {
    app.status = Some(message);
}

pub(super) fn handle_tick(app: &mut App) {
    app.spinner_frame = app.spinner_frame.wrapping_add(1);
}
