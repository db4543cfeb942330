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

use std::{sync::Arc, thread};

use anyhow::{Context, Result};
use tracing::debug;

use crate::{
    events::AppEvent,
    lookup::SearchRequest,
    tasks::{TaskContext, post_lookup_failure},
};

/// Runs one city lookup on its own thread.
///
/// Requests are not serialised: a slow reply must not delay a newer query,
/// and ordering is settled by the lookup's sequence check when the result
/// reaches the UI thread.
pub(super) fn lookup_cities(ctx: &TaskContext, request: SearchRequest) -> Result<()> {
    let directory = Arc::clone(&ctx.directory);
    let event_tx = ctx.event_tx.clone();
    let pending = request.clone();

    let spawned = thread::Builder::new()
        .name(format!("lookup-{}-{}", request.lookup.0, request.seq))
        .spawn(move || {
            let outcome = directory.search(&request.query);
            debug!(
                lookup = request.lookup.0,
                seq = request.seq,
                ok = outcome.is_ok(),
                "city lookup finished"
            );

            // The receiver is gone only when the app is shutting down.
            let _ = event_tx.send(AppEvent::LookupResolved { request, outcome });
        });

    if let Err(e) = &spawned {
        post_lookup_failure(&ctx.event_tx, pending, &format!("failed to spawn lookup thread: {}", e));
    }
    spawned.context("Failed to spawn lookup thread")?;

    Ok(())
}
