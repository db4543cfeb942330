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

//! Background task processing.
//!
//! Work that would block the UI thread is posted to the task worker as an
//! [`AppTask`]. Results come back to the event loop as [`AppEvent`]s.

mod handlers;

use std::{
    sync::{
        Arc,
        mpsc::{Receiver, Sender},
    },
    thread,
};

use anyhow::Result;
use tracing::error;

use crate::{
    directory::{CityDirectory, LookupError},
    events::AppEvent,
    lookup::SearchRequest,
};

#[derive(Debug)]
pub(crate) enum AppTask {
    LookupCities(SearchRequest),
}

/// Spawns the worker thread that serves [`AppTask`]s until the task channel
/// closes.
pub(crate) fn spawn_task_worker(
    directory: Arc<dyn CityDirectory>,
    task_rx: Receiver<AppTask>,
    event_tx: Sender<AppEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let ctx = TaskContext {
            directory,
            event_tx,
        };

        while let Ok(task) = task_rx.recv() {
            if let Err(e) = handle_task(task, &ctx) {
                error!("task failed: {:#}", e);
                let _ = ctx.event_tx.send(AppEvent::Error(e.to_string()));
            }
        }
    })
}

pub(crate) struct TaskContext {
    directory: Arc<dyn CityDirectory>,
    event_tx: Sender<AppEvent>,
}

/// Resolves `request` as a transport failure when it could not be run at
/// all, so the lookup stops waiting for it.
pub(crate) fn post_lookup_failure(event_tx: &Sender<AppEvent>, request: SearchRequest, reason: &str) {
    let _ = event_tx.send(AppEvent::LookupResolved {
        request,
        outcome: Err(LookupError::Transport(reason.to_string())),
    });
}

fn handle_task(task: AppTask, ctx: &TaskContext) -> Result<()> {
    match task {
        AppTask::LookupCities(request) => handlers::lookup_cities(ctx, request),
    }
}
