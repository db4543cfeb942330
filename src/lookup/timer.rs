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

//! Cancellable settle timer.
//!
//! A [`SettleTimer`] runs its callback once, after the delay, unless it is
//! dropped first. The timer thread waits on a cancellation channel rather
//! than sleeping, so dropping the timer disconnects the channel, wakes the
//! thread immediately and joins it. Once `drop` returns the callback can no
//! longer run.

use std::{
    io,
    sync::mpsc::{self, RecvTimeoutError, Sender},
    thread::{self, JoinHandle},
    time::Duration,
};

pub(crate) struct SettleTimer {
    cancel_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl SettleTimer {
    /// Starts the timer thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread cannot be spawned; `on_settle` is then
    /// dropped without running.
    pub(crate) fn start<F>(delay: Duration, on_settle: F) -> io::Result<Self>
    where
        F: FnOnce() + Send + 'static,
    {
        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();

        let handle = thread::Builder::new()
            .name("settle-timer".to_string())
            .spawn(move || {
                if let Err(RecvTimeoutError::Timeout) = cancel_rx.recv_timeout(delay) {
                    on_settle();
                }
            })?;

        Ok(Self {
            cancel_tx: Some(cancel_tx),
            handle: Some(handle),
        })
    }
}

impl Drop for SettleTimer {
    fn drop(&mut self) {
        // Disconnecting is enough to wake the waiting thread.
        self.cancel_tx.take();

        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
