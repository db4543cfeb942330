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

//! Session logging.
//!
//! The terminal belongs to the TUI, so log output goes to a file only:
//! `<log_dir>/flyui.log`, cleared at the start of every session. The filter
//! comes from `RUST_LOG` when set.

use std::{fs, io, path::Path};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub(crate) const LOG_FILE: &str = "flyui.log";

/// Keeps the background log writer alive; dropping it flushes the file.
pub(crate) struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Prepares the log directory and truncates the previous session's file.
fn prepare_log_file(log_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(log_dir)?;
    fs::write(log_dir.join(LOG_FILE), "")
}

pub(crate) fn init_logging(log_dir: &str, debug: bool) -> io::Result<LoggingGuard> {
    let log_dir = Path::new(log_dir);
    prepare_log_file(log_dir)?;

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_target(debug);

    let default_level = if debug { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .map_err(io::Error::other)?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_missing_directories() {
        let root = tempfile::tempdir().unwrap();
        let log_dir = root.path().join("nested").join("logs");

        prepare_log_file(&log_dir).unwrap();

        assert!(log_dir.join(LOG_FILE).exists());
    }

    #[test]
    fn truncates_the_previous_session() {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join(LOG_FILE), "yesterday's noise").unwrap();

        prepare_log_file(root.path()).unwrap();

        assert_eq!(fs::read_to_string(root.path().join(LOG_FILE)).unwrap(), "");
    }
}
