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

use clap::Parser;

/// Terminal flight search: pick an origin and a destination city.
#[derive(Parser, Debug)]
#[command(name = "flyui", version, about)]
pub(crate) struct Args {
    /// Airport search endpoint (overrides the config file)
    #[arg(long)]
    pub(crate) endpoint: Option<String>,

    /// Milliseconds the input must stay unchanged before a lookup is sent
    #[arg(long)]
    pub(crate) settle_ms: Option<u64>,

    /// Lookup request timeout in milliseconds
    #[arg(long)]
    pub(crate) timeout_ms: Option<u64>,

    /// Directory for the session log file
    #[arg(long)]
    pub(crate) log_dir: Option<String>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long)]
    pub(crate) debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_flag_defaults_off() {
        let args = Args::try_parse_from(["flyui"]).unwrap();
        assert!(!args.debug);
        assert!(args.endpoint.is_none());

        let args = Args::try_parse_from(["flyui", "--debug"]).unwrap();
        assert!(args.debug);
    }

    #[test]
    fn rejects_non_numeric_delays() {
        assert!(Args::try_parse_from(["flyui", "--settle-ms", "soon"]).is_err());
    }
}
