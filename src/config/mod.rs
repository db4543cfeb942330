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

//! Application configuration.
//!
//! This module manages the application configuration file. Command-line
//! flags are layered on top with [`AppConfig::apply_args`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{cli::Args, lookup::LookupSettings};

const CONFIG_NAME: &str = "flyui";

pub(crate) const DEFAULT_ENDPOINT: &str = "https://staging.travelflight.aiop.com.co/api/airports/v2";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub(crate) version: u32,
    pub(crate) endpoint: String,
    pub(crate) min_query_len: usize,
    pub(crate) settle_delay_ms: u64,
    pub(crate) request_timeout_ms: u64,
    pub(crate) log_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            min_query_len: 2,
            settle_delay_ms: 300,
            request_timeout_ms: 10_000,
            log_dir: "logs".to_string(),
        }
    }
}

impl AppConfig {
    pub(crate) fn apply_args(mut self, args: &Args) -> Self {
        if let Some(endpoint) = &args.endpoint {
            self.endpoint = endpoint.clone();
        }
        if let Some(settle_ms) = args.settle_ms {
            self.settle_delay_ms = settle_ms;
        }
        if let Some(timeout_ms) = args.timeout_ms {
            self.request_timeout_ms = timeout_ms;
        }
        if let Some(log_dir) = &args.log_dir {
            self.log_dir = log_dir.clone();
        }
        self
    }

    pub(crate) fn lookup_settings(&self) -> LookupSettings {
        LookupSettings {
            min_query_len: self.min_query_len.max(1),
            settle_delay: Duration::from_millis(self.settle_delay_ms),
        }
    }

    pub(crate) fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms.max(1))
    }
}

pub(crate) fn load_config() -> AppConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn defaults_follow_the_canonical_lookup_contract() {
        let config = AppConfig::default();
        let settings = config.lookup_settings();

        assert_eq!(settings.min_query_len, 2);
        assert_eq!(settings.settle_delay, Duration::from_millis(300));
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn flags_override_file_values() {
        let args = Args::try_parse_from([
            "flyui",
            "--endpoint",
            "http://localhost:9000/cities",
            "--settle-ms",
            "150",
            "--timeout-ms",
            "2500",
            "--log-dir",
            "/tmp/flyui",
        ])
        .unwrap();

        let config = AppConfig::default().apply_args(&args);

        assert_eq!(config.endpoint, "http://localhost:9000/cities");
        assert_eq!(config.settle_delay_ms, 150);
        assert_eq!(config.request_timeout(), Duration::from_millis(2500));
        assert_eq!(config.log_dir, "/tmp/flyui");
    }

    #[test]
    fn missing_flags_keep_file_values() {
        let args = Args::try_parse_from(["flyui"]).unwrap();
        assert_eq!(AppConfig::default().apply_args(&args), AppConfig::default());
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"endpoint":"http://example.test/v2"}"#).unwrap();

        assert_eq!(config.endpoint, "http://example.test/v2");
        assert_eq!(config.settle_delay_ms, 300);
        assert_eq!(config.min_query_len, 2);
    }

    #[test]
    fn zero_threshold_still_requires_one_character() {
        let config = AppConfig {
            min_query_len: 0,
            ..AppConfig::default()
        };

        assert_eq!(config.lookup_settings().min_query_len, 1);
    }
}
