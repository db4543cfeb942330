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

//! Remote city directory.
//!
//! The directory is the only collaborator that leaves the process: it posts a
//! query to the airport search endpoint and maps the reply onto [`City`]
//! records. It is a trait so the task worker can be driven by an in-memory
//! directory in tests.

pub(crate) mod wire;

use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::model::City;

const USER_AGENT: &str = concat!("flyui/", env!("CARGO_PKG_VERSION"));

/// Every way a lookup can fail. Callers treat all of them as an empty result
/// set.
#[derive(Debug, Error)]
pub(crate) enum LookupError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("endpoint returned HTTP {0}")]
    Status(u16),

    #[error("unexpected response body: {0}")]
    Malformed(String),
}

pub(crate) trait CityDirectory: Send + Sync {
    fn search(&self, query: &str) -> Result<Vec<City>, LookupError>;
}

/// [`CityDirectory`] backed by the airport search HTTP endpoint.
pub(crate) struct HttpCityDirectory {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpCityDirectory {
    pub(crate) fn new(endpoint: &str, timeout: Duration) -> Result<Self, LookupError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| LookupError::Transport(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }
}

impl CityDirectory for HttpCityDirectory {
    fn search(&self, query: &str) -> Result<Vec<City>, LookupError> {
        debug!(endpoint = %self.endpoint, query, "posting city search");

        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(wire::encode_query(query)?)
            .send()
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .map_err(|e| LookupError::Transport(format!("failed to read response: {}", e)))?;

        wire::parse_cities(&body)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io::{Read, Write},
        net::{TcpListener, TcpStream},
        thread::{self, JoinHandle},
    };

    use super::*;

    /// Serves exactly one request with a canned reply and hands back the raw
    /// request it received.
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            let reply = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(reply.as_bytes()).unwrap();
            request
        });

        (format!("http://{}/api/airports/v2", addr), handle)
    }

    fn read_request(stream: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];

        loop {
            let n = stream.read(&mut chunk).unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let headers = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
                let content_length = headers
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);

                if buf.len() >= end + 4 + content_length {
                    break;
                }
            }
        }

        String::from_utf8_lossy(&buf).into_owned()
    }

    fn directory(endpoint: &str) -> HttpCityDirectory {
        HttpCityDirectory::new(endpoint, Duration::from_millis(500)).unwrap()
    }

    #[test]
    fn posts_the_query_and_parses_cities() {
        let (endpoint, server) = serve_once(
            "200 OK",
            r#"{"cities":[{"nameCity":"Bogotá","codeIataCity":"BOG","cityId":1,"new_country":{"nameCountry":"Colombia"}}]}"#,
        );

        let cities = directory(&endpoint).search("bog").unwrap();
        let request = server.join().unwrap();

        assert!(request.starts_with("POST /api/airports/v2 "));
        assert!(request.to_ascii_lowercase().contains("content-type: application/json"));
        assert!(request.ends_with(r#"{"code":"bog"}"#));

        assert_eq!(cities.len(), 1);
        assert_eq!(cities[0].label(), "Bogotá (BOG)");
        assert_eq!(cities[0].country, "Colombia");
    }

    #[test]
    fn error_status_is_reported() {
        let (endpoint, server) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#);

        let result = directory(&endpoint).search("bog");
        server.join().unwrap();

        assert!(matches!(result, Err(LookupError::Status(500))));
    }

    #[test]
    fn unexpected_body_is_malformed() {
        let (endpoint, server) = serve_once("200 OK", r#"{"message":"no cities here"}"#);

        let result = directory(&endpoint).search("bog");
        server.join().unwrap();

        assert!(matches!(result, Err(LookupError::Malformed(_))));
    }

    #[test]
    fn unreachable_endpoint_is_a_transport_failure() {
        let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();

        let result = directory(&format!("http://{}/", addr)).search("bog");

        assert!(matches!(result, Err(LookupError::Transport(_))));
    }

    #[test]
    fn stalled_endpoint_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let _ = read_request(&mut stream);
            thread::sleep(Duration::from_secs(3));
        });

        let directory = HttpCityDirectory::new(&format!("http://{}/", addr), Duration::from_millis(200)).unwrap();
        let result = directory.search("bog");

        assert!(matches!(result, Err(LookupError::Transport(_))));
    }
}
