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

//! Wire format of the airport search endpoint.
//!
//! The request body is `{"code": "<query>"}`. The response must carry a
//! `cities` array whose records have at least `nameCity` and `codeIataCity`;
//! anything else is rejected as [`LookupError::Malformed`] and the caller
//! sees an empty result set.

use serde::{Deserialize, Serialize};

use crate::{directory::LookupError, model::City};

const UNKNOWN_COUNTRY: &str = "Unknown";

#[derive(Debug, Serialize)]
pub(crate) struct SearchBody<'a> {
    pub(crate) code: &'a str,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    cities: Vec<CityRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CityRecord {
    name_city: String,
    code_iata_city: String,
    #[serde(default)]
    city_id: Option<i64>,
    #[serde(default)]
    timezone: Option<String>,
    #[serde(default, rename = "new_country")]
    country: Option<CountryRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CountryRecord {
    #[serde(default)]
    name_country: Option<String>,
}

impl From<CityRecord> for City {
    fn from(record: CityRecord) -> Self {
        let country = record
            .country
            .and_then(|c| c.name_country)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNKNOWN_COUNTRY.to_string());

        City {
            id: record.city_id,
            name: record.name_city,
            code: record.code_iata_city,
            country,
            timezone: record.timezone,
        }
    }
}

pub(crate) fn encode_query(query: &str) -> Result<String, LookupError> {
    serde_json::to_string(&SearchBody { code: query })
        .map_err(|e| LookupError::Malformed(e.to_string()))
}

/// Maps a response body onto the ordered result set, preserving the
/// endpoint's ordering.
pub(crate) fn parse_cities(body: &[u8]) -> Result<Vec<City>, LookupError> {
    let response: SearchResponse =
        serde_json::from_slice(body).map_err(|e| LookupError::Malformed(e.to_string()))?;

    Ok(response.cities.into_iter().map(City::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_documented_shape() {
        let body = r#"{"cities":[{"nameCity":"Bogotá","codeIataCity":"BOG","cityId":1,"new_country":{"nameCountry":"Colombia"}}]}"#.as_bytes();

        let cities = parse_cities(body).unwrap();

        assert_eq!(cities.len(), 1);
        assert_eq!(cities[0].name, "Bogotá");
        assert_eq!(cities[0].code, "BOG");
        assert_eq!(cities[0].id, Some(1));
        assert_eq!(cities[0].country, "Colombia");
        assert_eq!(cities[0].label(), "Bogotá (BOG)");
    }

    #[test]
    fn keeps_endpoint_ordering_and_optional_fields() {
        let body = br#"{"cities":[
            {"nameCity":"London","codeIataCity":"LON","cityId":7,"timezone":"Europe/London","new_country":{"nameCountry":"United Kingdom"}},
            {"nameCity":"London","codeIataCity":"YXU","new_country":{"nameCountry":"Canada"}},
            {"nameCity":"Londrina","codeIataCity":"LDB"}
        ]}"#;

        let cities = parse_cities(body).unwrap();
        let codes: Vec<&str> = cities.iter().map(|c| c.code.as_str()).collect();

        assert_eq!(codes, vec!["LON", "YXU", "LDB"]);
        assert_eq!(cities[0].timezone.as_deref(), Some("Europe/London"));
        assert_eq!(cities[1].id, None);
        assert_eq!(cities[2].country, "Unknown");
    }

    #[test]
    fn empty_list_is_a_valid_result() {
        assert!(parse_cities(br#"{"cities":[]}"#).unwrap().is_empty());
    }

    #[test]
    fn unexpected_shapes_are_malformed() {
        let bodies: [&[u8]; 5] = [
            b"not json at all",
            br#"{"airports":[]}"#,
            br#"{"cities":null}"#,
            br#"{"cities":[{"nameCity":"Lima"}]}"#,
            br#"[{"nameCity":"Lima","codeIataCity":"LIM"}]"#,
        ];

        for body in bodies {
            assert!(
                matches!(parse_cities(body), Err(LookupError::Malformed(_))),
                "expected malformed for {}",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn request_body_carries_the_query_as_code() {
        assert_eq!(encode_query("bog").unwrap(), r#"{"code":"bog"}"#);
        assert_eq!(encode_query("a \"b\"").unwrap(), r#"{"code":"a \"b\""}"#);
    }
}
