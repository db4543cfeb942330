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

//! Domain models and core data structures.
//!
//! This module defines the location records offered by the city lookup and
//! the route assembled from the origin and destination selections.

pub(crate) mod route;

pub(crate) use route::{Route, RouteEnd};

/// A city served by at least one airport, as returned by the airport search.
#[derive(Debug, Clone)]
pub(crate) struct City {
    pub(crate) id: Option<i64>,
    pub(crate) name: String,
    pub(crate) code: String,
    pub(crate) country: String,
    pub(crate) timezone: Option<String>,
}

impl City {
    /// The canonical label shown in the input once a city is selected, e.g.
    /// `Bogotá (BOG)`.
    pub(crate) fn label(&self) -> String {
        format!("{} ({})", self.name, self.code)
    }

    /// The secondary line of a list entry: the country, and the timezone when
    /// the directory knows it.
    pub(crate) fn region(&self) -> String {
        match &self.timezone {
            Some(tz) => format!("{} \u{b7} {}", self.country, tz),
            None => self.country.clone(),
        }
    }

    /// Two records describe the same place when their IATA codes match.
    pub(crate) fn is_same_place(&self, other: &City) -> bool {
        self.code.eq_ignore_ascii_case(&other.code)
    }
}

#[cfg(test)]
pub(crate) fn city(name: &str, code: &str, country: &str) -> City {
    City {
        id: None,
        name: name.to_string(),
        code: code.to_string(),
        country: country.to_string(),
        timezone: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_adds_the_timezone_when_known() {
        let mut bogota = city("Bogotá", "BOG", "Colombia");
        assert_eq!(bogota.region(), "Colombia");

        bogota.timezone = Some("America/Bogota".to_string());
        assert_eq!(bogota.region(), "Colombia \u{b7} America/Bogota");
    }

    #[test]
    fn label_is_name_then_code() {
        assert_eq!(city("Bogotá", "BOG", "Colombia").label(), "Bogotá (BOG)");
    }

    #[test]
    fn same_place_compares_codes_only() {
        let a = city("Bogotá", "BOG", "Colombia");
        let b = city("Bogota", "bog", "CO");
        let c = city("Medellín", "MDE", "Colombia");

        assert!(a.is_same_place(&b));
        assert!(!a.is_same_place(&c));
    }
}
