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

//! Route assembly.
//!
//! The route is the consumer of the lookup fields' selection callbacks: it
//! only ever sees the city each field committed to, never the option lists.

use std::fmt;

use crate::model::City;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RouteEnd {
    Origin,
    Destination,
}

impl RouteEnd {
    pub(crate) fn other(&self) -> RouteEnd {
        match self {
            RouteEnd::Origin => RouteEnd::Destination,
            RouteEnd::Destination => RouteEnd::Origin,
        }
    }

    pub(crate) fn title(&self) -> &'static str {
        match self {
            RouteEnd::Origin => "Origin",
            RouteEnd::Destination => "Destination",
        }
    }

    pub(crate) fn placeholder(&self) -> &'static str {
        match self {
            RouteEnd::Origin => "Where are you flying from?",
            RouteEnd::Destination => "Where are you flying to?",
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct Route {
    origin: Option<City>,
    destination: Option<City>,
}

impl Route {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set(&mut self, end: RouteEnd, city: Option<City>) {
        match end {
            RouteEnd::Origin => self.origin = city,
            RouteEnd::Destination => self.destination = city,
        }
    }

    pub(crate) fn get(&self, end: RouteEnd) -> Option<&City> {
        match end {
            RouteEnd::Origin => self.origin.as_ref(),
            RouteEnd::Destination => self.destination.as_ref(),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.origin = None;
        self.destination = None;
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.get(RouteEnd::Origin).is_some() && self.get(RouteEnd::Destination).is_some()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = |end: RouteEnd| self.get(end).map_or("???", |c| c.code.as_str());

        write!(
            f,
            "{} \u{2192} {}",
            code(RouteEnd::Origin),
            code(RouteEnd::Destination)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::city;

    #[test]
    fn route_tracks_each_end_independently() {
        let mut route = Route::new();
        route.set(RouteEnd::Origin, Some(city("Bogotá", "BOG", "Colombia")));
        assert!(!route.is_complete());
        assert_eq!(route.to_string(), "BOG \u{2192} ???");

        route.set(RouteEnd::Destination, Some(city("Medellín", "MDE", "Colombia")));
        assert!(route.is_complete());
        assert_eq!(route.to_string(), "BOG \u{2192} MDE");

        route.set(RouteEnd::Origin, None);
        assert!(route.get(RouteEnd::Origin).is_none());
        assert_eq!(route.get(RouteEnd::Destination).map(|c| c.code.as_str()), Some("MDE"));
    }

    #[test]
    fn other_end_flips() {
        assert_eq!(RouteEnd::Origin.other(), RouteEnd::Destination);
        assert_eq!(RouteEnd::Destination.other(), RouteEnd::Origin);
    }

    #[test]
    fn clear_forgets_both_ends() {
        let mut route = Route::new();
        route.set(RouteEnd::Origin, Some(city("Bogotá", "BOG", "Colombia")));
        route.set(RouteEnd::Destination, Some(city("Lima", "LIM", "Peru")));
        route.clear();

        assert!(route.get(RouteEnd::Origin).is_none());
        assert!(route.get(RouteEnd::Destination).is_none());
    }
}
