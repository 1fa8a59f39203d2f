use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::geo::GeoPoint;

/// Minimum Jaro-Winkler similarity for a code to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.6;

static BUILTIN: Lazy<AirportRegistry> = Lazy::new(|| AirportRegistry {
    airports: [
        ("HKG", "Hong Kong", 22.3193, 113.9365),
        ("PVG", "Shanghai", 31.1434, 121.8052),
        ("LAX", "Los Angeles", 33.9416, -118.4085),
        ("JFK", "New York", 40.6413, -73.7781),
        ("SIN", "Singapore", 1.3644, 103.9915),
        ("DXB", "Dubai", 25.2532, 55.3657),
        ("FRA", "Frankfurt", 50.0379, 8.5622),
        ("NRT", "Tokyo", 35.7647, 140.3864),
    ]
    .into_iter()
    .map(|(code, name, lat, lon)| {
        (
            code.to_string(),
            Airport::new(code, name, GeoPoint::new(lat, lon)),
        )
    })
    .collect(),
});

/// Airport known to the route optimizer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Airport {
    pub code: String,
    pub name: String,
    pub position: GeoPoint,
}

impl Airport {
    pub fn new(code: impl Into<String>, name: impl Into<String>, position: GeoPoint) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            position,
        }
    }
}

/// Read-only table of airports keyed by code.
#[derive(Debug, Clone)]
pub struct AirportRegistry {
    airports: BTreeMap<String, Airport>,
}

impl AirportRegistry {
    /// The fixed registry of cargo hubs served by the optimizer.
    pub fn builtin() -> &'static AirportRegistry {
        &BUILTIN
    }

    /// Build a custom registry. Codes are normalised to upper case.
    ///
    /// Routing needs at least two airports, and codes must be unique.
    pub fn new(airports: impl IntoIterator<Item = Airport>) -> Result<Self> {
        let mut table = BTreeMap::new();
        for mut airport in airports {
            airport.code = normalize_code(&airport.code);
            if airport.code.is_empty() {
                return Err(Error::invalid_registry("airport code cannot be empty"));
            }
            if table.contains_key(&airport.code) {
                return Err(Error::invalid_registry(format!(
                    "duplicate airport code {}",
                    airport.code
                )));
            }
            table.insert(airport.code.clone(), airport);
        }

        if table.len() < 2 {
            return Err(Error::invalid_registry(format!(
                "at least two airports are required, found {}",
                table.len()
            )));
        }

        Ok(Self { airports: table })
    }

    /// Lookup an airport, surfacing unknown codes as [`Error::UnknownAirport`].
    pub fn lookup(&self, code: &str) -> Result<&Airport> {
        self.get(code).ok_or_else(|| Error::UnknownAirport {
            code: code.trim().to_string(),
            suggestions: self.fuzzy_matches(code, 3),
        })
    }

    /// Case-insensitive lookup that returns `None` for unknown codes.
    pub fn get(&self, code: &str) -> Option<&Airport> {
        self.airports.get(&normalize_code(code))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// All airports, ordered by code.
    pub fn all(&self) -> impl Iterator<Item = &Airport> {
        self.airports.values()
    }

    /// Sorted list of airport codes.
    pub fn codes(&self) -> Vec<&str> {
        self.airports.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    /// Codes most similar to `code`, best match first.
    pub fn fuzzy_matches(&self, code: &str, limit: usize) -> Vec<String> {
        let needle = normalize_code(code);
        let mut scored: Vec<(f64, &str)> = self
            .airports
            .keys()
            .map(|candidate| (strsim::jaro_winkler(&needle, candidate), candidate.as_str()))
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, candidate)| candidate.to_string())
            .collect()
    }
}

fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}
