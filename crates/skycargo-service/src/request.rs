//! Request types and validation for HTTP endpoints.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use skycargo_lib::{FlightLevel, DEFAULT_ARC_SAMPLES};

use crate::ProblemDetails;

const SEVERITY_RANGE: RangeInclusive<f64> = 0.0..=50.0;
const FUEL_EFFICIENCY_RANGE: RangeInclusive<f64> = 0.5..=2.0;
const CARGO_LOAD_RANGE: RangeInclusive<f64> = 1.0..=2.0;
const ALTITUDE_RANGE: RangeInclusive<u16> = 300..=410;
const SAMPLES_RANGE: RangeInclusive<usize> = 1..=1000;

/// Validation trait for request types.
pub trait Validate {
    /// Validate the request; `request_id` fills the problem's `instance`.
    ///
    /// Returns a boxed `ProblemDetails` to avoid large `Result::Err` variants.
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

/// Body of `POST /api/v1/route`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteRequest {
    pub origin: String,
    pub destination: String,

    #[serde(default)]
    pub use_real_weather: bool,

    /// Simulated weather penalty in percent.
    #[serde(default = "default_severity")]
    pub base_weather_severity: f64,

    /// Fuel burn in kg per km.
    #[serde(default = "default_fuel_efficiency")]
    pub fuel_efficiency: f64,

    #[serde(default = "default_cargo_load")]
    pub cargo_load: f64,

    /// Flight level in hundreds of feet, e.g. 350.
    #[serde(default = "default_altitude")]
    pub cruise_altitude: u16,

    #[serde(default)]
    pub algorithm: RouteAlgorithm,

    #[serde(default = "default_samples")]
    pub samples_per_segment: usize,
}

fn default_severity() -> f64 {
    20.0
}

fn default_fuel_efficiency() -> f64 {
    1.0
}

fn default_cargo_load() -> f64 {
    1.2
}

fn default_altitude() -> u16 {
    FlightLevel::default().0
}

fn default_samples() -> usize {
    DEFAULT_ARC_SAMPLES
}

/// Supported routing algorithms.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RouteAlgorithm {
    /// Dijkstra's algorithm (default).
    #[default]
    Dijkstra,
    /// A* search with a great-circle heuristic.
    AStar,
}

impl From<RouteAlgorithm> for skycargo_lib::RouteAlgorithm {
    fn from(value: RouteAlgorithm) -> Self {
        match value {
            RouteAlgorithm::Dijkstra => skycargo_lib::RouteAlgorithm::Dijkstra,
            RouteAlgorithm::AStar => skycargo_lib::RouteAlgorithm::AStar,
        }
    }
}

impl RouteRequest {
    /// Convert to the library's request type.
    pub fn to_lib_request(&self) -> skycargo_lib::RouteRequest {
        skycargo_lib::RouteRequest {
            use_real_weather: self.use_real_weather,
            base_weather_severity: self.base_weather_severity,
            fuel_efficiency: self.fuel_efficiency,
            cargo_load: self.cargo_load,
            cruise_altitude: FlightLevel(self.cruise_altitude),
            algorithm: self.algorithm.into(),
            samples_per_segment: self.samples_per_segment,
            ..skycargo_lib::RouteRequest::new(self.origin.clone(), self.destination.clone())
        }
    }
}

fn out_of_range<T: std::fmt::Display>(
    field: &str,
    range: &RangeInclusive<T>,
    request_id: &str,
) -> Box<ProblemDetails> {
    Box::new(ProblemDetails::bad_request(
        format!(
            "The '{}' field must be between {} and {}",
            field,
            range.start(),
            range.end()
        ),
        request_id,
    ))
}

impl Validate for RouteRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        if self.origin.trim().is_empty() {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'origin' field is required and cannot be empty",
                request_id,
            )));
        }

        if self.destination.trim().is_empty() {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'destination' field is required and cannot be empty",
                request_id,
            )));
        }

        if !SEVERITY_RANGE.contains(&self.base_weather_severity) {
            return Err(out_of_range(
                "base_weather_severity",
                &SEVERITY_RANGE,
                request_id,
            ));
        }
        if !FUEL_EFFICIENCY_RANGE.contains(&self.fuel_efficiency) {
            return Err(out_of_range(
                "fuel_efficiency",
                &FUEL_EFFICIENCY_RANGE,
                request_id,
            ));
        }
        if !CARGO_LOAD_RANGE.contains(&self.cargo_load) {
            return Err(out_of_range("cargo_load", &CARGO_LOAD_RANGE, request_id));
        }
        if !ALTITUDE_RANGE.contains(&self.cruise_altitude) || self.cruise_altitude % 10 != 0 {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'cruise_altitude' field must be a multiple of 10 between 300 and 410",
                request_id,
            )));
        }
        if !SAMPLES_RANGE.contains(&self.samples_per_segment) {
            return Err(out_of_range(
                "samples_per_segment",
                &SAMPLES_RANGE,
                request_id,
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(body: &str) -> RouteRequest {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn missing_fields_take_dashboard_defaults() {
        let req = request(r#"{"origin":"HKG","destination":"JFK"}"#);
        assert!(!req.use_real_weather);
        assert_eq!(req.base_weather_severity, 20.0);
        assert_eq!(req.cargo_load, 1.2);
        assert_eq!(req.cruise_altitude, 350);
        assert_eq!(req.algorithm, RouteAlgorithm::Dijkstra);
        assert!(req.validate("req").is_ok());
    }

    #[test]
    fn algorithm_uses_kebab_case() {
        let req = request(r#"{"origin":"HKG","destination":"JFK","algorithm":"a-star"}"#);
        assert_eq!(req.algorithm, RouteAlgorithm::AStar);
        assert_eq!(
            req.to_lib_request().algorithm,
            skycargo_lib::RouteAlgorithm::AStar
        );
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let bodies = [
            r#"{"origin":"","destination":"JFK"}"#,
            r#"{"origin":"HKG","destination":"JFK","base_weather_severity":51}"#,
            r#"{"origin":"HKG","destination":"JFK","fuel_efficiency":0.4}"#,
            r#"{"origin":"HKG","destination":"JFK","cargo_load":2.5}"#,
            r#"{"origin":"HKG","destination":"JFK","cruise_altitude":355}"#,
            r#"{"origin":"HKG","destination":"JFK","samples_per_segment":0}"#,
        ];
        for body in bodies {
            let problem = request(body).validate("req-x").unwrap_err();
            assert_eq!(problem.status, 400, "{body}");
            assert_eq!(problem.instance.as_deref(), Some("req-x"));
        }
    }
}
