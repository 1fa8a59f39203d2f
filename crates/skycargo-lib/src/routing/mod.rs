//! Route planning for weather-aware cargo flights.
//!
//! This module provides:
//! - [`RouteAlgorithm`] - Supported search algorithms (Dijkstra, A*)
//! - [`RouteRequest`] - Origin, destination, weather, and load parameters
//! - [`RouteResult`] - Path, distance, fuel, map geometry, and weather notes
//! - [`plan_route`] - Main entry point for computing routes
//!
//! # Example
//!
//! ```no_run
//! use skycargo_lib::{plan_route, AirportRegistry, RouteRequest, WeatherConfig, WeatherProvider};
//!
//! let weather = WeatherProvider::new(WeatherConfig::default())?;
//! let request = RouteRequest::new("HKG", "JFK");
//! let result = plan_route(AirportRegistry::builtin(), &weather, &request)?;
//! println!("{} km", result.total_distance_km.round());
//! # Ok::<(), skycargo_lib::Error>(())
//! ```

mod planner;

pub use planner::{select_planner, AStarPlanner, DijkstraPlanner, RoutePlanner};

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, info};

use crate::airports::AirportRegistry;
use crate::arc::render_route_arc;
use crate::error::{Error, Result};
use crate::geo::{GeoPoint, DEFAULT_ARC_SAMPLES};
use crate::graph::build_graph;
use crate::weather::{WeatherObservation, WeatherProvider};

/// Supported routing algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RouteAlgorithm {
    /// Dijkstra's algorithm (weighted graph).
    #[default]
    Dijkstra,
    /// A* search (great-circle heuristic).
    AStar,
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::Dijkstra => "dijkstra",
            RouteAlgorithm::AStar => "a-star",
        };
        f.write_str(value)
    }
}

impl FromStr for RouteAlgorithm {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dijkstra" => Ok(RouteAlgorithm::Dijkstra),
            "a-star" | "astar" | "a_star" => Ok(RouteAlgorithm::AStar),
            other => Err(Error::invalid_request(format!("unknown algorithm '{other}'"))),
        }
    }
}

/// Cruise flight level (hundreds of feet). Display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FlightLevel(pub u16);

impl Default for FlightLevel {
    fn default() -> Self {
        FlightLevel(350)
    }
}

impl fmt::Display for FlightLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FL{}", self.0)
    }
}

/// High-level route planning request.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub origin: String,
    pub destination: String,
    /// Query live METAR data instead of using `base_weather_severity`.
    pub use_real_weather: bool,
    /// Simulated weather penalty in percent.
    pub base_weather_severity: f64,
    /// Fuel burn in kg per km.
    pub fuel_efficiency: f64,
    /// Cargo load multiplier, at least 1.
    pub cargo_load: f64,
    pub cruise_altitude: FlightLevel,
    pub algorithm: RouteAlgorithm,
    /// Arc samples generated for each leg of the route.
    pub samples_per_segment: usize,
}

impl RouteRequest {
    /// Request with the dashboard's default settings and simulated weather.
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            use_real_weather: false,
            base_weather_severity: 20.0,
            fuel_efficiency: 1.0,
            cargo_load: 1.2,
            cruise_altitude: FlightLevel::default(),
            algorithm: RouteAlgorithm::default(),
            samples_per_segment: DEFAULT_ARC_SAMPLES,
        }
    }

    /// Check the numeric parameters the cost model relies on.
    pub fn validate(&self) -> Result<()> {
        if !self.base_weather_severity.is_finite() || self.base_weather_severity < 0.0 {
            return Err(Error::invalid_request(
                "base weather severity must be a non-negative number",
            ));
        }
        if !self.fuel_efficiency.is_finite() || self.fuel_efficiency <= 0.0 {
            return Err(Error::invalid_request(
                "fuel efficiency must be a positive number",
            ));
        }
        if !self.cargo_load.is_finite() || self.cargo_load < 1.0 {
            return Err(Error::invalid_request("cargo load must be at least 1.0"));
        }
        if self.samples_per_segment == 0 {
            return Err(Error::invalid_request(
                "samples per segment must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Airport along the planned route, annotated for map display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Waypoint {
    pub code: String,
    pub name: String,
    pub position: GeoPoint,
    pub altitude: String,
}

/// Planned route returned by the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteResult {
    pub algorithm: RouteAlgorithm,
    /// Airport codes from origin to destination.
    pub path: Vec<String>,
    pub waypoints: Vec<Waypoint>,
    pub total_distance_km: f64,
    pub total_weight: f64,
    pub total_fuel_kg: f64,
    pub cruise_altitude: FlightLevel,
    /// Great-circle polyline for map rendering.
    pub arc: Vec<GeoPoint>,
    pub origin_weather: WeatherObservation,
    pub destination_weather: WeatherObservation,
    pub avg_weather_penalty: f64,
}

impl RouteResult {
    /// Number of legs in the route.
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Compute a route for `request` over the airports in `registry`.
///
/// Unknown codes are rejected before any weather lookup or graph
/// construction. Weather problems never fail the request; they show up as
/// fallback observations in the result.
pub fn plan_route(
    registry: &AirportRegistry,
    weather: &WeatherProvider,
    request: &RouteRequest,
) -> Result<RouteResult> {
    request.validate()?;

    let origin = registry.lookup(&request.origin)?;
    let destination = registry.lookup(&request.destination)?;

    let (origin_weather, destination_weather) = weather.penalties_for_pair(
        &origin.code,
        &destination.code,
        request.use_real_weather,
        request.base_weather_severity,
    );
    debug!(
        origin = %origin.code,
        origin_penalty = origin_weather.penalty,
        destination = %destination.code,
        destination_penalty = destination_weather.penalty,
        "resolved endpoint weather"
    );

    let graph = build_graph(registry, request, &origin_weather, &destination_weather)?;
    let planner = select_planner(request.algorithm);
    let found = planner.find_path(&graph, &origin.code, &destination.code)?;

    let arc = render_route_arc(registry, &found.steps, request.samples_per_segment)?;
    let altitude = request.cruise_altitude.to_string();
    let waypoints = found
        .steps
        .iter()
        .map(|code| {
            registry.lookup(code).map(|airport| Waypoint {
                code: airport.code.clone(),
                name: airport.name.clone(),
                position: airport.position,
                altitude: altitude.clone(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let total_fuel_kg = found.total_distance_km * request.fuel_efficiency * request.cargo_load;
    let avg_weather_penalty = (origin_weather.penalty + destination_weather.penalty) / 2.0;

    info!(
        algorithm = %planner.algorithm(),
        route = %found.steps.join(" -> "),
        distance_km = found.total_distance_km,
        fuel_kg = total_fuel_kg,
        "route planned"
    );

    Ok(RouteResult {
        algorithm: planner.algorithm(),
        path: found.steps,
        waypoints,
        total_distance_km: found.total_distance_km,
        total_weight: found.total_weight,
        total_fuel_kg,
        cruise_altitude: request.cruise_altitude,
        arc,
        origin_weather,
        destination_weather,
        avg_weather_penalty,
    })
}
