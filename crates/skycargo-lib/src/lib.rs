//! Sky Cargo route optimizer library.
//!
//! This crate holds the fixed airport registry, great-circle geometry, the
//! cached weather provider, the weighted route graph, and the shortest-path
//! planners. Higher-level consumers (CLI, HTTP service) should only depend on
//! the functions exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod airports;
pub mod arc;
pub mod error;
pub mod geo;
pub mod graph;
pub mod output;
pub mod path;
pub mod routing;
pub mod weather;

pub use airports::{Airport, AirportRegistry};
pub use arc::{render_polyline, render_route_arc};
pub use error::{Error, Result};
pub use geo::{distance_km, interpolate_arc, GeoPoint, DEFAULT_ARC_SAMPLES, EARTH_RADIUS_KM};
pub use graph::{build_graph, build_route_graph, Edge, RouteGraph, WeightFactors};
pub use output::{render_text, to_geojson};
pub use path::{find_route_a_star, find_route_dijkstra, shortest_path, PathResult};
pub use routing::{
    plan_route, select_planner, FlightLevel, RouteAlgorithm, RoutePlanner, RouteRequest,
    RouteResult, Waypoint,
};
pub use weather::{
    FetchOutcome, HttpMetarSource, MetarReport, MetarSource, ObservationSource, WeatherCache,
    WeatherConfig, WeatherObservation, WeatherProvider,
};
