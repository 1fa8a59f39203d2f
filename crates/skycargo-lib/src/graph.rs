use std::collections::BTreeMap;

use tracing::debug;

use crate::airports::AirportRegistry;
use crate::error::{Error, Result};
use crate::geo::{distance_km, GeoPoint};
use crate::routing::RouteRequest;
use crate::weather::WeatherObservation;

/// Per-request scaling applied uniformly to every edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightFactors {
    /// Mean of the origin and destination weather penalties, in percent.
    pub avg_weather_penalty: f64,
    /// Fuel burn in kg per km.
    pub fuel_efficiency: f64,
    /// Cargo load multiplier.
    pub cargo_load: f64,
}

impl WeightFactors {
    pub fn from_weather(
        request: &RouteRequest,
        origin: &WeatherObservation,
        destination: &WeatherObservation,
    ) -> Self {
        Self {
            avg_weather_penalty: (origin.penalty + destination.penalty) / 2.0,
            fuel_efficiency: request.fuel_efficiency,
            cargo_load: request.cargo_load,
        }
    }

    /// Factor that turns a raw great-circle distance into a routing weight.
    pub fn multiplier(&self) -> f64 {
        (1.0 + self.avg_weather_penalty / 100.0) * self.fuel_efficiency * self.cargo_load
    }
}

impl Default for WeightFactors {
    fn default() -> Self {
        Self {
            avg_weather_penalty: 0.0,
            fuel_efficiency: 1.0,
            cargo_load: 1.0,
        }
    }
}

/// Directed half of an undirected edge, stored on its source node.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub target: String,
    /// Great-circle distance in km.
    pub distance_km: f64,
    /// Effective routing cost.
    pub weight: f64,
}

/// Weighted airport graph owned by a single route request.
#[derive(Debug, Clone, Default)]
pub struct RouteGraph {
    adjacency: BTreeMap<String, Vec<Edge>>,
    positions: BTreeMap<String, GeoPoint>,
    cost_factor: f64,
}

impl RouteGraph {
    /// Empty graph whose edges will be weighted by `cost_factor`.
    pub fn new(cost_factor: f64) -> Self {
        Self {
            adjacency: BTreeMap::new(),
            positions: BTreeMap::new(),
            cost_factor,
        }
    }

    /// Add a node without edges. Re-adding a node updates its position.
    pub fn add_airport(&mut self, code: impl Into<String>, position: GeoPoint) {
        let code = code.into();
        self.adjacency.entry(code.clone()).or_default();
        self.positions.insert(code, position);
    }

    /// Connect two existing nodes with an undirected great-circle edge.
    ///
    /// Returns `false` when either node is missing or `a == b`.
    pub fn connect(&mut self, a: &str, b: &str) -> bool {
        if a == b {
            return false;
        }
        let (Some(&pa), Some(&pb)) = (self.positions.get(a), self.positions.get(b)) else {
            return false;
        };

        let distance = distance_km(pa, pb);
        let weight = distance * self.cost_factor;
        self.insert_half_edge(a, b, distance, weight);
        self.insert_half_edge(b, a, distance, weight);
        true
    }

    fn insert_half_edge(&mut self, from: &str, to: &str, distance_km: f64, weight: f64) {
        let edges = self.adjacency.entry(from.to_string()).or_default();
        let edge = Edge {
            target: to.to_string(),
            distance_km,
            weight,
        };
        match edges.binary_search_by(|existing| existing.target.as_str().cmp(to)) {
            Ok(index) => edges[index] = edge,
            Err(index) => edges.insert(index, edge),
        }
    }

    /// Neighbours of `code`, sorted by target code.
    pub fn neighbours(&self, code: &str) -> &[Edge] {
        self.adjacency
            .get(code)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn edge(&self, from: &str, to: &str) -> Option<&Edge> {
        self.neighbours(from).iter().find(|edge| edge.target == to)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.adjacency.contains_key(code)
    }

    pub fn position(&self, code: &str) -> Option<GeoPoint> {
        self.positions.get(code).copied()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum::<usize>() / 2
    }

    /// Uniform multiplier applied to raw distances.
    pub fn cost_factor(&self) -> f64 {
        self.cost_factor
    }

    /// Node codes in sorted order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }
}

/// Build the complete graph over `registry` weighted by `factors`.
pub fn build_route_graph(registry: &AirportRegistry, factors: WeightFactors) -> Result<RouteGraph> {
    if registry.len() < 2 {
        return Err(Error::invalid_registry(format!(
            "route graph needs at least two airports, registry has {}",
            registry.len()
        )));
    }

    let mut graph = RouteGraph::new(factors.multiplier());
    for airport in registry.all() {
        graph.add_airport(airport.code.clone(), airport.position);
    }

    let airports: Vec<_> = registry.all().collect();
    for (index, a) in airports.iter().enumerate() {
        for b in &airports[index + 1..] {
            graph.connect(&a.code, &b.code);
        }
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        multiplier = graph.cost_factor(),
        "built route graph"
    );

    Ok(graph)
}

/// Build the request's graph from the two endpoint observations.
pub fn build_graph(
    registry: &AirportRegistry,
    request: &RouteRequest,
    origin_weather: &WeatherObservation,
    destination_weather: &WeatherObservation,
) -> Result<RouteGraph> {
    let factors = WeightFactors::from_weather(request, origin_weather, destination_weather);
    build_route_graph(registry, factors)
}
