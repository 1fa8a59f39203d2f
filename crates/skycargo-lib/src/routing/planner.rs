//! Route planning strategies.
//!
//! Each algorithm sits behind the [`RoutePlanner`] trait so `plan_route`
//! stays independent of the search technique in use.

use crate::error::Result;
use crate::graph::RouteGraph;
use crate::path::{find_route_a_star, find_route_dijkstra, PathResult};

use super::RouteAlgorithm;

/// Trait for route planning strategies.
pub trait RoutePlanner: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> RouteAlgorithm;

    /// Search `graph` for the lowest-weight path from `start` to `goal`.
    fn find_path(&self, graph: &RouteGraph, start: &str, goal: &str) -> Result<PathResult>;
}

/// Dijkstra's algorithm over edge weights.
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraPlanner;

impl RoutePlanner for DijkstraPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Dijkstra
    }

    fn find_path(&self, graph: &RouteGraph, start: &str, goal: &str) -> Result<PathResult> {
        find_route_dijkstra(graph, start, goal)
    }
}

/// A* search with a great-circle heuristic.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStarPlanner;

impl RoutePlanner for AStarPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::AStar
    }

    fn find_path(&self, graph: &RouteGraph, start: &str, goal: &str) -> Result<PathResult> {
        find_route_a_star(graph, start, goal)
    }
}

/// Pick the planner implementing `algorithm`.
pub fn select_planner(algorithm: RouteAlgorithm) -> Box<dyn RoutePlanner> {
    match algorithm {
        RouteAlgorithm::Dijkstra => Box::new(DijkstraPlanner),
        RouteAlgorithm::AStar => Box::new(AStarPlanner),
    }
}
