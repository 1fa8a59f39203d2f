use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::geo::distance_km;
use crate::graph::RouteGraph;

/// Ordered node path with its accumulated cost.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    pub steps: Vec<String>,
    pub total_weight: f64,
    pub total_distance_km: f64,
}

impl PathResult {
    fn single(node: &str) -> Self {
        Self {
            steps: vec![node.to_string()],
            total_weight: 0.0,
            total_distance_km: 0.0,
        }
    }

    /// Number of legs in the path.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Lowest-weight path between two nodes using Dijkstra's algorithm.
///
/// Paths whose weights differ only by floating-point rounding are ranked by
/// leg count, so airports lying on one great circle never turn a direct leg
/// into a multi-hop route.
pub fn shortest_path(graph: &RouteGraph, start: &str, goal: &str) -> Result<PathResult> {
    find_route_dijkstra(graph, start, goal)
}

/// Run Dijkstra's algorithm over edge weights.
pub fn find_route_dijkstra(graph: &RouteGraph, start: &str, goal: &str) -> Result<PathResult> {
    search(graph, start, goal, |_| 0.0)
}

/// Run A* search guided by the great-circle distance to the goal.
///
/// Every edge weight is its raw distance scaled by the graph's cost factor,
/// so the scaled straight-line distance never overestimates the remaining
/// cost.
pub fn find_route_a_star(graph: &RouteGraph, start: &str, goal: &str) -> Result<PathResult> {
    let goal_position = graph.position(goal);
    let factor = graph.cost_factor();
    search(graph, start, goal, |node| {
        match (graph.position(node), goal_position) {
            (Some(here), Some(there)) => distance_km(here, there) * factor,
            _ => 0.0,
        }
    })
}

fn search<H>(graph: &RouteGraph, start: &str, goal: &str, heuristic: H) -> Result<PathResult>
where
    H: Fn(&str) -> f64,
{
    for code in [start, goal] {
        if !graph.contains(code) {
            return Err(Error::UnknownAirport {
                code: code.to_string(),
                suggestions: Vec::new(),
            });
        }
    }

    if start == goal {
        return Ok(PathResult::single(start));
    }

    let mut best: HashMap<&str, Label> = HashMap::new();
    let mut parents: HashMap<&str, &str> = HashMap::new();
    let mut queue = BinaryHeap::new();

    best.insert(start, Label { cost: 0.0, hops: 0 });
    queue.push(QueueEntry::new(start, 0.0, 0, heuristic(start)));

    while let Some(entry) = queue.pop() {
        let Some(current) = best.get(entry.node).copied() else {
            continue;
        };
        if entry.label() != current {
            continue;
        }

        if entry.node == goal {
            return Ok(assemble(graph, &parents, start, goal, current.cost));
        }

        for edge in graph.neighbours(entry.node) {
            let next = edge.target.as_str();
            let candidate = Label {
                cost: current.cost + edge.weight,
                hops: current.hops + 1,
            };
            let improves = match best.get(next) {
                Some(known) => candidate.improves_on(known),
                None => true,
            };
            if improves {
                best.insert(next, candidate);
                parents.insert(next, entry.node);
                queue.push(QueueEntry::new(
                    next,
                    candidate.cost,
                    candidate.hops,
                    heuristic(next),
                ));
            }
        }
    }

    Err(Error::RouteNotFound {
        start: start.to_string(),
        goal: goal.to_string(),
    })
}

fn assemble<'a>(
    graph: &RouteGraph,
    parents: &HashMap<&'a str, &'a str>,
    start: &str,
    goal: &'a str,
    total_weight: f64,
) -> PathResult {
    let mut steps = vec![goal.to_string()];
    let mut current = goal;
    while current != start {
        match parents.get(current) {
            Some(&parent) => {
                steps.push(parent.to_string());
                current = parent;
            }
            None => break,
        }
    }
    steps.reverse();

    let total_distance_km = steps
        .windows(2)
        .filter_map(|pair| graph.edge(&pair[0], &pair[1]))
        .map(|edge| edge.distance_km)
        .sum();

    PathResult {
        steps,
        total_weight,
        total_distance_km,
    }
}

/// Relative tolerance under which two path costs count as equal.
const COST_TOLERANCE: f64 = 1e-9;

/// Best known way to reach a node.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Label {
    cost: f64,
    hops: usize,
}

impl Label {
    /// Lower cost wins. Costs within [`COST_TOLERANCE`] of each other count
    /// as equal, and then the path with fewer legs wins.
    fn improves_on(&self, known: &Label) -> bool {
        let slack = known.cost.abs().max(self.cost.abs()) * COST_TOLERANCE;
        if self.cost < known.cost - slack {
            true
        } else if self.cost <= known.cost + slack {
            self.hops < known.hops
        } else {
            false
        }
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry<'a> {
    node: &'a str,
    cost: FloatOrd,
    hops: usize,
    estimate: FloatOrd,
}

impl<'a> QueueEntry<'a> {
    fn new(node: &'a str, cost: f64, hops: usize, heuristic: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
            hops,
            estimate: FloatOrd(cost + heuristic),
        }
    }

    fn label(&self) -> Label {
        Label {
            cost: self.cost.0,
            hops: self.hops,
        }
    }
}

impl Ord for QueueEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by estimate, with
        // the lexicographically lowest code popped first on ties.
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.node.cmp(self.node))
    }
}

impl PartialOrd for QueueEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoPoint;

    fn line_graph() -> RouteGraph {
        // A - B - C along the equator, no direct A - C edge.
        let mut graph = RouteGraph::new(1.0);
        graph.add_airport("AAA", GeoPoint::new(0.0, 0.0));
        graph.add_airport("BBB", GeoPoint::new(0.0, 10.0));
        graph.add_airport("CCC", GeoPoint::new(0.0, 20.0));
        graph.connect("AAA", "BBB");
        graph.connect("BBB", "CCC");
        graph
    }

    #[test]
    fn follows_multi_hop_path_on_sparse_graph() {
        let graph = line_graph();
        let result = find_route_dijkstra(&graph, "AAA", "CCC").unwrap();
        assert_eq!(result.steps, vec!["AAA", "BBB", "CCC"]);
        assert_eq!(result.hop_count(), 2);
        let expected = distance_km(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 20.0));
        assert!((result.total_distance_km - expected).abs() < 1e-6);
    }

    #[test]
    fn a_star_matches_dijkstra() {
        let graph = line_graph();
        let dijkstra = find_route_dijkstra(&graph, "CCC", "AAA").unwrap();
        let a_star = find_route_a_star(&graph, "CCC", "AAA").unwrap();
        assert_eq!(dijkstra.steps, a_star.steps);
        assert!((dijkstra.total_weight - a_star.total_weight).abs() < 1e-9);
    }

    #[test]
    fn same_node_is_a_single_step() {
        let graph = line_graph();
        let result = shortest_path(&graph, "BBB", "BBB").unwrap();
        assert_eq!(result.steps, vec!["BBB"]);
        assert_eq!(result.total_weight, 0.0);
        assert_eq!(result.total_distance_km, 0.0);
    }

    #[test]
    fn disconnected_goal_reports_no_route() {
        let mut graph = line_graph();
        graph.add_airport("DDD", GeoPoint::new(45.0, 45.0));
        let err = shortest_path(&graph, "AAA", "DDD").unwrap_err();
        assert!(matches!(err, Error::RouteNotFound { .. }));
    }

    #[test]
    fn missing_node_is_unknown() {
        let graph = line_graph();
        let err = shortest_path(&graph, "AAA", "ZZZ").unwrap_err();
        assert!(matches!(err, Error::UnknownAirport { ref code, .. } if code == "ZZZ"));
    }

    #[test]
    fn collinear_airports_keep_the_direct_leg() {
        // Four airports 10 degrees apart on the equator, fully connected.
        let codes = ["AAA", "BBB", "CCC", "DDD"];
        let mut graph = RouteGraph::new(1.2);
        for (index, code) in codes.iter().enumerate() {
            graph.add_airport(*code, GeoPoint::new(0.0, 10.0 * index as f64));
        }
        for (index, a) in codes.iter().enumerate() {
            for b in &codes[index + 1..] {
                graph.connect(a, b);
            }
        }

        for start in codes {
            for goal in codes {
                if start == goal {
                    continue;
                }
                let dijkstra = find_route_dijkstra(&graph, start, goal).unwrap();
                let a_star = find_route_a_star(&graph, start, goal).unwrap();
                assert_eq!(dijkstra.steps, vec![start, goal]);
                assert_eq!(a_star.steps, vec![start, goal]);
            }
        }
    }

    #[test]
    fn near_equal_costs_prefer_fewer_legs() {
        let direct = Label { cost: 1000.0, hops: 1 };
        let detour = Label { cost: 1000.0 - 1e-10, hops: 2 };
        assert!(!detour.improves_on(&direct));
        assert!(direct.improves_on(&detour));

        let cheaper = Label { cost: 999.0, hops: 3 };
        assert!(cheaper.improves_on(&direct));
    }

    #[test]
    fn equal_cost_ties_prefer_lowest_code() {
        // Square with two equal-length routes from SSS to TTT.
        let mut graph = RouteGraph::new(1.0);
        graph.add_airport("SSS", GeoPoint::new(0.0, 0.0));
        graph.add_airport("MMM", GeoPoint::new(10.0, 10.0));
        graph.add_airport("NNN", GeoPoint::new(-10.0, 10.0));
        graph.add_airport("TTT", GeoPoint::new(0.0, 20.0));
        for (a, b) in [("SSS", "MMM"), ("SSS", "NNN"), ("MMM", "TTT"), ("NNN", "TTT")] {
            graph.connect(a, b);
        }
        let result = shortest_path(&graph, "SSS", "TTT").unwrap();
        assert_eq!(result.steps, vec!["SSS", "MMM", "TTT"]);
    }
}
