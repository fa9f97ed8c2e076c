//! Capacitated single-vehicle pickup/delivery instance.

use rand::Rng;

use super::types::{NodeId, Route, RouteProblem, DEPOT};
use crate::error::{SearchError, SearchResult};

/// A stop with its passenger movements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    /// Node identifier, also the row/column in the trip-time matrix.
    pub id: NodeId,
    /// Passengers boarding here.
    #[cfg_attr(feature = "serde", serde(rename = "n_boardings"))]
    pub boardings: i64,
    /// Passengers alighting here.
    #[cfg_attr(feature = "serde", serde(rename = "n_alighting"))]
    pub alightings: i64,
}

impl Node {
    pub fn new(id: NodeId, boardings: i64, alightings: i64) -> Self {
        Self {
            id,
            boardings,
            alightings,
        }
    }

    /// Net change in vehicle load when visiting this node.
    pub fn load_delta(&self) -> i64 {
        self.boardings - self.alightings
    }
}

/// Immutable description of one routing problem.
///
/// A route is feasible when it starts and ends at [`DEPOT`], visits every
/// other node exactly once, and the running load (the prefix sum of node
/// deltas) stays within `[0, capacity]` after every stop.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(try_from = "InstanceData")
)]
pub struct Instance {
    nodes: Vec<Node>,
    trip_time: Vec<Vec<f64>>,
    capacity: i64,
    deltas: Vec<i64>,
    required: Vec<NodeId>,
}

impl Instance {
    /// Builds an instance, checking that the matrix is square and covers
    /// every node id, that ids are unique, and that the depot is present.
    pub fn new(nodes: Vec<Node>, trip_time: Vec<Vec<f64>>, capacity: i64) -> SearchResult<Self> {
        let dim = trip_time.len();
        if let Some(row) = trip_time.iter().position(|row| row.len() != dim) {
            return Err(SearchError::InvalidInstance(format!(
                "trip-time matrix is not square (row {row} has {} columns, expected {dim})",
                trip_time[row].len()
            )));
        }
        if capacity < 0 {
            return Err(SearchError::InvalidInstance(format!(
                "capacity must be non-negative, got {capacity}"
            )));
        }

        let mut deltas = vec![0i64; dim];
        let mut seen = vec![false; dim];
        for node in &nodes {
            if node.id >= dim {
                return Err(SearchError::InvalidInstance(format!(
                    "node {} is outside the {dim}x{dim} trip-time matrix",
                    node.id
                )));
            }
            if seen[node.id] {
                return Err(SearchError::InvalidInstance(format!(
                    "node {} appears more than once",
                    node.id
                )));
            }
            seen[node.id] = true;
            deltas[node.id] = node.load_delta();
        }
        if dim == 0 || !seen[DEPOT] {
            return Err(SearchError::InvalidInstance("depot node 0 is missing".into()));
        }

        let mut required: Vec<NodeId> = nodes
            .iter()
            .map(|n| n.id)
            .filter(|&id| id != DEPOT)
            .collect();
        required.sort_unstable();

        Ok(Self {
            nodes,
            trip_time,
            capacity,
            deltas,
            required,
        })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Non-depot nodes every route must visit, in ascending id order.
    pub fn required_nodes(&self) -> &[NodeId] {
        &self.required
    }

    pub fn capacity(&self) -> i64 {
        self.capacity
    }

    /// Travel time between two nodes.
    pub fn trip_time(&self, from: NodeId, to: NodeId) -> f64 {
        self.trip_time[from][to]
    }

    /// Length of every feasible route, both depot visits included.
    pub fn route_len(&self) -> usize {
        self.required.len() + 2
    }

    fn load_in_bounds(&self, load: i64) -> bool {
        (0..=self.capacity).contains(&load)
    }
}

impl RouteProblem for Instance {
    fn is_feasible(&self, route: &[NodeId]) -> bool {
        if route.len() != self.route_len() {
            return false;
        }
        if route[0] != DEPOT || route[route.len() - 1] != DEPOT {
            return false;
        }

        let mut visited = vec![false; self.trip_time.len()];
        let mut load = 0i64;
        for &node in &route[1..route.len() - 1] {
            if node == DEPOT || node >= visited.len() || visited[node] {
                return false;
            }
            visited[node] = true;
            load += self.deltas[node];
            if !self.load_in_bounds(load) {
                return false;
            }
        }

        // Length matches and no repeats, so every required node was seen
        // unless the route names an id that is not part of the instance.
        self.required.iter().all(|&id| visited[id])
    }

    fn cost(&self, route: &[NodeId]) -> f64 {
        route
            .windows(2)
            .map(|w| self.trip_time[w[0]][w[1]])
            .sum()
    }

    /// Greedy random construction: from the depot, repeatedly pick a
    /// pending node uniformly among those that keep the load in bounds.
    fn random_route<R: Rng>(&self, rng: &mut R) -> Option<Route> {
        let mut route = Vec::with_capacity(self.route_len());
        route.push(DEPOT);

        let mut pending = self.required.clone();
        let mut candidates = Vec::with_capacity(pending.len());
        let mut load = 0i64;

        while !pending.is_empty() {
            candidates.clear();
            candidates.extend(
                pending
                    .iter()
                    .enumerate()
                    .filter(|&(_, &id)| self.load_in_bounds(load + self.deltas[id]))
                    .map(|(idx, _)| idx),
            );
            if candidates.is_empty() {
                return None;
            }

            let pick = candidates[rng.random_range(0..candidates.len())];
            let node = pending.swap_remove(pick);
            load += self.deltas[node];
            route.push(node);
        }

        route.push(DEPOT);
        Some(route)
    }
}

/// Serialized instance layout.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct InstanceData {
    nodes: Vec<Node>,
    trip_time_matrix: Vec<Vec<f64>>,
    vehicle_fleet: FleetData,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct FleetData {
    max_capacity: i64,
}

#[cfg(feature = "serde")]
impl TryFrom<InstanceData> for Instance {
    type Error = SearchError;

    fn try_from(data: InstanceData) -> SearchResult<Self> {
        Instance::new(
            data.nodes,
            data.trip_time_matrix,
            data.vehicle_fleet.max_capacity,
        )
    }
}
