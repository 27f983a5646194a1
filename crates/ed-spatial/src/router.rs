//! Shortest-path trait and default Dijkstra implementation.
//!
//! # Cost units
//!
//! Edge weight is segment length in metres, compared exactly as `f64`
//! through `total_cmp`.  Equal costs break on `NodeId`.  The reported
//! [`Route::length_m`] is the sum of the chosen edges.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use ed_core::{EdgeId, NodeId};

use crate::network::RoadNetwork;
use crate::{SpatialError, SpatialResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Nodes visited in order, `from` first and `to` last.
    pub nodes: Vec<NodeId>,
    /// Edges driven, in order.
    pub edges: Vec<EdgeId>,
    /// Total length in metres.
    pub length_m: f64,
}

impl Route {
    #[inline]
    pub fn length_km(&self) -> f64 {
        self.length_m / 1_000.0
    }

    /// `true` when the vehicle is already on the incident node.
    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable shortest-path engine.
///
/// Implementations must be deterministic: the same network and node pair
/// always yields the same route.
pub trait Router: Send + Sync {
    /// Compute the minimum-length route from `from` to `to`.
    ///
    /// `from == to` is an empty route of length 0, not an error.
    fn route(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> SpatialResult<Route>;
}

impl<R: Router + ?Sized> Router for &R {
    fn route(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> SpatialResult<Route> {
        (**self).route(network, from, to)
    }
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Standard Dijkstra's algorithm over the CSR road graph, weighted by
/// `edge_length_m`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> SpatialResult<Route> {
        for node in [from, to] {
            if !network.contains(node) {
                return Err(SpatialError::NodeNotFound(node));
            }
        }
        dijkstra(network, from, to)
    }
}

// ── Search ────────────────────────────────────────────────────────────────────

/// Path length as a heap key.  Lengths are never negative or NaN (the
/// builder clamps them), so `total_cmp` is the numeric order.
#[derive(Debug, Clone, Copy)]
struct Cost(f64);

impl PartialEq for Cost {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

fn dijkstra(network: &RoadNetwork, from: NodeId, to: NodeId) -> SpatialResult<Route> {
    if from == to {
        return Ok(Route { nodes: vec![from], edges: vec![], length_m: 0.0 });
    }

    let n = network.node_count();
    let mut dist      = vec![f64::INFINITY; n];
    let mut prev_edge = vec![EdgeId::INVALID; n];

    dist[from.index()] = 0.0;

    // Reverse turns the max-heap into a min-heap; NodeId breaks cost ties.
    let mut heap: BinaryHeap<Reverse<(Cost, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((Cost(0.0), from)));

    while let Some(Reverse((Cost(cost), node))) = heap.pop() {
        if node == to {
            return Ok(reconstruct(network, &prev_edge, from, to));
        }

        // Stale entry.
        if cost > dist[node.index()] {
            continue;
        }

        for edge in network.out_edges(node) {
            let neighbor = network.edge_to[edge.index()];
            let new_cost = cost + network.edge_length_m[edge.index()];

            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev_edge[neighbor.index()] = edge;
                heap.push(Reverse((Cost(new_cost), neighbor)));
            }
        }
    }

    Err(SpatialError::NoRoute { from, to })
}

fn reconstruct(network: &RoadNetwork, prev_edge: &[EdgeId], from: NodeId, to: NodeId) -> Route {
    let mut edges = Vec::new();
    let mut cur = to;
    while cur != from {
        let e = prev_edge[cur.index()];
        edges.push(e);
        cur = network.edge_from[e.index()];
    }
    edges.reverse();

    let mut nodes = Vec::with_capacity(edges.len() + 1);
    nodes.push(from);
    nodes.extend(edges.iter().map(|e| network.edge_to[e.index()]));

    let length_m = edges.iter().map(|e| network.edge_length_m[e.index()]).sum();

    Route { nodes, edges, length_m }
}
