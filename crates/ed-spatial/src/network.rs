//! The drivable road graph of one area.
//!
//! # Data layout
//!
//! Edges are stored grouped by source node (CSR).  The edges leaving node `n`
//! are the `EdgeId`s in
//!
//! ```text
//! node_out_start[n] .. node_out_start[n + 1]
//! ```
//!
//! and `edge_from`, `edge_to`, `edge_length_m` are parallel arrays indexed by
//! `EdgeId`.
//!
//! # Snapping
//!
//! An `rstar` R-tree over node positions answers "which intersection is
//! closest to this coordinate", which is how vehicles and incidents enter
//! the graph.

use std::ops::Range;

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use ed_core::{EdgeId, GeoPoint, NodeId};

use crate::{SpatialError, SpatialResult};

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2], // [lat, lon]
    id: NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared Euclidean distance in lat/lon space.  Good enough for snapping
    /// within a single city.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let [dy, dx] = [self.point[0] - point[0], self.point[1] - point[1]];
        dy * dy + dx * dx
    }
}

// ── Network ───────────────────────────────────────────────────────────────────

/// A directed road graph with an index for snapping coordinates onto it.
///
/// Immutable once built, so one instance can be shared across lookups.
/// Created through [`RoadNetworkBuilder`].
pub struct RoadNetwork {
    /// Intersection coordinates, by `NodeId`.
    pub node_pos: Vec<GeoPoint>,

    /// First outgoing `EdgeId` of each node, plus a trailing total
    /// (`node_count + 1` entries).
    pub node_out_start: Vec<u32>,

    /// Tail of each edge; the router walks these back from the target.
    pub edge_from: Vec<NodeId>,

    /// Head of each edge.
    pub edge_to: Vec<NodeId>,

    /// Length of each edge in metres.  This is the shortest-path weight.
    pub edge_length_m: Vec<f64>,

    spatial_idx: RTree<NodeEntry>,
}

impl RoadNetwork {
    /// A network with nothing in it.  Every snap against it fails with
    /// [`SpatialError::NoNodeFound`].
    pub fn empty() -> Self {
        RoadNetworkBuilder::default().build()
    }

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    /// `true` if `node` indexes a node of this network.
    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_count()
    }

    #[inline]
    fn out_range(&self, node: NodeId) -> Range<u32> {
        self.node_out_start[node.index()]..self.node_out_start[node.index() + 1]
    }

    /// Edges leaving `node`.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        self.out_range(node).map(EdgeId)
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        self.out_range(node).len()
    }

    // ── Snapping ──────────────────────────────────────────────────────────

    /// Return the `NodeId` of the road node closest to `pos`.
    ///
    /// When several nodes are exactly equidistant the lowest `NodeId` wins,
    /// so the answer never depends on R-tree layout.
    ///
    /// # Errors
    ///
    /// [`SpatialError::NoNodeFound`] if the network has no nodes.
    pub fn nearest_node(&self, pos: GeoPoint) -> SpatialResult<NodeId> {
        let mut iter = self
            .spatial_idx
            .nearest_neighbor_iter_with_distance_2(&[pos.lat, pos.lon]);

        let (first, best_d2) = iter.next().ok_or(SpatialError::NoNodeFound)?;
        let tied_min = iter
            .take_while(|(_, d2)| *d2 == best_d2)
            .map(|(e, _)| e.id)
            .min();

        Ok(match tied_min {
            Some(id) if id < first.id => id,
            _ => first.id,
        })
    }

    /// The `k` closest nodes to `pos`, closest first (fewer if the network
    /// is smaller).
    pub fn k_nearest_nodes(&self, pos: GeoPoint, k: usize) -> Vec<NodeId> {
        self.spatial_idx
            .nearest_neighbor_iter(&[pos.lat, pos.lon])
            .take(k)
            .map(|e| e.id)
            .collect()
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Collects intersections and road segments, then freezes them into a
/// [`RoadNetwork`] with [`build`](Self::build).
///
/// # Example
///
/// ```
/// use ed_core::GeoPoint;
/// use ed_spatial::RoadNetworkBuilder;
///
/// let mut roads = RoadNetworkBuilder::default();
/// let depot = roads.add_node(GeoPoint::new(19.0913, 72.8549));
/// let scene = roads.add_node(GeoPoint::new(19.0760, 72.8777));
/// roads.add_road(depot, scene, 2_900.0);
/// let net = roads.build();
/// assert_eq!((net.node_count(), net.edge_count()), (2, 2));
/// ```
pub struct RoadNetworkBuilder {
    nodes:     Vec<GeoPoint>,
    raw_edges: Vec<RawEdge>,
}

struct RawEdge {
    from:     NodeId,
    to:       NodeId,
    length_m: f64,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    /// Reserve room for `nodes` intersections and `edges` directed segments.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self { nodes: Vec::with_capacity(nodes), raw_edges: Vec::with_capacity(edges) }
    }

    /// Add an intersection.  Ids are handed out densely from 0.
    pub fn add_node(&mut self, pos: GeoPoint) -> NodeId {
        self.nodes.push(pos);
        NodeId(self.nodes.len() as u32 - 1)
    }

    /// Add a **directed** edge from `from` to `to` of `length_m` metres.
    ///
    /// Negative lengths are clamped to zero; Dijkstra requires non-negative
    /// weights.
    pub fn add_directed_edge(&mut self, from: NodeId, to: NodeId, length_m: f64) {
        self.raw_edges.push(RawEdge { from, to, length_m: length_m.max(0.0) });
    }

    /// Add edges in **both directions** for a two-way road segment.
    pub fn add_road(&mut self, a: NodeId, b: NodeId, length_m: f64) {
        self.add_directed_edge(a, b, length_m);
        self.add_directed_edge(b, a, length_m);
    }

    /// Add a two-way road whose length is the haversine distance between the
    /// two nodes' positions.
    pub fn add_straight_road(&mut self, a: NodeId, b: NodeId) {
        let length_m = self.node_pos(a).distance_m(self.node_pos(b));
        self.add_road(a, b, length_m);
    }

    /// Position of an intersection added earlier.
    pub fn node_pos(&self, node: NodeId) -> GeoPoint {
        self.nodes[node.index()]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Directed edges added so far (a two-way road counts twice).
    pub fn edge_count(&self) -> usize {
        self.raw_edges.len()
    }

    /// Freeze into a [`RoadNetwork`].
    pub fn build(self) -> RoadNetwork {
        let RoadNetworkBuilder { nodes, mut raw_edges } = self;

        // Stable: a node's edges keep the order they were added in.
        raw_edges.sort_by_key(|e| e.from);

        let mut degree = vec![0u32; nodes.len()];
        for e in &raw_edges {
            degree[e.from.index()] += 1;
        }
        let node_out_start: Vec<u32> = std::iter::once(0)
            .chain(degree.iter().scan(0u32, |acc, d| {
                *acc += d;
                Some(*acc)
            }))
            .collect();
        debug_assert_eq!(node_out_start.last().copied(), Some(raw_edges.len() as u32));

        let spatial_idx = RTree::bulk_load(
            nodes
                .iter()
                .zip(0u32..)
                .map(|(p, i)| NodeEntry { point: [p.lat, p.lon], id: NodeId(i) })
                .collect(),
        );

        RoadNetwork {
            node_pos: nodes,
            node_out_start,
            edge_from: raw_edges.iter().map(|e| e.from).collect(),
            edge_to: raw_edges.iter().map(|e| e.to).collect(),
            edge_length_m: raw_edges.iter().map(|e| e.length_m).collect(),
            spatial_idx,
        }
    }
}

impl Default for RoadNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
