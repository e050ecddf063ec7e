//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! The broadcast simulator calls routing through the [`Router`] trait, and
//! [`DijkstraRouter`] is generic over its [`EdgeCost`], so the metric is a
//! configuration choice rather than a separate code path.
//!
//! # Algorithm
//!
//! Label-setting Dijkstra with a linear-scan minimum selection.  Fleets are
//! tens of devices, so the O(V²) scan is cheaper than maintaining a heap, and
//! scanning in snapshot order gives a deterministic first-found tie-break.
//!
//! # "No path" is a value
//!
//! Unknown endpoints, disconnected graphs, offline destinations and
//! malformed adjacency all yield an empty [`Path`].  Nothing here returns an
//! error or panics on data.

use kit_core::{Device, DeviceId, NodeIndex};

use crate::cost::{CostMetric, EdgeCost};
use crate::graph::MeshGraph;

// ── Path ──────────────────────────────────────────────────────────────────────

/// The result of a routing query: device ids from source to destination
/// inclusive, and the accumulated edge cost.
///
/// An empty `ids` means no path exists.  When non-empty, `ids[0]` is the
/// source and `ids[len - 1]` is the destination.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub ids:  Vec<DeviceId>,
    /// Sum of edge costs in the router's metric; `INFINITY` for no path.
    pub cost: f64,
}

impl Path {
    /// The "no path" value.
    pub fn none() -> Self {
        Self { ids: Vec::new(), cost: f64::INFINITY }
    }

    /// A zero-cost path consisting only of `id`.
    pub fn trivial(id: impl Into<DeviceId>) -> Self {
        Self { ids: vec![id.into()], cost: 0.0 }
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Number of edges traversed.
    pub fn hops(&self) -> usize {
        self.ids.len().saturating_sub(1)
    }

    /// `true` if source and destination are the same device.
    pub fn is_trivial(&self) -> bool {
        self.ids.len() == 1
    }

    /// `true` if the path relays through at least one device, i.e. it is
    /// worth annotating on a message.
    pub fn is_multi_hop(&self) -> bool {
        self.ids.len() > 1
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|p| p == id)
    }

    /// The same path walked backwards (reply direction).
    ///
    /// The cost is carried over unchanged; it is only exact for symmetric
    /// metrics.
    pub fn reversed(&self) -> Path {
        let mut ids = self.ids.clone();
        ids.reverse();
        Path { ids, cost: self.cost }
    }

    /// Consecutive `(from, to)` pairs along the path.
    pub fn edges(&self) -> impl Iterator<Item = (&DeviceId, &DeviceId)> + '_ {
        self.ids.windows(2).map(|w| (&w[0], &w[1]))
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine.
///
/// Implementations must be pure: the same graph and endpoints always give the
/// same path, and the snapshot is never modified.
pub trait Router: Send + Sync {
    /// Lowest-cost path from `from` to `to`.
    ///
    /// `from == to` yields the single-element path `[from]`, even when the id
    /// is absent from the snapshot.
    fn route(&self, graph: &MeshGraph<'_>, from: &str, to: &str) -> Path;

    /// Paths from `from` to every other device, in snapshot order.
    fn route_all(&self, graph: &MeshGraph<'_>, from: &str) -> Vec<(DeviceId, Path)> {
        graph
            .nodes()
            .filter(|d| d.id != from)
            .map(|d| (d.id.clone(), self.route(graph, from, d.id.as_str())))
            .collect()
    }
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Dijkstra over the status-gated adjacency of a [`MeshGraph`].
///
/// ```
/// use kit_mesh::{CostMetric, DijkstraRouter, MeshGraph, Router, sample_fleet};
///
/// let fleet = sample_fleet();
/// let graph = MeshGraph::new(&fleet);
/// let path = DijkstraRouter::new(CostMetric::Geographic).route(&graph, "1", "9");
/// assert_eq!(path.ids.first().map(|id| id.as_str()), Some("1"));
/// assert_eq!(path.ids.last().map(|id| id.as_str()), Some("9"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct DijkstraRouter<C = CostMetric> {
    cost: C,
}

impl<C: EdgeCost> DijkstraRouter<C> {
    pub fn new(cost: C) -> Self {
        Self { cost }
    }

    pub fn edge_cost(&self) -> &C {
        &self.cost
    }
}

impl<C: EdgeCost> Router for DijkstraRouter<C> {
    fn route(&self, graph: &MeshGraph<'_>, from: &str, to: &str) -> Path {
        dijkstra(graph, from, to, &self.cost)
    }
}

/// Shortest path over a raw snapshot using `metric`.
///
/// Convenience wrapper for one-off queries: builds a [`MeshGraph`], routes,
/// and returns only the id sequence (empty if unreachable).
pub fn shortest_path(
    snapshot: &[Device],
    start:    &str,
    end:      &str,
    metric:   CostMetric,
) -> Vec<DeviceId> {
    let graph = MeshGraph::new(snapshot);
    dijkstra(&graph, start, end, &metric).ids
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

fn dijkstra<C: EdgeCost>(graph: &MeshGraph<'_>, from: &str, to: &str, cost: &C) -> Path {
    if from == to {
        return Path::trivial(from);
    }
    let (Some(start), Some(end)) = (graph.index_of(from), graph.index_of(to)) else {
        return Path::none();
    };

    let n = graph.node_count();
    // dist[v] = best known cost to reach v.
    let mut dist    = vec![f64::INFINITY; n];
    // prev[v] = predecessor on the best known path; INVALID while unreached.
    let mut prev    = vec![NodeIndex::INVALID; n];
    let mut visited = vec![false; n];

    dist[start.index()] = 0.0;

    while let Some(current) = closest_unvisited(&dist, &visited) {
        if current == end {
            break;
        }
        visited[current.index()] = true;

        let current_dev = graph.node(current);
        for neighbor_id in &current_dev.connected_to {
            // Neighbors missing from the snapshot are skipped.
            let Some(neighbor) = graph.index_of(neighbor_id.as_str()) else {
                continue;
            };
            if visited[neighbor.index()] {
                continue;
            }
            let neighbor_dev = graph.node(neighbor);
            if !MeshGraph::is_traversable(neighbor_dev) {
                continue;
            }

            let alt = dist[current.index()] + cost.cost(current_dev, neighbor_dev);
            if alt < dist[neighbor.index()] {
                dist[neighbor.index()] = alt;
                prev[neighbor.index()] = current;
            }
        }
    }

    reconstruct(graph, &prev, start, end, dist[end.index()])
}

/// Unvisited node with the smallest finite tentative distance; the first one
/// in snapshot order wins ties.  `None` once every remaining node is
/// unreachable.
fn closest_unvisited(dist: &[f64], visited: &[bool]) -> Option<NodeIndex> {
    let mut best: Option<(usize, f64)> = None;
    for (i, (&d, &done)) in dist.iter().zip(visited).enumerate() {
        if done || !d.is_finite() {
            continue;
        }
        if best.is_none_or(|(_, b)| d < b) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| NodeIndex(i as u32))
}

fn reconstruct(
    graph: &MeshGraph<'_>,
    prev:  &[NodeIndex],
    start: NodeIndex,
    end:   NodeIndex,
    total: f64,
) -> Path {
    if !total.is_finite() {
        return Path::none();
    }

    let mut ids = Vec::new();
    let mut cur = end;
    loop {
        ids.push(graph.node(cur).id.clone());
        if cur == start {
            break;
        }
        let p = prev[cur.index()];
        if p == NodeIndex::INVALID || ids.len() > prev.len() {
            return Path::none();
        }
        cur = p;
    }
    ids.reverse();
    Path { ids, cost: total }
}
