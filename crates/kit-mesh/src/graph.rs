//! Read-only graph view over a device snapshot.
//!
//! # Data layout
//!
//! `MeshGraph` keeps the snapshot's devices in their original order (minus
//! duplicate ids) and a `HashMap<&str, NodeIndex>` for O(1) lookup by id.
//! The router allocates its per-node working arrays by `NodeIndex`, and
//! selection scans iterate in that same order, which is what makes tie-breaks
//! reproducible.
//!
//! # Status gating
//!
//! Only online devices are [traversable](MeshGraph::is_traversable).  The
//! router applies that gate when *entering* a neighbor, never to the search
//! origin, so an offline source can still route out while an offline device
//! can never be relayed through or reached.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::warn;

use kit_core::{Device, DeviceId, GeoPoint, NodeIndex};

/// Status-aware view over one immutable snapshot.
pub struct MeshGraph<'a> {
    nodes: Vec<&'a Device>,
    index: HashMap<&'a str, NodeIndex>,
}

impl<'a> MeshGraph<'a> {
    /// Wrap `snapshot`.  The first occurrence of each id is authoritative;
    /// later duplicates are dropped with a warning.
    pub fn new(snapshot: &'a [Device]) -> Self {
        let mut nodes = Vec::with_capacity(snapshot.len());
        let mut index = HashMap::with_capacity(snapshot.len());

        for device in snapshot {
            match index.entry(device.id.as_str()) {
                Entry::Occupied(_) => {
                    warn!(device_id = %device.id, name = %device.name,
                        "duplicate device id in snapshot; keeping first occurrence");
                }
                Entry::Vacant(slot) => {
                    slot.insert(NodeIndex(nodes.len() as u32));
                    nodes.push(device);
                }
            }
        }

        Self { nodes, index }
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    /// Devices in snapshot order.
    pub fn nodes(&self) -> impl Iterator<Item = &'a Device> + '_ {
        self.nodes.iter().copied()
    }

    #[inline]
    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    /// The device at `idx`.
    ///
    /// # Panics
    /// Panics if `idx` was not issued by this graph.
    #[inline]
    pub fn node(&self, idx: NodeIndex) -> &'a Device {
        self.nodes[idx.index()]
    }

    pub fn device(&self, id: &str) -> Option<&'a Device> {
        self.index_of(id).map(|idx| self.node(idx))
    }

    /// The `connected_to` list of `id`, or an empty slice if `id` is unknown.
    pub fn neighbors_of(&self, id: &str) -> &'a [DeviceId] {
        match self.device(id) {
            Some(device) => device.connected_to.as_slice(),
            None         => &[],
        }
    }

    /// `true` iff the device may be entered by a route.
    #[inline]
    pub fn is_traversable(device: &Device) -> bool {
        device.is_online()
    }

    /// `true` if `from` lists `to` as a neighbor.
    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        self.neighbors_of(from).iter().any(|n| n == to)
    }

    /// The first `official` device in snapshot order.
    pub fn command_center(&self) -> Option<&'a Device> {
        self.nodes().find(|d| d.is_command_center())
    }

    /// Field kits in snapshot order, regardless of status.
    pub fn kits(&self) -> impl Iterator<Item = &'a Device> + '_ {
        self.nodes().filter(|d| d.is_kit())
    }

    // ── Path presentation ─────────────────────────────────────────────────

    /// Display names along `ids`.  Ids absent from the snapshot keep their raw id.
    pub fn names_for(&self, ids: &[DeviceId]) -> Vec<String> {
        ids.iter()
            .map(|id| match self.device(id.as_str()) {
                Some(d) => d.name.clone(),
                None    => id.to_string(),
            })
            .collect()
    }

    /// Positions along `ids`, skipping ids absent from the snapshot.
    pub fn positions_for(&self, ids: &[DeviceId]) -> Vec<GeoPoint> {
        ids.iter()
            .filter_map(|id| self.device(id.as_str()))
            .map(|d| d.position)
            .collect()
    }
}
