//! Events emitted by the simulator and device-state updates handed back to
//! the caller.

use std::fmt;

use kit_core::{DeviceId, Millis};

// ── BroadcastId ───────────────────────────────────────────────────────────────

/// Sequential id of one `broadcast_alert` call, starting at 0.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BroadcastId(pub u64);

impl fmt::Display for BroadcastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "broadcast#{}", self.0)
    }
}

// ── MessageKind ───────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MessageKind {
    /// Command center → kit alert.
    Alert,
    /// Kit → command center reply carrying the full reading.
    Reply,
    /// Periodic kit → command center reading summary.
    StatusReport,
    /// Kit → command center notice that a sensor left its bounds.
    ThresholdAlert,
}

impl MessageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::Alert          => "alert",
            MessageKind::Reply          => "reply",
            MessageKind::StatusReport   => "status_report",
            MessageKind::ThresholdAlert => "threshold_alert",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── MessageEvent ──────────────────────────────────────────────────────────────

/// One entry of the message log.
///
/// `from` and `to` are display names.  `path` is present only when the route
/// behind the message has more than one entry, and always reads in the
/// direction of travel.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MessageEvent {
    /// Emission order across the whole run, starting at 0.
    pub seq:       u64,
    pub kind:      MessageKind,
    /// Virtual time of emission.
    pub at:        Millis,
    pub from:      String,
    pub to:        String,
    pub message:   String,
    /// Time of day rendered from `at`.
    pub timestamp: String,
    pub path:      Option<Vec<String>>,
}

impl MessageEvent {
    /// `"A → B → C"`, or `None` for direct messages.
    pub fn path_display(&self) -> Option<String> {
        self.path.as_ref().map(|names| names.join(" → "))
    }
}

// ── DeviceUpdate ──────────────────────────────────────────────────────────────

/// A device field change the caller should fold into its next snapshot.
///
/// The simulator never writes to the snapshot it was given; apply these with
/// [`FleetStore::apply`](crate::FleetStore::apply) or by hand.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeviceUpdate {
    LastAlert   { device: DeviceId, message: String },
    LastReading { device: DeviceId, reading: String },
}

impl DeviceUpdate {
    pub fn device(&self) -> &DeviceId {
        match self {
            DeviceUpdate::LastAlert { device, .. } | DeviceUpdate::LastReading { device, .. } => device,
        }
    }
}

// ── ReplyState ────────────────────────────────────────────────────────────────

/// Per-kit progress of one broadcast.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReplyState {
    /// Alert delivered, reply scheduled but not yet fired.
    AwaitingReply { due: Millis },
    /// Reply delivered at the given time.
    Replied { at: Millis },
}

impl ReplyState {
    pub fn is_replied(self) -> bool {
        matches!(self, ReplyState::Replied { .. })
    }
}
