//! Device records — the nodes of the mesh.
//!
//! A snapshot of the fleet is just an ordered `[Device]`.  Routing treats the
//! telemetry fields ([`SensorReading`], battery, last alert/reading) as opaque
//! payload; only `id`, `position`, `status`, `kind`, `connected_to` and
//! `signal_strength` take part in path finding.

use std::fmt;
use std::str::FromStr;

use crate::{DeviceId, GeoPoint, KitError};

// ── DeviceStatus ──────────────────────────────────────────────────────────────

/// Reachability of a device.  Offline devices are never relayed through.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeviceStatus {
    #[default]
    Online,
    Offline,
}

impl DeviceStatus {
    #[inline]
    pub fn is_online(self) -> bool {
        matches!(self, DeviceStatus::Online)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DeviceStatus::Online  => "Online",
            DeviceStatus::Offline => "Offline",
        }
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceStatus {
    type Err = KitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            s if s.eq_ignore_ascii_case("online")  => Ok(DeviceStatus::Online),
            s if s.eq_ignore_ascii_case("offline") => Ok(DeviceStatus::Offline),
            other => Err(KitError::Parse(format!(
                "invalid status {other:?}: expected \"Online\" or \"Offline\""
            ))),
        }
    }
}

// ── DeviceKind ────────────────────────────────────────────────────────────────

/// Role of a device in the fleet.
///
/// Exactly one `Official` device (the command center) is expected per fleet;
/// it is the source of broadcasts and the destination of kit reports.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DeviceKind {
    /// The command center.
    Official,
    /// A field survival kit.
    #[default]
    Kit,
}

impl DeviceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceKind::Official => "official",
            DeviceKind::Kit      => "kit",
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceKind {
    type Err = KitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            s if s.eq_ignore_ascii_case("official") => Ok(DeviceKind::Official),
            s if s.eq_ignore_ascii_case("kit")      => Ok(DeviceKind::Kit),
            other => Err(KitError::Parse(format!(
                "invalid device type {other:?}: expected \"official\" or \"kit\""
            ))),
        }
    }
}

// ── SensorReading ─────────────────────────────────────────────────────────────

/// Environmental reading carried by a device.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorReading {
    /// Degrees Celsius.
    pub temperature: f64,
    /// Relative humidity, percent.
    pub humidity:    f64,
    /// hPa.
    pub pressure:    f64,
}

impl SensorReading {
    pub fn new(temperature: f64, humidity: f64, pressure: f64) -> Self {
        Self { temperature, humidity, pressure }
    }

    /// Full reply text sent back to the command center after an alert.
    pub fn describe(&self) -> String {
        format!(
            "Temperature: {}°C, Humidity: {}%, Pressure: {} hPa",
            self.temperature, self.humidity, self.pressure
        )
    }

    /// Compact form used by the periodic mesh status report.
    pub fn short(&self) -> String {
        format!("T:{} H:{}", self.temperature, self.humidity)
    }
}

// ── Device ────────────────────────────────────────────────────────────────────

/// One node of the mesh: the command center or a field kit.
///
/// Construct with [`Device::new`] and the chained setters:
///
/// ```
/// use kit_core::{Device, DeviceKind, DeviceStatus, GeoPoint};
///
/// let kit = Device::new("2", "Survival Kit #1", GeoPoint::new(43.0592, -76.1435), DeviceKind::Kit)
///     .connected_to(["1", "3"])
///     .signal_strength(85.0)
///     .status(DeviceStatus::Online);
/// assert_eq!(kit.connected_to.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Device {
    pub id:              DeviceId,
    /// Display label; only used in message text.
    pub name:            String,
    pub position:        GeoPoint,
    pub status:          DeviceStatus,
    pub kind:            DeviceKind,
    /// Neighbor ids in adjacency order.  Traversable from this device to each
    /// neighbor; symmetry is expected but not enforced.
    pub connected_to:    Vec<DeviceId>,
    /// Link quality 0–100.
    pub signal_strength: f64,
    /// Percent, 0–100.
    pub battery_level:   f64,
    pub reading:         SensorReading,
    pub last_alert:      Option<String>,
    pub last_reading:    Option<String>,
}

impl Device {
    /// A device with no neighbors, full signal and battery, and a zero reading.
    pub fn new(
        id:       impl Into<DeviceId>,
        name:     impl Into<String>,
        position: GeoPoint,
        kind:     DeviceKind,
    ) -> Self {
        Self {
            id:              id.into(),
            name:            name.into(),
            position,
            status:          DeviceStatus::Online,
            kind,
            connected_to:    Vec::new(),
            signal_strength: 100.0,
            battery_level:   100.0,
            reading:         SensorReading::default(),
            last_alert:      None,
            last_reading:    None,
        }
    }

    pub fn connected_to<I, S>(mut self, neighbors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<DeviceId>,
    {
        self.connected_to = neighbors.into_iter().map(Into::into).collect();
        self
    }

    pub fn status(mut self, status: DeviceStatus) -> Self {
        self.status = status;
        self
    }

    pub fn signal_strength(mut self, signal: f64) -> Self {
        self.signal_strength = signal;
        self
    }

    pub fn battery_level(mut self, battery: f64) -> Self {
        self.battery_level = battery;
        self
    }

    pub fn reading(mut self, reading: SensorReading) -> Self {
        self.reading = reading;
        self
    }

    #[inline]
    pub fn is_online(&self) -> bool {
        self.status.is_online()
    }

    #[inline]
    pub fn is_command_center(&self) -> bool {
        self.kind == DeviceKind::Official
    }

    #[inline]
    pub fn is_kit(&self) -> bool {
        self.kind == DeviceKind::Kit
    }
}
