//! Per-sensor bounds checks.
//!
//! Pure functions over a single device; nothing here touches routing.

use std::fmt;

use kit_core::{Device, DeviceId};

// ── Bounds ────────────────────────────────────────────────────────────────────

/// Closed acceptable range for one sensor.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// The violated bound and its side, or `None` when `value` is in range.
    /// NaN is never out of range.
    pub fn check(&self, value: f64) -> Option<(f64, Breach)> {
        if value < self.min {
            Some((self.min, Breach::Min))
        } else if value > self.max {
            Some((self.max, Breach::Max))
        } else {
            None
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Thresholds {
    pub temperature: Bounds,
    pub humidity:    Bounds,
    pub pressure:    Bounds,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            temperature: Bounds::new(15.0, 30.0),
            humidity:    Bounds::new(40.0, 80.0),
            pressure:    Bounds::new(980.0, 1020.0),
        }
    }
}

// ── Sensor / Breach ───────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Sensor {
    Temperature,
    Humidity,
    Pressure,
}

impl Sensor {
    pub const ALL: [Sensor; 3] = [Sensor::Temperature, Sensor::Humidity, Sensor::Pressure];

    pub fn as_str(self) -> &'static str {
        match self {
            Sensor::Temperature => "temperature",
            Sensor::Humidity    => "humidity",
            Sensor::Pressure    => "pressure",
        }
    }
}

impl fmt::Display for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side of the range a reading fell off.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Breach {
    Min,
    Max,
}

impl Breach {
    pub fn as_str(self) -> &'static str {
        match self {
            Breach::Min => "min",
            Breach::Max => "max",
        }
    }
}

impl fmt::Display for Breach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ThresholdAlert ────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThresholdReading {
    pub sensor:    Sensor,
    pub value:     f64,
    pub threshold: f64,
    pub breach:    Breach,
}

/// Every out-of-range sensor on one device, in `Sensor::ALL` order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThresholdAlert {
    pub device_id:   DeviceId,
    pub device_name: String,
    pub readings:    Vec<ThresholdReading>,
}

impl ThresholdAlert {
    /// Log text naming the side and offending value of each breach, e.g.
    /// `ALERT: max 31.2, min 12`.
    pub fn to_message(&self) -> String {
        let parts: Vec<String> = self
            .readings
            .iter()
            .map(|r| format!("{} {}", r.breach, r.value))
            .collect();
        format!("ALERT: {}", parts.join(", "))
    }
}

/// Compare `device`'s reading against `thresholds`.
///
/// Returns `None` when every sensor is within bounds.  Callers decide which
/// devices to check; the command center has no meaningful reading.
pub fn check_thresholds(device: &Device, thresholds: &Thresholds) -> Option<ThresholdAlert> {
    let readings: Vec<ThresholdReading> = Sensor::ALL
        .into_iter()
        .filter_map(|sensor| {
            let (bounds, value) = match sensor {
                Sensor::Temperature => (thresholds.temperature, device.reading.temperature),
                Sensor::Humidity    => (thresholds.humidity,    device.reading.humidity),
                Sensor::Pressure    => (thresholds.pressure,    device.reading.pressure),
            };
            bounds
                .check(value)
                .map(|(threshold, breach)| ThresholdReading { sensor, value, threshold, breach })
        })
        .collect();

    if readings.is_empty() {
        return None;
    }
    Some(ThresholdAlert {
        device_id:   device.id.clone(),
        device_name: device.name.clone(),
        readings,
    })
}
