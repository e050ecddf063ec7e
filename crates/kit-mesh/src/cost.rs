//! Edge-cost policies.
//!
//! Two metrics are supported and chosen per deployment via [`CostMetric`]:
//!
//! | Metric           | Cost of stepping `from → to`                       |
//! |------------------|----------------------------------------------------|
//! | `Geographic`     | haversine km between the two positions             |
//! | `SignalStrength` | `(100 - to.signal_strength) / 10`                  |
//!
//! Both are non-negative, which is all Dijkstra needs.  The signal metric is
//! directional: it prices *entering* `to` by `to`'s own signal strength, so
//! `A → B` and `B → A` generally cost different amounts.  That asymmetry is
//! kept as-is.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use kit_core::{Device, KitError};

/// Pluggable edge-cost function.
///
/// Implementations must return a non-negative, non-NaN cost.
pub trait EdgeCost: Send + Sync {
    fn cost(&self, from: &Device, to: &Device) -> f64;
}

/// Great-circle distance between the two devices, in kilometres.
#[derive(Copy, Clone, Debug, Default)]
pub struct Geographic;

impl EdgeCost for Geographic {
    #[inline]
    fn cost(&self, from: &Device, to: &Device) -> f64 {
        from.position.distance_km(to.position)
    }
}

/// Cost derived from the entered device's signal strength.
///
/// Signal values are clamped to 0–100 (NaN counts as 0) so the cost stays
/// within 0–10.
#[derive(Copy, Clone, Debug, Default)]
pub struct SignalStrength;

impl EdgeCost for SignalStrength {
    #[inline]
    fn cost(&self, _from: &Device, to: &Device) -> f64 {
        let signal = if to.signal_strength.is_nan() {
            0.0
        } else {
            to.signal_strength.clamp(0.0, 100.0)
        };
        (100.0 - signal) / 10.0
    }
}

// ── CostMetric ────────────────────────────────────────────────────────────────

/// Configuration-level choice of metric.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostMetric {
    #[default]
    Geographic,
    SignalStrength,
}

impl CostMetric {
    pub fn as_str(self) -> &'static str {
        match self {
            CostMetric::Geographic     => "geographic",
            CostMetric::SignalStrength => "signal_strength",
        }
    }
}

impl EdgeCost for CostMetric {
    #[inline]
    fn cost(&self, from: &Device, to: &Device) -> f64 {
        match self {
            CostMetric::Geographic     => Geographic.cost(from, to),
            CostMetric::SignalStrength => SignalStrength.cost(from, to),
        }
    }
}

impl fmt::Display for CostMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CostMetric {
    type Err = KitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "geographic" | "geo"                  => Ok(CostMetric::Geographic),
            "signal_strength" | "signal-strength"
            | "signal"                            => Ok(CostMetric::SignalStrength),
            other => Err(KitError::Parse(format!(
                "invalid cost metric {other:?}: expected \"geographic\" or \"signal_strength\""
            ))),
        }
    }
}
