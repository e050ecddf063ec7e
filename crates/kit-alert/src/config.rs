//! Simulator configuration.

use kit_core::SimClock;
use kit_mesh::CostMetric;

use crate::{AlertError, AlertResult};

/// Top-level broadcast simulator configuration.
///
/// Typically built by the application from defaults plus environment or file
/// overrides, then checked with [`validate`](Self::validate) (which
/// [`Broadcaster::new`](crate::Broadcaster::new) does for you).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BroadcastConfig {
    /// Master RNG seed.  The same seed always produces identical reply delays.
    pub seed: u64,

    /// Inclusive lower bound of the simulated reply delay.
    pub reply_delay_min_ms: u64,

    /// Exclusive upper bound of the simulated reply delay.
    pub reply_delay_max_ms: u64,

    /// Edge-cost policy for every route computed by the simulator.
    pub metric: CostMetric,

    /// Unix timestamp for `Millis::ZERO`; only affects display stamps.
    pub start_unix_secs: i64,

    /// UTC offset applied to display stamps.  Must be within ±24 h.
    pub utc_offset_secs: i32,

    /// Cadence of the periodic mesh status sweep driven by the application.
    pub report_interval_ms: u64,

    /// Width of the uniform per-tick sensor drift; 0 freezes readings.
    pub drift_span: f64,

    /// Width of the uniform per-tick signal-strength drift; 0 freezes links.
    pub signal_drift_span: f64,

    /// Upper bound of the per-tick battery drain.
    pub battery_drain_max: f64,

    /// Messages kept by a [`MessageLog`](crate::MessageLog).
    pub message_log_capacity: usize,

    /// Threshold alerts kept by a [`MessageLog`](crate::MessageLog).
    pub alert_log_capacity: usize,

    /// Broadcasts whose per-kit reply state the simulator remembers; older
    /// ones are forgotten first.
    pub broadcast_history: usize,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            seed:                 42,
            reply_delay_min_ms:   1_000,
            reply_delay_max_ms:   3_000,
            metric:               CostMetric::Geographic,
            start_unix_secs:      0,
            utc_offset_secs:      0,
            report_interval_ms:   10_000,
            drift_span:           4.0,
            signal_drift_span:    10.0,
            battery_drain_max:    0.5,
            message_log_capacity: 10,
            alert_log_capacity:   20,
            broadcast_history:    20,
        }
    }
}

impl BroadcastConfig {
    pub fn validate(&self) -> AlertResult<()> {
        if self.reply_delay_min_ms >= self.reply_delay_max_ms {
            return Err(AlertError::Config(format!(
                "reply delay range [{}, {}) is empty",
                self.reply_delay_min_ms, self.reply_delay_max_ms
            )));
        }
        if self.utc_offset_secs.unsigned_abs() >= 86_400 {
            return Err(AlertError::Config(format!(
                "utc offset {}s is outside ±24h",
                self.utc_offset_secs
            )));
        }
        for (name, value) in [
            ("drift span", self.drift_span),
            ("signal drift span", self.signal_drift_span),
            ("battery drain", self.battery_drain_max),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(AlertError::Config(format!(
                    "{name} {value} must be finite and non-negative"
                )));
            }
        }
        if self.report_interval_ms == 0 {
            return Err(AlertError::Config("report interval must be positive".into()));
        }
        Ok(())
    }

    /// Construct a `SimClock` anchored at this run's start time.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.start_unix_secs, self.utc_offset_secs)
    }
}
