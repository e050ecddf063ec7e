//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing virtual millisecond counter
//! ([`Millis`]).  Reply delays and periodic sweeps are scheduled against it,
//! so a run is fully reproducible and tests never sleep.
//!
//! The mapping to wall-clock time lives in [`SimClock`]:
//!
//!   wall_time = start_unix_secs + now / 1000
//!
//! Wall-clock time is only used to render the display-only time-of-day
//! stamp on log entries.  Ordering is always by `Millis` (and insertion
//! sequence), never by re-parsing that string.

use std::fmt;

use chrono::{DateTime, FixedOffset, Offset, Utc};

/// Display format of [`SimClock::time_of_day`], e.g. `3:04:05 PM`.
pub const TIME_OF_DAY_FORMAT: &str = "%-I:%M:%S %p";

// ── Millis ────────────────────────────────────────────────────────────────────

/// An absolute virtual time in milliseconds since simulation start.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Millis(pub u64);

impl Millis {
    pub const ZERO: Millis = Millis(0);

    /// The time `ms` milliseconds after `self`.
    #[inline]
    pub fn offset(self, ms: u64) -> Millis {
        Millis(self.0.saturating_add(ms))
    }

    /// Milliseconds elapsed from `earlier` to `self` (zero if `earlier` is later).
    #[inline]
    pub fn since(self, earlier: Millis) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Millis {
    type Output = Millis;
    #[inline]
    fn add(self, rhs: u64) -> Millis {
        self.offset(rhs)
    }
}

impl fmt::Display for Millis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Virtual clock plus the wall-clock anchor used for display stamps.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Unix timestamp (seconds since epoch) of `Millis::ZERO`.
    pub start_unix_secs: i64,
    /// Offset from UTC used when formatting the time of day.
    pub utc_offset_secs: i32,
    /// Current virtual time.
    pub now: Millis,
}

impl SimClock {
    pub fn new(start_unix_secs: i64, utc_offset_secs: i32) -> Self {
        Self { start_unix_secs, utc_offset_secs, now: Millis::ZERO }
    }

    /// Move the clock forward to `t`.  Never moves backwards.
    #[inline]
    pub fn advance_to(&mut self, t: Millis) {
        if t > self.now {
            self.now = t;
        }
    }

    #[inline]
    pub fn advance_by(&mut self, ms: u64) {
        self.now = self.now.offset(ms);
    }

    /// Unix time in milliseconds corresponding to `t`.
    pub fn unix_millis(&self, t: Millis) -> i64 {
        self.start_unix_secs
            .saturating_mul(1_000)
            .saturating_add(i64::try_from(t.0).unwrap_or(i64::MAX))
    }

    /// Locale-style time of day (`h:mm:ss AM`) for `t`.
    ///
    /// Falls back to the raw `Millis` rendering if the instant is outside
    /// chrono's representable range.
    pub fn time_of_day_at(&self, t: Millis) -> String {
        let offset = FixedOffset::east_opt(self.utc_offset_secs).unwrap_or_else(|| Utc.fix());
        match DateTime::from_timestamp_millis(self.unix_millis(t)) {
            Some(utc) => utc.with_timezone(&offset).format(TIME_OF_DAY_FORMAT).to_string(),
            None      => t.to_string(),
        }
    }

    /// [`time_of_day_at`](Self::time_of_day_at) for the current time.
    pub fn time_of_day(&self) -> String {
        self.time_of_day_at(self.now)
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.now, self.time_of_day())
    }
}
