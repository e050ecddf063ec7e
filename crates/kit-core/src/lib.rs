//! `kit-core` — foundational types for the kitmesh survival-kit network.
//!
//! This crate is a dependency of every other `kit-*` crate.  It has no
//! `kit-*` dependencies and only a handful of external ones (`rand`,
//! `thiserror`, `chrono`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`ids`]         | `DeviceId` (string id), `NodeIndex` (snapshot position)   |
//! | [`geo`]         | `GeoPoint`, haversine distance                            |
//! | [`device`]      | `Device`, `DeviceStatus`, `DeviceKind`, `SensorReading`   |
//! | [`time`]        | `Millis`, `SimClock` (virtual ms clock + display stamps)  |
//! | [`rng`]         | `SimRng` (seeded simulation RNG)                          |
//! | [`error`]       | `KitError`                                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod device;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use device::{Device, DeviceKind, DeviceStatus, SensorReading};
pub use error::KitError;
pub use geo::GeoPoint;
pub use ids::{DeviceId, NodeIndex};
pub use rng::SimRng;
pub use time::{Millis, SimClock};
