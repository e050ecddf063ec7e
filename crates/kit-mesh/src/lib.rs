//! `kit-mesh` — mesh graph model and shortest-path routing.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`graph`]   | `MeshGraph` — read-only, status-aware view over a snapshot      |
//! | [`cost`]    | `EdgeCost` trait, `Geographic`, `SignalStrength`, `CostMetric`  |
//! | [`router`]  | `Router` trait, `Path`, `DijkstraRouter`, `shortest_path`       |
//! | [`loader`]  | `load_devices_csv`, `load_devices_reader`                       |
//! | [`fleet`]   | `sample_fleet` — the nine-device demo fleet                     |
//! | [`error`]   | `MeshError`, `MeshResult<T>`                                    |
//!
//! # Purity
//!
//! Routing never mutates its input.  A snapshot is an ordered `[Device]`; a
//! [`MeshGraph`] borrows it for the duration of one or more queries and is
//! dropped afterwards.  No state survives between calls.

pub mod cost;
pub mod error;
pub mod fleet;
pub mod graph;
pub mod loader;
pub mod router;


pub use cost::{CostMetric, EdgeCost, Geographic, SignalStrength};
pub use error::{MeshError, MeshResult};
pub use fleet::sample_fleet;
pub use graph::MeshGraph;
pub use loader::{load_devices_csv, load_devices_reader};
pub use router::{DijkstraRouter, Path, Router, shortest_path};
