//! `kit-alert` — alert broadcast simulator for the kitmesh network.
//!
//! # Broadcast lifecycle
//!
//! ```text
//! broadcast_alert(snapshot, "Evacuate"):
//!   ① Resolve  — find the command center; no-op if absent or message blank.
//!   ② Fan out  — for every online kit: route CC → kit, emit the ALERT event,
//!                record a LastAlert update.
//!   ③ Schedule — push the kit's reply into the ReplyQueue at
//!                now + U[1000, 3000) ms, reading captured by value.
//!
//! advance(ms) / run_until_idle():
//!   ④ Fire     — drain due replies in time order; emit kit → CC events along
//!                the reversed path and record LastReading updates.
//! ```
//!
//! Per kit the state goes `AwaitingReply → Replied`; there is no failure or
//! cancellation path.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`config`]      | `BroadcastConfig`                                          |
//! | [`event`]       | `MessageEvent`, `MessageKind`, `DeviceUpdate`, `ReplyState`|
//! | [`sink`]        | `MessageSink` trait, `NoopSink`, `VecSink`                 |
//! | [`reply_queue`] | `ReplyQueue` (`BTreeMap<Millis, Vec<PendingReply>>`)       |
//! | [`broadcaster`] | `Broadcaster`, the simulator itself                        |
//! | [`store`]       | `FleetStore`, caller-owned copy-on-write snapshot store    |
//! | [`threshold`]   | `Thresholds`, `check_thresholds`, `ThresholdAlert`         |
//! | [`telemetry`]   | `drift_device`, per-tick sensor/signal/battery drift       |
//! | [`log`]         | `RollingLog<T>`, `MessageLog`                              |
//! | [`error`]       | `AlertError`, `AlertResult<T>`                             |

pub mod broadcaster;
pub mod config;
pub mod error;
pub mod event;
pub mod log;
pub mod reply_queue;
pub mod sink;
pub mod store;
pub mod telemetry;
pub mod threshold;

#[cfg(test)]
mod tests;

pub use broadcaster::{BroadcastReceipt, Broadcaster, COMMAND_CENTER_LABEL};
pub use config::BroadcastConfig;
pub use error::{AlertError, AlertResult};
pub use event::{BroadcastId, DeviceUpdate, MessageEvent, MessageKind, ReplyState};
pub use log::{MessageLog, RollingLog};
pub use reply_queue::{PendingReply, ReplyQueue};
pub use sink::{MessageSink, NoopSink, VecSink};
pub use store::FleetStore;
pub use telemetry::{drain_battery, drift_device, drift_reading, drift_signal};
pub use threshold::{Breach, Bounds, Sensor, ThresholdAlert, ThresholdReading, Thresholds, check_thresholds};
