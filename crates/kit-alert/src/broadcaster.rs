//! The `Broadcaster` and its virtual-time reply loop.

use std::collections::BTreeMap;

use tracing::{debug, info};

use kit_core::{Device, DeviceId, GeoPoint, Millis, SimClock, SimRng};
use kit_mesh::{DijkstraRouter, MeshGraph, Router};

use crate::telemetry::drift_device;
use crate::{
    AlertResult, BroadcastConfig, BroadcastId, DeviceUpdate, MessageEvent, MessageKind,
    MessageSink, PendingReply, ReplyQueue, ReplyState, ThresholdAlert, Thresholds,
    check_thresholds,
};

/// Recipient label used for threshold notices when the snapshot has no
/// command center.
pub const COMMAND_CENTER_LABEL: &str = "Command Center";

// ── BroadcastReceipt ──────────────────────────────────────────────────────────

/// What one accepted `broadcast_alert` call did.
#[derive(Clone, Debug, PartialEq)]
pub struct BroadcastReceipt {
    pub id:         BroadcastId,
    /// Online kits that received the alert, in snapshot order.
    pub recipients: Vec<DeviceId>,
    /// One `LastAlert` per recipient.
    pub updates:    Vec<DeviceUpdate>,
}

// ── Broadcaster ───────────────────────────────────────────────────────────────

/// Alert broadcast simulator.
///
/// Owns the virtual clock, the seeded RNG, and the queue of pending replies.
/// Every operation takes the caller's snapshot by reference and never writes
/// to it; state changes come back as [`DeviceUpdate`]s.
///
/// Time only moves when the caller says so: [`advance`](Self::advance),
/// [`advance_to`](Self::advance_to), or [`run_until_idle`](Self::run_until_idle).
pub struct Broadcaster<R: Router = DijkstraRouter> {
    pub config: BroadcastConfig,

    /// Virtual clock; every emitted event is stamped from it.
    pub clock: SimClock,

    router:   R,
    rng:      SimRng,
    pending:  ReplyQueue,
    next_seq: u64,
    next_id:  u64,

    /// Per-kit reply progress of the last `config.broadcast_history`
    /// broadcasts.
    broadcasts: BTreeMap<BroadcastId, Vec<(DeviceId, ReplyState)>>,
}

impl Broadcaster<DijkstraRouter> {
    /// Validate `config` and route with its configured metric.
    pub fn new(config: BroadcastConfig) -> AlertResult<Self> {
        let router = DijkstraRouter::new(config.metric);
        Self::with_router(config, router)
    }
}

impl<R: Router> Broadcaster<R> {
    pub fn with_router(config: BroadcastConfig, router: R) -> AlertResult<Self> {
        config.validate()?;
        Ok(Self {
            clock:      config.make_clock(),
            rng:        SimRng::new(config.seed),
            config,
            router,
            pending:    ReplyQueue::new(),
            next_seq:   0,
            next_id:    0,
            broadcasts: BTreeMap::new(),
        })
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    pub fn now(&self) -> Millis {
        self.clock.now
    }

    /// Replies scheduled but not yet fired.
    pub fn pending_replies(&self) -> usize {
        self.pending.len()
    }

    /// Due time of the next pending reply.
    pub fn next_reply_due(&self) -> Option<Millis> {
        self.pending.next_due()
    }

    /// Progress of `kit`'s reply to broadcast `id`, or `None` if the kit was
    /// not a recipient or the broadcast has aged out of the history.
    pub fn reply_state(&self, id: BroadcastId, kit: &str) -> Option<ReplyState> {
        self.broadcasts
            .get(&id)?
            .iter()
            .find(|(k, _)| k == kit)
            .map(|&(_, state)| state)
    }

    // ── Broadcast ─────────────────────────────────────────────────────────

    /// Send `message` from the command center to every online kit and
    /// schedule each kit's reply.
    ///
    /// Returns `None` without emitting anything when `message` is blank or the
    /// snapshot has no command center.  A command center with no online kits
    /// still yields a receipt, with no recipients.
    pub fn broadcast_alert<S: MessageSink>(
        &mut self,
        snapshot: &[Device],
        message:  &str,
        sink:     &mut S,
    ) -> Option<BroadcastReceipt> {
        if message.trim().is_empty() {
            debug!("blank alert ignored");
            return None;
        }
        let graph = MeshGraph::new(snapshot);
        let Some(cc) = graph.command_center() else {
            debug!("no command center in snapshot; alert ignored");
            return None;
        };

        let id = BroadcastId(self.next_id);
        self.next_id += 1;
        let mut recipients = Vec::new();
        let mut updates = Vec::new();
        let mut states = Vec::new();

        for kit in graph.kits().filter(|k| k.is_online()) {
            let path = self.router.route(&graph, cc.id.as_str(), kit.id.as_str());
            let names = path.is_multi_hop().then(|| graph.names_for(&path.ids));

            self.emit(
                sink,
                MessageKind::Alert,
                cc.name.clone(),
                kit.name.clone(),
                format!("ALERT: {message}"),
                names.clone(),
            );
            updates.push(DeviceUpdate::LastAlert {
                device:  kit.id.clone(),
                message: message.to_owned(),
            });

            let delay = self
                .rng
                .gen_range(self.config.reply_delay_min_ms..self.config.reply_delay_max_ms);
            let due = self.clock.now + delay;
            self.pending.push(due, PendingReply {
                broadcast:      id,
                kit:            kit.id.clone(),
                kit_name:       kit.name.clone(),
                command_center: cc.name.clone(),
                reading:        kit.reading.describe(),
                path:           names.map(|mut n| {
                    n.reverse();
                    n
                }),
            });
            debug!(%id, kit = %kit.id, hops = path.hops(), %due, "alert delivered, reply scheduled");

            states.push((kit.id.clone(), ReplyState::AwaitingReply { due }));
            recipients.push(kit.id.clone());
        }

        info!(%id, recipients = recipients.len(), at = %self.clock.now, "alert broadcast");
        self.broadcasts.insert(id, states);
        while self.broadcasts.len() > self.config.broadcast_history {
            if let Some((old, _)) = self.broadcasts.pop_first() {
                debug!(id = %old, "broadcast history trimmed");
            }
        }
        Some(BroadcastReceipt { id, recipients, updates })
    }

    // ── Virtual time ──────────────────────────────────────────────────────

    /// Move the clock forward by `ms`, firing every reply that comes due.
    pub fn advance<S: MessageSink>(&mut self, ms: u64, sink: &mut S) -> Vec<DeviceUpdate> {
        let target = self.clock.now + ms;
        self.advance_to(target, sink)
    }

    /// Move the clock forward to `t` (never backwards), firing due replies in
    /// due-time order.  Each reply is stamped with its own due time.
    pub fn advance_to<S: MessageSink>(&mut self, t: Millis, sink: &mut S) -> Vec<DeviceUpdate> {
        let due = self.pending.pop_due(t);
        let mut updates = Vec::with_capacity(due.len());

        for (at, reply) in due {
            self.clock.advance_to(at);
            self.emit(
                sink,
                MessageKind::Reply,
                reply.kit_name,
                reply.command_center,
                reply.reading.clone(),
                reply.path,
            );
            if let Some(states) = self.broadcasts.get_mut(&reply.broadcast) {
                if let Some((_, state)) = states.iter_mut().find(|(k, _)| *k == reply.kit) {
                    *state = ReplyState::Replied { at };
                }
            }
            debug!(broadcast = %reply.broadcast, kit = %reply.kit, %at, "reply fired");
            updates.push(DeviceUpdate::LastReading { device: reply.kit, reading: reply.reading });
        }

        self.clock.advance_to(t);
        updates
    }

    /// Fire every pending reply, leaving the clock at the last due time.
    pub fn run_until_idle<S: MessageSink>(&mut self, sink: &mut S) -> Vec<DeviceUpdate> {
        match self.pending.last_due() {
            Some(last) => self.advance_to(last, sink),
            None       => Vec::new(),
        }
    }

    // ── Periodic sweeps ───────────────────────────────────────────────────

    /// Each online kit reports `T:{t} H:{h}` to the command center.
    ///
    /// The path annotation is the command-center-to-kit route reversed, and
    /// is present only for multi-entry routes.  Returns the number of
    /// reports; 0 when there is no command center.
    pub fn status_sweep<S: MessageSink>(&mut self, snapshot: &[Device], sink: &mut S) -> usize {
        let graph = MeshGraph::new(snapshot);
        let Some(cc) = graph.command_center() else {
            return 0;
        };

        let mut reports = 0;
        for kit in graph.kits().filter(|k| k.is_online()) {
            let path = self.router.route(&graph, cc.id.as_str(), kit.id.as_str());
            let names = path.is_multi_hop().then(|| graph.names_for(&path.reversed().ids));
            self.emit(
                sink,
                MessageKind::StatusReport,
                kit.name.clone(),
                cc.name.clone(),
                kit.reading.short(),
                names,
            );
            reports += 1;
        }
        debug!(reports, at = %self.clock.now, "status sweep");
        reports
    }

    /// Check every online kit against `thresholds`.
    ///
    /// Each breach is reported to the sink twice: first as a kit → command
    /// center message, then as a [`ThresholdAlert`] paired with that message.
    /// No routing is involved.
    pub fn report_thresholds<S: MessageSink>(
        &mut self,
        snapshot:   &[Device],
        thresholds: &Thresholds,
        sink:       &mut S,
    ) -> Vec<ThresholdAlert> {
        let graph = MeshGraph::new(snapshot);
        let to = graph
            .command_center()
            .map_or_else(|| COMMAND_CENTER_LABEL.to_owned(), |cc| cc.name.clone());

        let alerts: Vec<ThresholdAlert> = graph
            .kits()
            .filter(|k| k.is_online())
            .filter_map(|k| check_thresholds(k, thresholds))
            .collect();

        for alert in &alerts {
            let event = self.emit(
                sink,
                MessageKind::ThresholdAlert,
                alert.device_name.clone(),
                to.clone(),
                alert.to_message(),
                None,
            );
            sink.on_threshold_alert(&event, alert);
        }
        if !alerts.is_empty() {
            info!(count = alerts.len(), at = %self.clock.now, "threshold alerts");
        }
        alerts
    }

    /// One dashboard refresh: drift every reading, signal strength and battery
    /// level, check thresholds, then run a status sweep, all against the
    /// drifted snapshot.
    ///
    /// Returns the drifted snapshot; `snapshot` itself is left untouched.
    pub fn tick<S: MessageSink>(
        &mut self,
        snapshot:   &[Device],
        thresholds: &Thresholds,
        sink:       &mut S,
    ) -> Vec<Device> {
        let next: Vec<Device> = snapshot
            .iter()
            .map(|d| drift_device(d, &self.config, &mut self.rng))
            .collect();

        self.report_thresholds(&next, thresholds, sink);
        self.status_sweep(&next, sink);
        next
    }

    // ── Route overlay ─────────────────────────────────────────────────────

    /// Positions along the `kit_id` → command center route, for drawing.
    ///
    /// Empty when there is no command center or no route.
    pub fn route_overlay(&self, snapshot: &[Device], kit_id: &str) -> Vec<GeoPoint> {
        let graph = MeshGraph::new(snapshot);
        let Some(cc) = graph.command_center() else {
            return Vec::new();
        };
        let path = self.router.route(&graph, kit_id, cc.id.as_str());
        graph.positions_for(&path.ids)
    }

    // ── Internal ──────────────────────────────────────────────────────────

    fn emit<S: MessageSink>(
        &mut self,
        sink:    &mut S,
        kind:    MessageKind,
        from:    String,
        to:      String,
        message: String,
        path:    Option<Vec<String>>,
    ) -> MessageEvent {
        let event = MessageEvent {
            seq: self.next_seq,
            kind,
            at: self.clock.now,
            from,
            to,
            message,
            timestamp: self.clock.time_of_day(),
            path,
        };
        self.next_seq += 1;
        sink.on_message(&event);
        event
    }
}
