//! Unit tests for kit-alert.

#[cfg(test)]
mod helpers {
    use kit_core::{Device, DeviceKind, DeviceStatus, GeoPoint, SensorReading};

    use crate::{BroadcastConfig, Broadcaster};

    pub fn kit(id: &str, lat: f64, lon: f64, neighbors: &[&str]) -> Device {
        Device::new(id, format!("Kit {id}"), GeoPoint::new(lat, lon), DeviceKind::Kit)
            .connected_to(neighbors.iter().copied())
            .reading(SensorReading::new(22.0, 55.0, 1000.0))
    }

    pub fn command_center(neighbors: &[&str]) -> Device {
        Device::new("CC", "Command Center", GeoPoint::new(0.0, 0.0), DeviceKind::Official)
            .connected_to(neighbors.iter().copied())
    }

    /// ```text
    ///   CC — K1 — K4        K5 (online, no links)
    ///    \   |
    ///     \  K2
    ///      K3 (offline)
    /// ```
    ///
    /// K4 is only reachable through K1.
    pub fn mesh() -> Vec<Device> {
        vec![
            command_center(&["K1", "K2", "K3"]),
            kit("K1", 0.0, 0.01, &["CC", "K2", "K4"]),
            kit("K2", 0.01, 0.0, &["CC", "K1"]),
            kit("K3", -0.01, 0.0, &["CC"]).status(DeviceStatus::Offline),
            kit("K4", 0.0, 0.02, &["K1"]).reading(SensorReading::new(18.5, 70.0, 995.0)),
            kit("K5", 0.5, 0.5, &[]),
        ]
    }

    pub fn broadcaster() -> Broadcaster {
        Broadcaster::new(BroadcastConfig::default()).unwrap()
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod config {
    use crate::{AlertError, BroadcastConfig, Broadcaster};

    #[test]
    fn default_is_valid() {
        let config = BroadcastConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.reply_delay_min_ms, 1_000);
        assert_eq!(config.reply_delay_max_ms, 3_000);
        assert_eq!(config.message_log_capacity, 10);
        assert_eq!(config.alert_log_capacity, 20);
    }

    #[test]
    fn empty_delay_range_rejected() {
        let config = BroadcastConfig { reply_delay_min_ms: 3_000, ..Default::default() };
        assert!(matches!(config.validate(), Err(AlertError::Config(_))));
        assert!(Broadcaster::new(config).is_err());
    }

    #[test]
    fn out_of_range_offset_rejected() {
        let config = BroadcastConfig { utc_offset_secs: 90_000, ..Default::default() };
        assert!(matches!(config.validate(), Err(AlertError::Config(_))));
    }

    #[test]
    fn negative_drift_rejected() {
        let config = BroadcastConfig { drift_span: -1.0, ..Default::default() };
        assert!(config.validate().is_err());
        let config = BroadcastConfig { drift_span: f64::NAN, ..Default::default() };
        assert!(config.validate().is_err());
        let config = BroadcastConfig { signal_drift_span: -0.5, ..Default::default() };
        assert!(config.validate().is_err());
        let config = BroadcastConfig { battery_drain_max: f64::INFINITY, ..Default::default() };
        assert!(config.validate().is_err());
    }
}

// ── Broadcast fan-out ─────────────────────────────────────────────────────────

#[cfg(test)]
mod broadcast {
    use kit_core::{DeviceId, Millis};

    use super::helpers::{broadcaster, command_center, kit, mesh};
    use crate::{
        BroadcastConfig, BroadcastId, Broadcaster, DeviceUpdate, MessageKind, ReplyState, VecSink,
    };

    #[test]
    fn one_alert_and_one_reply_per_online_kit() {
        let snapshot = mesh();
        let mut b = broadcaster();
        let mut sink = VecSink::new();

        let receipt = b.broadcast_alert(&snapshot, "Evacuate", &mut sink).unwrap();

        let expected: Vec<DeviceId> = ["K1", "K2", "K4", "K5"].into_iter().map(DeviceId::from).collect();
        assert_eq!(receipt.recipients, expected);
        assert_eq!(sink.events.len(), 4);
        assert!(sink.events.iter().all(|e| e.kind == MessageKind::Alert));
        assert!(sink.events.iter().all(|e| e.message == "ALERT: Evacuate"));
        assert!(sink.events.iter().all(|e| e.from == "Command Center"));
        assert!(sink.events.iter().all(|e| e.to != "Kit K3"));
        assert_eq!(b.pending_replies(), 4);
    }

    #[test]
    fn last_alert_updates_carry_raw_message() {
        let snapshot = mesh();
        let mut b = broadcaster();
        let receipt = b.broadcast_alert(&snapshot, "Storm inbound", &mut VecSink::new()).unwrap();

        assert_eq!(receipt.updates.len(), 4);
        assert_eq!(receipt.updates[0], DeviceUpdate::LastAlert {
            device:  "K1".into(),
            message: "Storm inbound".into(),
        });
    }

    #[test]
    fn blank_message_is_noop() {
        let snapshot = mesh();
        let mut b = broadcaster();
        let mut sink = VecSink::new();

        assert!(b.broadcast_alert(&snapshot, "", &mut sink).is_none());
        assert!(b.broadcast_alert(&snapshot, "  \t\n", &mut sink).is_none());
        assert!(sink.events.is_empty());
        assert_eq!(b.pending_replies(), 0);
    }

    #[test]
    fn missing_command_center_is_noop() {
        let snapshot = vec![kit("K1", 0.0, 0.0, &["K2"]), kit("K2", 0.0, 0.01, &["K1"])];
        let mut b = broadcaster();
        let mut sink = VecSink::new();

        assert!(b.broadcast_alert(&snapshot, "Evacuate", &mut sink).is_none());
        assert!(sink.events.is_empty());
        assert_eq!(b.pending_replies(), 0);
    }

    #[test]
    fn command_center_alone_sends_nothing() {
        let snapshot = vec![command_center(&[])];
        let mut b = broadcaster();
        let mut sink = VecSink::new();

        let receipt = b.broadcast_alert(&snapshot, "Evacuate", &mut sink).unwrap();
        assert!(receipt.recipients.is_empty());
        assert!(sink.events.is_empty());
    }

    #[test]
    fn path_annotation_follows_route() {
        let snapshot = mesh();
        let mut b = broadcaster();
        let mut sink = VecSink::new();
        b.broadcast_alert(&snapshot, "Evacuate", &mut sink);

        let to = |name: &str| sink.events.iter().find(|e| e.to == name).unwrap();
        assert_eq!(
            to("Kit K1").path.as_deref(),
            Some(&["Command Center".to_owned(), "Kit K1".to_owned()][..])
        );
        assert_eq!(
            to("Kit K4").path_display().as_deref(),
            Some("Command Center → Kit K1 → Kit K4")
        );
        // Unreachable but online: alerted, without a path.
        assert_eq!(to("Kit K5").path, None);
    }

    #[test]
    fn replies_reverse_the_path() {
        let snapshot = mesh();
        let mut b = broadcaster();
        let mut sink = VecSink::new();
        b.broadcast_alert(&snapshot, "Evacuate", &mut sink);
        b.run_until_idle(&mut sink);

        let reply = sink
            .events
            .iter()
            .find(|e| e.kind == MessageKind::Reply && e.from == "Kit K4")
            .unwrap();
        assert_eq!(reply.to, "Command Center");
        assert_eq!(reply.path_display().as_deref(), Some("Kit K4 → Kit K1 → Command Center"));
        assert_eq!(reply.message, "Temperature: 18.5°C, Humidity: 70%, Pressure: 995 hPa");
    }

    #[test]
    fn reply_delays_within_bounds() {
        let snapshot = mesh();
        for seed in 0..20 {
            let config = crate::BroadcastConfig { seed, ..Default::default() };
            let mut b = crate::Broadcaster::new(config).unwrap();
            let mut sink = VecSink::new();
            b.broadcast_alert(&snapshot, "Evacuate", &mut sink);
            b.run_until_idle(&mut sink);

            for e in sink.events.iter().filter(|e| e.kind == MessageKind::Reply) {
                assert!(e.at >= Millis(1_000) && e.at < Millis(3_000), "seed {seed}: {}", e.at);
            }
        }
    }

    #[test]
    fn events_in_seq_and_time_order() {
        let snapshot = mesh();
        let mut b = broadcaster();
        let mut sink = VecSink::new();
        b.broadcast_alert(&snapshot, "Evacuate", &mut sink);
        b.advance(500, &mut sink);
        b.broadcast_alert(&snapshot, "Shelter", &mut sink);
        b.run_until_idle(&mut sink);

        assert_eq!(sink.events.len(), 16);
        for (i, pair) in sink.events.windows(2).enumerate() {
            assert_eq!(pair[0].seq, i as u64);
            assert_eq!(pair[1].seq, pair[0].seq + 1);
            assert!(pair[0].at <= pair[1].at);
        }
    }

    #[test]
    fn advance_fires_only_due_replies() {
        let snapshot = mesh();
        let mut b = broadcaster();
        let mut sink = VecSink::new();
        b.broadcast_alert(&snapshot, "Evacuate", &mut sink);

        assert!(b.advance(999, &mut sink).is_empty());
        assert_eq!(b.pending_replies(), 4);

        let updates = b.advance(2_001, &mut sink);
        assert_eq!(updates.len(), 4);
        assert!(updates.iter().all(|u| matches!(u, DeviceUpdate::LastReading { .. })));
        assert_eq!(b.pending_replies(), 0);
        assert_eq!(b.now(), Millis(3_000));
    }

    #[test]
    fn reply_state_moves_to_replied() {
        let snapshot = mesh();
        let mut b = broadcaster();
        let receipt = b.broadcast_alert(&snapshot, "Evacuate", &mut VecSink::new()).unwrap();

        assert!(matches!(b.reply_state(receipt.id, "K1"), Some(ReplyState::AwaitingReply { .. })));
        assert_eq!(b.reply_state(receipt.id, "K3"), None);

        b.run_until_idle(&mut VecSink::new());
        for kit in ["K1", "K2", "K4", "K5"] {
            assert!(b.reply_state(receipt.id, kit).unwrap().is_replied());
        }
    }

    #[test]
    fn reply_history_keeps_latest_broadcasts() {
        let snapshot = mesh();
        let config = BroadcastConfig { broadcast_history: 2, ..Default::default() };
        let mut b = Broadcaster::new(config).unwrap();
        let mut sink = VecSink::new();

        let ids: Vec<_> = (0..3)
            .map(|_| b.broadcast_alert(&snapshot, "Evacuate", &mut sink).unwrap().id)
            .collect();
        assert_eq!(ids, vec![BroadcastId(0), BroadcastId(1), BroadcastId(2)]);
        assert_eq!(b.reply_state(ids[0], "K1"), None);
        assert!(b.reply_state(ids[1], "K1").is_some());

        // Replies to a forgotten broadcast still fire.
        assert_eq!(b.run_until_idle(&mut sink).len(), 12);
        assert!(b.reply_state(ids[2], "K1").unwrap().is_replied());
    }

    #[test]
    fn replies_reflect_state_at_broadcast_time() {
        let mut snapshot = mesh();
        let mut b = broadcaster();
        let mut sink = VecSink::new();
        b.broadcast_alert(&snapshot, "Evacuate", &mut sink);

        snapshot[1].reading.temperature = 99.0;
        b.run_until_idle(&mut sink);

        let reply = sink.events.iter().find(|e| e.kind == MessageKind::Reply && e.from == "Kit K1").unwrap();
        assert!(reply.message.starts_with("Temperature: 22°C"));
    }

    #[test]
    fn snapshot_never_mutated() {
        let snapshot = mesh();
        let before = snapshot.clone();
        let mut b = broadcaster();
        let mut sink = VecSink::new();
        b.broadcast_alert(&snapshot, "Evacuate", &mut sink);
        b.run_until_idle(&mut sink);
        b.status_sweep(&snapshot, &mut sink);
        assert_eq!(snapshot, before);
    }

    #[test]
    fn same_seed_same_schedule() {
        let snapshot = mesh();
        let run = || {
            let mut b = broadcaster();
            let mut sink = VecSink::new();
            b.broadcast_alert(&snapshot, "Evacuate", &mut sink);
            b.run_until_idle(&mut sink);
            sink.events.into_iter().map(|e| (e.at, e.from)).collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn timestamps_follow_virtual_clock() {
        let snapshot = mesh();
        let mut b = broadcaster();
        let mut sink = VecSink::new();
        b.advance(3_723_000, &mut sink);
        b.broadcast_alert(&snapshot, "Evacuate", &mut sink);
        assert_eq!(sink.events[0].timestamp, "1:02:03 AM");
    }
}

// ── Sweeps and overlay ────────────────────────────────────────────────────────

#[cfg(test)]
mod sweeps {
    use kit_core::{Device, DeviceStatus, GeoPoint, SensorReading};
    use kit_mesh::{CostMetric, MeshGraph, Router};

    use super::helpers::{broadcaster, command_center, kit, mesh};
    use crate::{BroadcastConfig, Broadcaster, MessageKind, Thresholds, VecSink};

    #[test]
    fn status_sweep_reports_online_kits() {
        let snapshot = mesh();
        let mut b = broadcaster();
        let mut sink = VecSink::new();

        assert_eq!(b.status_sweep(&snapshot, &mut sink), 4);
        assert!(sink.events.iter().all(|e| e.kind == MessageKind::StatusReport));
        assert!(sink.events.iter().all(|e| e.to == "Command Center"));

        let k4 = sink.events.iter().find(|e| e.from == "Kit K4").unwrap();
        assert_eq!(k4.message, "T:18.5 H:70");
        assert_eq!(k4.path_display().as_deref(), Some("Kit K4 → Kit K1 → Command Center"));
        let k5 = sink.events.iter().find(|e| e.from == "Kit K5").unwrap();
        assert_eq!(k5.path, None);
    }

    #[test]
    fn status_sweep_without_command_center() {
        let snapshot = vec![kit("K1", 0.0, 0.0, &[])];
        let mut sink = VecSink::new();
        assert_eq!(broadcaster().status_sweep(&snapshot, &mut sink), 0);
        assert!(sink.events.is_empty());
    }

    #[test]
    fn route_overlay_walks_kit_to_command_center() {
        let snapshot = mesh();
        let b = broadcaster();
        assert_eq!(b.route_overlay(&snapshot, "K4"), vec![
            GeoPoint::new(0.0, 0.02),
            GeoPoint::new(0.0, 0.01),
            GeoPoint::new(0.0, 0.0),
        ]);
        assert!(b.route_overlay(&snapshot, "K5").is_empty());
        assert!(b.route_overlay(&snapshot, "missing").is_empty());
        assert!(b.route_overlay(&snapshot[1..], "K1").is_empty());
    }

    #[test]
    fn threshold_report_emits_alert_and_message() {
        let mut snapshot = mesh();
        snapshot[2] = snapshot[2].clone().reading(SensorReading::new(31.2, 12.0, 1000.0));
        snapshot[3] = snapshot[3].clone().reading(SensorReading::new(40.0, 12.0, 1000.0));
        let mut b = broadcaster();
        let mut sink = VecSink::new();

        let alerts = b.report_thresholds(&snapshot, &Thresholds::default(), &mut sink);

        // K3 is offline and is not checked.
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].device_id, "K2");
        assert_eq!(sink.threshold_alerts, alerts);
        assert_eq!(sink.events.len(), 1);
        assert_eq!(sink.events[0].kind, MessageKind::ThresholdAlert);
        assert_eq!(sink.events[0].from, "Kit K2");
        assert_eq!(sink.events[0].message, "ALERT: max 31.2, min 12");
        assert_eq!(sink.events[0].path, None);
    }

    #[test]
    fn tick_drifts_a_copy() {
        let snapshot = mesh();
        let before = snapshot.clone();
        let mut b = broadcaster();
        let mut sink = VecSink::new();

        let next = b.tick(&snapshot, &Thresholds::default(), &mut sink);

        assert_eq!(snapshot, before);
        assert_eq!(next.len(), snapshot.len());
        for (old, new) in snapshot.iter().zip(&next) {
            assert_eq!(old.id, new.id);
            assert!((new.reading.temperature - old.reading.temperature).abs() <= 2.1);
            assert!((new.reading.humidity - old.reading.humidity).abs() <= 2.1);
            assert!((new.reading.pressure - old.reading.pressure).abs() <= 2.1);
        }
        let reports = sink.events.iter().filter(|e| e.kind == MessageKind::StatusReport).count();
        assert_eq!(reports, 4);
    }

    #[test]
    fn tick_moves_signal_and_drains_battery() {
        let mut snapshot: Vec<_> =
            mesh().into_iter().map(|d| d.signal_strength(50.0).battery_level(90.0)).collect();
        snapshot[1] = snapshot[1].clone().signal_strength(99.0).battery_level(0.1);
        let mut b = broadcaster();
        let mut sink = VecSink::new();

        let mut current = snapshot.clone();
        for _ in 0..20 {
            let next = b.tick(&current, &Thresholds::default(), &mut sink);
            for (old, new) in current.iter().zip(&next) {
                assert!((0.0..=100.0).contains(&new.signal_strength));
                assert!((new.signal_strength - old.signal_strength).abs() <= 5.0);
                assert!(new.battery_level <= old.battery_level);
                assert!(new.battery_level >= (old.battery_level - 0.5).max(0.0));
            }
            current = next;
        }

        assert!(current.iter().zip(&snapshot).any(|(a, b)| a.signal_strength != b.signal_strength));
        assert!(current.iter().zip(&snapshot).all(|(a, b)| a.battery_level < b.battery_level));
        assert!(current[1].battery_level >= 0.0);
    }

    #[test]
    fn signal_routes_follow_link_drift() {
        // CC reaches K4 through either K1 or K2; both start at the same
        // signal, so the tie goes to K1.
        let snapshot = vec![
            command_center(&["K1", "K2"]),
            kit("K1", 0.0, 0.01, &["CC", "K4"]).signal_strength(50.0),
            kit("K2", 0.01, 0.0, &["CC", "K4"]).signal_strength(50.0),
            kit("K4", 0.01, 0.01, &["K1", "K2"]),
        ];
        let config = BroadcastConfig {
            metric: CostMetric::SignalStrength,
            signal_drift_span: 200.0,
            ..Default::default()
        };
        let mut b = Broadcaster::new(config).unwrap();
        let via = |b: &Broadcaster, devices: &[Device]| {
            let graph = MeshGraph::new(devices);
            b.router().route(&graph, "CC", "K4").ids[1].clone()
        };
        assert_eq!(via(&b, &snapshot), "K1");

        let mut current = snapshot;
        let mut seen_k2 = false;
        for _ in 0..50 {
            current = b.tick(&current, &Thresholds::default(), &mut VecSink::new());
            if via(&b, &current) == "K2" {
                seen_k2 = current[2].signal_strength > current[1].signal_strength;
                break;
            }
        }
        assert!(seen_k2);
    }

    #[test]
    fn zero_drift_keeps_readings() {
        let snapshot = mesh();
        let config = BroadcastConfig {
            drift_span: 0.0,
            signal_drift_span: 0.0,
            battery_drain_max: 0.0,
            ..Default::default()
        };
        let mut b = Broadcaster::new(config).unwrap();
        let next = b.tick(&snapshot, &Thresholds::default(), &mut VecSink::new());
        assert_eq!(next, snapshot);
    }

    #[test]
    fn offline_kits_do_not_report() {
        let snapshot: Vec<_> = mesh().into_iter().map(|d| d.status(DeviceStatus::Offline)).collect();
        assert_eq!(broadcaster().status_sweep(&snapshot, &mut VecSink::new()), 0);
    }
}

// ── Thresholds ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod threshold {
    use kit_core::SensorReading;

    use super::helpers::kit;
    use crate::{Breach, Bounds, Sensor, Thresholds, check_thresholds};

    #[test]
    fn in_range_is_none() {
        let device = kit("K1", 0.0, 0.0, &[]);
        assert!(check_thresholds(&device, &Thresholds::default()).is_none());
    }

    #[test]
    fn bounds_are_inclusive() {
        let device = kit("K1", 0.0, 0.0, &[]).reading(SensorReading::new(30.0, 40.0, 980.0));
        assert!(check_thresholds(&device, &Thresholds::default()).is_none());
    }

    #[test]
    fn breaches_in_sensor_order() {
        let device = kit("K1", 0.0, 0.0, &[]).reading(SensorReading::new(12.0, 85.0, 1030.0));
        let alert = check_thresholds(&device, &Thresholds::default()).unwrap();

        let sensors: Vec<Sensor> = alert.readings.iter().map(|r| r.sensor).collect();
        assert_eq!(sensors, Sensor::ALL);
        assert_eq!(alert.readings[0].breach, Breach::Min);
        assert_eq!(alert.readings[0].threshold, 15.0);
        assert_eq!(alert.readings[1].breach, Breach::Max);
        assert_eq!(alert.readings[2].threshold, 1020.0);
        assert_eq!(alert.to_message(), "ALERT: min 12, max 85, max 1030");
    }

    #[test]
    fn nan_never_breaches() {
        assert_eq!(Bounds::new(0.0, 1.0).check(f64::NAN), None);
    }
}

// ── Reply queue ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod reply_queue {
    use kit_core::Millis;

    use crate::{BroadcastId, PendingReply, ReplyQueue};

    fn reply(kit: &str) -> PendingReply {
        PendingReply {
            broadcast:      BroadcastId(0),
            kit:            kit.into(),
            kit_name:       kit.to_owned(),
            command_center: "CC".to_owned(),
            reading:        String::new(),
            path:           None,
        }
    }

    #[test]
    fn pops_in_due_order_with_stable_ties() {
        let mut q = ReplyQueue::new();
        q.push(Millis(20), reply("c"));
        q.push(Millis(10), reply("a"));
        q.push(Millis(10), reply("b"));
        q.push(Millis(30), reply("d"));
        assert_eq!(q.len(), 4);
        assert_eq!(q.next_due(), Some(Millis(10)));
        assert_eq!(q.last_due(), Some(Millis(30)));

        let due: Vec<_> = q.pop_due(Millis(20)).into_iter().map(|(t, r)| (t.0, r.kit_name)).collect();
        assert_eq!(due, vec![(10, "a".to_owned()), (10, "b".to_owned()), (20, "c".to_owned())]);
        assert_eq!(q.len(), 1);
        assert_eq!(q.next_due(), Some(Millis(30)));
    }

    #[test]
    fn pop_before_anything_due() {
        let mut q = ReplyQueue::new();
        q.push(Millis(5), reply("a"));
        assert!(q.pop_due(Millis(4)).is_empty());
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn pop_at_end_of_time() {
        let mut q = ReplyQueue::new();
        q.push(Millis(u64::MAX), reply("a"));
        assert_eq!(q.pop_due(Millis(u64::MAX)).len(), 1);
        assert!(q.is_empty());
    }
}

// ── Logs and sinks ────────────────────────────────────────────────────────────

#[cfg(test)]
mod log {
    use super::helpers::{broadcaster, mesh};
    use crate::{MessageLog, MessageSink, RollingLog, VecSink};

    #[test]
    fn rolling_log_keeps_newest_first() {
        let mut log = RollingLog::new(3);
        for i in 0..5 {
            log.push(i);
        }
        assert_eq!(log.iter().copied().collect::<Vec<_>>(), vec![4, 3, 2]);
        assert_eq!(log.latest(), Some(&4));
        assert_eq!(log.capacity(), 3);
    }

    #[test]
    fn zero_capacity_keeps_nothing() {
        let mut log = RollingLog::new(0);
        log.push("x");
        assert!(log.is_empty());
    }

    #[test]
    fn message_log_caps_at_ten() {
        let snapshot = mesh();
        let mut b = broadcaster();
        let mut log = MessageLog::default();
        for _ in 0..3 {
            b.broadcast_alert(&snapshot, "Evacuate", &mut log);
        }
        assert_eq!(log.messages.len(), 10);
        assert_eq!(log.messages.latest().map(|e| e.seq), Some(11));
    }

    #[test]
    fn tuple_sink_fans_out() {
        let snapshot = mesh();
        let mut b = broadcaster();
        let mut both = (VecSink::new(), MessageLog::new(2, 2));
        b.broadcast_alert(&snapshot, "Evacuate", &mut both);
        assert_eq!(both.0.events.len(), 4);
        assert_eq!(both.1.messages.len(), 2);

        fn count(sink: &mut impl MessageSink) -> usize {
            let mut b = broadcaster();
            b.status_sweep(&mesh(), sink)
        }
        assert_eq!(count(&mut &mut both.0), 4);
    }
}

// ── Fleet store ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod store {
    use kit_core::{DeviceStatus, KitError};

    use super::helpers::{broadcaster, mesh};
    use crate::{AlertError, DeviceUpdate, FleetStore, VecSink};

    #[test]
    fn apply_builds_a_new_snapshot() {
        let mut store = FleetStore::new(mesh());
        let old = store.snapshot();
        let mut b = broadcaster();
        let mut sink = VecSink::new();

        let receipt = b.broadcast_alert(&store.snapshot(), "Evacuate", &mut sink).unwrap();
        assert_eq!(store.apply(&receipt.updates), 4);
        let replies = b.run_until_idle(&mut sink);
        assert_eq!(store.apply(&replies), 4);

        assert!(old.iter().all(|d| d.last_alert.is_none()));
        let now = store.snapshot();
        assert_eq!(now[1].last_alert.as_deref(), Some("Evacuate"));
        assert!(now[1].last_reading.as_deref().unwrap().starts_with("Temperature: 22°C"));
        assert_eq!(now[3].last_alert, None);
        assert_eq!(store.version(), 2);
    }

    #[test]
    fn unknown_devices_skipped() {
        let mut store = FleetStore::new(mesh());
        let updates = [DeviceUpdate::LastAlert { device: "ghost".into(), message: "x".into() }];
        assert_eq!(store.apply(&updates), 0);
        assert_eq!(store.version(), 0);
    }

    #[test]
    fn set_status() {
        let mut store = FleetStore::new(mesh());
        store.set_status("K3", DeviceStatus::Online).unwrap();
        assert!(store.snapshot()[3].is_online());

        let err = store.set_status("ghost", DeviceStatus::Offline).unwrap_err();
        assert!(matches!(err, AlertError::Core(KitError::DeviceNotFound(id)) if id == "ghost"));
    }
}
