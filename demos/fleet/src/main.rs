//! fleet — end-to-end walk through the kitmesh survival-kit network.
//!
//! Loads the nine-device Syracuse fleet (or `KIT_FLEET_CSV`), broadcasts one
//! alert from the command center, lets the replies come in on virtual time,
//! runs a few dashboard refreshes, then knocks a relay offline to show the
//! mesh rerouting.  Messages and threshold alerts land in
//! `KIT_OUTPUT_DIR/{messages,threshold_alerts}.csv`.

mod config;

use std::env;
use std::time::Instant;

use anyhow::{Result, bail};
use tracing_subscriber::filter::EnvFilter;

use kit_alert::{Broadcaster, FleetStore, MessageLog, Thresholds};
use kit_core::{Device, DeviceStatus};
use kit_mesh::{MeshGraph, load_devices_csv, sample_fleet, shortest_path};
use kit_output::{CsvLogWriter, LogSink};

// ── Constants ─────────────────────────────────────────────────────────────────

/// Relay taken offline in the last phase; carries several sample-fleet routes.
const RELAY_TO_DROP: &str = "3";

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();
    let cfg = config::load_from_env()?;
    cfg.log_config();

    println!("=== fleet — kitmesh survival-kit network ===");
    println!(
        "Seed: {}  |  Metric: {}  |  Sweeps: {}",
        cfg.broadcast.seed, cfg.broadcast.metric, cfg.ticks
    );
    println!();

    // 1. Load devices.
    let devices = match &cfg.fleet_csv {
        Some(path) => load_devices_csv(path)?,
        None       => sample_fleet(),
    };
    let mut store = FleetStore::new(devices);
    let Some(cc) = MeshGraph::new(&store.snapshot()).command_center().cloned() else {
        bail!("fleet has no command center");
    };
    println!("Fleet: {} devices, command center {:?} ({})", store.len(), cc.name, cc.id);
    print_routes(&store.snapshot(), &cc, &cfg);

    // 2. Output sinks: on-screen rolling log plus CSV files.
    std::fs::create_dir_all(&cfg.output_dir)?;
    let writer = CsvLogWriter::new(&cfg.output_dir)?;
    let mut sink = (MessageLog::from_config(&cfg.broadcast), LogSink::new(writer));

    // 3. Broadcast and collect replies.
    let mut broadcaster = Broadcaster::new(cfg.broadcast.clone())?;
    let thresholds = Thresholds::default();
    let t0 = Instant::now();

    let Some(receipt) = broadcaster.broadcast_alert(&store.snapshot(), &cfg.alert, &mut sink) else {
        bail!("alert text is blank");
    };
    store.apply(&receipt.updates);
    println!("Alert {:?} sent to {} kits", cfg.alert, receipt.recipients.len());

    let replies = broadcaster.run_until_idle(&mut sink);
    store.apply(&replies);
    println!("{} replies received by {}", replies.len(), broadcaster.clock);

    // 4. Dashboard refreshes.
    for _ in 0..cfg.ticks {
        let updates = broadcaster.advance(cfg.broadcast.report_interval_ms, &mut sink);
        store.apply(&updates);
        let next = broadcaster.tick(&store.snapshot(), &thresholds, &mut sink);
        store.replace(next);
    }
    println!("{} status sweeps done by {}", cfg.ticks, broadcaster.clock);
    println!();

    // 5. Knock out a relay and show the reroute.
    if store.set_status(RELAY_TO_DROP, DeviceStatus::Offline).is_ok() {
        println!("Relay {RELAY_TO_DROP} offline:");
        print_routes(&store.snapshot(), &cc, &cfg);
        broadcaster.status_sweep(&store.snapshot(), &mut sink);
    }

    let (log, mut csv) = sink;
    csv.finish();
    if let Some(e) = csv.take_error() {
        eprintln!("output error: {e}");
    }
    let elapsed = t0.elapsed();

    // 6. Summary.
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  messages.csv : {} rows -> {}", csv.written(), cfg.output_dir.display());
    println!();

    println!("Latest messages (newest first):");
    for event in log.messages.iter() {
        let via = event.path_display().map(|p| format!("  via {p}")).unwrap_or_default();
        println!("  [{}] {} → {}: {}{}", event.timestamp, event.from, event.to, event.message, via);
    }
    if !log.threshold_alerts.is_empty() {
        println!();
        println!("Threshold alerts (newest first):");
        for alert in log.threshold_alerts.iter() {
            println!("  {}: {}", alert.device_name, alert.to_message());
        }
    }
    println!();

    println!("{:<18} {:<8} {:<30} {:<}", "Device", "Status", "Last alert", "Last reading");
    println!("{}", "-".repeat(100));
    for device in store.snapshot().iter() {
        println!(
            "{:<18} {:<8} {:<30} {:<}",
            device.name,
            device.status.as_str(),
            device.last_alert.as_deref().unwrap_or("-"),
            device.last_reading.as_deref().unwrap_or("-"),
        );
    }

    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn print_routes(snapshot: &[Device], cc: &Device, cfg: &config::DemoConfig) {
    let graph = MeshGraph::new(snapshot);
    println!("{:<18} {:<}", "Kit", "Route from command center");
    println!("{}", "-".repeat(60));
    for kit in graph.kits() {
        let path = shortest_path(snapshot, cc.id.as_str(), kit.id.as_str(), cfg.broadcast.metric);
        let route = if path.is_empty() {
            "(unreachable)".to_owned()
        } else {
            graph.names_for(&path).join(" → ")
        };
        println!("{:<18} {route}", kit.name);
    }
    println!();
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `KIT_LOG_LEVEL` picks the level
/// (default `info`).
fn init_tracing() {
    let env_filter = if env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match env::var("KIT_LOG_LEVEL").ok().as_deref() {
            Some("trace") => "trace",
            Some("debug") => "debug",
            Some("warn")  => "warn",
            Some("error") => "error",
            _             => "info",
        };
        EnvFilter::new(level)
    };

    tracing_subscriber::fmt()
        .with_target(true)
        .with_env_filter(env_filter)
        .compact()
        .init();
}
