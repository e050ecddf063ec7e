//! Simulated sensor and link drift between status sweeps.

use kit_core::{Device, SensorReading, SimRng};

use crate::BroadcastConfig;

/// Nudge each sensor by a uniform step in `[-span/2, span/2)`, rounded to one
/// decimal place.
pub fn drift_reading(reading: &SensorReading, span: f64, rng: &mut SimRng) -> SensorReading {
    let mut step = |value: f64| round_tenths(value + (rng.random::<f64>() - 0.5) * span);
    let temperature = step(reading.temperature);
    let humidity = step(reading.humidity);
    let pressure = step(reading.pressure);
    SensorReading::new(temperature, humidity, pressure)
}

/// Move `signal` by a uniform step in `[-span/2, span/2)`, clamped to 0–100.
pub fn drift_signal(signal: f64, span: f64, rng: &mut SimRng) -> f64 {
    (signal + (rng.random::<f64>() - 0.5) * span).clamp(0.0, 100.0)
}

/// Drain `battery` by a uniform amount in `[0, max_drain)`, clamped to 0–100.
pub fn drain_battery(battery: f64, max_drain: f64, rng: &mut SimRng) -> f64 {
    (battery - rng.random::<f64>() * max_drain).clamp(0.0, 100.0)
}

/// One refresh of `device`: sensors, then signal, then battery.
pub fn drift_device(device: &Device, config: &BroadcastConfig, rng: &mut SimRng) -> Device {
    let reading = drift_reading(&device.reading, config.drift_span, rng);
    let signal_strength = drift_signal(device.signal_strength, config.signal_drift_span, rng);
    let battery_level = drain_battery(device.battery_level, config.battery_drain_max, rng);
    Device { reading, signal_strength, battery_level, ..device.clone() }
}

#[inline]
fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
