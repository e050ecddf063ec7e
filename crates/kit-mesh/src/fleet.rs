//! Built-in sample fleet: one command center and eight kits around
//! Syracuse, NY.  Used by the demo binary and as a realistic test fixture.

use kit_core::{Device, DeviceKind, GeoPoint, SensorReading};

/// `(id, name, lat, lon, kind, neighbors, signal, battery, temp, humidity, pressure)`
type Row = (&'static str, &'static str, f64, f64, DeviceKind, &'static [&'static str], f64, f64, f64, f64, f64);

const FLEET: &[Row] = &[
    ("1", "Command Center",  43.0481, -76.1474, DeviceKind::Official, &["2", "3", "4"],           95.0, 100.0, 25.5, 60.0, 1013.2),
    ("2", "Survival Kit #1", 43.0592, -76.1435, DeviceKind::Kit,      &["1", "3", "5", "7"],      85.0,  92.0, 26.0, 55.0, 1012.8),
    ("3", "Survival Kit #2", 43.0483, -76.1586, DeviceKind::Kit,      &["1", "2", "4", "6", "8"], 45.0,  78.0, 24.5, 62.0, 1013.5),
    ("4", "Survival Kit #3", 43.0374, -76.1467, DeviceKind::Kit,      &["1", "3", "5", "9"],      75.0,  88.0, 25.8, 58.0, 1012.5),
    ("5", "Survival Kit #4", 43.0525, -76.1325, DeviceKind::Kit,      &["2", "4", "6", "7"],      80.0,  95.0, 25.2, 59.0, 1013.0),
    ("6", "Survival Kit #5", 43.0436, -76.1625, DeviceKind::Kit,      &["3", "5", "8"],           65.0,  82.0, 24.8, 61.0, 1012.2),
    ("7", "Survival Kit #6", 43.0625, -76.1525, DeviceKind::Kit,      &["2", "5", "8"],           70.0,  90.0, 25.1, 57.0, 1013.8),
    ("8", "Survival Kit #7", 43.0385, -76.1685, DeviceKind::Kit,      &["3", "6", "7", "9"],      55.0,  75.0, 24.3, 63.0, 1011.5),
    ("9", "Survival Kit #8", 43.0275, -76.1385, DeviceKind::Kit,      &["4", "8"],                60.0,  85.0, 25.7, 56.0, 1012.0),
];

/// A fresh copy of the sample fleet, all devices online.
pub fn sample_fleet() -> Vec<Device> {
    FLEET
        .iter()
        .map(|&(id, name, lat, lon, kind, neighbors, signal, battery, t, h, p)| {
            Device::new(id, name, GeoPoint::new(lat, lon), kind)
                .connected_to(neighbors.iter().copied())
                .signal_strength(signal)
                .battery_level(battery)
                .reading(SensorReading::new(t, h, p))
        })
        .collect()
}
