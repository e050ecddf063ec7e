//! CSV device-snapshot loader.
//!
//! # CSV format
//!
//! One row per device, in snapshot order.  `connected_to` is a `;`-separated
//! list of neighbor ids (may be empty).
//!
//! ```csv
//! id,name,lat,lon,status,type,connected_to,signal_strength,battery_level,temperature,humidity,pressure
//! 1,Command Center,43.0481,-76.1474,Online,official,2;3;4,95,100,25.5,60,1013.2
//! 2,Survival Kit #1,43.0592,-76.1435,Online,kit,1;3;5;7,85,92,26,55,1012.8
//! ```
//!
//! `status` is `Online`/`Offline` and `type` is `official`/`kit`
//! (case-insensitive).  Duplicate ids are accepted here and resolved by
//! [`MeshGraph`](crate::MeshGraph) at routing time.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use kit_core::{Device, DeviceId, GeoPoint, SensorReading};

use crate::{MeshError, MeshResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct DeviceRecord {
    id:              String,
    name:            String,
    lat:             f64,
    lon:             f64,
    status:          String,
    #[serde(rename = "type")]
    kind:            String,
    connected_to:    String,
    signal_strength: f64,
    battery_level:   f64,
    temperature:     f64,
    humidity:        f64,
    pressure:        f64,
}

impl DeviceRecord {
    fn into_device(self) -> MeshResult<Device> {
        Ok(Device {
            id:              DeviceId::from(self.id.trim()),
            name:            self.name,
            position:        GeoPoint::new(self.lat, self.lon),
            status:          self.status.parse()?,
            kind:            self.kind.parse()?,
            connected_to:    parse_neighbors(&self.connected_to),
            signal_strength: self.signal_strength,
            battery_level:   self.battery_level,
            reading:         SensorReading::new(self.temperature, self.humidity, self.pressure),
            last_alert:      None,
            last_reading:    None,
        })
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a device snapshot from a CSV file.
pub fn load_devices_csv(path: &Path) -> MeshResult<Vec<Device>> {
    let file = std::fs::File::open(path)?;
    load_devices_reader(file)
}

/// Like [`load_devices_csv`] but accepts any `Read` source.
pub fn load_devices_reader<R: Read>(reader: R) -> MeshResult<Vec<Device>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut devices = Vec::new();

    for (row, result) in csv_reader.deserialize::<DeviceRecord>().enumerate() {
        let record = result.map_err(|e| MeshError::Parse(format!("row {}: {e}", row + 1)))?;
        devices.push(record.into_device()?);
    }

    Ok(devices)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_neighbors(s: &str) -> Vec<DeviceId> {
    s.split(';')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(DeviceId::from)
        .collect()
}
