//! `FleetStore` — caller-owned, copy-on-write device snapshots.

use std::sync::Arc;

use tracing::debug;

use kit_core::{Device, DeviceStatus, KitError};

use crate::{AlertResult, DeviceUpdate};

/// Holds the current snapshot as an `Arc<[Device]>`.
///
/// Every change builds a fresh slice, so a snapshot handed out earlier keeps
/// reading the old values.  When the fleet has duplicate ids only the first
/// occurrence is ever updated, matching the mesh graph.
#[derive(Clone, Debug)]
pub struct FleetStore {
    current: Arc<[Device]>,
    version: u64,
}

impl FleetStore {
    pub fn new(devices: Vec<Device>) -> Self {
        Self { current: devices.into(), version: 0 }
    }

    /// Cheap handle to the current snapshot.
    pub fn snapshot(&self) -> Arc<[Device]> {
        Arc::clone(&self.current)
    }

    /// Bumped once per successful change.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Swap in a whole new snapshot, e.g. the result of a telemetry tick.
    pub fn replace(&mut self, devices: Vec<Device>) {
        self.current = devices.into();
        self.version += 1;
    }

    /// Fold `updates` into a new snapshot, in order.
    ///
    /// Updates naming unknown devices are skipped.  Returns how many applied.
    pub fn apply(&mut self, updates: &[DeviceUpdate]) -> usize {
        if updates.is_empty() {
            return 0;
        }
        let mut next = self.current.to_vec();
        let mut applied = 0;
        for update in updates {
            let Some(device) = next.iter_mut().find(|d| d.id == *update.device()) else {
                debug!(device = %update.device(), "update for unknown device skipped");
                continue;
            };
            match update {
                DeviceUpdate::LastAlert { message, .. } => device.last_alert = Some(message.clone()),
                DeviceUpdate::LastReading { reading, .. } => device.last_reading = Some(reading.clone()),
            }
            applied += 1;
        }
        if applied > 0 {
            self.replace(next);
        }
        applied
    }

    pub fn set_status(&mut self, id: &str, status: DeviceStatus) -> AlertResult<()> {
        let mut next = self.current.to_vec();
        let device = next
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| KitError::DeviceNotFound(id.into()))?;
        device.status = status;
        self.replace(next);
        Ok(())
    }
}
