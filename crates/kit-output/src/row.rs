//! Flat row types written by output backends.

use kit_alert::{MessageEvent, ThresholdAlert};

/// One message event.  `path` is the `" → "`-joined name list, empty when the
/// event had no path annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageRow {
    pub seq:       u64,
    pub at_ms:     u64,
    pub timestamp: String,
    pub kind:      &'static str,
    pub from:      String,
    pub to:        String,
    pub message:   String,
    pub path:      String,
}

impl From<&MessageEvent> for MessageRow {
    fn from(event: &MessageEvent) -> Self {
        Self {
            seq:       event.seq,
            at_ms:     event.at.0,
            timestamp: event.timestamp.clone(),
            kind:      event.kind.as_str(),
            from:      event.from.clone(),
            to:        event.to.clone(),
            message:   event.message.clone(),
            path:      event.path_display().unwrap_or_default(),
        }
    }
}

/// One breached sensor of a threshold alert.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdAlertRow {
    /// `seq` of the message that announced the alert.
    pub seq:         u64,
    pub at_ms:       u64,
    pub device_id:   String,
    pub device_name: String,
    pub sensor:      &'static str,
    pub value:       f64,
    pub threshold:   f64,
    pub breach:      &'static str,
}

impl ThresholdAlertRow {
    /// One row per breached sensor, stamped from `event`.
    pub fn from_alert(event: &MessageEvent, alert: &ThresholdAlert) -> Vec<Self> {
        alert
            .readings
            .iter()
            .map(|r| Self {
                seq:         event.seq,
                at_ms:       event.at.0,
                device_id:   alert.device_id.to_string(),
                device_name: alert.device_name.clone(),
                sensor:      r.sensor.as_str(),
                value:       r.value,
                threshold:   r.threshold,
                breach:      r.breach.as_str(),
            })
            .collect()
    }
}
