//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `messages.csv`
//! - `threshold_alerts.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::LogWriter;
use crate::{MessageRow, OutputResult, ThresholdAlertRow};

pub const MESSAGE_HEADERS: [&str; 8] =
    ["seq", "at_ms", "timestamp", "kind", "from", "to", "message", "path"];

pub const THRESHOLD_HEADERS: [&str; 8] =
    ["seq", "at_ms", "device_id", "device_name", "sensor", "value", "threshold", "breach"];

/// Writes message logs to two CSV files.
pub struct CsvLogWriter {
    messages: Writer<File>,
    alerts:   Writer<File>,
    finished: bool,
}

impl CsvLogWriter {
    /// Create (or truncate) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut messages = Writer::from_path(dir.join("messages.csv"))?;
        messages.write_record(MESSAGE_HEADERS)?;

        let mut alerts = Writer::from_path(dir.join("threshold_alerts.csv"))?;
        alerts.write_record(THRESHOLD_HEADERS)?;

        Ok(Self { messages, alerts, finished: false })
    }
}

impl LogWriter for CsvLogWriter {
    fn write_message(&mut self, row: &MessageRow) -> OutputResult<()> {
        let seq = row.seq.to_string();
        let at_ms = row.at_ms.to_string();
        self.messages.write_record([
            seq.as_str(),
            at_ms.as_str(),
            row.timestamp.as_str(),
            row.kind,
            row.from.as_str(),
            row.to.as_str(),
            row.message.as_str(),
            row.path.as_str(),
        ])?;
        Ok(())
    }

    fn write_threshold_alert(&mut self, rows: &[ThresholdAlertRow]) -> OutputResult<()> {
        for row in rows {
            self.alerts.write_record(&[
                row.seq.to_string(),
                row.at_ms.to_string(),
                row.device_id.clone(),
                row.device_name.clone(),
                row.sensor.to_owned(),
                row.value.to_string(),
                row.threshold.to_string(),
                row.breach.to_owned(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.messages.flush()?;
        self.alerts.flush()?;
        Ok(())
    }
}
