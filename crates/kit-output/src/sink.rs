//! `LogSink<W>` — bridges `MessageSink` to a `LogWriter`.

use tracing::warn;

use kit_alert::{MessageEvent, MessageSink, ThresholdAlert};

use crate::row::{MessageRow, ThresholdAlertRow};
use crate::writer::LogWriter;
use crate::{OutputError, OutputResult};

/// A [`MessageSink`] that persists every message and threshold alert to any
/// [`LogWriter`] backend.
///
/// Errors from the writer are stored internally because `MessageSink`
/// methods have no return value.  Check with [`take_error`][Self::take_error]
/// once the run is over.
pub struct LogSink<W: LogWriter> {
    writer:     W,
    written:    u64,
    last_error: Option<OutputError>,
}

impl<W: LogWriter> LogSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0, last_error: None }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Messages successfully written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Flush the writer.  Errors are stored like any other write error.
    pub fn finish(&mut self) {
        let result = self.writer.finish();
        self.store_err(result);
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, "message log write failed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: LogWriter> MessageSink for LogSink<W> {
    fn on_message(&mut self, event: &MessageEvent) {
        let result = self.writer.write_message(&MessageRow::from(event));
        if result.is_ok() {
            self.written += 1;
        }
        self.store_err(result);
    }

    fn on_threshold_alert(&mut self, event: &MessageEvent, alert: &ThresholdAlert) {
        let rows = ThresholdAlertRow::from_alert(event, alert);
        let result = self.writer.write_threshold_alert(&rows);
        self.store_err(result);
    }
}
