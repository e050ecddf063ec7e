//! The `LogWriter` trait implemented by all backend writers.

use crate::{MessageRow, OutputResult, ThresholdAlertRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// Errors surface through [`LogSink::take_error`](crate::LogSink::take_error)
/// when driven by the sink, since sink callbacks have no return value.
pub trait LogWriter {
    fn write_message(&mut self, row: &MessageRow) -> OutputResult<()>;

    /// Write every breached sensor of one threshold alert.
    fn write_threshold_alert(&mut self, rows: &[ThresholdAlertRow]) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
