//! `kit-output` — persistent message logs for the kitmesh broadcast simulator.
//!
//! Two backends are provided:
//!
//! | Feature   | Backend | Files created                               |
//! |-----------|---------|---------------------------------------------|
//! | *(none)*  | CSV     | `messages.csv`, `threshold_alerts.csv`      |
//! | `sqlite`  | SQLite  | `messages.db`                               |
//!
//! Both implement [`LogWriter`] and are driven by [`LogSink`], which
//! implements `kit_alert::MessageSink`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use kit_output::{CsvLogWriter, LogSink};
//!
//! let writer = CsvLogWriter::new(Path::new("./output")).unwrap();
//! let mut sink = LogSink::new(writer);
//! broadcaster.broadcast_alert(&snapshot, "Evacuate", &mut sink);
//! broadcaster.run_until_idle(&mut sink);
//! sink.finish();
//! sink.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod row;
pub mod sink;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::CsvLogWriter;
pub use error::{OutputError, OutputResult};
pub use row::{MessageRow, ThresholdAlertRow};
pub use sink::LogSink;
pub use writer::LogWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteLogWriter;
