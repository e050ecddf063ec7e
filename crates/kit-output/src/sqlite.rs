//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `messages.db` file in the configured output directory
//! with two tables: `messages` and `threshold_alerts`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::LogWriter;
use crate::{MessageRow, OutputResult, ThresholdAlertRow};

/// Writes message logs to an SQLite database.
pub struct SqliteLogWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteLogWriter {
    /// Open (or create) `messages.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("messages.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS messages (
                 seq       INTEGER PRIMARY KEY,
                 at_ms     INTEGER NOT NULL,
                 timestamp TEXT    NOT NULL,
                 kind      TEXT    NOT NULL,
                 sender    TEXT    NOT NULL,
                 recipient TEXT    NOT NULL,
                 message   TEXT    NOT NULL,
                 path      TEXT
             );
             CREATE TABLE IF NOT EXISTS threshold_alerts (
                 seq         INTEGER NOT NULL,
                 at_ms       INTEGER NOT NULL,
                 device_id   TEXT    NOT NULL,
                 device_name TEXT    NOT NULL,
                 sensor      TEXT    NOT NULL,
                 value       REAL    NOT NULL,
                 threshold   REAL    NOT NULL,
                 breach      TEXT    NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl LogWriter for SqliteLogWriter {
    fn write_message(&mut self, row: &MessageRow) -> OutputResult<()> {
        let path = (!row.path.is_empty()).then_some(row.path.as_str());
        self.conn.execute(
            "INSERT INTO messages (seq, at_ms, timestamp, kind, sender, recipient, message, path) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            rusqlite::params![
                row.seq as i64,
                row.at_ms as i64,
                row.timestamp,
                row.kind,
                row.from,
                row.to,
                row.message,
                path,
            ],
        )?;
        Ok(())
    }

    fn write_threshold_alert(&mut self, rows: &[ThresholdAlertRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO threshold_alerts \
                 (seq, at_ms, device_id, device_name, sensor, value, threshold, breach) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.seq as i64,
                    row.at_ms as i64,
                    row.device_id,
                    row.device_name,
                    row.sensor,
                    row.value,
                    row.threshold,
                    row.breach,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
