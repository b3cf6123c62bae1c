//! Read-only queries against the simulation's SQLite snapshot
//!
//! Opens the database with `SQLITE_OPEN_READ_ONLY` and runs a fixed set of
//! aggregate queries:
//! - Tables present in the snapshot
//! - Row count of the handover table
//! - A bounded sample of handover rows, read by column position

use crate::artifacts::{HandoverOutcome, HandoverRecord};
use crate::error::{InspectError, Result};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, Row};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Snapshot handle (read-only). The connection closes when this is dropped,
/// whether or not the queries succeeded.
pub struct SnapshotReader {
    conn: Connection,
}

/// What the database section prints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseSummary {
    pub tables: Vec<String>,
    pub handover_table: String,
    pub row_count: u64,
    pub sample: Vec<HandoverRecord>,
}

impl SnapshotReader {
    /// Open a snapshot read-only
    pub fn open_readonly<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let path = db_path.as_ref();

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        debug!("Opened snapshot {} read-only", path.display());
        Ok(SnapshotReader { conn })
    }

    /// User tables, sorted by name
    pub fn table_names(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(names)
    }

    /// Number of rows in `table`
    pub fn row_count(&self, table: &str) -> Result<u64> {
        let table = quoted_identifier(table)?;
        let count: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }

    /// Up to `limit` handover rows in storage order
    pub fn sample(&self, table: &str, limit: usize) -> Result<Vec<HandoverRecord>> {
        let table = quoted_identifier(table)?;
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT * FROM {table} LIMIT ?1"))?;

        let records = stmt
            .query_map([i64::try_from(limit).unwrap_or(i64::MAX)], record_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Run every query the database section needs
    pub fn summarize(&self, table: &str, sample_rows: usize) -> Result<DatabaseSummary> {
        Ok(DatabaseSummary {
            tables: self.table_names()?,
            handover_table: table.to_string(),
            row_count: self.row_count(table)?,
            sample: self.sample(table, sample_rows)?,
        })
    }
}

/// Open `path`, summarize it and close it again
pub fn summarize_snapshot(path: &Path, table: &str, sample_rows: usize) -> Result<DatabaseSummary> {
    let reader = SnapshotReader::open_readonly(path)?;
    reader.summarize(table, sample_rows)
}

/// Table names are spliced into SQL, so only plain identifiers are accepted
fn quoted_identifier(name: &str) -> Result<String> {
    let valid = !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(format!("\"{name}\""))
    } else {
        Err(InspectError::InvalidTableName(name.to_string()))
    }
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<HandoverRecord> {
    Ok(HandoverRecord {
        sequence: text_at(row, 0)?,
        ue_id: text_at(row, 1)?,
        source_cell: text_at(row, 2)?,
        target_cell: text_at(row, 3)?,
        method: text_at(row, 4)?,
        outcome: HandoverOutcome::from(text_at(row, 5)?),
        latency_ms: number_at(row, 6)?,
    })
}

/// Producers are inconsistent about storing ids as TEXT or INTEGER
fn text_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<String> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        ValueRef::Blob(bytes) => format!("<{} byte blob>", bytes.len()),
    })
}

fn number_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<f64> {
    match row.get_ref(idx)? {
        ValueRef::Integer(i) => Ok(i as f64),
        ValueRef::Real(f) => Ok(f),
        ValueRef::Text(bytes) => String::from_utf8_lossy(bytes)
            .trim()
            .parse()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))),
        ValueRef::Null => Ok(0.0),
        ValueRef::Blob(_) => Err(rusqlite::Error::InvalidColumnType(
            idx,
            "latency".to_string(),
            rusqlite::types::Type::Blob,
        )),
    }
}
