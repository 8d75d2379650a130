// crates/sqlshot-core/src/exec.rs
// ============================================================================
// Module: SQL Execution
// Description: Per-request SQLite connections in read or write mode.
// Purpose: Execute the caller's SQL verbatim with the right durability.
// Dependencies: rusqlite, thiserror
// ============================================================================

//! ## Overview
//! One connection per request, fully closed before the call returns. The
//! read path opens the database read-only and materializes every result row
//! with full type fidelity. The write path opens with mutation permitted and
//! forces a non-WAL journal mode first, so no sidecar files are left behind
//! in a security-scoped directory, then runs the caller's script verbatim
//! and discards any row output. Engine diagnostics pass through unmodified.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;

use rusqlite::Connection;
use rusqlite::OpenFlags;
use rusqlite::types::ValueRef;
use thiserror::Error;

use crate::value::Row;
use crate::value::Value;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Execution failure surfaced by the embedded engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExecError {
    /// Engine diagnostic, passed through verbatim and untranslated.
    #[error("{0}")]
    Engine(String),
}

impl From<rusqlite::Error> for ExecError {
    fn from(error: rusqlite::Error) -> Self {
        Self::Engine(error.to_string())
    }
}

// ============================================================================
// SECTION: Read Mode
// ============================================================================

/// Executes one statement read-only and materializes the full result set.
///
/// No row limit is enforced; column order follows the statement's projection.
///
/// # Errors
///
/// Returns [`ExecError`] with the engine's diagnostic when the database
/// cannot be opened or the statement fails.
pub fn run_query(database: &Path, sql: &str) -> Result<Vec<Row>, ExecError> {
    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_FULL_MUTEX;
    let connection = Connection::open_with_flags(database, flags)?;
    let mut statement = connection.prepare(sql)?;
    let column_count = statement.column_count();
    let mut rows = statement.query([])?;
    let mut collected = Vec::new();
    while let Some(row) = rows.next()? {
        let mut columns = Vec::with_capacity(column_count);
        for index in 0..column_count {
            columns.push(column_value(row.get_ref(index)?));
        }
        collected.push(columns);
    }
    Ok(collected)
}

// ============================================================================
// SECTION: Write Mode
// ============================================================================

/// Journal pragma applied before any mutating statement runs.
///
/// TRUNCATE keeps the transaction log in-place instead of WAL sidecar files,
/// which would outlive the scoped access grant on the parent directory.
const WRITE_JOURNAL_PRAGMA: &str = "PRAGMA journal_mode = TRUNCATE;";

/// Executes the caller's SQL with mutation permitted, discarding row output.
///
/// The script is passed through verbatim; multi-statement input runs as the
/// engine sees fit. This is the intended direct-SQL capability, so no
/// parameter binding or statement validation happens here.
///
/// # Errors
///
/// Returns [`ExecError`] with the engine's diagnostic when the database
/// cannot be opened, the journal pragma fails, or the statement fails.
pub fn run_update(database: &Path, sql: &str) -> Result<(), ExecError> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_CREATE
        | OpenFlags::SQLITE_OPEN_FULL_MUTEX;
    let connection = Connection::open_with_flags(database, flags)?;
    connection.execute_batch(WRITE_JOURNAL_PRAGMA)?;
    connection.execute_batch(sql)?;
    Ok(())
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Maps an engine column reference onto the closed [`Value`] sum.
///
/// Invalid UTF-8 in a text column is replaced rather than rejected; the
/// formatter output is a display form, not a byte-faithful serialization.
fn column_value(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(integer) => Value::Integer(integer),
        ValueRef::Real(real) => Value::Real(real),
        ValueRef::Text(text) => Value::Text(String::from_utf8_lossy(text).into_owned()),
        ValueRef::Blob(blob) => Value::Blob(blob.to_vec()),
    }
}
