// crates/sqlshot-core/src/request.rs
// ============================================================================
// Module: Request Model and Parameter Resolution
// Description: Raw (possibly absent) and resolved request types.
// Purpose: Confirm every required field before any resource is touched.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Callers send requests whose fields may be absent; execution requires all
//! of them. This module separates the two: raw request types mirror what the
//! caller might send, resolved types carry what execution needs. Resolution
//! is pure and performs no I/O. A missing field yields [`Resolution::NeedsValue`],
//! a distinct outcome from both success and failure, so the caller can be
//! told which field to supply rather than being handed an error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::scope::ResourceHandle;
use crate::value::RowFormat;

// ============================================================================
// SECTION: Request Fields
// ============================================================================

/// Identifies a required request field for needs-value signaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestField {
    /// The sandboxed handle to the SQLite database file.
    Database,
    /// The sandboxed handle to the database's parent directory (update only).
    Directory,
    /// The SQL text of a query request.
    Query,
    /// The SQL text of an update request.
    Statement,
    /// The string joining formatted column values within a row.
    ColumnSeparator,
    /// The literal substituted for SQL NULL column values.
    NullValue,
    /// Whether text column values are rendered as quoted literals.
    QuoteStrings,
}

impl RequestField {
    /// Returns the stable wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Database => "database",
            Self::Directory => "directory",
            Self::Query => "query",
            Self::Statement => "statement",
            Self::ColumnSeparator => "column_separator",
            Self::NullValue => "null_value",
            Self::QuoteStrings => "quote_strings",
        }
    }
}

impl fmt::Display for RequestField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Resolution Outcome
// ============================================================================

/// Outcome of resolving a raw request's fields.
///
/// Needs-value is not an error: it names the first unresolved field so the
/// caller can supply it and retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<T> {
    /// All required fields are present; execution may proceed.
    Resolved(T),
    /// The named field is absent or empty; execution must not proceed.
    NeedsValue(RequestField),
}

// ============================================================================
// SECTION: Query Requests
// ============================================================================

/// A query request as the caller might send it, with every field optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawQueryRequest {
    /// Sandboxed handle to the SQLite database file.
    #[serde(default)]
    pub database: Option<ResourceHandle>,
    /// SQL text to execute read-only.
    #[serde(default)]
    pub query: Option<String>,
    /// Separator joining formatted column values.
    #[serde(default)]
    pub column_separator: Option<String>,
    /// Literal substituted for NULL column values. May be empty.
    #[serde(default)]
    pub null_value: Option<String>,
    /// Whether text values are rendered as quoted literals.
    #[serde(default)]
    pub quote_strings: Option<bool>,
}

/// A fully resolved query request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    /// Sandboxed handle to the SQLite database file.
    pub database: ResourceHandle,
    /// SQL text to execute read-only.
    pub query: String,
    /// Row formatting options.
    pub format: RowFormat,
}

impl RawQueryRequest {
    /// Resolves the raw request, checking fields in declaration order.
    ///
    /// `query` and `column_separator` must be non-empty; `null_value` must
    /// merely be present (an empty NULL substitute is legitimate).
    #[must_use]
    pub fn resolve(self) -> Resolution<QueryRequest> {
        let Some(database) = self.database else {
            return Resolution::NeedsValue(RequestField::Database);
        };
        let Some(query) = require_text(self.query) else {
            return Resolution::NeedsValue(RequestField::Query);
        };
        let Some(column_separator) = require_text(self.column_separator) else {
            return Resolution::NeedsValue(RequestField::ColumnSeparator);
        };
        let Some(null_value) = self.null_value else {
            return Resolution::NeedsValue(RequestField::NullValue);
        };
        let Some(quote_strings) = self.quote_strings else {
            return Resolution::NeedsValue(RequestField::QuoteStrings);
        };
        Resolution::Resolved(QueryRequest {
            database,
            query,
            format: RowFormat {
                column_separator,
                null_value,
                quote_strings,
            },
        })
    }
}

// ============================================================================
// SECTION: Update Requests
// ============================================================================

/// An update request as the caller might send it, with every field optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawUpdateRequest {
    /// Sandboxed handle to the SQLite database file.
    #[serde(default)]
    pub database: Option<ResourceHandle>,
    /// Sandboxed handle to the database's parent directory.
    #[serde(default)]
    pub directory: Option<ResourceHandle>,
    /// SQL text to execute with mutation permitted.
    #[serde(default)]
    pub statement: Option<String>,
}

/// A fully resolved update request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRequest {
    /// Sandboxed handle to the SQLite database file.
    pub database: ResourceHandle,
    /// Sandboxed handle to the database's parent directory.
    pub directory: ResourceHandle,
    /// SQL text to execute with mutation permitted.
    pub statement: String,
}

impl RawUpdateRequest {
    /// Resolves the raw request, checking fields in declaration order.
    ///
    /// `statement` must be non-empty.
    #[must_use]
    pub fn resolve(self) -> Resolution<UpdateRequest> {
        let Some(database) = self.database else {
            return Resolution::NeedsValue(RequestField::Database);
        };
        let Some(directory) = self.directory else {
            return Resolution::NeedsValue(RequestField::Directory);
        };
        let Some(statement) = require_text(self.statement) else {
            return Resolution::NeedsValue(RequestField::Statement);
        };
        Resolution::Resolved(UpdateRequest {
            database,
            directory,
            statement,
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Treats an absent or empty string as unresolved.
fn require_text(field: Option<String>) -> Option<String> {
    field.filter(|text| !text.is_empty())
}
