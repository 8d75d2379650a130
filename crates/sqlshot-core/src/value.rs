// crates/sqlshot-core/src/value.rs
// ============================================================================
// Module: Column Values and Formatting
// Description: Five-case dynamic column value and its display serialization.
// Purpose: Deterministically flatten heterogeneous rows into text.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! SQLite columns are dynamically typed over exactly five storage classes.
//! [`Value`] mirrors them as a closed sum type; exhaustive matching in the
//! formatter guarantees no sixth case can silently fall through. Formatting
//! is pure: it never mutates the underlying values and is deterministic for
//! a given [`RowFormat`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Values
// ============================================================================

/// A dynamically typed column value produced by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL NULL.
    Null,
    /// 64-bit signed integer.
    Integer(i64),
    /// 64-bit float.
    Real(f64),
    /// UTF-8 text.
    Text(String),
    /// Raw bytes.
    Blob(Vec<u8>),
}

/// One result row: ordered column values in the statement's projection order.
pub type Row = Vec<Value>;

// ============================================================================
// SECTION: Row Format
// ============================================================================

/// Caller-supplied options controlling row serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowFormat {
    /// String joining formatted column values within a row.
    pub column_separator: String,
    /// Literal substituted for NULL column values. May be empty.
    pub null_value: String,
    /// Whether text values are rendered as quoted, escaped literals.
    pub quote_strings: bool,
}

impl RowFormat {
    /// Formats a single column value as display text.
    ///
    /// - NULL becomes the caller-supplied substitute.
    /// - Integers and reals use canonical decimal text, never locale-grouped.
    /// - Text is raw, or a debug-quoted literal when `quote_strings` is set,
    ///   so embedded separators and quotes stay unambiguous on re-display.
    /// - Blobs become a `Blob(<n> bytes)` placeholder; this is a display aid,
    ///   not a round-trippable serialization.
    #[must_use]
    pub fn format_value(&self, value: &Value) -> String {
        match value {
            Value::Null => self.null_value.clone(),
            Value::Integer(integer) => integer.to_string(),
            Value::Real(real) => format_real(*real),
            Value::Text(text) => {
                if self.quote_strings {
                    format!("\"{}\"", text.escape_debug())
                } else {
                    text.clone()
                }
            }
            Value::Blob(bytes) => format!("Blob({} bytes)", bytes.len()),
        }
    }

    /// Formats a whole row by joining per-column text with the separator.
    #[must_use]
    pub fn format_row(&self, row: &[Value]) -> String {
        row.iter()
            .map(|value| self.format_value(value))
            .collect::<Vec<_>>()
            .join(&self.column_separator)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Magnitude above which integral doubles keep the default rendering.
const REAL_PLAIN_THRESHOLD: f64 = 1e15;

/// Renders a real in canonical decimal text.
///
/// Finite values with zero fraction keep a trailing `.0` so a REAL column
/// stays distinguishable from an INTEGER one; very large magnitudes and
/// non-finite values use the default rendering.
fn format_real(real: f64) -> String {
    if real.is_finite() && real.fract() == 0.0 && real.abs() < REAL_PLAIN_THRESHOLD {
        format!("{real:.1}")
    } else {
        format!("{real}")
    }
}
