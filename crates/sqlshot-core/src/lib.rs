// crates/sqlshot-core/src/lib.rs
// ============================================================================
// Module: Sqlshot Core
// Description: One-shot SQL execution protocol over sandboxed SQLite files.
// Purpose: Resolve requests, scope resource access, execute, and format rows.
// Dependencies: cap-std, rusqlite, serde, thiserror
// ============================================================================

//! ## Overview
//! This crate implements the protocol around one-shot SQL execution: an
//! automation caller supplies a single SQL statement and an opaque, sandboxed
//! handle to a SQLite database file, and receives either formatted rows
//! (query) or a bare success signal (update). Execution itself is delegated
//! to the embedded engine; the crate's job is the discipline around it.
//! Invariants:
//! - Required parameters are resolved before any resource is touched.
//! - Every acquired resource scope is released exactly once, on every exit
//!   path, via [`ScopedAccess`].
//! - Connections are opened fresh per request and closed before the response
//!   is produced.
//!
//! Arbitrary SQL, including DDL and multi-statement write scripts, is an
//! intended capability, not a gap.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod exec;
pub mod handler;
pub mod request;
pub mod scope;
pub mod value;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use exec::ExecError;
pub use handler::HandlerError;
pub use handler::Outcome;
pub use handler::RequestHandler;
pub use request::QueryRequest;
pub use request::RawQueryRequest;
pub use request::RawUpdateRequest;
pub use request::RequestField;
pub use request::Resolution;
pub use request::UpdateRequest;
pub use scope::ResourceGate;
pub use scope::ResourceHandle;
pub use scope::SandboxGate;
pub use scope::ScopedAccess;
pub use value::Row;
pub use value::RowFormat;
pub use value::Value;
