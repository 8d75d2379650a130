// crates/sqlshot-core/src/handler.rs
// ============================================================================
// Module: Request Handler
// Description: Orchestrates resolution, scoping, execution, and formatting.
// Purpose: Map each invocation onto a terminal three-way outcome.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! One pass per invocation: resolve the raw request (fail fast, before any
//! I/O), validate, acquire scoped access, execute, format (query only), and
//! respond. Scopes are [`ScopedAccess`] guards, so every acquired grant is
//! released on every exit path, including the failure terminals. The handler
//! is generic over the [`ResourceGate`] so tests can count acquisitions.
//! No state survives an invocation; concurrent invocations share nothing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::exec;
use crate::exec::ExecError;
use crate::request::RawQueryRequest;
use crate::request::RawUpdateRequest;
use crate::request::RequestField;
use crate::request::Resolution;
use crate::scope::ResourceGate;
use crate::scope::SandboxGate;
use crate::scope::ScopedAccess;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failure taxonomy for an invocation that got past resolution.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HandlerError {
    /// Update's directory handle is not the database file's parent.
    /// Reported before any scope is acquired or connection opened.
    #[error(
        "Parent folder must be set to the directory that contains the selected SQLite database \
         file."
    )]
    DirectoryMismatch,
    /// Engine diagnostic, verbatim.
    #[error("{0}")]
    Engine(String),
}

impl From<ExecError> for HandlerError {
    fn from(error: ExecError) -> Self {
        match error {
            ExecError::Engine(message) => Self::Engine(message),
        }
    }
}

// ============================================================================
// SECTION: Outcome
// ============================================================================

/// Terminal response of one invocation.
///
/// Needs-value is distinct from failure: it tells the caller which field to
/// supply, not that an error occurred.
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// A required field is absent or empty; nothing was executed.
    NeedsValue(RequestField),
    /// The operation completed.
    Success(T),
    /// The operation failed; no partial results are retained.
    Failure(HandlerError),
}

// ============================================================================
// SECTION: Handler
// ============================================================================

/// Per-invocation orchestrator over a pluggable resource gate.
pub struct RequestHandler<G: ResourceGate> {
    /// Gate granting scoped access to caller-supplied handles.
    gate: G,
}

impl RequestHandler<SandboxGate> {
    /// Creates a handler backed by the host sandbox gate.
    #[must_use]
    pub fn sandboxed() -> Self {
        Self::new(SandboxGate::new())
    }
}

impl<G: ResourceGate> RequestHandler<G> {
    /// Creates a handler over the given gate.
    pub const fn new(gate: G) -> Self {
        Self {
            gate,
        }
    }

    /// Returns the handler's gate.
    pub const fn gate(&self) -> &G {
        &self.gate
    }

    /// Runs a query invocation: resolve, scope the database file, execute
    /// read-only, and format each row.
    pub fn query(&self, request: RawQueryRequest) -> Outcome<Vec<String>> {
        let request = match request.resolve() {
            Resolution::Resolved(request) => request,
            Resolution::NeedsValue(field) => return Outcome::NeedsValue(field),
        };
        let _database_scope = ScopedAccess::enter(&self.gate, request.database.clone());
        match exec::run_query(request.database.path(), &request.query) {
            Ok(rows) => {
                Outcome::Success(rows.iter().map(|row| request.format.format_row(row)).collect())
            }
            Err(error) => Outcome::Failure(error.into()),
        }
    }

    /// Runs an update invocation: resolve, check the directory handle is the
    /// database's parent, scope both handles, and execute with mutation
    /// permitted.
    ///
    /// Both scopes are released regardless of which step failed; acquisition
    /// order is directory first, but nothing depends on it.
    pub fn update(&self, request: RawUpdateRequest) -> Outcome<()> {
        let request = match request.resolve() {
            Resolution::Resolved(request) => request,
            Resolution::NeedsValue(field) => return Outcome::NeedsValue(field),
        };
        if !request.directory.is_parent_of(&request.database) {
            return Outcome::Failure(HandlerError::DirectoryMismatch);
        }
        let _directory_scope = ScopedAccess::enter(&self.gate, request.directory.clone());
        let _database_scope = ScopedAccess::enter(&self.gate, request.database.clone());
        match exec::run_update(request.database.path(), &request.statement) {
            Ok(()) => Outcome::Success(()),
            Err(error) => Outcome::Failure(error.into()),
        }
    }
}
