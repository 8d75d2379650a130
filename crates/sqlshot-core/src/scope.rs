// crates/sqlshot-core/src/scope.rs
// ============================================================================
// Module: Resource Scoping
// Description: Opaque resource handles and scoped access guards.
// Purpose: Guarantee acquire/release pairing around risky file access.
// Dependencies: cap-std, serde
// ============================================================================

//! ## Overview
//! The host sandbox grants access to files and directories through opaque
//! handles. Before touching a handle's path, the protocol acquires a
//! security-scoped grant; after the operation, the grant must be released
//! exactly once, on every exit path. [`ScopedAccess`] enforces the pairing:
//! construction acquires, drop releases, including when execution propagates
//! an error.
//!
//! [`SandboxGate`] is the host-backed gate. It materializes grants as cap-std
//! capability directory handles, which the process retains for the lifetime
//! of the scope. Gates are pluggable via [`ResourceGate`] so tests can count
//! acquisitions.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;

use cap_std::ambient_authority;
use cap_std::fs::Dir;
use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Resource Handles
// ============================================================================

/// An opaque reference to a file or directory granted by the host sandbox.
///
/// # Invariants
/// - The core never fabricates handles from its own path logic; it only
///   consumes handles supplied by the caller and scopes access around them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceHandle {
    /// Path carried by the handle.
    path: PathBuf,
}

impl ResourceHandle {
    /// Wraps a caller-supplied path as a handle.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
        }
    }

    /// Returns the path carried by the handle.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true when this directory handle is the filesystem parent of
    /// the given file handle. Pure path comparison; no I/O.
    #[must_use]
    pub fn is_parent_of(&self, file: &Self) -> bool {
        file.path.parent() == Some(self.path.as_path())
    }
}

// ============================================================================
// SECTION: Resource Gate
// ============================================================================

/// Host-mediated acquire/release of security-scoped access to a handle.
pub trait ResourceGate {
    /// Attempts to obtain scoped access to the handle's path.
    ///
    /// Returns whether a matching [`ResourceGate::release`] is owed. Some
    /// handles are already implicitly accessible; acquiring them returns
    /// false, and release for them is a symmetric no-op.
    fn acquire(&self, handle: &ResourceHandle) -> bool;

    /// Releases scoped access obtained by [`ResourceGate::acquire`].
    ///
    /// Must be invoked exactly once per acquire call; `was_acquired` carries
    /// the acquire call's return value.
    fn release(&self, handle: &ResourceHandle, was_acquired: bool);
}

// ============================================================================
// SECTION: Scoped Access Guard
// ============================================================================

/// Brackets one acquire/release pair around an operation.
///
/// Construction acquires; drop releases exactly once, on every exit path of
/// the enclosing operation, including propagated errors.
#[must_use = "dropping the guard releases the scoped access grant"]
pub struct ScopedAccess<'gate, G: ResourceGate> {
    /// Gate that produced the grant.
    gate: &'gate G,
    /// Handle the grant covers.
    handle: ResourceHandle,
    /// Whether release is owed for this grant.
    was_acquired: bool,
}

impl<'gate, G: ResourceGate> ScopedAccess<'gate, G> {
    /// Acquires scoped access to the handle for the lifetime of the guard.
    pub fn enter(gate: &'gate G, handle: ResourceHandle) -> Self {
        let was_acquired = gate.acquire(&handle);
        Self {
            gate,
            handle,
            was_acquired,
        }
    }

    /// Returns whether the gate reported a release as owed.
    #[must_use]
    pub const fn was_acquired(&self) -> bool {
        self.was_acquired
    }
}

impl<G: ResourceGate> Drop for ScopedAccess<'_, G> {
    fn drop(&mut self) {
        self.gate.release(&self.handle, self.was_acquired);
    }
}

// ============================================================================
// SECTION: Sandbox Gate
// ============================================================================

/// Host gate backed by cap-std capability directory handles.
///
/// Acquiring a directory handle opens it as a capability; acquiring a file
/// handle opens its parent directory, since the grant must cover the engine's
/// sidecar files next to the database. The capability is retained until
/// release drops it.
#[derive(Default)]
pub struct SandboxGate {
    /// Capabilities currently held, keyed by the acquiring handle's path.
    held: Mutex<Vec<(PathBuf, Dir)>>,
}

impl SandboxGate {
    /// Creates a gate holding no capabilities.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of scopes currently held.
    #[must_use]
    pub fn active_scopes(&self) -> usize {
        self.held.lock().map(|held| held.len()).unwrap_or(0)
    }
}

impl ResourceGate for SandboxGate {
    fn acquire(&self, handle: &ResourceHandle) -> bool {
        let Some(dir) = open_scope_dir(handle.path()) else {
            return false;
        };
        let Ok(mut held) = self.held.lock() else {
            return false;
        };
        held.push((handle.path().to_path_buf(), dir));
        true
    }

    fn release(&self, handle: &ResourceHandle, was_acquired: bool) {
        if !was_acquired {
            return;
        }
        let Ok(mut held) = self.held.lock() else {
            return;
        };
        if let Some(index) = held.iter().position(|(path, _)| path == handle.path()) {
            held.remove(index);
        }
    }
}

/// Opens the capability directory covering a handle's path.
///
/// Directory handles open directly; file handles fall back to their parent.
/// Returns `None` when no capability can be opened, which the gate reports
/// as "no release owed" rather than an error: any real access problem
/// surfaces from the engine when the connection opens.
fn open_scope_dir(path: &Path) -> Option<Dir> {
    if let Ok(dir) = Dir::open_ambient_dir(path, ambient_authority()) {
        return Some(dir);
    }
    let parent = path.parent()?;
    Dir::open_ambient_dir(parent, ambient_authority()).ok()
}
