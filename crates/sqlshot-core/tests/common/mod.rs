// crates/sqlshot-core/tests/common/mod.rs
// ============================================================================
// Module: Shared Test Helpers
// Description: Counting gate and scratch database seeding.
// Purpose: Support protocol property checks across test binaries.
// Dependencies: sqlshot-core, rusqlite, tempfile
// ============================================================================

#![allow(dead_code, reason = "Helpers are shared across independent test binaries.")]

use std::path::Path;
use std::path::PathBuf;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use rusqlite::Connection;
use sqlshot_core::ResourceGate;
use sqlshot_core::ResourceHandle;
use tempfile::TempDir;

/// Gate that counts acquire/release calls and always reports a release owed.
#[derive(Default)]
pub struct CountingGate {
    /// Number of acquire calls observed.
    acquires: AtomicUsize,
    /// Number of release calls owed and honored.
    releases: AtomicUsize,
}

impl CountingGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquires(&self) -> usize {
        self.acquires.load(Ordering::SeqCst)
    }

    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }
}

impl ResourceGate for CountingGate {
    fn acquire(&self, _handle: &ResourceHandle) -> bool {
        self.acquires.fetch_add(1, Ordering::SeqCst);
        true
    }

    fn release(&self, _handle: &ResourceHandle, was_acquired: bool) {
        assert!(was_acquired, "counting gate always owes a release");
        self.releases.fetch_add(1, Ordering::SeqCst);
    }
}

/// Creates a scratch database containing one row `(1, 'hi', NULL)` in table
/// `t(id, name, note)`.
pub fn seeded_database(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("sample.sqlite");
    let connection = Connection::open(&path).expect("open scratch database");
    connection
        .execute_batch(
            "CREATE TABLE t (id INTEGER, name TEXT, note TEXT);
             INSERT INTO t (id, name, note) VALUES (1, 'hi', NULL);",
        )
        .expect("seed scratch database");
    path
}

/// Reads the raw bytes of a database file for unchanged-content assertions.
pub fn database_bytes(path: &Path) -> Vec<u8> {
    std::fs::read(path).expect("read database bytes")
}
