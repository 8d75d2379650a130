// crates/sqlshot-cli/src/lib.rs
// ============================================================================
// Module: Sqlshot CLI Library
// Description: Reusable pieces of the sqlshot command-line surface.
// Purpose: Expose config loading for the binary and its tests.
// Dependencies: serde, thiserror, toml
// ============================================================================

//! ## Overview
//! Library side of the sqlshot CLI. The binary in `main.rs` handles argument
//! parsing and response mapping; the config module here loads optional
//! formatting defaults from a TOML file with strict, fail-closed input
//! guards.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::CliConfig;
pub use config::ConfigError;
pub use config::FormatDefaults;
