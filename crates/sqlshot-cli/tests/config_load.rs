// crates/sqlshot-cli/tests/config_load.rs
// ============================================================================
// Module: Config Load Validation Tests
// Description: Validate config loading guards (path, size, encoding).
// Purpose: Ensure config input handling is strict and fail-closed.
// Dependencies: sqlshot-cli, tempfile
// ============================================================================

//! ## Overview
//! Config loading must reject overlong paths, oversized files, non-UTF-8
//! content, and unknown keys, while an absent config yields empty defaults.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;

use sqlshot_cli::CliConfig;
use sqlshot_cli::ConfigError;
use tempfile::NamedTempFile;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn assert_invalid(result: Result<CliConfig, ConfigError>, needle: &str) {
    match result {
        Err(error) => {
            let message = error.to_string();
            assert!(message.contains(needle), "error {message} did not contain {needle}");
        }
        Ok(_) => panic!("expected invalid config load"),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn absent_config_yields_empty_defaults() {
    let config = CliConfig::load(None).unwrap();
    assert_eq!(config, CliConfig::default());
    assert!(config.format.column_separator.is_none());
}

#[test]
fn load_rejects_path_too_long() {
    let long_path = "a".repeat(5_000);
    assert_invalid(CliConfig::load(Some(Path::new(&long_path))), "config path exceeds max length");
}

#[test]
fn load_rejects_path_component_too_long() {
    let long_component = "a".repeat(300);
    assert_invalid(
        CliConfig::load(Some(Path::new(&long_component))),
        "config path component too long",
    );
}

#[test]
fn load_rejects_oversized_file() {
    let mut file = NamedTempFile::new().unwrap();
    let payload = vec![b'a'; 1_048_577];
    file.write_all(&payload).unwrap();
    assert_invalid(CliConfig::load(Some(file.path())), "config file exceeds size limit");
}

#[test]
fn load_rejects_non_utf8_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&[0xFF, 0xFE, 0xFF]).unwrap();
    assert_invalid(CliConfig::load(Some(file.path())), "config file must be utf-8");
}

#[test]
fn load_rejects_unknown_keys() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"[format]\nrow_limit = 5\n").unwrap();
    assert_invalid(CliConfig::load(Some(file.path())), "config parse error");
}

#[test]
fn load_accepts_format_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"[format]\ncolumn_separator = \"|\"\nnull_value = \"NULL\"\nquote_strings = true\n")
        .unwrap();
    let config = CliConfig::load(Some(file.path())).unwrap();
    assert_eq!(config.format.column_separator.as_deref(), Some("|"));
    assert_eq!(config.format.null_value.as_deref(), Some("NULL"));
    assert_eq!(config.format.quote_strings, Some(true));
}

#[test]
fn load_rejects_missing_file() {
    let result = CliConfig::load(Some(Path::new("/nonexistent/sqlshot.toml")));
    assert_invalid(result, "config io error");
}
