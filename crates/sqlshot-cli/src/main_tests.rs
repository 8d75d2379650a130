// crates/sqlshot-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Unit Tests
// Description: Request assembly, response mapping, and exit code coverage.
// Purpose: Ensure flags, config defaults, and outcomes map predictably.
// Dependencies: clap, serde_json, sqlshot-cli, sqlshot-core
// ============================================================================

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

use std::path::PathBuf;

use clap::CommandFactory;
use sqlshot_cli::CliConfig;
use sqlshot_cli::FormatDefaults;
use sqlshot_core::HandlerError;
use sqlshot_core::Outcome;
use sqlshot_core::RequestField;

use crate::Cli;
use crate::EXIT_FAILURE;
use crate::EXIT_NEEDS_VALUE;
use crate::EXIT_OK;
use crate::QueryArgs;
use crate::Response;
use crate::UpdateArgs;
use crate::exit_code;
use crate::query_request;
use crate::query_response;
use crate::update_request;
use crate::update_response;

fn config_with_defaults() -> CliConfig {
    CliConfig {
        format: FormatDefaults {
            column_separator: Some(";".to_string()),
            null_value: Some("<null>".to_string()),
            quote_strings: Some(true),
        },
    }
}

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn query_flags_override_config_defaults() {
    let args = QueryArgs {
        database: Some(PathBuf::from("/tmp/db.sqlite")),
        separator: Some(",".to_string()),
        null_value: Some("NULL".to_string()),
        quote_strings: false,
        sql: Some("SELECT 1".to_string()),
    };
    let request = query_request(args, &config_with_defaults());
    assert_eq!(request.column_separator.as_deref(), Some(","));
    assert_eq!(request.null_value.as_deref(), Some("NULL"));
    // The config turns quoting on when the flag is absent.
    assert_eq!(request.quote_strings, Some(true));
}

#[test]
fn query_gaps_fall_back_to_config_then_stay_absent() {
    let args = QueryArgs {
        database: None,
        separator: None,
        null_value: None,
        quote_strings: false,
        sql: None,
    };
    let request = query_request(args, &config_with_defaults());
    assert!(request.database.is_none());
    assert!(request.query.is_none());
    assert_eq!(request.column_separator.as_deref(), Some(";"));
    assert_eq!(request.null_value.as_deref(), Some("<null>"));
}

#[test]
fn quoting_defaults_off_without_flag_or_config() {
    let args = QueryArgs {
        database: None,
        separator: None,
        null_value: None,
        quote_strings: false,
        sql: None,
    };
    let request = query_request(args, &CliConfig::default());
    assert_eq!(request.quote_strings, Some(false));
}

#[test]
fn update_request_maps_paths_to_handles() {
    let args = UpdateArgs {
        database: Some(PathBuf::from("/data/db.sqlite")),
        directory: Some(PathBuf::from("/data")),
        sql: Some("DELETE FROM t".to_string()),
    };
    let request = update_request(args);
    let directory = request.directory.clone().unwrap();
    let database = request.database.clone().unwrap();
    assert!(directory.is_parent_of(&database));
    assert_eq!(request.statement.as_deref(), Some("DELETE FROM t"));
}

#[test]
fn responses_serialize_with_status_tags() {
    let rows = query_response(Outcome::Success(vec!["1,hi".to_string()]));
    assert_eq!(
        serde_json::to_string(&rows).unwrap(),
        r#"{"status":"rows","rows":["1,hi"]}"#
    );

    let ok = update_response(Outcome::Success(()));
    assert_eq!(serde_json::to_string(&ok).unwrap(), r#"{"status":"ok"}"#);

    let needs = query_response(Outcome::NeedsValue(RequestField::ColumnSeparator));
    assert_eq!(
        serde_json::to_string(&needs).unwrap(),
        r#"{"status":"needs_value","field":"column_separator"}"#
    );

    let failed = update_response(Outcome::Failure(HandlerError::Engine(
        "no such table: t".to_string(),
    )));
    assert_eq!(
        serde_json::to_string(&failed).unwrap(),
        r#"{"status":"error","message":"no such table: t"}"#
    );
}

#[test]
fn exit_codes_follow_response_class() {
    assert_eq!(
        exit_code(&Response::Rows {
            rows: Vec::new()
        }),
        EXIT_OK
    );
    assert_eq!(exit_code(&Response::Ok), EXIT_OK);
    assert_eq!(
        exit_code(&Response::NeedsValue {
            field: RequestField::Query
        }),
        EXIT_NEEDS_VALUE
    );
    assert_eq!(
        exit_code(&Response::Error {
            message: "boom".to_string()
        }),
        EXIT_FAILURE
    );
}
