// crates/sqlshot-cli/src/main.rs
// ============================================================================
// Module: Sqlshot CLI Entry Point
// Description: Command dispatcher for one-shot SQL query/update invocations.
// Purpose: Map shell arguments onto the core protocol and back to exit codes.
// Dependencies: clap, serde, serde_json, sqlshot-cli, sqlshot-core, thiserror
// ============================================================================

//! ## Overview
//! The sqlshot binary is the automation caller surface: `query` executes one
//! read-only statement and prints formatted rows, `update` executes a
//! mutating statement. Flags map onto the core's raw request fields; absent
//! flags stay absent (optionally filled from a TOML config), so the core's
//! needs-value protocol decides what is missing and exit code 2 reports it.
//! The quoting flag is the one exception: a boolean flag cannot be absent,
//! so it defaults to off when neither the flag nor the config sets it.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use serde::Serialize;
use sqlshot_cli::CliConfig;
use sqlshot_cli::ConfigError;
use sqlshot_core::Outcome;
use sqlshot_core::RawQueryRequest;
use sqlshot_core::RawUpdateRequest;
use sqlshot_core::RequestField;
use sqlshot_core::RequestHandler;
use sqlshot_core::ResourceHandle;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Exit code for a completed operation.
const EXIT_OK: u8 = 0;
/// Exit code for an execution failure.
const EXIT_FAILURE: u8 = 1;
/// Exit code when a required parameter must still be supplied.
const EXIT_NEEDS_VALUE: u8 = 2;

// ============================================================================
// SECTION: Arguments
// ============================================================================

/// One-shot SQL execution against sandboxed SQLite database files.
#[derive(Debug, Parser)]
#[command(name = "sqlshot", version, about = "Run one SQL statement against a SQLite file")]
struct Cli {
    /// Optional TOML config supplying formatting defaults.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Emit the response as a single JSON object on stdout.
    #[arg(long, global = true)]
    json: bool,
    /// Operation to run.
    #[command(subcommand)]
    command: Command,
}

/// Top-level operations.
#[derive(Debug, Subcommand)]
enum Command {
    /// Execute a read-only query and print one formatted row per line.
    Query(QueryArgs),
    /// Execute a mutating statement and report success or failure.
    Update(UpdateArgs),
}

/// Arguments for the query operation.
#[derive(Debug, Args)]
struct QueryArgs {
    /// Path to the SQLite database file.
    #[arg(long, value_name = "PATH")]
    database: Option<PathBuf>,
    /// String joining formatted column values within a row.
    #[arg(long, value_name = "STRING")]
    separator: Option<String>,
    /// Literal substituted for NULL column values.
    #[arg(long, value_name = "STRING")]
    null_value: Option<String>,
    /// Render text values as quoted, escaped literals.
    #[arg(long)]
    quote_strings: bool,
    /// SQL text to execute.
    sql: Option<String>,
}

/// Arguments for the update operation.
#[derive(Debug, Args)]
struct UpdateArgs {
    /// Path to the SQLite database file.
    #[arg(long, value_name = "PATH")]
    database: Option<PathBuf>,
    /// Path to the database file's parent directory.
    #[arg(long, value_name = "PATH")]
    directory: Option<PathBuf>,
    /// SQL text to execute.
    sql: Option<String>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI-level errors preceding or following an invocation.
#[derive(Debug, Error)]
enum CliError {
    /// Config loading failed.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    /// Writing the response failed.
    #[error("io error: {0}")]
    Io(String),
    /// Serializing the JSON response failed.
    #[error("render error: {0}")]
    Render(String),
}

// ============================================================================
// SECTION: Response
// ============================================================================

/// Wire response emitted by the CLI.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum Response {
    /// Formatted query rows.
    Rows {
        /// One string per result row.
        rows: Vec<String>,
    },
    /// Update completed.
    Ok,
    /// A required field must still be supplied.
    NeedsValue {
        /// The unresolved field.
        field: RequestField,
    },
    /// The invocation failed.
    Error {
        /// Failure message, engine diagnostics verbatim.
        message: String,
    },
}

/// Maps a query outcome onto the wire response.
fn query_response(outcome: Outcome<Vec<String>>) -> Response {
    match outcome {
        Outcome::Success(rows) => Response::Rows {
            rows,
        },
        Outcome::NeedsValue(field) => Response::NeedsValue {
            field,
        },
        Outcome::Failure(error) => Response::Error {
            message: error.to_string(),
        },
    }
}

/// Maps an update outcome onto the wire response.
fn update_response(outcome: Outcome<()>) -> Response {
    match outcome {
        Outcome::Success(()) => Response::Ok,
        Outcome::NeedsValue(field) => Response::NeedsValue {
            field,
        },
        Outcome::Failure(error) => Response::Error {
            message: error.to_string(),
        },
    }
}

/// Returns the process exit code for a response.
const fn exit_code(response: &Response) -> u8 {
    match response {
        Response::Rows {
            ..
        }
        | Response::Ok => EXIT_OK,
        Response::NeedsValue {
            ..
        } => EXIT_NEEDS_VALUE,
        Response::Error {
            ..
        } => EXIT_FAILURE,
    }
}

// ============================================================================
// SECTION: Request Assembly
// ============================================================================

/// Builds a raw query request from flags, filling gaps from config defaults.
fn query_request(args: QueryArgs, config: &CliConfig) -> RawQueryRequest {
    RawQueryRequest {
        database: args.database.map(ResourceHandle::new),
        query: args.sql,
        column_separator: args.separator.or_else(|| config.format.column_separator.clone()),
        null_value: args.null_value.or_else(|| config.format.null_value.clone()),
        quote_strings: if args.quote_strings {
            Some(true)
        } else {
            config.format.quote_strings.or(Some(false))
        },
    }
}

/// Builds a raw update request from flags.
fn update_request(args: UpdateArgs) -> RawUpdateRequest {
    RawUpdateRequest {
        database: args.database.map(ResourceHandle::new),
        directory: args.directory.map(ResourceHandle::new),
        statement: args.sql,
    }
}

// ============================================================================
// SECTION: Output
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Emits the response in plain or JSON form and returns the exit code.
fn respond(response: &Response, json: bool) -> Result<ExitCode, CliError> {
    if json {
        let body =
            serde_json::to_string(response).map_err(|err| CliError::Render(err.to_string()))?;
        write_stdout_line(&body).map_err(|err| CliError::Io(err.to_string()))?;
        return Ok(ExitCode::from(exit_code(response)));
    }
    match response {
        Response::Rows {
            rows,
        } => {
            for row in rows {
                write_stdout_line(row).map_err(|err| CliError::Io(err.to_string()))?;
            }
        }
        Response::Ok => {
            write_stdout_line("ok").map_err(|err| CliError::Io(err.to_string()))?;
        }
        Response::NeedsValue {
            field,
        } => {
            write_stderr_line(&format!("needs value: {field}"))
                .map_err(|err| CliError::Io(err.to_string()))?;
        }
        Response::Error {
            message,
        } => {
            write_stderr_line(message).map_err(|err| CliError::Io(err.to_string()))?;
        }
    }
    Ok(ExitCode::from(exit_code(response)))
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Parses arguments, runs one invocation, and emits the response.
fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref())?;
    let handler = RequestHandler::sandboxed();
    let response = match cli.command {
        Command::Query(args) => query_response(handler.query(query_request(args, &config))),
        Command::Update(args) => update_response(handler.update(update_request(args))),
    };
    respond(&response, cli.json)
}

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(error) => {
            let _ = write_stderr_line(&error.to_string());
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
