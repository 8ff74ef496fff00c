//! CLI command implementations.

pub mod catalog;
pub mod mutations;
pub mod orders;
pub mod settings;

use serde::Serialize;
use thiserror::Error;
use vtex_console_admin::services::{DiagnosticError, ExportError};
use vtex_console_admin::settings::{SettingsError, SettingsStore};
use vtex_console_admin::spreadsheet::SpreadsheetError;
use vtex_console_admin::vtex::{VtexClient, VtexError};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Vtex(#[from] VtexError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Diagnostic(#[from] DiagnosticError),

    #[error(transparent)]
    Spreadsheet(#[from] SpreadsheetError),

    /// An action reported `success: false`.
    #[error("{0}")]
    Action(String),

    #[error("Invalid {field}: {value:?}")]
    InvalidArgument { field: &'static str, value: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Unwrap an action envelope.
fn into_result<T>(result: vtex_console_admin::actions::ActionResult<T>) -> Result<T, CliError> {
    result.into_result().map_err(CliError::Action)
}

/// Client for the stored credentials.
fn client(store: &SettingsStore) -> Result<VtexClient, CliError> {
    Ok(VtexClient::new(&store.require()?)?)
}

fn parse<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T, CliError> {
    value.trim().parse().map_err(|_| CliError::InvalidArgument {
        field,
        value: value.to_owned(),
    })
}

/// Write `value` to stdout as pretty JSON.
#[allow(clippy::print_stdout)]
fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
