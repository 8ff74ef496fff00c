//! Unified error handling for the console.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::services::{DiagnosticError, ExportError};
use crate::settings::SettingsError;
use crate::spreadsheet::SpreadsheetError;
use crate::vtex::VtexError;

/// Application-level error type for the console.
#[derive(Debug, Error)]
pub enum AppError {
    /// Neither the request nor the settings store provided credentials.
    #[error("Missing VTEX credentials")]
    MissingCredentials,

    /// Settings could not be read or are incomplete.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// VTEX API call failed.
    #[error(transparent)]
    Vtex(#[from] VtexError),

    /// Export produced nothing or could not be written.
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Diagnostic run failed.
    #[error(transparent)]
    Diagnostic(#[from] DiagnosticError),

    /// Workbook could not be written.
    #[error(transparent)]
    Spreadsheet(#[from] SpreadsheetError),

    /// Resource not found.
    #[error("{0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status for this error. Upstream failures keep the VTEX status.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingCredentials | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Settings(SettingsError::CredentialsMissing | SettingsError::Incomplete(_)) => {
                StatusCode::BAD_REQUEST
            }
            Self::Vtex(e)
            | Self::Export(ExportError::Source(e))
            | Self::Diagnostic(DiagnosticError::Source(e)) => upstream_status(e),
            Self::Export(ExportError::NoRows)
            | Self::Diagnostic(DiagnosticError::NoCatalog)
            | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Settings(_)
            | Self::Export(ExportError::Spreadsheet(_))
            | Self::Diagnostic(DiagnosticError::Spreadsheet(_))
            | Self::Spreadsheet(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn upstream_status(error: &VtexError) -> StatusCode {
    match error {
        VtexError::MissingCredentials(_) => StatusCode::BAD_REQUEST,
        _ => error
            .upstream_status()
            .and_then(|status| StatusCode::from_u16(status).ok())
            .unwrap_or(StatusCode::BAD_GATEWAY),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Log server errors with Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Console request error"
            );
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "Request failed");
        }

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Settings(SettingsError::Io(_) | SettingsError::Json(_)) | Self::Internal(_) => {
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("Product not found".to_string());
        assert_eq!(err.to_string(), "Product not found");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(status(AppError::MissingCredentials), StatusCode::BAD_REQUEST);
        assert_eq!(
            status(AppError::Settings(SettingsError::CredentialsMissing)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(AppError::NotFound("x".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(AppError::Export(ExportError::NoRows)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(AppError::Internal("x".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_upstream_status_is_kept() {
        let err = AppError::Vtex(VtexError::Api {
            status: 403,
            body: "forbidden".to_string(),
        });
        assert_eq!(status(err), StatusCode::FORBIDDEN);

        let err = AppError::Export(ExportError::Source(VtexError::Api {
            status: 500,
            body: String::new(),
        }));
        assert_eq!(status(err), StatusCode::INTERNAL_SERVER_ERROR);

        let err = AppError::Vtex(VtexError::InvalidHeader("app key".to_string()));
        assert_eq!(status(err), StatusCode::BAD_GATEWAY);
    }
}
