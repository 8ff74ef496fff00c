//! VTEX credential settings page.

use askama::Template;
use axum::{
    Form,
    extract::{Query, State},
    response::{Html, Redirect},
};
use secrecy::ExposeSecret;
use serde::Deserialize;
use tracing::instrument;
use vtex_console_core::{VtexCredentials, VtexEnvironment};

use crate::settings::mask_secret;
use crate::state::AppState;

use super::render;

/// Settings page template.
#[derive(Template)]
#[template(path = "settings/index.html")]
pub struct SettingsTemplate {
    pub current_path: String,
    pub account_name: Option<String>,
    pub environment: String,
    pub masked_key: Option<String>,
    pub masked_token: Option<String>,
    pub base_url: Option<String>,
    pub settings_path: String,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
}

/// Result codes carried through the redirect.
#[derive(Debug, Default, Deserialize)]
pub struct SettingsQueryParams {
    pub success: Option<String>,
    pub error: Option<String>,
}

/// Credential form.
///
/// Blank key or token fields keep the stored values.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsForm {
    pub account_name: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub api_token: String,
    #[serde(default)]
    pub environment: String,
}

/// Render the settings page.
///
/// GET /settings
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<SettingsQueryParams>,
) -> Html<String> {
    let mut load_error = None;
    let stored = state.settings().load().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to read settings");
        load_error = Some(e.to_string());
        None
    });

    let success_message = params.success.map(|s| match s.as_str() {
        "saved" => "Credenciales guardadas.".to_owned(),
        "cleared" => "Credenciales eliminadas.".to_owned(),
        _ => s,
    });

    let error_message = params
        .error
        .map(|e| match e.as_str() {
            "missing_fields" => "Cuenta, App Key y App Token son obligatorios.".to_owned(),
            "save_failed" => "No se pudieron guardar las credenciales.".to_owned(),
            "clear_failed" => "No se pudieron eliminar las credenciales.".to_owned(),
            _ => e,
        })
        .or(load_error);

    let template = match stored {
        Some(credentials) => SettingsTemplate {
            current_path: "/settings".to_owned(),
            account_name: Some(credentials.account_name.clone())
                .filter(|name| !name.trim().is_empty()),
            environment: credentials.environment.to_string(),
            masked_key: Some(mask_secret(credentials.app_key.expose_secret())),
            masked_token: Some(mask_secret(credentials.app_token.expose_secret())),
            base_url: credentials
                .validate()
                .is_ok()
                .then(|| credentials.base_url()),
            settings_path: state.settings().path().display().to_string(),
            success_message,
            error_message,
        },
        None => SettingsTemplate {
            current_path: "/settings".to_owned(),
            account_name: None,
            environment: VtexEnvironment::default().to_string(),
            masked_key: None,
            masked_token: None,
            base_url: None,
            settings_path: state.settings().path().display().to_string(),
            success_message,
            error_message,
        },
    };
    render(&template)
}

/// Save the credentials.
///
/// POST /settings
#[instrument(skip(state, form))]
pub async fn update(State(state): State<AppState>, Form(form): Form<SettingsForm>) -> Redirect {
    let stored = state.settings().load().ok().flatten();
    let keep = |submitted: &str, current: Option<&str>| {
        let submitted = submitted.trim();
        if submitted.is_empty() {
            current.unwrap_or_default().to_owned()
        } else {
            submitted.to_owned()
        }
    };

    let app_key = keep(
        &form.api_key,
        stored.as_ref().map(|c| c.app_key.expose_secret()),
    );
    let app_token = keep(
        &form.api_token,
        stored.as_ref().map(|c| c.app_token.expose_secret()),
    );
    let environment: VtexEnvironment = form.environment.parse().unwrap_or_default();

    let credentials = VtexCredentials::new(
        form.account_name.trim(),
        app_key,
        app_token,
        environment,
    );
    if credentials.validate().is_err() {
        return Redirect::to("/settings?error=missing_fields");
    }

    match state.settings().save(&credentials) {
        Ok(()) => {
            tracing::info!("Saved VTEX credentials");
            Redirect::to("/settings?success=saved")
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to save settings");
            Redirect::to("/settings?error=save_failed")
        }
    }
}

/// Remove the stored credentials.
///
/// POST /settings/clear
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Redirect {
    match state.settings().clear() {
        Ok(()) => {
            tracing::info!("Cleared VTEX credentials");
            Redirect::to("/settings?success=cleared")
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to clear settings");
            Redirect::to("/settings?error=clear_failed")
        }
    }
}
