//! Credential store commands.
//!
//! # Usage
//!
//! ```bash
//! vtex-cli settings set -a mystore -k vtexappkey-mystore-XXXX -t TOKEN -e myvtex
//! vtex-cli settings show
//! vtex-cli settings clear
//! ```

use secrecy::ExposeSecret;
use serde_json::json;
use vtex_console_admin::settings::{SettingsStore, mask_secret};
use vtex_console_core::{VtexCredentials, VtexEnvironment};

use super::{CliError, print_json};

/// Print the stored credentials with masked secrets.
///
/// # Errors
///
/// Returns an error if the settings file cannot be read.
pub fn show(store: &SettingsStore) -> Result<(), CliError> {
    let Some(credentials) = store.load()? else {
        tracing::warn!(path = %store.path().display(), "No credentials stored");
        return Ok(());
    };

    print_json(&json!({
        "accountName": credentials.account_name,
        "apiKey": mask_secret(credentials.app_key.expose_secret()),
        "apiToken": mask_secret(credentials.app_token.expose_secret()),
        "environment": credentials.environment.as_str(),
        "baseUrl": credentials.base_url(),
        "path": store.path().display().to_string(),
    }))
}

/// Validate and save credentials.
///
/// # Errors
///
/// Returns an error if a field is empty or the file cannot be written.
pub fn set(
    store: &SettingsStore,
    account: &str,
    app_key: &str,
    app_token: &str,
    environment: &str,
) -> Result<(), CliError> {
    let environment: VtexEnvironment = environment.parse().unwrap_or_default();
    let credentials = VtexCredentials::new(account.trim(), app_key.trim(), app_token.trim(), environment);
    credentials
        .validate()
        .map_err(|e| CliError::Action(e.to_string()))?;

    store.save(&credentials)?;
    tracing::info!(account = %credentials.account_name, url = %credentials.base_url(), "Credentials saved");
    Ok(())
}

/// Remove the stored credentials.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be removed.
pub fn clear(store: &SettingsStore) -> Result<(), CliError> {
    store.clear()?;
    Ok(())
}
