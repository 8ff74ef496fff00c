//! Local credential store.
//!
//! Credentials entered in the settings page (or via `vtex-cli settings set`)
//! are kept in a small JSON file:
//!
//! ```json
//! {"accountName": "store", "apiKey": "...", "apiToken": "...", "environment": "myvtex"}
//! ```
//!
//! Writes replace the whole file; the last writer wins.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use vtex_console_core::{CredentialError, VtexCredentials, VtexEnvironment};

/// Environment variable overriding the settings file location.
pub const SETTINGS_PATH_ENV: &str = "VTEX_CONSOLE_SETTINGS";

const DEFAULT_SETTINGS_PATH: &str = ".vtex-console/settings.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(
        "VTEX credentials not configured. Please set up your VTEX account credentials in the settings."
    )]
    CredentialsMissing,

    #[error(transparent)]
    Incomplete(#[from] CredentialError),

    #[error("Settings file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-disk shape of the settings file.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSettings {
    #[serde(default)]
    account_name: String,
    #[serde(default)]
    api_key: String,
    #[serde(default)]
    api_token: String,
    #[serde(default)]
    environment: VtexEnvironment,
}

impl From<StoredSettings> for VtexCredentials {
    fn from(stored: StoredSettings) -> Self {
        Self::new(
            stored.account_name,
            stored.api_key,
            stored.api_token,
            stored.environment,
        )
    }
}

impl From<&VtexCredentials> for StoredSettings {
    fn from(credentials: &VtexCredentials) -> Self {
        Self {
            account_name: credentials.account_name.trim().to_string(),
            api_key: credentials.app_key.expose_secret().trim().to_string(),
            api_token: credentials.app_token.expose_secret().trim().to_string(),
            environment: credentials.environment.clone(),
        }
    }
}

/// JSON file holding the tenant credentials.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Store backed by `path`. The file is created on first save.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `$VTEX_CONSOLE_SETTINGS`, or `./.vtex-console/settings.json`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::open(default_path())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored credentials. A missing file is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Option<VtexCredentials>, SettingsError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let stored: StoredSettings = serde_json::from_str(&raw)?;
        Ok(Some(stored.into()))
    }

    /// Stored credentials, validated.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::CredentialsMissing` if nothing is stored and
    /// `SettingsError::Incomplete` if a field is empty.
    pub fn require(&self) -> Result<VtexCredentials, SettingsError> {
        let credentials = self.load()?.ok_or(SettingsError::CredentialsMissing)?;
        credentials.validate()?;
        Ok(credentials)
    }

    /// Replace the stored credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, credentials: &VtexCredentials) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&StoredSettings::from(credentials))?;
        fs::write(&self.path, json)?;
        tracing::info!(
            account = %credentials.account_name,
            path = %self.path.display(),
            "Saved VTEX settings"
        );
        Ok(())
    }

    /// Remove the stored credentials. Clearing an empty store is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<(), SettingsError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!(path = %self.path.display(), "Cleared VTEX settings");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Save `credentials` only if nothing is stored yet.
    ///
    /// Returns `true` if the store was seeded.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or written.
    pub fn seed(&self, credentials: &VtexCredentials) -> Result<bool, SettingsError> {
        if self.load()?.is_some() {
            return Ok(false);
        }
        self.save(credentials)?;
        Ok(true)
    }
}

fn default_path() -> PathBuf {
    std::env::var(SETTINGS_PATH_ENV)
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH), PathBuf::from)
}

/// Mask a secret for display, keeping the last four characters.
#[must_use]
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars.iter().skip(chars.len() - 4).collect();
    format!("{}{visible}", "*".repeat(8))
}
