//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use vtex_console_core::VtexCredentials;

use crate::config::AdminConfig;
use crate::error::AppError;
use crate::settings::SettingsStore;
use crate::vtex::VtexClient;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    settings: SettingsStore,
    vtex_base_url: Option<String>,
}

impl AppState {
    /// Build the state, seeding the settings store from the configuration
    /// when it is still empty.
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        let settings = config.settings_store();
        if let Some(seed) = &config.seed_credentials {
            match settings.seed(seed) {
                Ok(true) => tracing::info!(account = %seed.account_name, "Seeded VTEX settings"),
                Ok(false) => {}
                Err(e) => tracing::warn!(error = %e, "Failed to seed VTEX settings"),
            }
        }
        Self {
            inner: Arc::new(AppStateInner {
                config,
                settings,
                vtex_base_url: None,
            }),
        }
    }

    /// State whose VTEX clients talk to `base_url` instead of the tenant
    /// host.
    #[must_use]
    pub fn with_vtex_base_url(config: AdminConfig, base_url: impl Into<String>) -> Self {
        let settings = config.settings_store();
        Self {
            inner: Arc::new(AppStateInner {
                config,
                settings,
                vtex_base_url: Some(base_url.into()),
            }),
        }
    }

    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.inner.settings
    }

    /// Pause between catalog pages in bulk reads.
    pub fn page_delay(&self) -> Duration {
        self.inner.config.page_delay
    }

    /// Client for the stored credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if no complete credentials are stored.
    pub fn client(&self) -> Result<VtexClient, AppError> {
        let credentials = self.inner.settings.require()?;
        self.client_for(&credentials)
    }

    /// Client for explicit credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are incomplete.
    pub fn client_for(&self, credentials: &VtexCredentials) -> Result<VtexClient, AppError> {
        let client = match &self.inner.vtex_base_url {
            Some(base_url) => VtexClient::with_base_url(credentials, base_url.as_str())?,
            None => VtexClient::new(credentials)?,
        };
        Ok(client)
    }
}
