//! Console configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 3001)
//! - `VTEX_CONSOLE_SETTINGS` - Settings file path (default: .vtex-console/settings.json)
//! - `EXPORT_PAGE_DELAY_MS` - Pause between catalog pages during bulk reads (default: 100)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Trace sample rate (default: 1.0)
//!
//! ## Optional (credential seed)
//! Written to the settings file on start-up when it holds nothing yet.
//! - `VTEX_ACCOUNT_NAME` - Tenant account name
//! - `VTEX_API_KEY` - App key (`X-VTEX-API-AppKey`)
//! - `VTEX_API_TOKEN` - App token (`X-VTEX-API-AppToken`)
//! - `VTEX_ENVIRONMENT` - Hosting environment (default: myvtex)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use vtex_console_core::{VtexCredentials, VtexEnvironment};

use crate::services::export::DEFAULT_PAGE_DELAY;
use crate::settings::{SETTINGS_PATH_ENV, SettingsStore};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Console configuration.
#[derive(Clone)]
pub struct AdminConfig {
    /// Bind address
    pub host: IpAddr,
    /// Listen port
    pub port: u16,
    /// Settings file holding the tenant credentials
    pub settings_path: Option<PathBuf>,
    /// Pause between catalog pages during exports and diagnostics
    pub page_delay: Duration,
    /// Credentials to seed the settings file with
    pub seed_credentials: Option<VtexCredentials>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("settings_path", &self.settings_path)
            .field("page_delay", &self.page_delay)
            .field("seed_credentials", &self.seed_credentials)
            .field("sentry_dsn", &self.sentry_dsn.as_ref().map(|_| "[REDACTED]"))
            .field("sentry_environment", &self.sentry_environment)
            .field("sentry_sample_rate", &self.sentry_sample_rate)
            .field("sentry_traces_sample_rate", &self.sentry_traces_sample_rate)
            .finish()
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3001,
            settings_path: None,
            page_delay: DEFAULT_PAGE_DELAY,
            seed_credentials: None,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        }
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid, or if the
    /// credential seed is only partially set.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("ADMIN_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("ADMIN_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_PORT".to_string(), e.to_string()))?;
        let settings_path = get_optional_env(SETTINGS_PATH_ENV).map(PathBuf::from);
        let page_delay = match get_optional_env("EXPORT_PAGE_DELAY_MS") {
            Some(raw) => Duration::from_millis(raw.parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar("EXPORT_PAGE_DELAY_MS".to_string(), e.to_string())
            })?),
            None => DEFAULT_PAGE_DELAY,
        };
        let seed_credentials = seed_credentials_from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            host,
            port,
            settings_path,
            page_delay,
            seed_credentials,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Settings store at the configured path.
    #[must_use]
    pub fn settings_store(&self) -> SettingsStore {
        self.settings_path
            .as_ref()
            .map_or_else(SettingsStore::from_env, SettingsStore::open)
    }
}

fn seed_credentials_from_env() -> Result<Option<VtexCredentials>, ConfigError> {
    let account = get_optional_env("VTEX_ACCOUNT_NAME");
    let key = get_optional_env("VTEX_API_KEY");
    let token = get_optional_env("VTEX_API_TOKEN");
    let environment = get_optional_env("VTEX_ENVIRONMENT")
        .and_then(|e| e.parse::<VtexEnvironment>().ok())
        .unwrap_or_default();

    match (account, key, token) {
        (Some(account), Some(key), Some(token)) => Ok(Some(VtexCredentials::new(
            account,
            key,
            token,
            environment,
        ))),
        (None, None, None) => Ok(None),
        _ => Err(ConfigError::InvalidEnvVar(
            "VTEX_*".to_string(),
            "VTEX_ACCOUNT_NAME, VTEX_API_KEY and VTEX_API_TOKEN must be set together".to_string(),
        )),
    }
}

/// Get an optional environment variable. Blank values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = AdminConfig::default();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3001);
    }

    #[test]
    fn test_default_page_delay() {
        assert_eq!(
            AdminConfig::default().page_delay,
            Duration::from_millis(100)
        );
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = AdminConfig {
            seed_credentials: Some(VtexCredentials::new(
                "store",
                "vtexappkey-store-XYZ",
                "SUPERSECRET",
                VtexEnvironment::MyVtex,
            )),
            sentry_dsn: Some("https://key@sentry.io/1".to_string()),
            ..AdminConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("store"));
        assert!(!debug.contains("SUPERSECRET"));
        assert!(!debug.contains("vtexappkey-store-XYZ"));
        assert!(!debug.contains("key@sentry.io"));
    }

    #[test]
    fn test_settings_store_uses_configured_path() {
        let config = AdminConfig {
            settings_path: Some(PathBuf::from("/tmp/console/settings.json")),
            ..AdminConfig::default()
        };
        assert_eq!(
            config.settings_store().path(),
            std::path::Path::new("/tmp/console/settings.json")
        );
    }
}
