//! VTEX tenant credentials.
//!
//! A VTEX tenant is addressed by an account name and an environment
//! (`myvtex`, `vtexcommercestable`, ...). Private APIs are authorised with a
//! static app key / app token pair sent as headers on every request.

use std::fmt;
use std::str::FromStr;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Credential validation errors.
///
/// The messages are shown to the user verbatim before any API call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("VTEX account name is not configured")]
    MissingAccountName,
    #[error("VTEX API key is not configured")]
    MissingAppKey,
    #[error("VTEX API token is not configured")]
    MissingAppToken,
}

/// VTEX hosting environment (the second label of the tenant hostname).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum VtexEnvironment {
    /// `{account}.myvtex.com`
    #[default]
    MyVtex,
    /// `{account}.vtexcommercestable.com.br`
    CommerceStable,
    /// Any other environment label.
    Custom(String),
}

impl VtexEnvironment {
    /// The hostname label for this environment.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::MyVtex => "myvtex",
            Self::CommerceStable => "vtexcommercestable",
            Self::Custom(label) => label,
        }
    }

    /// Top-level domain the environment is served under.
    ///
    /// `myvtex` tenants live under `.com`; the commerce environments
    /// (`vtexcommercestable`, `vtexcommercebeta`, ...) under `.com.br`.
    #[must_use]
    pub const fn top_level_domain(&self) -> &'static str {
        match self {
            Self::MyVtex => "com",
            Self::CommerceStable | Self::Custom(_) => "com.br",
        }
    }
}

impl fmt::Display for VtexEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VtexEnvironment {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "" | "myvtex" => Self::MyVtex,
            "vtexcommercestable" => Self::CommerceStable,
            other => Self::Custom(other.to_owned()),
        })
    }
}

impl Serialize for VtexEnvironment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for VtexEnvironment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or_default())
    }
}

/// Credentials for one VTEX tenant.
///
/// Implements `Debug` manually to redact the app key and token.
#[derive(Clone)]
pub struct VtexCredentials {
    /// Tenant account name (first hostname label).
    pub account_name: String,
    /// `X-VTEX-API-AppKey` header value.
    pub app_key: SecretString,
    /// `X-VTEX-API-AppToken` header value.
    pub app_token: SecretString,
    /// Hosting environment.
    pub environment: VtexEnvironment,
}

impl fmt::Debug for VtexCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VtexCredentials")
            .field("account_name", &self.account_name)
            .field("app_key", &"[REDACTED]")
            .field("app_token", &"[REDACTED]")
            .field("environment", &self.environment)
            .finish()
    }
}

impl VtexCredentials {
    /// Build credentials from plain strings.
    #[must_use]
    pub fn new(
        account_name: impl Into<String>,
        app_key: impl Into<String>,
        app_token: impl Into<String>,
        environment: VtexEnvironment,
    ) -> Self {
        Self {
            account_name: account_name.into(),
            app_key: SecretString::from(app_key.into()),
            app_token: SecretString::from(app_token.into()),
            environment,
        }
    }

    /// Check that every field required to call VTEX is present.
    ///
    /// # Errors
    ///
    /// Returns the first missing field as a `CredentialError`.
    pub fn validate(&self) -> Result<(), CredentialError> {
        if self.account_name.trim().is_empty() {
            return Err(CredentialError::MissingAccountName);
        }
        if self.app_key.expose_secret().trim().is_empty() {
            return Err(CredentialError::MissingAppKey);
        }
        if self.app_token.expose_secret().trim().is_empty() {
            return Err(CredentialError::MissingAppToken);
        }
        Ok(())
    }

    /// Tenant hostname, e.g. `store.myvtex.com`.
    #[must_use]
    pub fn host(&self) -> String {
        format!(
            "{}.{}.{}",
            self.account_name.trim(),
            self.environment,
            self.environment.top_level_domain()
        )
    }

    /// Base URL for REST calls, e.g. `https://store.vtexcommercestable.com.br`.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("https://{}", self.host())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(account: &str, key: &str, token: &str) -> VtexCredentials {
        VtexCredentials::new(account, key, token, VtexEnvironment::MyVtex)
    }

    #[test]
    fn test_validate_ok() {
        assert_eq!(creds("store", "key", "token").validate(), Ok(()));
    }

    #[test]
    fn test_validate_reports_first_missing_field() {
        assert_eq!(
            creds("", "key", "token").validate(),
            Err(CredentialError::MissingAccountName)
        );
        assert_eq!(
            creds("store", "  ", "token").validate(),
            Err(CredentialError::MissingAppKey)
        );
        assert_eq!(
            creds("store", "key", "").validate(),
            Err(CredentialError::MissingAppToken)
        );
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let debug = format!("{:?}", creds("store", "vtexappkey-store-ABC", "TOKEN123"));
        assert!(debug.contains("store"));
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("vtexappkey-store-ABC"));
        assert!(!debug.contains("TOKEN123"));
    }

    #[test]
    fn test_environment_parse() {
        assert_eq!("myvtex".parse(), Ok(VtexEnvironment::MyVtex));
        assert_eq!("".parse(), Ok(VtexEnvironment::MyVtex));
        assert_eq!(
            "vtexcommercestable".parse(),
            Ok(VtexEnvironment::CommerceStable)
        );
        assert_eq!(
            "vtexcommercebeta".parse(),
            Ok(VtexEnvironment::Custom("vtexcommercebeta".to_string()))
        );
    }

    #[test]
    fn test_environment_serde_as_label() {
        let json = serde_json::to_string(&VtexEnvironment::CommerceStable).expect("serialize");
        assert_eq!(json, "\"vtexcommercestable\"");
        let env: VtexEnvironment = serde_json::from_str("\"myvtex\"").expect("deserialize");
        assert_eq!(env, VtexEnvironment::MyVtex);
    }

    #[test]
    fn test_host_follows_environment() {
        let stable = VtexCredentials::new("store", "k", "t", VtexEnvironment::CommerceStable);
        assert_eq!(stable.host(), "store.vtexcommercestable.com.br");
        assert_eq!(
            stable.base_url(),
            "https://store.vtexcommercestable.com.br"
        );

        let myvtex = creds(" store ", "k", "t");
        assert_eq!(myvtex.host(), "store.myvtex.com");
    }
}
