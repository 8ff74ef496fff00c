//! HTTP plumbing shared by every VTEX endpoint.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use secrecy::ExposeSecret;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::instrument;
use vtex_console_core::VtexCredentials;

use super::VtexError;

const APP_KEY_HEADER: &str = "x-vtex-api-appkey";
const APP_TOKEN_HEADER: &str = "x-vtex-api-apptoken";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// VTEX REST API client for one tenant.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct VtexClient {
    inner: Arc<VtexClientInner>,
}

struct VtexClientInner {
    client: reqwest::Client,
    base_url: String,
    account_name: String,
}

impl VtexClient {
    /// Create a client for the tenant described by `credentials`.
    ///
    /// # Errors
    ///
    /// Returns `VtexError::MissingCredentials` if the account, key or token
    /// is empty. No request is sent in that case.
    pub fn new(credentials: &VtexCredentials) -> Result<Self, VtexError> {
        Self::with_base_url(credentials, credentials.base_url())
    }

    /// Create a client that talks to an explicit base URL.
    ///
    /// # Errors
    ///
    /// Same as [`VtexClient::new`], plus `VtexError::InvalidHeader` if the
    /// key or token contains characters not allowed in a header.
    pub fn with_base_url(
        credentials: &VtexCredentials,
        base_url: impl Into<String>,
    ) -> Result<Self, VtexError> {
        credentials.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(APP_KEY_HEADER),
            secret_header(credentials.app_key.expose_secret(), "app key")?,
        );
        headers.insert(
            HeaderName::from_static(APP_TOKEN_HEADER),
            secret_header(credentials.app_token.expose_secret(), "app token")?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            inner: Arc::new(VtexClientInner {
                client,
                base_url: base_url.into().trim_end_matches('/').to_string(),
                account_name: credentials.account_name.clone(),
            }),
        })
    }

    /// Tenant account name this client is bound to.
    #[must_use]
    pub fn account_name(&self) -> &str {
        &self.inner.account_name
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Send a request and return the response body as JSON.
    ///
    /// A 2xx body that is not JSON is returned as a JSON string; an empty
    /// body as `null`.
    ///
    /// # Errors
    ///
    /// Returns `VtexError::Api` with the status and raw body for any non-2xx
    /// response, and `VtexError::Http` on network failures.
    #[instrument(skip(self, body), fields(account = %self.inner.account_name))]
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, VtexError> {
        let url = format!("{}{path}", self.inner.base_url);
        let mut builder = self.inner.client.request(method, &url);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "VTEX request failed");
            return Err(VtexError::Api {
                status: status.as_u16(),
                body: normalize_error_body(&text),
            });
        }

        Ok(parse_body(&text))
    }

    /// Execute a GET request and deserialize the response.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, VtexError> {
        let value = self.request(Method::GET, path, None).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Execute a POST request with a JSON body.
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, VtexError> {
        let body = serde_json::to_value(body)?;
        let value = self.request(Method::POST, path, Some(&body)).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Execute a PUT request with a JSON body.
    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, VtexError> {
        let body = serde_json::to_value(body)?;
        let value = self.request(Method::PUT, path, Some(&body)).await?;
        Ok(serde_json::from_value(value)?)
    }
}

impl std::fmt::Debug for VtexClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VtexClient")
            .field("account_name", &self.inner.account_name)
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

fn secret_header(value: &str, what: &str) -> Result<HeaderValue, VtexError> {
    let mut header = HeaderValue::from_str(value.trim())
        .map_err(|e| VtexError::InvalidHeader(format!("{what}: {e}")))?;
    header.set_sensitive(true);
    Ok(header)
}

/// Error bodies that are JSON are re-serialized compactly; anything else is
/// passed through as text.
fn normalize_error_body(text: &str) -> String {
    serde_json::from_str::<Value>(text).map_or_else(|_| text.to_string(), |json| json.to_string())
}

fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
