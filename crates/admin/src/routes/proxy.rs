//! VTEX proxy routes.
//!
//! Browser code calls these instead of VTEX directly. Credentials may ride
//! along as query parameters (`accountName`, `apiKey`, `apiToken`,
//! `environment`); when the key and token are absent the stored settings
//! are used.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use secrecy::ExposeSecret;
use serde::Deserialize;
use tracing::instrument;
use vtex_console_core::{PageWindow, ProductId, VtexCredentials, VtexEnvironment};

use crate::error::AppError;
use crate::settings::SettingsStore;
use crate::state::AppState;
use crate::vtex::{ProductDetail, ProductIdPage, VtexError};

/// Build the proxy router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/vtex/products/ids", get(product_ids))
        .route("/api/vtex/products/{id}", get(product_detail))
}

/// Credentials passed on the query string.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialParams {
    #[serde(default)]
    pub account_name: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default)]
    pub environment: Option<String>,
}

impl CredentialParams {
    /// Credentials from the query, falling back to the settings store for
    /// anything the query leaves out.
    ///
    /// # Errors
    ///
    /// Returns `AppError::MissingCredentials` if neither source provides a
    /// key and token.
    pub fn resolve(&self, store: &SettingsStore) -> Result<VtexCredentials, AppError> {
        let stored = store.load()?;
        let pick = |query: Option<&String>, fallback: Option<String>| {
            query
                .filter(|value| !value.trim().is_empty())
                .cloned()
                .or(fallback)
                .filter(|value| !value.trim().is_empty())
        };

        let api_key = pick(
            self.api_key.as_ref(),
            stored.as_ref().map(|c| c.app_key.expose_secret().to_string()),
        );
        let api_token = pick(
            self.api_token.as_ref(),
            stored
                .as_ref()
                .map(|c| c.app_token.expose_secret().to_string()),
        );
        let (Some(api_key), Some(api_token)) = (api_key, api_token) else {
            return Err(AppError::MissingCredentials);
        };

        let account_name = pick(
            self.account_name.as_ref(),
            stored.as_ref().map(|c| c.account_name.clone()),
        )
        .unwrap_or_default();
        let environment = self
            .environment
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .map(|value| value.parse::<VtexEnvironment>().unwrap_or_default())
            .or_else(|| stored.as_ref().map(|c| c.environment.clone()))
            .unwrap_or(VtexEnvironment::MyVtex);

        Ok(VtexCredentials::new(
            account_name,
            api_key,
            api_token,
            environment,
        ))
    }
}

/// Offset window of the id listing.
#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    #[serde(default)]
    pub from: Option<u64>,
    #[serde(default)]
    pub to: Option<u64>,
}

/// Product and SKU ids of a catalog window.
///
/// GET /api/vtex/products/ids?from=&to=
#[instrument(skip(state, credentials))]
async fn product_ids(
    State(state): State<AppState>,
    Query(range): Query<RangeQuery>,
    Query(credentials): Query<CredentialParams>,
) -> Result<Json<ProductIdPage>, AppError> {
    let from = range.from.unwrap_or(0);
    let window = match range.to {
        Some(to) if to > from => PageWindow { from, to },
        Some(to) => {
            return Err(AppError::BadRequest(format!(
                "Invalid range: from={from} to={to}"
            )));
        }
        None => PageWindow::starting_at(from)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid range: from={from}")))?,
    };

    let credentials = credentials.resolve(state.settings())?;
    let client = state.client_for(&credentials)?;
    let page = client.product_and_sku_ids(window).await?;
    Ok(Json(page))
}

/// Product detail by id.
///
/// GET /api/vtex/products/{id}
#[instrument(skip(state, credentials))]
async fn product_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(credentials): Query<CredentialParams>,
) -> Result<Json<ProductDetail>, AppError> {
    let id: ProductId = id
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid product id: {id}")))?;

    let credentials = credentials.resolve(state.settings())?;
    let client = state.client_for(&credentials)?;
    match client.product_detail(id).await {
        Ok(detail) => Ok(Json(detail)),
        Err(VtexError::NotFound(_)) => Err(AppError::NotFound("Product not found".to_string())),
        Err(e) => Err(e.into()),
    }
}
