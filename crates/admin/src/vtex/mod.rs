//! VTEX REST API client.
//!
//! Provides access to the catalog, pricing, logistics (inventory) and order
//! management APIs of a single VTEX tenant.
//!
//! # API Reference
//!
//! - Base URL: `https://{account}.{environment}.com[.br]`
//! - Authentication: static `X-VTEX-API-AppKey` / `X-VTEX-API-AppToken`
//!   headers on every request
//! - No retry and no backoff: a failed call surfaces immediately with the
//!   upstream status and body

mod catalog;
pub mod client;
mod logistics;
mod orders;
mod pricing;
pub mod types;

pub use client::VtexClient;
pub use logistics::InventoryBalance;
pub use orders::{DEFAULT_ORDERS_PER_PAGE, OrderListParams};
pub use types::*;

use thiserror::Error;
use vtex_console_core::CredentialError;

/// Errors that can occur when interacting with the VTEX API.
#[derive(Debug, Error)]
pub enum VtexError {
    /// Credentials are incomplete; no request was sent.
    #[error(transparent)]
    MissingCredentials(#[from] CredentialError),

    /// A credential could not be encoded as an HTTP header.
    #[error("Invalid credential header: {0}")]
    InvalidHeader(String),

    /// HTTP request failed before a response was received.
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// VTEX answered with a non-2xx status.
    #[error("VTEX API Error: {status} - {body}")]
    Api { status: u16, body: String },

    /// Response body did not match the expected shape.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found (empty search result).
    #[error("Not found: {0}")]
    NotFound(String),
}

impl VtexError {
    /// Upstream HTTP status, when VTEX answered at all.
    #[must_use]
    pub const fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::NotFound(_) => Some(404),
            _ => None,
        }
    }
}
