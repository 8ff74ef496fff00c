//! Pricing endpoints.

use serde_json::Value;
use tracing::instrument;
use vtex_console_core::SkuId;

use super::client::VtexClient;
use super::types::{PriceInput, PriceRecord};
use super::VtexError;

impl VtexClient {
    /// Get the price record of a SKU.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_price(&self, sku: SkuId) -> Result<PriceRecord, VtexError> {
        self.get(&format!("/api/pricing/prices/{sku}")).await
    }

    /// Replace the price record of a SKU.
    ///
    /// The pricing API answers with an empty body on success.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, price), fields(base_price = %price.base_price))]
    pub async fn update_price(&self, sku: SkuId, price: &PriceInput) -> Result<Value, VtexError> {
        self.put(&format!("/api/pricing/prices/{sku}"), price).await
    }
}
