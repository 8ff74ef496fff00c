//! Logistics (warehouse inventory) endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;
use vtex_console_core::{SkuId, WarehouseId};

use super::client::VtexClient;
use super::types::InventoryInput;
use super::VtexError;

/// Stock balance of a SKU in one warehouse.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryBalance {
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub unlimited_quantity: bool,
    #[serde(default)]
    pub date_utc_on_balance_system: Option<String>,
}

impl VtexClient {
    /// Get the stock balance of a SKU in a warehouse.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(warehouse = %warehouse))]
    pub async fn get_inventory(
        &self,
        sku: SkuId,
        warehouse: &WarehouseId,
    ) -> Result<InventoryBalance, VtexError> {
        self.get(&inventory_path(sku, warehouse)).await
    }

    /// Set the stock balance of a SKU in a warehouse.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(warehouse = %warehouse))]
    pub async fn update_inventory(
        &self,
        sku: SkuId,
        warehouse: &WarehouseId,
        input: InventoryInput,
    ) -> Result<Value, VtexError> {
        self.put(&inventory_path(sku, warehouse), &input).await
    }
}

fn inventory_path(sku: SkuId, warehouse: &WarehouseId) -> String {
    format!("/api/logistics/pvt/inventory/skus/{sku}/warehouses/{warehouse}")
}
