//! Catalog, pricing, inventory and order actions.
//!
//! Every action wraps one VTEX call and reports the outcome in an
//! [`ActionResult`] envelope instead of an HTTP error, so callers can show
//! the message next to the form that triggered it:
//!
//! ```json
//! {"success": true, "data": {...}}
//! {"success": false, "error": "VTEX API Error: 400 - ..."}
//! ```

use std::fmt::Display;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use vtex_console_core::{
    BrandId, CategoryId, DepartmentId, FieldId, FieldValueId, OrderId, PageWindow, PricePlan,
    ProductId, SkuId, WarehouseId,
};

use crate::vtex::{
    CatalogProduct, InventoryInput, Order, OrderList, OrderListParams, PriceInput, ProductIdPage,
    ProductInput, Sku, SkuImageInput, SkuInput, SkuSpecificationInput, VtexClient, VtexError,
};

/// Warehouse stocked by the product creation flow.
pub const DEFAULT_WAREHOUSE: &str = "1_1";

/// Page size of the id-listing action.
pub const DEFAULT_ID_PAGE_SIZE: u64 = 50;

/// Brand assigned when the form leaves it empty or invalid.
const DEFAULT_BRAND: BrandId = BrandId::new(1);

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Vtex(#[from] VtexError),
}

/// Success/error envelope returned by every action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ActionResult<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ActionResult<T> {
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    #[must_use]
    pub fn failure(error: impl Display) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.to_string()),
        }
    }

    /// Wrap `result`, logging failures with `context`.
    pub fn from_result<E: Display>(context: &str, result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => {
                tracing::error!(error = %e, "{context}");
                Self::failure(e)
            }
        }
    }

    /// Convert into a plain `Result`.
    ///
    /// # Errors
    ///
    /// Returns the error message of a failed action.
    pub fn into_result(self) -> Result<T, String> {
        match (self.success, self.data, self.error) {
            (true, Some(data), _) => Ok(data),
            (_, _, Some(error)) => Err(error),
            _ => Err("Unknown error".to_string()),
        }
    }
}

// =============================================================================
// Forms
// =============================================================================

/// Product creation form. Numeric fields arrive as text.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    pub name: String,
    pub department_id: String,
    pub category_id: String,
    #[serde(default)]
    pub brand_id: Option<String>,
    pub ref_id: String,
    #[serde(default)]
    pub description: String,
}

impl ProductForm {
    /// Build the catalog request, applying the console defaults.
    ///
    /// # Errors
    ///
    /// Returns `ActionError::InvalidInput` if the department or category
    /// id is not a number.
    pub fn to_input(&self) -> Result<ProductInput, ActionError> {
        let brand_id = self
            .brand_id
            .as_deref()
            .and_then(|raw| raw.trim().parse::<BrandId>().ok())
            .filter(|id| id.as_i64() != 0)
            .unwrap_or(DEFAULT_BRAND);

        Ok(ProductInput {
            name: self.name.trim().to_string(),
            department_id: parse_field::<DepartmentId>("departmentId", &self.department_id)?,
            category_id: parse_field::<CategoryId>("categoryId", &self.category_id)?,
            brand_id,
            ref_id: self.ref_id.trim().to_string(),
            is_visible: true,
            description: self.description.clone(),
            is_active: true,
            show_without_stock: true,
        })
    }
}

/// SKU creation form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuForm {
    pub product_id: String,
    pub name: String,
    pub ref_id: String,
}

impl SkuForm {
    /// Build the SKU request with the default packaging.
    ///
    /// # Errors
    ///
    /// Returns `ActionError::InvalidInput` if the product id is not a
    /// number.
    pub fn to_input(&self) -> Result<SkuInput, ActionError> {
        Ok(SkuInput {
            product_id: parse_field::<ProductId>("productId", &self.product_id)?,
            is_active: true,
            name: self.name.trim().to_string(),
            ref_id: self.ref_id.trim().to_string(),
            packaged_height: 10.0,
            packaged_length: 10.0,
            packaged_width: 10.0,
            packaged_weight_kg: 0.5,
            cubic_weight: 0.5,
            is_kit: false,
            commercial_condition_id: 1,
            measurement_unit: "un".to_string(),
            unit_multiplier: 1.0,
            kit_itens_sell_apart: false,
        })
    }
}

/// Form of the one-page product creation flow: product, first SKU, price
/// and stock.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProductForm {
    #[serde(flatten)]
    pub product: ProductForm,
    pub price: String,
    pub quantity: String,
}

/// Outcome of the product creation flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedProduct {
    pub product: CatalogProduct,
    pub sku: Sku,
    pub price_updated: bool,
    pub inventory_updated: bool,
}

fn parse_field<T: std::str::FromStr>(field: &str, raw: &str) -> Result<T, ActionError> {
    raw.trim()
        .parse()
        .map_err(|_| ActionError::InvalidInput(format!("Invalid {field}: {raw:?}")))
}

// =============================================================================
// Actions
// =============================================================================

/// Create a product.
pub async fn create_product(client: &VtexClient, form: &ProductForm) -> ActionResult<CatalogProduct> {
    let result = async { Ok::<_, ActionError>(client.create_product(&form.to_input()?).await?) };
    ActionResult::from_result("Error creating product", result.await)
}

/// Create a SKU.
pub async fn create_sku(client: &VtexClient, form: &SkuForm) -> ActionResult<Sku> {
    let result = async { Ok::<_, ActionError>(client.create_sku(&form.to_input()?).await?) };
    ActionResult::from_result("Error creating SKU", result.await)
}

/// Attach an image to a SKU.
pub async fn add_sku_image(
    client: &VtexClient,
    sku: SkuId,
    image_url: &str,
    image_name: &str,
) -> ActionResult<Value> {
    let image = SkuImageInput {
        image_url: image_url.to_string(),
        image_name: image_name.to_string(),
    };
    ActionResult::from_result(
        "Error adding SKU image",
        client.add_sku_image(sku, &image).await,
    )
}

/// Set the stock of a SKU in a warehouse (never unlimited).
pub async fn update_inventory(
    client: &VtexClient,
    sku: SkuId,
    warehouse: &WarehouseId,
    quantity: i64,
) -> ActionResult<Value> {
    let input = InventoryInput {
        quantity,
        unlimited_quantity: false,
    };
    ActionResult::from_result(
        "Error updating inventory",
        client.update_inventory(sku, warehouse, input).await,
    )
}

/// Set the price of a SKU. The list price defaults to the base price.
pub async fn update_price(
    client: &VtexClient,
    sku: SkuId,
    base_price: Decimal,
    list_price: Option<Decimal>,
) -> ActionResult<Value> {
    let price = PriceInput::from(PricePlan::from_base(base_price, list_price));
    ActionResult::from_result(
        "Error updating price",
        client.update_price(sku, &price).await,
    )
}

/// List orders, newest first.
pub async fn list_orders(client: &VtexClient, page: u32, per_page: u32) -> ActionResult<OrderList> {
    let params = OrderListParams {
        page: page.max(1),
        per_page: per_page.max(1),
        ..OrderListParams::default()
    };
    ActionResult::from_result("Error listing orders", client.list_orders(&params).await)
}

/// Get one order.
pub async fn get_order(client: &VtexClient, id: &OrderId) -> ActionResult<Order> {
    ActionResult::from_result("Error getting order", client.get_order(id).await)
}

/// Attach a specification value to a SKU.
pub async fn add_sku_specification(
    client: &VtexClient,
    sku: SkuId,
    field: FieldId,
    value: FieldValueId,
) -> ActionResult<Value> {
    let spec = SkuSpecificationInput {
        field_id: field,
        field_value_id: value,
    };
    ActionResult::from_result(
        "Error adding SKU specification",
        client.add_sku_specification(sku, spec).await,
    )
}

/// Product and SKU ids of a page of `page_size` products.
pub async fn product_and_sku_ids(
    client: &VtexClient,
    page: u64,
    page_size: u64,
) -> ActionResult<ProductIdPage> {
    let result = async {
        let window = PageWindow::with_size(page, page_size.max(1)).ok_or_else(|| {
            ActionError::InvalidInput(format!("Page out of range: {page} x {page_size}"))
        })?;
        Ok::<_, ActionError>(client.product_and_sku_ids(window).await?)
    };
    ActionResult::from_result("Error getting product and SKU IDs", result.await)
}

/// Get a product from the private catalog.
pub async fn get_product(client: &VtexClient, id: ProductId) -> ActionResult<CatalogProduct> {
    ActionResult::from_result("Error getting product by ID", client.get_product(id).await)
}

/// Create a product with one SKU, then set its price and stock.
///
/// Product or SKU failures abort the flow. Price and stock failures are
/// logged and reported in the result flags.
pub async fn create_product_with_sku(
    client: &VtexClient,
    form: &NewProductForm,
) -> ActionResult<CreatedProduct> {
    let result = async {
        let price: Decimal = parse_field("price", &form.price)?;
        let quantity: i64 = parse_field("quantity", &form.quantity)?;

        let product = client.create_product(&form.product.to_input()?).await?;
        let product_id = product
            .id
            .ok_or_else(|| ActionError::InvalidInput("Failed to create product".to_string()))?;

        let sku_form = SkuForm {
            product_id: product_id.to_string(),
            name: form.product.name.clone(),
            ref_id: form.product.ref_id.clone(),
        };
        let sku = client.create_sku(&sku_form.to_input()?).await?;
        let sku_id = sku
            .id
            .ok_or_else(|| ActionError::InvalidInput("Failed to create SKU".to_string()))?;

        let price_updated = update_price(client, sku_id, price, None).await.success;
        let inventory_updated = update_inventory(
            client,
            sku_id,
            &WarehouseId::new(DEFAULT_WAREHOUSE),
            quantity,
        )
        .await
        .success;

        tracing::info!(
            product_id = %product_id,
            sku_id = %sku_id,
            price_updated,
            inventory_updated,
            "Created product"
        );

        Ok::<_, ActionError>(CreatedProduct {
            product,
            sku,
            price_updated,
            inventory_updated,
        })
    };
    ActionResult::from_result("Error creating product", result.await)
}
