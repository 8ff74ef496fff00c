//! Action endpoints.
//!
//! Every endpoint answers `200` with the [`ActionResult`] envelope; failures
//! (including missing credentials) are reported in `error`.

use axum::{
    Form, Json, Router,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;
use vtex_console_core::{FieldId, FieldValueId, OrderId, ProductId, SkuId, WarehouseId};

use crate::actions::{
    self, ActionResult, DEFAULT_ID_PAGE_SIZE, DEFAULT_WAREHOUSE, ProductForm, SkuForm,
};
use crate::state::AppState;
use crate::vtex::{
    CatalogProduct, DEFAULT_ORDERS_PER_PAGE, Order, OrderList, ProductIdPage, Sku, VtexClient,
};

/// Build the actions router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/actions/products", post(create_product))
        .route("/api/actions/products/{id}", get(get_product))
        .route("/api/actions/product-ids", get(product_ids))
        .route("/api/actions/skus", post(create_sku))
        .route("/api/actions/skus/{id}/images", post(add_sku_image))
        .route(
            "/api/actions/skus/{id}/specifications",
            post(add_sku_specification),
        )
        .route("/api/actions/skus/{id}/inventory", post(update_inventory))
        .route("/api/actions/skus/{id}/price", post(update_price))
        .route("/api/actions/orders", get(list_orders))
        .route("/api/actions/orders/{id}", get(get_order))
}

type Envelope<T> = Json<ActionResult<T>>;

/// Failure detected before the action ran, reported in the envelope.
#[derive(Debug)]
pub struct Rejected(String);

impl IntoResponse for Rejected {
    fn into_response(self) -> Response {
        Json(ActionResult::<()>::failure(self.0)).into_response()
    }
}

/// Client for the stored credentials.
fn client(state: &AppState) -> Result<VtexClient, Rejected> {
    state.client().map_err(|e| {
        tracing::error!(error = %e, "VTEX client unavailable");
        Rejected(e.to_string())
    })
}

fn parse<T: std::str::FromStr>(field: &str, raw: &str) -> Result<T, Rejected> {
    raw.trim()
        .parse()
        .map_err(|_| Rejected(format!("Invalid {field}: {raw:?}")))
}

/// Image form.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageForm {
    pub image_url: String,
    #[serde(default)]
    pub image_name: String,
}

/// Specification form.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecificationForm {
    pub field_id: String,
    pub field_value_id: String,
}

/// Inventory form. The warehouse defaults to `1_1`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryForm {
    #[serde(default)]
    pub warehouse_id: Option<String>,
    pub quantity: String,
}

/// Price form. The list price defaults to the base price.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceForm {
    pub base_price: String,
    #[serde(default)]
    pub list_price: Option<String>,
}

/// Paging of the order list.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersQuery {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
}

/// Paging of the id listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductIdsQuery {
    #[serde(default)]
    pub page: Option<u64>,
    #[serde(default)]
    pub page_size: Option<u64>,
}

/// POST /api/actions/products
#[instrument(skip(state, form))]
async fn create_product(
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Result<Envelope<CatalogProduct>, Rejected> {
    let client = client(&state)?;
    Ok(Json(actions::create_product(&client, &form).await))
}

/// GET /api/actions/products/{id}
#[instrument(skip(state))]
async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Envelope<CatalogProduct>, Rejected> {
    let id: ProductId = parse("productId", &id)?;
    let client = client(&state)?;
    Ok(Json(actions::get_product(&client, id).await))
}

/// GET /api/actions/product-ids
#[instrument(skip(state))]
async fn product_ids(
    State(state): State<AppState>,
    Query(query): Query<ProductIdsQuery>,
) -> Result<Envelope<ProductIdPage>, Rejected> {
    let client = client(&state)?;
    Ok(Json(
        actions::product_and_sku_ids(
            &client,
            query.page.unwrap_or(1),
            query.page_size.unwrap_or(DEFAULT_ID_PAGE_SIZE),
        )
        .await,
    ))
}

/// POST /api/actions/skus
#[instrument(skip(state, form))]
async fn create_sku(
    State(state): State<AppState>,
    Form(form): Form<SkuForm>,
) -> Result<Envelope<Sku>, Rejected> {
    let client = client(&state)?;
    Ok(Json(actions::create_sku(&client, &form).await))
}

/// POST /api/actions/skus/{id}/images
#[instrument(skip(state, form))]
async fn add_sku_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ImageForm>,
) -> Result<Envelope<Value>, Rejected> {
    let sku: SkuId = parse("skuId", &id)?;
    let client = client(&state)?;
    Ok(Json(
        actions::add_sku_image(&client, sku, &form.image_url, &form.image_name).await,
    ))
}

/// POST /api/actions/skus/{id}/specifications
#[instrument(skip(state, form))]
async fn add_sku_specification(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<SpecificationForm>,
) -> Result<Envelope<Value>, Rejected> {
    let sku: SkuId = parse("skuId", &id)?;
    let field: FieldId = parse("fieldId", &form.field_id)?;
    let value: FieldValueId = parse("fieldValueId", &form.field_value_id)?;
    let client = client(&state)?;
    Ok(Json(
        actions::add_sku_specification(&client, sku, field, value).await,
    ))
}

/// POST /api/actions/skus/{id}/inventory
#[instrument(skip(state, form))]
async fn update_inventory(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<InventoryForm>,
) -> Result<Envelope<Value>, Rejected> {
    let sku: SkuId = parse("skuId", &id)?;
    let quantity: i64 = parse("quantity", &form.quantity)?;
    let warehouse = form
        .warehouse_id
        .as_deref()
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .unwrap_or(DEFAULT_WAREHOUSE);
    let client = client(&state)?;
    Ok(Json(
        actions::update_inventory(&client, sku, &WarehouseId::new(warehouse), quantity).await,
    ))
}

/// POST /api/actions/skus/{id}/price
#[instrument(skip(state, form))]
async fn update_price(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<PriceForm>,
) -> Result<Envelope<Value>, Rejected> {
    let sku: SkuId = parse("skuId", &id)?;
    let base: Decimal = parse("basePrice", &form.base_price)?;
    let list = match form.list_price.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => Some(parse::<Decimal>("listPrice", raw)?),
        _ => None,
    };
    let client = client(&state)?;
    Ok(Json(actions::update_price(&client, sku, base, list).await))
}

/// GET /api/actions/orders
#[instrument(skip(state))]
async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<OrdersQuery>,
) -> Result<Envelope<OrderList>, Rejected> {
    let client = client(&state)?;
    Ok(Json(
        actions::list_orders(
            &client,
            query.page.unwrap_or(1),
            query.per_page.unwrap_or(DEFAULT_ORDERS_PER_PAGE),
        )
        .await,
    ))
}

/// GET /api/actions/orders/{id}
#[instrument(skip(state))]
async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Envelope<Order>, Rejected> {
    let client = client(&state)?;
    Ok(Json(actions::get_order(&client, &OrderId::new(id.trim())).await))
}
