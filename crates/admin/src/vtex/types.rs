//! Domain types for the VTEX APIs.
//!
//! Wire types mirror the VTEX JSON (PascalCase for the private catalog,
//! camelCase elsewhere). `ProductDetail` is the console's own flattened view
//! of a catalog search result and is what the proxy routes hand to the
//! browser.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use vtex_console_core::{
    BrandId, CategoryId, DepartmentId, FieldId, FieldValueId, OrderId, OrderStatus, PricePlan,
    ProductId, SkuId,
};

// =============================================================================
// Id Listing
// =============================================================================

/// Range block of the id-listing response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRange {
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub from: Option<u64>,
    #[serde(default)]
    pub to: Option<u64>,
}

/// Raw `GetProductAndSkuIds` response: `data` maps product id keys to SKU id
/// lists.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawIdListing {
    #[serde(default)]
    pub data: Map<String, Value>,
    #[serde(default)]
    pub range: Option<ListingRange>,
}

/// One page of product ids with their SKU ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductIdPage {
    /// Product ids on the page, ascending.
    pub product_ids: Vec<ProductId>,
    /// SKU ids per product.
    #[serde(default)]
    pub sku_ids: BTreeMap<ProductId, Vec<SkuId>>,
    /// Upstream range information (absent on some tenants).
    #[serde(default)]
    pub range: Option<ListingRange>,
}

impl ProductIdPage {
    /// Total products in the catalog, if VTEX reported it.
    #[must_use]
    pub fn total(&self) -> Option<u64> {
        self.range.and_then(|range| range.total)
    }
}

impl From<RawIdListing> for ProductIdPage {
    fn from(raw: RawIdListing) -> Self {
        let mut sku_ids = BTreeMap::new();
        for (key, skus) in raw.data {
            let Ok(product_id) = key.parse::<ProductId>() else {
                tracing::warn!(key = %key, "Skipping non-numeric product id key");
                continue;
            };
            let skus = skus
                .as_array()
                .map(|list| list.iter().filter_map(lenient_i64).map(SkuId::new).collect())
                .unwrap_or_default();
            sku_ids.insert(product_id, skus);
        }
        Self {
            product_ids: sku_ids.keys().copied().collect(),
            sku_ids,
            range: raw.range,
        }
    }
}

// =============================================================================
// Catalog Search (public catalog_system shape)
// =============================================================================

/// A product as returned by `catalog_system/pub/products/search/{id}`.
///
/// Specification values are stored as top-level keys named after each entry
/// of `allSpecifications`, so everything else is kept in `extra`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchProduct {
    #[serde(default, deserialize_with = "de_lenient_id")]
    pub product_id: Option<i64>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_id")]
    pub brand_id: Option<i64>,
    #[serde(default, deserialize_with = "de_lenient_id")]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub product_reference: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub items: Vec<SearchItem>,
    #[serde(default)]
    pub all_specifications: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A SKU entry inside a search result.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItem {
    #[serde(default, deserialize_with = "de_lenient_id")]
    pub item_id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub name_complete: Option<String>,
    #[serde(default)]
    pub ean: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default, rename = "referenceId")]
    pub reference_ids: Vec<ReferenceId>,
    #[serde(default)]
    pub images: Vec<SearchImage>,
    #[serde(default)]
    pub sellers: Vec<SearchSeller>,
    #[serde(default)]
    pub measurement_unit: Option<String>,
    #[serde(default)]
    pub unit_multiplier: Option<f64>,
}

/// Keyed reference id (`{"Key": "RefId", "Value": "ABC"}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceId {
    #[serde(rename = "Key", default)]
    pub key: String,
    #[serde(rename = "Value", default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchImage {
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_label: Option<String>,
    #[serde(default)]
    pub image_text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSeller {
    #[serde(default)]
    pub seller_id: Option<String>,
    #[serde(default)]
    pub seller_name: Option<String>,
    #[serde(default)]
    pub commertial_offer: CommercialOffer,
}

/// Seller offer (VTEX spells it `commertialOffer`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CommercialOffer {
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub list_price: Option<f64>,
    #[serde(default)]
    pub available_quantity: Option<i64>,
    #[serde(default)]
    pub is_available: Option<bool>,
}

// =============================================================================
// Product Detail (console view)
// =============================================================================

/// Image reference shown in the browser and written to exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub image_url: String,
    pub image_name: String,
}

/// Physical measurements of a SKU.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuMeasures {
    pub weight: f64,
    pub height: f64,
    pub width: f64,
    pub length: f64,
    pub cubic_weight: f64,
}

/// Offer of one seller for a SKU.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerOffer {
    pub seller_id: String,
    pub seller_name: String,
    pub price: Option<f64>,
    pub list_price: Option<f64>,
    pub available_quantity: i64,
}

/// A SKU of a loaded product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuDetail {
    pub sku: SkuId,
    pub name: String,
    pub name_complete: Option<String>,
    pub ref_id: String,
    pub ean: Option<String>,
    pub images: Vec<ProductImage>,
    pub is_active: bool,
    /// Packaged dimensions. The search API does not return them.
    #[serde(default)]
    pub measures: Option<SkuMeasures>,
    pub measurement_unit: Option<String>,
    pub unit_multiplier: Option<f64>,
    pub offers: Vec<SellerOffer>,
}

impl SkuDetail {
    /// Units available across all sellers.
    #[must_use]
    pub fn available_quantity(&self) -> i64 {
        self.offers.iter().map(|o| o.available_quantity).sum()
    }
}

/// A named product specification with its values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSpecification {
    pub name: String,
    pub value: Vec<String>,
}

/// Flattened product view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    /// Missing when VTEX returned a malformed record.
    pub product_id: Option<ProductId>,
    pub name: String,
    pub description: String,
    pub brand: Option<BrandId>,
    pub brand_name: String,
    pub category: Option<CategoryId>,
    pub category_name: String,
    pub department_name: String,
    pub ref_id: String,
    pub is_active: bool,
    pub images: Vec<ProductImage>,
    pub skus: Vec<SkuDetail>,
    pub specifications: Vec<ProductSpecification>,
}

impl ProductDetail {
    /// Find a SKU of this product.
    #[must_use]
    pub fn sku(&self, sku_id: SkuId) -> Option<&SkuDetail> {
        self.skus.iter().find(|sku| sku.sku == sku_id)
    }

    /// First active SKU, falling back to the first SKU.
    #[must_use]
    pub fn default_sku(&self) -> Option<&SkuDetail> {
        self.skus
            .iter()
            .find(|sku| sku.is_active)
            .or_else(|| self.skus.first())
    }
}

impl From<SearchProduct> for ProductDetail {
    fn from(product: SearchProduct) -> Self {
        let (department_name, category_name) = category_path(&product.categories);

        let specifications = product
            .all_specifications
            .iter()
            .map(|name| ProductSpecification {
                name: name.clone(),
                value: product
                    .extra
                    .get(name)
                    .map(string_values)
                    .unwrap_or_default(),
            })
            .collect();

        let skus: Vec<SkuDetail> = product.items.into_iter().filter_map(sku_from_item).collect();

        let mut images: Vec<ProductImage> = Vec::new();
        for image in skus.iter().flat_map(|sku| sku.images.iter()) {
            if !images.iter().any(|seen| seen.image_url == image.image_url) {
                images.push(image.clone());
            }
        }

        // The public search only lists active products.
        let is_active = product.is_active.unwrap_or(true);

        Self {
            product_id: product.product_id.map(ProductId::new),
            name: product.product_name.unwrap_or_default(),
            description: product.description.unwrap_or_default(),
            brand: product.brand_id.map(BrandId::new),
            brand_name: product.brand.unwrap_or_default(),
            category: product.category_id.map(CategoryId::new),
            category_name,
            department_name,
            ref_id: product.product_reference.unwrap_or_default(),
            is_active,
            images,
            skus,
            specifications,
        }
    }
}

fn sku_from_item(item: SearchItem) -> Option<SkuDetail> {
    let Some(sku_id) = item.item_id else {
        tracing::warn!("Skipping search item without itemId");
        return None;
    };

    let ref_id = item
        .reference_ids
        .iter()
        .find(|r| r.key.eq_ignore_ascii_case("RefId"))
        .or_else(|| item.reference_ids.first())
        .and_then(|r| r.value.clone())
        .unwrap_or_default();

    let offers: Vec<SellerOffer> = item
        .sellers
        .iter()
        .map(|seller| SellerOffer {
            seller_id: seller.seller_id.clone().unwrap_or_default(),
            seller_name: seller.seller_name.clone().unwrap_or_default(),
            price: seller.commertial_offer.price,
            list_price: seller.commertial_offer.list_price,
            available_quantity: seller.commertial_offer.available_quantity.unwrap_or(0),
        })
        .collect();

    let is_active = item.is_active.unwrap_or_else(|| {
        item.sellers
            .iter()
            .any(|s| s.commertial_offer.is_available.unwrap_or(false))
    });

    let images = item
        .images
        .into_iter()
        .filter_map(|image| {
            let url = image.image_url?;
            Some(ProductImage {
                image_name: image
                    .image_label
                    .or(image.image_text)
                    .unwrap_or_default(),
                image_url: url,
            })
        })
        .collect();

    Some(SkuDetail {
        sku: SkuId::new(sku_id),
        name: item.name.unwrap_or_default(),
        name_complete: item.name_complete,
        ref_id,
        ean: item.ean.filter(|ean| !ean.is_empty()),
        images,
        is_active,
        measures: None,
        measurement_unit: item.measurement_unit,
        unit_multiplier: item.unit_multiplier,
        offers,
    })
}

/// Split `/Department/Category/Sub/` into `(department, leaf category)`.
fn category_path(categories: &[String]) -> (String, String) {
    let Some(path) = categories.first() else {
        return (String::new(), String::new());
    };
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    (
        segments.first().map(|s| (*s).to_string()).unwrap_or_default(),
        segments.last().map(|s| (*s).to_string()).unwrap_or_default(),
    )
}

fn string_values(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(value_to_string).collect(),
        other => value_to_string(other).into_iter().collect(),
    }
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn lenient_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// VTEX returns some ids as numbers and others as numeric strings.
fn de_lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(lenient_i64))
}

// =============================================================================
// Private Catalog
// =============================================================================

/// Body for `POST /api/catalog/pvt/product`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductInput {
    pub name: String,
    pub department_id: DepartmentId,
    pub category_id: CategoryId,
    pub brand_id: BrandId,
    pub ref_id: String,
    pub is_visible: bool,
    pub description: String,
    pub is_active: bool,
    pub show_without_stock: bool,
}

/// Product record of the private catalog API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CatalogProduct {
    #[serde(default)]
    pub id: Option<ProductId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub department_id: Option<DepartmentId>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub brand_id: Option<BrandId>,
    #[serde(default)]
    pub link_id: Option<String>,
    #[serde(default)]
    pub ref_id: Option<String>,
    #[serde(default)]
    pub is_visible: Option<bool>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub show_without_stock: Option<bool>,
}

/// Body for `POST /api/catalog/pvt/stockkeepingunit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SkuInput {
    pub product_id: ProductId,
    pub is_active: bool,
    pub name: String,
    pub ref_id: String,
    pub packaged_height: f64,
    pub packaged_length: f64,
    pub packaged_width: f64,
    pub packaged_weight_kg: f64,
    pub cubic_weight: f64,
    pub is_kit: bool,
    pub commercial_condition_id: i64,
    pub measurement_unit: String,
    pub unit_multiplier: f64,
    pub kit_itens_sell_apart: bool,
}

/// SKU record of the private catalog API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Sku {
    #[serde(default)]
    pub id: Option<SkuId>,
    #[serde(default)]
    pub product_id: Option<ProductId>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ref_id: Option<String>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub cubic_weight: Option<f64>,
    #[serde(default)]
    pub measurement_unit: Option<String>,
    #[serde(default)]
    pub unit_multiplier: Option<f64>,
}

/// Body for `POST /api/catalog/pvt/stockkeepingunit/{id}/file`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SkuImageInput {
    pub image_url: String,
    pub image_name: String,
}

/// Body for `POST /api/catalog/pvt/stockkeepingunit/{id}/specification`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SkuSpecificationInput {
    pub field_id: FieldId,
    pub field_value_id: FieldValueId,
}

// =============================================================================
// Logistics & Pricing
// =============================================================================

/// Body for the warehouse inventory PUT.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryInput {
    pub quantity: i64,
    pub unlimited_quantity: bool,
}

/// Body for `PUT /api/pricing/prices/{skuId}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceInput {
    #[serde(with = "rust_decimal::serde::float")]
    pub base_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub list_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub cost_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub markup: Decimal,
}

impl From<PricePlan> for PriceInput {
    fn from(plan: PricePlan) -> Self {
        Self {
            base_price: plan.base_price,
            list_price: plan.list_price,
            cost_price: plan.cost_price,
            markup: plan.markup,
        }
    }
}

/// Price record returned by the pricing API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRecord {
    #[serde(default)]
    pub item_id: Option<String>,
    #[serde(default)]
    pub base_price: Option<f64>,
    #[serde(default)]
    pub list_price: Option<f64>,
    #[serde(default)]
    pub cost_price: Option<f64>,
    #[serde(default)]
    pub markup: Option<f64>,
    #[serde(default)]
    pub fixed_prices: Vec<Value>,
}

// =============================================================================
// Orders
// =============================================================================

/// Paging block of the order list.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paging {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub pages: u64,
    #[serde(default)]
    pub current_page: u64,
    #[serde(default)]
    pub per_page: u64,
}

/// Order row of `GET /api/oms/pvt/orders`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub order_id: OrderId,
    #[serde(default)]
    pub sequence: Option<String>,
    #[serde(default)]
    pub creation_date: Option<String>,
    #[serde(default)]
    pub client_name: Option<String>,
    /// Total in cents.
    #[serde(default)]
    pub total_value: i64,
    #[serde(default)]
    pub total_items: i64,
    pub status: OrderStatus,
    #[serde(default)]
    pub status_description: Option<String>,
}

/// `GET /api/oms/pvt/orders` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderList {
    #[serde(default)]
    pub list: Vec<OrderSummary>,
    #[serde(default)]
    pub paging: Paging,
}

/// Named order total (items, discounts, shipping, tax), in cents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderTotal {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: i64,
}

/// Line item of an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default)]
    pub unique_id: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ref_id: Option<String>,
    #[serde(default)]
    pub quantity: i64,
    /// Unit price in cents.
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub selling_price: Option<i64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub seller: Option<String>,
}

/// Customer block of an order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientProfile {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub document_type: Option<String>,
    #[serde(default)]
    pub document: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub is_corporate: Option<bool>,
}

impl ClientProfile {
    /// "First Last", trimmed.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default()
        )
        .trim()
        .to_string()
    }
}

/// Full order from `GET /api/oms/pvt/orders/{id}`.
///
/// Shipping and payment blocks are deeply nested and only displayed, so
/// they stay as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: OrderId,
    #[serde(default)]
    pub sequence: Option<String>,
    pub status: OrderStatus,
    #[serde(default)]
    pub status_description: Option<String>,
    /// Order value in cents.
    #[serde(default)]
    pub value: i64,
    #[serde(default)]
    pub creation_date: Option<String>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub sales_channel: Option<String>,
    #[serde(default)]
    pub totals: Vec<OrderTotal>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub client_profile_data: Option<ClientProfile>,
    #[serde(default)]
    pub shipping_data: Option<Value>,
    #[serde(default)]
    pub payment_data: Option<Value>,
}

/// Format an amount in cents as `1234.56`.
#[must_use]
pub fn format_cents(cents: i64) -> String {
    Decimal::new(cents, 2).to_string()
}
