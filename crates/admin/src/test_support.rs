//! Test doubles: a fake VTEX HTTP server and an in-memory catalog.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
};
use serde_json::{Value, json};
use vtex_console_core::{PageWindow, ProductId, SkuId, VtexCredentials, VtexEnvironment};

use crate::catalog::CatalogSource;
use crate::vtex::{
    ListingRange, ProductDetail, ProductIdPage, SkuDetail, VtexClient, VtexError,
};

/// Credentials accepted by [`FakeVtex`].
pub fn test_credentials() -> VtexCredentials {
    VtexCredentials::new("teststore", "test-key", "test-token", VtexEnvironment::MyVtex)
}

#[derive(Default)]
struct FakeState {
    prices: Mutex<HashMap<String, Value>>,
    inventory: Mutex<HashMap<String, Value>>,
}

/// Axum server bound to an ephemeral port that answers like VTEX.
pub struct FakeVtex {
    addr: SocketAddr,
}

impl FakeVtex {
    pub async fn start() -> Self {
        let state = Arc::new(FakeState::default());
        let app = Router::new()
            .route("/echo-headers", get(echo_headers))
            .route("/fail/{status}", get(fail))
            .route(
                "/api/catalog_system/pvt/products/GetProductAndSkuIds",
                get(id_listing),
            )
            .route(
                "/api/catalog_system/pub/products/search/{id}",
                get(search_product),
            )
            .route("/api/catalog/pvt/product", axum::routing::post(create_product))
            .route("/api/catalog/pvt/product/{id}", get(get_product))
            .route(
                "/api/catalog/pvt/stockkeepingunit",
                axum::routing::post(create_sku),
            )
            .route("/api/catalog/pvt/stockkeepingunit/{id}", get(get_sku))
            .route(
                "/api/catalog/pvt/stockkeepingunit/{id}/file",
                axum::routing::post(add_sku_image),
            )
            .route(
                "/api/catalog/pvt/stockkeepingunit/{id}/specification",
                axum::routing::post(add_sku_specification),
            )
            .route(
                "/api/logistics/pvt/inventory/skus/{sku}/warehouses/{warehouse}",
                get(get_inventory).put(put_inventory),
            )
            .route("/api/pricing/prices/{sku}", get(get_price).put(put_price))
            .route("/api/oms/pvt/orders", get(list_orders))
            .route("/api/oms/pvt/orders/{id}", get(get_order))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake vtex");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake vtex server");
        });

        Self { addr }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn client(&self) -> VtexClient {
        VtexClient::with_base_url(&test_credentials(), self.base_url()).expect("fake client")
    }
}

type Shared = State<Arc<FakeState>>;

async fn echo_headers(headers: HeaderMap) -> Json<Value> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    };
    Json(json!({
        "appKey": header("x-vtex-api-appkey"),
        "appToken": header("x-vtex-api-apptoken"),
        "accept": header("accept"),
    }))
}

async fn fail(Path(status): Path<u16>) -> impl IntoResponse {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({"message": "forced failure"})))
}

async fn id_listing() -> Json<Value> {
    Json(json!({
        "data": {"1": [11, 12], "2": [21], "3": [31]},
        "range": {"total": 3, "from": 0, "to": 250}
    }))
}

async fn search_product(Path(id): Path<i64>) -> Json<Value> {
    let product = match id {
        1 => json!({
            "productId": "1",
            "productName": "Mochila Niña Rosada",
            "brand": "Totto",
            "brandId": 2000001,
            "categoryId": "10",
            "categories": ["/Mochilas/Escolares/"],
            "productReference": "MOCH-ROSA",
            "description": "Mochila escolar",
            "allSpecifications": ["Color"],
            "Color": ["Rosado"],
            "items": [
                {
                    "itemId": "11",
                    "name": "Talla Única Agotada",
                    "referenceId": [{"Key": "RefId", "Value": "MOCH-ROSA-1"}],
                    "images": [{"imageUrl": "https://img.test/11.jpg", "imageLabel": "main"}],
                    "sellers": [{"sellerId": "1", "commertialOffer": {"AvailableQuantity": 0, "IsAvailable": false}}]
                },
                {
                    "itemId": "12",
                    "name": "Talla Única",
                    "referenceId": [{"Key": "RefId", "Value": "MOCH-ROSA-2"}],
                    "images": [{"imageUrl": "https://img.test/12.jpg", "imageLabel": "main"}],
                    "sellers": [{"sellerId": "1", "commertialOffer": {"Price": 99.9, "AvailableQuantity": 3, "IsAvailable": true}}]
                }
            ]
        }),
        2 => json!({
            "productId": 2,
            "productName": "Camiseta Hombre",
            "brand": "Totto",
            "categories": ["/Ropa/Camisetas/"],
            "productReference": "CAM-H",
            "items": [{
                "itemId": "21",
                "name": "M",
                "referenceId": [{"Key": "RefId", "Value": "CAM-H-M"}],
                "sellers": [{"sellerId": "1", "commertialOffer": {"AvailableQuantity": 5, "IsAvailable": true}}]
            }]
        }),
        3 => json!({
            "productId": 3,
            "productName": "Morral Mujer",
            "categories": [],
            "productReference": "MOR-M",
            "items": [{
                "itemId": "31",
                "name": "Negro",
                "referenceId": [{"Key": "RefId", "Value": "MOR-M-N"}],
                "sellers": [{"sellerId": "1", "commertialOffer": {"AvailableQuantity": 1, "IsAvailable": true}}]
            }]
        }),
        _ => return Json(json!([])),
    };
    Json(json!([product]))
}

async fn create_product(Json(mut body): Json<Value>) -> impl IntoResponse {
    if body["RefId"] == "DUPLICADO" {
        return (
            StatusCode::CONFLICT,
            Json(json!({"message": "RefId already exists"})),
        );
    }
    body["Id"] = json!(42);
    (StatusCode::OK, Json(body))
}

async fn get_product(Path(id): Path<i64>) -> Json<Value> {
    Json(json!({
        "Id": id,
        "Name": "Mochila Niña Rosada",
        "DepartmentId": 1,
        "CategoryId": 10,
        "BrandId": 2000001,
        "RefId": "MOCH-ROSA",
        "IsVisible": true,
        "IsActive": true
    }))
}

async fn create_sku(Json(mut body): Json<Value>) -> Json<Value> {
    body["Id"] = json!(100);
    Json(body)
}

async fn get_sku(Path(id): Path<i64>) -> Json<Value> {
    Json(json!({
        "Id": id,
        "ProductId": 1,
        "IsActive": true,
        "Name": "Talla Única",
        "RefId": "MOCH-ROSA-2",
        "Height": 10.0,
        "WeightKg": 0.5,
        "CubicWeight": 0.5
    }))
}

async fn add_sku_image(Path(id): Path<i64>, Json(mut body): Json<Value>) -> Json<Value> {
    body["SkuId"] = json!(id);
    body["Id"] = json!(500);
    Json(body)
}

async fn add_sku_specification(Path(id): Path<i64>, Json(mut body): Json<Value>) -> Json<Value> {
    body["SkuId"] = json!(id);
    body["Id"] = json!(600);
    Json(body)
}

async fn get_inventory(
    State(state): Shared,
    Path((sku, warehouse)): Path<(i64, String)>,
) -> impl IntoResponse {
    let key = format!("{sku}/{warehouse}");
    let inventory = state.inventory.lock().expect("inventory lock");
    match inventory.get(&key) {
        Some(balance) => (StatusCode::OK, Json(balance.clone())),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "inventory not found"})),
        ),
    }
}

async fn put_inventory(
    State(state): Shared,
    Path((sku, warehouse)): Path<(i64, String)>,
    Json(body): Json<Value>,
) -> StatusCode {
    let key = format!("{sku}/{warehouse}");
    state
        .inventory
        .lock()
        .expect("inventory lock")
        .insert(key, body);
    StatusCode::OK
}

async fn get_price(State(state): Shared, Path(sku): Path<String>) -> impl IntoResponse {
    let prices = state.prices.lock().expect("price lock");
    match prices.get(&sku) {
        Some(price) => {
            let mut price = price.clone();
            price["itemId"] = json!(sku);
            (StatusCode::OK, Json(price))
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "price not found"})),
        ),
    }
}

async fn put_price(
    State(state): Shared,
    Path(sku): Path<String>,
    Json(body): Json<Value>,
) -> StatusCode {
    state.prices.lock().expect("price lock").insert(sku, body);
    StatusCode::OK
}

async fn list_orders() -> Json<Value> {
    Json(json!({
        "list": [{
            "orderId": "1500000000001-01",
            "sequence": "500001",
            "creationDate": "2026-10-01T14:22:03.0000000+00:00",
            "clientName": "Ana Pérez",
            "totalValue": 15990,
            "totalItems": 1,
            "status": "handling",
            "statusDescription": "Preparando entrega"
        }],
        "paging": {"total": 1, "pages": 1, "currentPage": 1, "perPage": 15}
    }))
}

async fn get_order(Path(id): Path<String>) -> impl IntoResponse {
    if id != "1500000000001-01" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"error": {"code": "OMS003", "message": "Order not found"}})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "orderId": id,
            "sequence": "500001",
            "status": "handling",
            "statusDescription": "Preparando entrega",
            "value": 15990,
            "creationDate": "2026-10-01T14:22:03.0000000+00:00",
            "totals": [
                {"id": "Items", "name": "Total de los items", "value": 14990},
                {"id": "Shipping", "name": "Costo total del envío", "value": 1000}
            ],
            "items": [{
                "uniqueId": "A1",
                "id": "12",
                "productId": "1",
                "name": "Mochila Niña Rosada Talla Única",
                "refId": "MOCH-ROSA-2",
                "quantity": 1,
                "price": 14990,
                "sellingPrice": 14990
            }],
            "clientProfileData": {"firstName": "Ana", "lastName": "Pérez", "email": "ana@example.com"},
            "shippingData": {"address": {"city": "Bogotá"}},
            "paymentData": {"transactions": []}
        })),
    )
}

// =============================================================================
// In-memory catalog
// =============================================================================

/// In-memory [`CatalogSource`].
#[derive(Default)]
pub struct FakeCatalog {
    ids: Vec<ProductId>,
    details: HashMap<ProductId, ProductDetail>,
    failing: HashSet<ProductId>,
    report_total: bool,
    pub id_requests: Mutex<Vec<PageWindow>>,
}

impl FakeCatalog {
    pub fn new(products: Vec<ProductDetail>) -> Self {
        let mut ids = Vec::new();
        let mut details = HashMap::new();
        for (index, product) in products.into_iter().enumerate() {
            let id = product
                .product_id
                .unwrap_or_else(|| ProductId::new(900_000 + index as i64));
            ids.push(id);
            details.insert(id, product);
        }
        ids.sort();
        Self {
            ids,
            details,
            report_total: true,
            ..Self::default()
        }
    }

    /// Catalog with `count` generated products, ids 1..=count.
    pub fn generated(count: i64) -> Self {
        Self::new(
            (1..=count)
                .map(|id| product(id, &format!("Producto {id}"), &[(id * 10, true)]))
                .collect(),
        )
    }

    /// Make the detail fetch of `id` fail.
    pub fn failing(mut self, id: i64) -> Self {
        self.failing.insert(ProductId::new(id));
        self
    }

    /// Omit `range.total` from id listings.
    pub fn without_total(mut self) -> Self {
        self.report_total = false;
        self
    }
}

impl CatalogSource for FakeCatalog {
    async fn product_ids(&self, window: PageWindow) -> Result<ProductIdPage, VtexError> {
        self.id_requests.lock().expect("requests lock").push(window);
        let from = usize::try_from(window.from).unwrap_or(usize::MAX);
        let to = usize::try_from(window.to).unwrap_or(usize::MAX);
        let page: Vec<ProductId> = self
            .ids
            .iter()
            .skip(from)
            .take(to.saturating_sub(from))
            .copied()
            .collect();
        let sku_ids: BTreeMap<ProductId, Vec<SkuId>> = page
            .iter()
            .map(|id| {
                let skus = self
                    .details
                    .get(id)
                    .map(|d| d.skus.iter().map(|s| s.sku).collect())
                    .unwrap_or_default();
                (*id, skus)
            })
            .collect();
        Ok(ProductIdPage {
            product_ids: page,
            sku_ids,
            range: Some(ListingRange {
                total: self.report_total.then_some(self.ids.len() as u64),
                from: Some(window.from),
                to: Some(window.to),
            }),
        })
    }

    async fn product_detail(&self, id: ProductId) -> Result<ProductDetail, VtexError> {
        if self.failing.contains(&id) {
            return Err(VtexError::Api {
                status: 500,
                body: "boom".to_string(),
            });
        }
        self.details
            .get(&id)
            .cloned()
            .ok_or_else(|| VtexError::NotFound(format!("product {id}")))
    }
}

/// Build a product with SKUs given as `(sku_id, active)`.
pub fn product(id: i64, name: &str, skus: &[(i64, bool)]) -> ProductDetail {
    ProductDetail {
        product_id: Some(ProductId::new(id)),
        name: name.to_string(),
        description: format!("Descripción de {name}"),
        brand: None,
        brand_name: "Totto".to_string(),
        category: None,
        category_name: "Escolares".to_string(),
        department_name: "Mochilas".to_string(),
        ref_id: format!("REF-{id}"),
        is_active: true,
        images: Vec::new(),
        skus: skus.iter().map(|&(sku, active)| sku_detail(sku, active)).collect(),
        specifications: Vec::new(),
    }
}

/// Build a SKU with ref id `SKU-{id}`.
pub fn sku_detail(id: i64, is_active: bool) -> SkuDetail {
    SkuDetail {
        sku: SkuId::new(id),
        name: format!("SKU {id}"),
        name_complete: None,
        ref_id: format!("SKU-{id}"),
        ean: None,
        images: Vec::new(),
        is_active,
        measures: None,
        measurement_unit: None,
        unit_multiplier: None,
        offers: Vec::new(),
    }
}
