//! HTTP route handlers for the console.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Health check (registered in main)
//!
//! # Pages
//! GET  /                                - Dashboard
//! GET  /products                        - Catalog browser (?page=&product=&sku=&image=)
//! GET  /products/new                    - New product form
//! POST /products/new                    - Create product, SKU, price and stock
//! GET  /orders                          - Order list (?page=)
//! GET  /orders/search                   - Order lookup (?orderId=)
//! GET  /settings                        - Credential settings
//! POST /settings                        - Save credentials
//! POST /settings/clear                  - Clear credentials
//!
//! # VTEX proxy (JSON)
//! GET  /api/vtex/products/ids           - Product and SKU ids (?from=&to=)
//! GET  /api/vtex/products/{id}          - Product detail
//!
//! # Downloads and reports
//! GET  /api/export/products             - Catalog export (?page=N, or every page)
//! POST /api/diagnostic                  - Diagnostic results (multipart, optional `stock`)
//! POST /api/diagnostic/report           - Diagnostic report workbook
//!
//! # Actions (JSON envelope)
//! POST /api/actions/products                    - Create product
//! GET  /api/actions/products/{id}               - Get product
//! GET  /api/actions/product-ids                 - Product and SKU ids (?page=&pageSize=)
//! POST /api/actions/skus                        - Create SKU
//! POST /api/actions/skus/{id}/images            - Add SKU image
//! POST /api/actions/skus/{id}/specifications    - Add SKU specification
//! POST /api/actions/skus/{id}/inventory         - Update inventory
//! POST /api/actions/skus/{id}/price             - Update price
//! GET  /api/actions/orders                      - List orders (?page=&perPage=)
//! GET  /api/actions/orders/{id}                 - Get order
//! ```

pub mod actions;
pub mod dashboard;
pub mod diagnostic;
pub mod export;
pub mod orders;
pub mod products;
pub mod proxy;
pub mod settings;

use axum::{
    Router,
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
};

use crate::spreadsheet::XLSX_CONTENT_TYPE;
use crate::state::AppState;

/// Build the console router.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Pages
        .route("/", get(dashboard::index))
        .route("/products", get(products::index))
        .route("/products/new", get(products::new_form).post(products::create))
        .route("/orders", get(orders::index))
        .route("/orders/search", get(orders::search))
        .route("/settings", get(settings::index).post(settings::update))
        .route("/settings/clear", post(settings::clear))
        // JSON and downloads
        .merge(proxy::router())
        .merge(actions::router())
        .route("/api/export/products", get(export::products))
        .route("/api/diagnostic", post(diagnostic::results))
        .route("/api/diagnostic/report", post(diagnostic::report))
}

/// Workbook download response.
pub(crate) fn xlsx_download(file_name: &str, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}

/// Render an askama template, logging render failures.
pub(crate) fn render<T: askama::Template>(template: &T) -> axum::response::Html<String> {
    axum::response::Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
}
