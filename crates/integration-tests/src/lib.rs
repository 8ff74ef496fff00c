//! Integration tests for the VTEX console.
//!
//! The tests talk to a running console over HTTP and are `#[ignore]`d by
//! default.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the console with credentials for a test tenant
//! VTEX_ACCOUNT_NAME=... VTEX_API_KEY=... VTEX_API_TOKEN=... \
//!     cargo run -p vtex-console-admin
//!
//! # Run integration tests
//! cargo test -p vtex-console-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `ADMIN_BASE_URL` - Console URL (default `http://localhost:3001`)
//! - `TEST_PRODUCT_ID` / `TEST_SKU_ID` - Existing catalog entries to read

use reqwest::Client;
use vtex_console_core::{ProductId, SkuId};

/// Base URL of the console under test.
#[must_use]
pub fn admin_base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// HTTP client for the console. Redirects are not followed so tests can
/// assert on them.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// Product id to read, from `TEST_PRODUCT_ID`.
#[must_use]
pub fn test_product_id() -> Option<ProductId> {
    std::env::var("TEST_PRODUCT_ID").ok()?.parse().ok()
}

/// SKU id to read, from `TEST_SKU_ID`.
#[must_use]
pub fn test_sku_id() -> Option<SkuId> {
    std::env::var("TEST_SKU_ID").ok()?.parse().ok()
}

/// Assert that `bytes` is an `.xlsx` workbook and return its sheet names.
///
/// # Panics
///
/// Panics if the bytes are not a readable workbook.
#[must_use]
pub fn workbook_sheets(bytes: Vec<u8>) -> Vec<String> {
    use calamine::Reader;

    let workbook = calamine::Xlsx::new(std::io::Cursor::new(bytes)).expect("valid xlsx");
    workbook.sheet_names()
}
