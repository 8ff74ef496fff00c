//! Catalog commands: browsing, export, diagnostic and lookups.

use std::path::Path;
use std::time::Duration;

use serde_json::json;
use vtex_console_admin::catalog::CatalogBrowser;
use vtex_console_admin::services::{
    self, ExportProgress, ExportScope,
    diagnostic::{analyze, load_catalog, report_file_name, report_workbook},
    export::{export_all, export_page, export_workbook},
};
use vtex_console_admin::settings::SettingsStore;
use vtex_console_admin::spreadsheet::read_stock_file;
use vtex_console_core::{PageWindow, ProductId, SkuId};

use super::{CliError, client, parse, print_json};

fn log_progress(progress: ExportProgress) {
    tracing::info!(
        processed = progress.processed,
        total = progress.total,
        "{}%",
        progress.percent()
    );
}

fn write_file(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<(), CliError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    std::fs::write(&path, bytes)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "Wrote workbook");
    Ok(())
}

/// Load a catalog page the way the browser does and print it.
///
/// # Errors
///
/// Returns an error if the id listing fails.
pub async fn page(store: &SettingsStore, page: u64) -> Result<(), CliError> {
    let client = client(store)?;
    let mut browser = CatalogBrowser::new();
    browser
        .load_page(&client, page)
        .await
        .map_err(|e| CliError::Action(e.to_string()))?;

    if let Some(notification) = browser.notification() {
        tracing::info!("{}", notification.message);
    }

    print_json(&json!({
        "page": browser.current_page(),
        "totalPages": browser.total_pages(),
        "totalProducts": browser.total_products(),
        "productIds": browser.product_ids(),
        "product": browser.product().map(|product| json!({
            "productId": product.product_id,
            "name": product.name,
            "refId": product.ref_id,
            "skus": product.skus.len(),
        })),
        "selectedSku": browser.selected_sku().map(|sku| json!({
            "sku": sku.sku,
            "name": sku.name,
            "refId": sku.ref_id,
            "available": sku.available_quantity(),
        })),
    }))
}

/// Export one page, or the whole catalog, to `output`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be read, nothing was exported, or
/// the workbook cannot be written.
pub async fn export(
    store: &SettingsStore,
    page: Option<u64>,
    output: &Path,
    delay_ms: u64,
) -> Result<(), CliError> {
    let client = client(store)?;

    let (rows, scope) = match page {
        Some(page) => {
            let page = page.max(1);
            let window = PageWindow::for_page(page).ok_or_else(|| CliError::InvalidArgument {
                field: "page",
                value: page.to_string(),
            })?;
            let listing = client.product_and_sku_ids(window).await?;
            tracing::info!(page, products = listing.product_ids.len(), "Exporting page");
            let rows = export_page(&client, &listing.product_ids, log_progress).await?;
            (rows, ExportScope::Page(page))
        }
        None => {
            let total_pages = services::catalog_page_count(&client).await?;
            tracing::info!(total_pages, "Exporting catalog");
            let rows = export_all(
                &client,
                total_pages,
                Duration::from_millis(delay_ms),
                log_progress,
            )
            .await?;
            (rows, ExportScope::All)
        }
    };

    let file = export_workbook(&rows, scope, &services::date_stamp())?;
    write_file(output, &file.file_name, &file.bytes)
}

/// Run the diagnostic, joining `stock` when given, and write the report.
///
/// # Errors
///
/// Returns an error if the stock file is unreadable, the catalog is empty,
/// or the report cannot be written.
pub async fn diagnose(
    store: &SettingsStore,
    stock: Option<&Path>,
    output: &Path,
    delay_ms: u64,
) -> Result<(), CliError> {
    let stock = match stock {
        Some(path) => {
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            let table = read_stock_file(&file_name, std::fs::read(path)?)?;
            tracing::info!(path = %path.display(), records = table.records(), "Loaded stock file");
            Some(table)
        }
        None => None,
    };

    let client = client(store)?;
    let total_pages = services::catalog_page_count(&client).await?;
    let rows = load_catalog(&client, total_pages, Duration::from_millis(delay_ms)).await?;
    let results = analyze(&rows, stock.as_ref(), &mut rand::rng())?;

    tracing::info!(
        total = results.total_products,
        active = results.active_products,
        with_stock = results.products_with_stock,
        without_stock = results.products_without_stock,
        seo_issues = results.seo_issues.len(),
        "Diagnostic finished"
    );

    let bytes = report_workbook(&results)?;
    write_file(output, &report_file_name(&services::date_stamp()), &bytes)
}

/// Print a product detail.
///
/// # Errors
///
/// Returns an error if the id is invalid or the product is not found.
pub async fn product(store: &SettingsStore, id: &str) -> Result<(), CliError> {
    let id: ProductId = parse("productId", id)?;
    let detail = client(store)?.product_detail(id).await?;
    print_json(&detail)
}

/// Print a SKU.
///
/// # Errors
///
/// Returns an error if the id is invalid or the SKU is not found.
pub async fn sku(store: &SettingsStore, id: &str) -> Result<(), CliError> {
    let id: SkuId = parse("skuId", id)?;
    let sku = client(store)?.get_sku(id).await?;
    print_json(&sku)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_export_requires_credentials() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SettingsStore::open(dir.path().join("settings.json"));

        let err = export(&store, Some(1), dir.path(), 0)
            .await
            .expect_err("no credentials");
        assert!(matches!(err, CliError::Settings(_)));
    }

    #[tokio::test]
    async fn test_export_rejects_page_beyond_offsets() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SettingsStore::open(dir.path().join("settings.json"));
        store
            .save(&vtex_console_core::VtexCredentials::new(
                "mitienda",
                "vtexappkey-mitienda-ABC",
                "TOKEN",
                vtex_console_core::VtexEnvironment::MyVtex,
            ))
            .expect("save");

        let err = export(&store, Some(u64::MAX), dir.path(), 0)
            .await
            .expect_err("out of range");
        assert!(matches!(err, CliError::InvalidArgument { field: "page", .. }));
    }

    #[test]
    fn test_write_file_creates_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("reports");

        write_file(&out, "a.xlsx", b"PK").expect("write");
        assert_eq!(std::fs::read(out.join("a.xlsx")).expect("read"), b"PK");
    }
}
