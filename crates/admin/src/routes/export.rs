//! Catalog export download.

use axum::{
    extract::{Query, State},
    response::Response,
};
use serde::Deserialize;
use tracing::instrument;
use vtex_console_core::PageWindow;

use crate::error::AppError;
use crate::services::{
    self, ExportProgress, ExportScope,
    export::{export_all, export_page, export_workbook},
};
use crate::state::AppState;

use super::xlsx_download;

/// Export query. Without `page` the whole catalog is exported.
#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub page: Option<u64>,
}

fn log_progress(progress: ExportProgress) {
    tracing::debug!(
        processed = progress.processed,
        total = progress.total,
        percent = progress.percent(),
        "Export progress"
    );
}

/// Export one catalog page or every page to `.xlsx`.
///
/// GET /api/export/products?page=N
#[instrument(skip(state))]
pub async fn products(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, AppError> {
    let client = state.client()?;

    let (rows, scope) = match query.page {
        Some(page) => {
            let page = page.max(1);
            let window = PageWindow::for_page(page)
                .ok_or_else(|| AppError::BadRequest(format!("Page out of range: {page}")))?;
            let listing = client.product_and_sku_ids(window).await?;
            let rows = export_page(&client, &listing.product_ids, log_progress).await?;
            (rows, ExportScope::Page(page))
        }
        None => {
            let total_pages = services::catalog_page_count(&client).await?;
            let rows = export_all(&client, total_pages, state.page_delay(), log_progress).await?;
            (rows, ExportScope::All)
        }
    };

    let file = export_workbook(&rows, scope, &services::date_stamp())?;
    tracing::info!(file = %file.file_name, rows = file.rows, "Export ready");
    Ok(xlsx_download(&file.file_name, file.bytes))
}
