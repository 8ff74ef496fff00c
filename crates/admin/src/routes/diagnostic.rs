//! Catalog diagnostic endpoints.
//!
//! Both endpoints accept `multipart/form-data` with an optional `stock`
//! file (`.xlsx`, `.xls`, `.ods` or `.csv`). A stock file that cannot be
//! read is logged and the run continues with simulated stock.

use axum::{
    Json,
    extract::{Multipart, State},
    response::Response,
};
use tracing::instrument;

use crate::error::AppError;
use crate::services::{
    self, DiagnosticResults,
    diagnostic::{analyze, load_catalog, report_file_name, report_workbook},
};
use crate::spreadsheet::{StockTable, read_stock_file};
use crate::state::AppState;

use super::xlsx_download;

const STOCK_FIELD: &str = "stock";

/// Read the optional stock upload.
async fn stock_upload(multipart: &mut Multipart) -> Result<Option<StockTable>, AppError> {
    let mut stock = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(STOCK_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("stock.xlsx").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        if bytes.is_empty() {
            continue;
        }
        stock = match read_stock_file(&file_name, bytes.to_vec()) {
            Ok(table) => Some(table),
            Err(e) => {
                tracing::warn!(file = %file_name, error = %e, "Unreadable stock file, using simulated stock");
                None
            }
        };
    }
    Ok(stock)
}

async fn run(state: &AppState, mut multipart: Multipart) -> Result<DiagnosticResults, AppError> {
    let stock = stock_upload(&mut multipart).await?;
    let client = state.client()?;

    let total_pages = services::catalog_page_count(&client).await?;
    let rows = load_catalog(&client, total_pages, state.page_delay()).await?;
    let results = analyze(&rows, stock.as_ref(), &mut rand::rng())?;

    tracing::info!(
        total = results.total_products,
        with_stock = results.products_with_stock,
        seo_issues = results.seo_issues.len(),
        "Diagnostic finished"
    );
    Ok(results)
}

/// Run the diagnostic and return the results as JSON.
///
/// POST /api/diagnostic
#[instrument(skip(state, multipart))]
pub async fn results(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<DiagnosticResults>, AppError> {
    Ok(Json(run(&state, multipart).await?))
}

/// Run the diagnostic and download the report workbook.
///
/// POST /api/diagnostic/report
#[instrument(skip(state, multipart))]
pub async fn report(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let results = run(&state, multipart).await?;
    let bytes = report_workbook(&results)?;
    Ok(xlsx_download(
        &report_file_name(&services::date_stamp()),
        bytes,
    ))
}
