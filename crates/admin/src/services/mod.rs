//! Long-running catalog jobs.
//!
//! # Services
//!
//! - `export` - Product exports to `.xlsx` (current page or whole catalog)
//! - `diagnostic` - Catalog scan, stock join and diagnostic report

pub mod diagnostic;
pub mod export;

pub use diagnostic::{DiagnosticError, DiagnosticResults};
pub use export::{ExportError, ExportFile, ExportProgress, ExportRow, ExportScope};

use vtex_console_core::{PageWindow, page_count};

use crate::catalog::CatalogSource;
use crate::vtex::VtexError;

/// Number of catalog pages, from the total reported on the first page.
///
/// # Errors
///
/// Returns an error if the id listing fails.
pub async fn catalog_page_count<S: CatalogSource>(source: &S) -> Result<u64, VtexError> {
    let first = source.product_ids(PageWindow::FIRST).await?;
    Ok(page_count(first.total()))
}

/// File-name date stamp (`YYYY-MM-DD`, UTC).
#[must_use]
pub fn date_stamp() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}
