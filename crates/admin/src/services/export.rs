//! Product exports.
//!
//! One row per product (SKUs are not expanded). Products whose detail fetch
//! fails, or that come back without a product id, are skipped and logged.

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tracing::instrument;
use vtex_console_core::{PageWindow, ProductId};

use crate::catalog::CatalogSource;
use crate::spreadsheet::{Sheet, SpreadsheetError, write_workbook};
use crate::vtex::{ProductDetail, VtexError};

/// Export header row.
pub const EXPORT_COLUMNS: [&str; 9] = [
    "Product ID",
    "Product Name",
    "Product Ref",
    "Description",
    "Brand",
    "Category",
    "Is Active",
    "Images",
    "Specifications",
];

/// Column widths in characters, matching [`EXPORT_COLUMNS`].
pub const EXPORT_COLUMN_WIDTHS: [f64; 9] = [12.0, 40.0, 15.0, 60.0, 20.0, 25.0, 12.0, 150.0, 150.0];

/// Pause after each catalog page.
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No se encontraron datos para exportar")]
    NoRows,

    #[error(transparent)]
    Source(#[from] VtexError),

    #[error(transparent)]
    Spreadsheet(#[from] SpreadsheetError),
}

/// Flattened export record of one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRow {
    pub product_id: ProductId,
    pub product_name: String,
    pub product_ref: String,
    pub description: String,
    pub brand: String,
    pub category: String,
    pub is_active: bool,
    pub images: String,
    pub specifications: String,
}

impl ExportRow {
    /// Flatten a product detail; `None` when it has no product id.
    #[must_use]
    pub fn from_detail(detail: &ProductDetail) -> Option<Self> {
        let product_id = detail.product_id?;

        let brand = if detail.brand_name.is_empty() {
            detail.brand.map(|id| id.to_string()).unwrap_or_default()
        } else {
            detail.brand_name.clone()
        };
        let category = if detail.category_name.is_empty() {
            detail.category.map(|id| id.to_string()).unwrap_or_default()
        } else {
            detail.category_name.clone()
        };

        let images = detail
            .images
            .iter()
            .map(|image| image.image_url.as_str())
            .collect::<Vec<_>>()
            .join(" | ");
        let specifications = detail
            .specifications
            .iter()
            .map(|spec| format!("{}: {}", spec.name, spec.value.join(", ")))
            .collect::<Vec<_>>()
            .join(" | ");

        Some(Self {
            product_id,
            product_name: detail.name.clone(),
            product_ref: detail.ref_id.clone(),
            description: detail.description.clone(),
            brand,
            category,
            is_active: detail.is_active,
            images,
            specifications,
        })
    }

    fn cells(&self) -> [String; 9] {
        [
            self.product_id.to_string(),
            self.product_name.clone(),
            self.product_ref.clone(),
            self.description.clone(),
            self.brand.clone(),
            self.category.clone(),
            if self.is_active { "Sí" } else { "No" }.to_string(),
            self.images.clone(),
            self.specifications.clone(),
        ]
    }
}

/// Products processed so far, out of the expected total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExportProgress {
    pub processed: usize,
    pub total: usize,
}

impl ExportProgress {
    /// Completion percentage, rounded.
    #[must_use]
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let percent = (self.processed.min(self.total) * 100 + self.total / 2) / self.total;
        u8::try_from(percent).unwrap_or(100)
    }
}

/// Which part of the catalog an export covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportScope {
    Page(u64),
    All,
}

impl ExportScope {
    #[must_use]
    pub const fn sheet_name(&self) -> &'static str {
        match self {
            Self::Page(_) => "Productos",
            Self::All => "Todos los Productos",
        }
    }

    #[must_use]
    pub fn file_name(&self, date: &str) -> String {
        match self {
            Self::Page(page) => format!("productos_pagina_{page}_{date}.xlsx"),
            Self::All => format!("todos_los_productos_{date}.xlsx"),
        }
    }
}

/// A finished export ready for download.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub file_name: String,
    pub rows: usize,
    pub bytes: Vec<u8>,
}

/// Export the given product ids.
///
/// # Errors
///
/// Returns `ExportError::NoRows` if no product could be exported.
#[instrument(skip(source, ids, progress), fields(count = ids.len()))]
pub async fn export_page<S, F>(
    source: &S,
    ids: &[ProductId],
    mut progress: F,
) -> Result<Vec<ExportRow>, ExportError>
where
    S: CatalogSource,
    F: FnMut(ExportProgress) + Send,
{
    let mut rows = Vec::with_capacity(ids.len());
    for (index, id) in ids.iter().enumerate() {
        if let Some(row) = fetch_row(source, *id).await {
            rows.push(row);
        }
        progress(ExportProgress {
            processed: index + 1,
            total: ids.len(),
        });
    }

    tracing::info!(exported = rows.len(), requested = ids.len(), "Page export finished");
    if rows.is_empty() {
        return Err(ExportError::NoRows);
    }
    Ok(rows)
}

/// Export every product of pages `1..=total_pages`, sequentially, pausing
/// `delay` after each page.
///
/// # Errors
///
/// Returns an error if an id listing fails, or `ExportError::NoRows` if no
/// product could be exported.
#[instrument(skip(source, progress))]
pub async fn export_all<S, F>(
    source: &S,
    total_pages: u64,
    delay: Duration,
    mut progress: F,
) -> Result<Vec<ExportRow>, ExportError>
where
    S: CatalogSource,
    F: FnMut(ExportProgress) + Send,
{
    let mut rows = Vec::new();
    let mut processed = 0usize;

    for page in 1..=total_pages {
        let Some(window) = PageWindow::for_page(page) else {
            break;
        };
        let listing = source.product_ids(window).await?;
        let expected = listing
            .total()
            .and_then(|total| usize::try_from(total).ok())
            .unwrap_or_default();
        tracing::info!(
            page,
            total_pages,
            ids = listing.product_ids.len(),
            "Exporting catalog page"
        );

        for id in &listing.product_ids {
            if let Some(row) = fetch_row(source, *id).await {
                rows.push(row);
            }
            processed += 1;
            progress(ExportProgress {
                processed,
                total: expected.max(processed),
            });
        }

        tokio::time::sleep(delay).await;
    }

    tracing::info!(exported = rows.len(), processed, "Full export finished");
    if rows.is_empty() {
        return Err(ExportError::NoRows);
    }
    Ok(rows)
}

async fn fetch_row<S: CatalogSource>(source: &S, id: ProductId) -> Option<ExportRow> {
    match source.product_detail(id).await {
        Ok(detail) => {
            let row = ExportRow::from_detail(&detail);
            if row.is_none() {
                tracing::warn!(product_id = %id, "Product detail without product id, skipping");
            }
            row
        }
        Err(e) => {
            tracing::warn!(product_id = %id, error = %e, "Failed to load product, skipping");
            None
        }
    }
}

/// Export sheet for `rows`.
#[must_use]
pub fn export_sheet(rows: &[ExportRow], scope: ExportScope) -> Sheet {
    let mut sheet = Sheet::new(scope.sheet_name()).with_column_widths(&EXPORT_COLUMN_WIDTHS);
    sheet.push_row(EXPORT_COLUMNS);
    for row in rows {
        sheet.push_row(row.cells());
    }
    sheet
}

/// Assemble the downloadable workbook.
///
/// # Errors
///
/// Returns `ExportError::NoRows` for an empty export, or an error if the
/// workbook cannot be written.
pub fn export_workbook(
    rows: &[ExportRow],
    scope: ExportScope,
    date: &str,
) -> Result<ExportFile, ExportError> {
    if rows.is_empty() {
        return Err(ExportError::NoRows);
    }
    let bytes = write_workbook(&[export_sheet(rows, scope)])?;
    Ok(ExportFile {
        file_name: scope.file_name(date),
        rows: rows.len(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spreadsheet::Cell;
    use crate::test_support::{FakeCatalog, product};
    use crate::vtex::{ProductImage, ProductSpecification};

    #[test]
    fn test_row_formatting() {
        let mut detail = product(7, "Mochila", &[(71, true)]);
        detail.is_active = false;
        detail.images = vec![
            ProductImage {
                image_url: "https://img/1.jpg".to_string(),
                image_name: String::new(),
            },
            ProductImage {
                image_url: "https://img/2.jpg".to_string(),
                image_name: String::new(),
            },
        ];
        detail.specifications = vec![
            ProductSpecification {
                name: "Color".to_string(),
                value: vec!["Azul".to_string(), "Rojo".to_string()],
            },
            ProductSpecification {
                name: "Talla".to_string(),
                value: vec!["M".to_string()],
            },
        ];

        let row = ExportRow::from_detail(&detail).expect("row");
        assert_eq!(row.images, "https://img/1.jpg | https://img/2.jpg");
        assert_eq!(row.specifications, "Color: Azul, Rojo | Talla: M");
        assert_eq!(row.cells()[6], "No");
        assert_eq!(row.cells()[0], "7");
    }

    #[test]
    fn test_brand_falls_back_to_id() {
        let mut detail = product(7, "Mochila", &[]);
        detail.brand_name = String::new();
        detail.brand = Some(2_000_001.into());
        let row = ExportRow::from_detail(&detail).expect("row");
        assert_eq!(row.brand, "2000001");
    }

    #[tokio::test]
    async fn test_export_page_skips_failures() {
        let catalog = FakeCatalog::generated(3).failing(2);
        let ids = [ProductId::new(1), ProductId::new(2), ProductId::new(3)];
        let mut seen = Vec::new();

        let rows = export_page(&catalog, &ids, |p| seen.push(p))
            .await
            .expect("rows");

        assert_eq!(
            rows.iter().map(|r| r.product_id).collect::<Vec<_>>(),
            vec![ProductId::new(1), ProductId::new(3)]
        );
        assert_eq!(seen.len(), 3);
        assert_eq!(seen.last().map(ExportProgress::percent), Some(100));
    }

    #[tokio::test]
    async fn test_export_without_product_ids_is_an_error() {
        let mut first = product(1, "A", &[]);
        first.product_id = None;
        let mut second = product(2, "B", &[]);
        second.product_id = None;
        let catalog = FakeCatalog::new(vec![first, second]);
        let ids = [ProductId::new(900_000), ProductId::new(900_001)];

        let err = export_page(&catalog, &ids, |_| {})
            .await
            .expect_err("no rows");
        assert!(matches!(err, ExportError::NoRows));
    }

    #[tokio::test]
    async fn test_export_all_walks_every_page() {
        let catalog = FakeCatalog::generated(260);
        let rows = export_all(&catalog, 2, Duration::ZERO, |_| {})
            .await
            .expect("rows");

        assert_eq!(rows.len(), 260);
        let windows = catalog.id_requests.lock().expect("lock").clone();
        assert_eq!(
            windows,
            vec![PageWindow::FIRST, PageWindow::for_page(2).expect("page 2")]
        );
    }

    #[tokio::test]
    async fn test_export_all_with_zero_pages() {
        let catalog = FakeCatalog::generated(3);
        let err = export_all(&catalog, 0, Duration::ZERO, |_| {})
            .await
            .expect_err("no pages");
        assert!(matches!(err, ExportError::NoRows));
    }

    #[test]
    fn test_sheet_layout_and_names() {
        let rows = vec![ExportRow::from_detail(&product(1, "Mochila", &[])).expect("row")];
        let sheet = export_sheet(&rows, ExportScope::All);

        assert_eq!(sheet.name, "Todos los Productos");
        assert_eq!(sheet.column_widths, EXPORT_COLUMN_WIDTHS.to_vec());
        assert_eq!(
            sheet.rows.first().and_then(|r| r.first()),
            Some(&Cell::from("Product ID"))
        );
        assert_eq!(sheet.data_row_count(), 1);

        assert_eq!(
            ExportScope::Page(3).file_name("2026-10-18"),
            "productos_pagina_3_2026-10-18.xlsx"
        );
        assert_eq!(
            ExportScope::All.file_name("2026-10-18"),
            "todos_los_productos_2026-10-18.xlsx"
        );
    }

    #[test]
    fn test_empty_workbook_is_refused() {
        assert!(matches!(
            export_workbook(&[], ExportScope::Page(1), "2026-10-18"),
            Err(ExportError::NoRows)
        ));
    }

    #[test]
    fn test_progress_percent() {
        let progress = ExportProgress {
            processed: 1,
            total: 3,
        };
        assert_eq!(progress.percent(), 33);
        assert_eq!(
            ExportProgress {
                processed: 0,
                total: 0
            }
            .percent(),
            0
        );
    }
}
