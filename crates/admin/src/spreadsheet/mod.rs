//! Spreadsheet codec.
//!
//! Writes `.xlsx` workbooks for exports and reports, and reads the stock
//! files uploaded for the diagnostic (`.xlsx`, `.xls`, `.ods` or `.csv`).

mod stock;
mod writer;

pub use stock::{StockTable, read_stock_file};
pub use writer::{Cell, Sheet, write_workbook};

use thiserror::Error;

/// Content type of generated workbooks.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, Error)]
pub enum SpreadsheetError {
    #[error("Failed to write workbook: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    #[error("Failed to read workbook: {0}")]
    Read(#[from] calamine::Error),

    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Workbook has no sheets")]
    NoSheets,
}
