use std::collections::HashMap;
use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};

use super::SpreadsheetError;

/// Columns holding the SKU reference, in lookup order.
const KEY_COLUMNS: [&str; 3] = ["SKU", "sku", "RefId"];

/// Columns holding the stock level, in lookup order.
const STOCK_COLUMNS: [&str; 2] = ["Stock", "stock"];

/// Stock levels keyed by SKU reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockTable {
    levels: HashMap<String, f64>,
    records: usize,
}

impl StockTable {
    /// Build a table from `(reference, stock)` pairs. Later pairs win.
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let mut table = Self::default();
        for (key, stock) in pairs {
            table.levels.insert(key.into(), stock);
            table.records += 1;
        }
        table
    }

    /// Stock of a SKU reference; unknown references have none.
    #[must_use]
    pub fn stock(&self, reference: &str) -> f64 {
        self.levels.get(reference).copied().unwrap_or(0.0)
    }

    /// Number of data rows read from the file.
    #[must_use]
    pub const fn records(&self) -> usize {
        self.records
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records == 0
    }

    fn push_record(&mut self, record: &HashMap<&str, String>) {
        self.records += 1;

        let Some(key) = KEY_COLUMNS
            .iter()
            .filter_map(|column| record.get(column))
            .find(|value| !value.is_empty())
        else {
            return;
        };

        let stock = STOCK_COLUMNS
            .iter()
            .filter_map(|column| record.get(column))
            .filter_map(|value| value.trim().parse::<f64>().ok())
            .find(|stock| *stock != 0.0)
            .unwrap_or(0.0);

        self.levels.insert(key.clone(), stock);
    }
}

/// Read the first sheet of an uploaded stock file.
///
/// The first row is the header. Files named `*.csv` are parsed as CSV,
/// anything else as a workbook.
///
/// # Errors
///
/// Returns an error if the file cannot be parsed.
pub fn read_stock_file(file_name: &str, bytes: Vec<u8>) -> Result<StockTable, SpreadsheetError> {
    let table = if file_name.to_ascii_lowercase().ends_with(".csv") {
        read_csv(&bytes)?
    } else {
        read_workbook(bytes)?
    };
    tracing::info!(file = file_name, records = table.records(), "Read stock file");
    Ok(table)
}

fn read_csv(bytes: &[u8]) -> Result<StockTable, SpreadsheetError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    let mut table = StockTable::default();
    for row in reader.records() {
        let row = row?;
        let record: HashMap<&str, String> = headers
            .iter()
            .zip(row.iter())
            .map(|(header, value)| (header, value.to_string()))
            .collect();
        table.push_record(&record);
    }
    Ok(table)
}

fn read_workbook(bytes: Vec<u8>) -> Result<StockTable, SpreadsheetError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SpreadsheetError::NoSheets)??;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(StockTable::default());
    };
    let headers: Vec<String> = header_row.iter().map(cell_text).collect();

    let mut table = StockTable::default();
    for row in rows {
        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }
        let record: HashMap<&str, String> = headers
            .iter()
            .map(String::as_str)
            .zip(row.iter().map(cell_text))
            .collect();
        table.push_record(&record);
    }
    Ok(table)
}

/// Cell as text; whole floats lose their fraction so numeric references
/// such as `12345` match.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        #[allow(clippy::cast_possible_truncation)]
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => (*f as i64).to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spreadsheet::{Cell, Sheet, write_workbook};

    #[test]
    fn test_csv_with_sku_and_stock_columns() {
        let csv = "SKU,Stock\nABC,5\nDEF,0\n";
        let table = read_stock_file("stock.csv", csv.as_bytes().to_vec()).expect("csv");
        assert_eq!(table.records(), 2);
        assert!((table.stock("ABC") - 5.0).abs() < f64::EPSILON);
        assert!(table.stock("DEF").abs() < f64::EPSILON);
        assert!(table.stock("missing").abs() < f64::EPSILON);
    }

    #[test]
    fn test_csv_alternate_column_names() {
        let csv = "RefId,stock\nXYZ, 7 \n";
        let table = read_stock_file("STOCK.CSV", csv.as_bytes().to_vec()).expect("csv");
        assert!((table.stock("XYZ") - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_xlsx_stock_file() {
        let mut sheet = Sheet::new("Hoja1");
        sheet.push_row(["sku", "Stock"]);
        sheet.push_row([Cell::from("ABC"), Cell::Number(3.0)]);
        sheet.push_row([Cell::Number(12345.0), Cell::from("2")]);
        let bytes = write_workbook(&[sheet]).expect("write");

        let table = read_stock_file("stock.xlsx", bytes).expect("read");
        assert_eq!(table.records(), 2);
        assert!((table.stock("ABC") - 3.0).abs() < f64::EPSILON);
        assert!((table.stock("12345") - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rows_without_key_are_counted_but_ignored() {
        let csv = "Name,Stock\nMochila,4\n";
        let table = read_stock_file("stock.csv", csv.as_bytes().to_vec()).expect("csv");
        assert_eq!(table.records(), 1);
        assert!(table.stock("Mochila").abs() < f64::EPSILON);
    }

    #[test]
    fn test_garbage_workbook_is_an_error() {
        assert!(read_stock_file("stock.xlsx", b"not a workbook".to_vec()).is_err());
    }
}
