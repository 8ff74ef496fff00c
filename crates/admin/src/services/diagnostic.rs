//! Catalog diagnostic.
//!
//! Scans up to [`MAX_DIAGNOSTIC_PAGES`] pages of the catalog (one row per
//! SKU), joins an optional stock file and summarises the result.
//!
//! The VTEX APIs used here do not expose the sales channel or the gender
//! attribute of a SKU, so both are **simulated**: each SKU gets a random
//! store (1..=5) and a random gender. Channel counts and SEO issues are
//! therefore illustrative and are labelled as simulated in the report.

use std::collections::{BTreeMap, HashSet};
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;
use vtex_console_core::{PageWindow, ProductId, SkuId};

use crate::catalog::CatalogSource;
use crate::spreadsheet::{Cell, Sheet, SpreadsheetError, StockTable, write_workbook};
use crate::vtex::VtexError;

/// Upper bound on the pages scanned by one diagnostic run.
pub const MAX_DIAGNOSTIC_PAGES: u64 = 10;

/// Cap on reported SEO issues.
pub const MAX_SEO_ISSUES: usize = 50;

/// Share of SKUs counted as in stock when no stock file is given.
const SIMULATED_STOCK_RATIO: f64 = 0.7;

const NO_DEPARTMENT: &str = "Sin categoría";
const NO_BRAND: &str = "Sin marca";

#[derive(Debug, Error)]
pub enum DiagnosticError {
    #[error("Primero carga el catálogo")]
    NoCatalog,

    #[error(transparent)]
    Source(#[from] VtexError),

    #[error(transparent)]
    Spreadsheet(#[from] SpreadsheetError),
}

/// One SKU of the scanned catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticRow {
    pub product_id: Option<ProductId>,
    pub product_name: String,
    pub product_ref: String,
    pub product_is_active: bool,
    pub sku_id: SkuId,
    pub sku_name: String,
    pub sku_ref: String,
    pub sku_is_active: bool,
    pub department: String,
    pub brand: String,
}

/// Load the catalog for a diagnostic run, sequentially, pausing `delay`
/// after each page.
///
/// # Errors
///
/// Returns an error if an id listing fails. Failed product fetches are
/// skipped.
#[instrument(skip(source))]
pub async fn load_catalog<S: CatalogSource>(
    source: &S,
    total_pages: u64,
    delay: Duration,
) -> Result<Vec<DiagnosticRow>, DiagnosticError> {
    let pages = total_pages.min(MAX_DIAGNOSTIC_PAGES);
    let mut rows = Vec::new();

    for page in 1..=pages {
        let Some(window) = PageWindow::for_page(page) else {
            break;
        };
        let listing = source.product_ids(window).await?;
        for id in &listing.product_ids {
            let detail = match source.product_detail(*id).await {
                Ok(detail) => detail,
                Err(e) => {
                    tracing::warn!(product_id = %id, error = %e, "Failed to load product, skipping");
                    continue;
                }
            };

            let department = non_empty_or(&detail.department_name, NO_DEPARTMENT);
            let brand = non_empty_or(&detail.brand_name, NO_BRAND);
            rows.extend(detail.skus.iter().map(|sku| DiagnosticRow {
                product_id: detail.product_id,
                product_name: detail.name.clone(),
                product_ref: detail.ref_id.clone(),
                product_is_active: detail.is_active,
                sku_id: sku.sku,
                sku_name: sku.name.clone(),
                sku_ref: sku.ref_id.clone(),
                sku_is_active: sku.is_active,
                department: department.clone(),
                brand: brand.clone(),
            }));
        }
        tokio::time::sleep(delay).await;
    }

    tracing::info!(pages, skus = rows.len(), "Loaded catalog for diagnostic");
    Ok(rows)
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

// =============================================================================
// Enrichment
// =============================================================================

/// VTEX-style YES/NO flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Flag {
    Yes,
    No,
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        if value { Self::Yes } else { Self::No }
    }
}

/// Sales channel (trade policy) ids of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Store {
    TottoCom,
    Mercadolibre,
    B2b,
    Exito,
    Dafiti,
}

impl Store {
    /// Store for a trade-policy id (1..=5).
    #[must_use]
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Self::TottoCom),
            2 => Some(Self::Mercadolibre),
            3 => Some(Self::B2b),
            4 => Some(Self::Exito),
            5 => Some(Self::Dafiti),
            _ => None,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TottoCom => "Totto.com",
            Self::Mercadolibre => "Mercadolibre",
            Self::B2b => "B2B",
            Self::Exito => "Éxito",
            Self::Dafiti => "Dafiti",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Gender {
    Hombre,
    Mujer,
    #[serde(rename = "Niño")]
    Nino,
    #[serde(rename = "Niña")]
    Nina,
    Unisex,
}

impl Gender {
    const ALL: [Self; 5] = [Self::Hombre, Self::Mujer, Self::Nino, Self::Nina, Self::Unisex];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hombre => "Hombre",
            Self::Mujer => "Mujer",
            Self::Nino => "Niño",
            Self::Nina => "Niña",
            Self::Unisex => "Unisex",
        }
    }
}

/// A scanned SKU with the VTEX import fields derived from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedRow {
    #[serde(flatten)]
    pub row: DiagnosticRow,
    pub activate_sku_if_possible: Flag,
    pub sku_is_active_flag: Flag,
    pub product_is_active_flag: Flag,
    pub show_on_site: Flag,
    /// Simulated.
    pub store: Store,
    /// Simulated.
    pub gender: Gender,
    pub seo_name: String,
}

impl EnrichedRow {
    #[must_use]
    pub fn all_yes(&self) -> bool {
        [
            self.activate_sku_if_possible,
            self.sku_is_active_flag,
            self.product_is_active_flag,
            self.show_on_site,
        ]
        .iter()
        .all(|flag| *flag == Flag::Yes)
    }
}

/// Derive the import fields, drawing store and gender from `rng`.
pub fn enrich<R: Rng>(rows: &[DiagnosticRow], rng: &mut R) -> Vec<EnrichedRow> {
    rows.iter()
        .map(|row| {
            let store = Store::from_id(rng.random_range(1..=5)).unwrap_or(Store::TottoCom);
            let gender = Gender::ALL
                .get(rng.random_range(0..Gender::ALL.len()))
                .copied()
                .unwrap_or(Gender::Unisex);
            EnrichedRow {
                activate_sku_if_possible: row.sku_is_active.into(),
                sku_is_active_flag: row.sku_is_active.into(),
                product_is_active_flag: row.product_is_active.into(),
                show_on_site: (row.product_is_active && row.sku_is_active).into(),
                store,
                gender,
                seo_name: row.product_name.clone(),
                row: row.clone(),
            }
        })
        .collect()
}

// =============================================================================
// Results
// =============================================================================

/// SKU counts per sales channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDistribution {
    pub totto_com: u64,
    pub mercadolibre: u64,
    pub b2b: u64,
    pub exito: u64,
    pub dafiti: u64,
    /// Distinct SKU refs present in both Totto.com and B2B.
    pub totto_and_b2b: u64,
}

impl StoreDistribution {
    #[must_use]
    pub const fn count(&self, store: Store) -> u64 {
        match store {
            Store::TottoCom => self.totto_com,
            Store::Mercadolibre => self.mercadolibre,
            Store::B2b => self.b2b,
            Store::Exito => self.exito,
            Store::Dafiti => self.dafiti,
        }
    }
}

/// A gender / SEO-name mismatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoIssue {
    pub sku_ref: String,
    pub product_name: String,
    pub gender: String,
    pub seo_name: String,
    pub issue: String,
}

/// Where the stock counts come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockSource {
    File,
    Simulated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticResults {
    pub total_products: u64,
    pub active_products: u64,
    pub products_with_all_yes: u64,
    pub store_distribution: StoreDistribution,
    pub department_summary: BTreeMap<String, u64>,
    pub products_with_stock: u64,
    pub products_without_stock: u64,
    pub stock_source: StockSource,
    pub seo_issues: Vec<SeoIssue>,
    /// Store and gender fields were randomly generated.
    pub simulated: bool,
}

impl DiagnosticResults {
    /// SKUs with every flag YES minus SKUs without stock, floored at 0.
    #[must_use]
    pub const fn active_with_stock(&self) -> u64 {
        self.products_with_all_yes
            .saturating_sub(self.products_without_stock)
    }
}

/// Enrich and summarise a scanned catalog.
///
/// An empty stock table counts as no table.
///
/// # Errors
///
/// Returns `DiagnosticError::NoCatalog` if `rows` is empty.
pub fn analyze<R: Rng>(
    rows: &[DiagnosticRow],
    stock: Option<&StockTable>,
    rng: &mut R,
) -> Result<DiagnosticResults, DiagnosticError> {
    if rows.is_empty() {
        return Err(DiagnosticError::NoCatalog);
    }
    Ok(summarize(&enrich(rows, rng), stock))
}

/// Summarise enriched rows.
#[must_use]
pub fn summarize(rows: &[EnrichedRow], stock: Option<&StockTable>) -> DiagnosticResults {
    let total = rows.len() as u64;
    let all_yes = rows.iter().filter(|row| row.all_yes()).count() as u64;

    let mut distribution = StoreDistribution::default();
    let mut totto_refs = HashSet::new();
    let mut b2b_refs = HashSet::new();
    for row in rows {
        match row.store {
            Store::TottoCom => {
                distribution.totto_com += 1;
                totto_refs.insert(row.row.sku_ref.as_str());
            }
            Store::Mercadolibre => distribution.mercadolibre += 1,
            Store::B2b => {
                distribution.b2b += 1;
                b2b_refs.insert(row.row.sku_ref.as_str());
            }
            Store::Exito => distribution.exito += 1,
            Store::Dafiti => distribution.dafiti += 1,
        }
    }
    distribution.totto_and_b2b = totto_refs.intersection(&b2b_refs).count() as u64;

    let mut department_summary = BTreeMap::new();
    for row in rows {
        *department_summary
            .entry(row.row.department.clone())
            .or_insert(0u64) += 1;
    }

    let (with_stock, stock_source) = match stock.filter(|table| !table.is_empty()) {
        Some(table) => {
            let with_stock = rows
                .iter()
                .filter(|row| table.stock(&row.row.sku_ref) > 0.0)
                .count() as u64;
            (with_stock, StockSource::File)
        }
        None => (simulated_with_stock(total), StockSource::Simulated),
    };

    let seo_issues = rows
        .iter()
        .filter_map(|row| {
            seo_issue(row.gender, &row.seo_name).map(|issue| SeoIssue {
                sku_ref: row.row.sku_ref.clone(),
                product_name: row.row.product_name.clone(),
                gender: row.gender.label().to_string(),
                seo_name: row.seo_name.clone(),
                issue: issue.to_string(),
            })
        })
        .take(MAX_SEO_ISSUES)
        .collect();

    DiagnosticResults {
        total_products: total,
        active_products: all_yes,
        products_with_all_yes: all_yes,
        store_distribution: distribution,
        department_summary,
        products_with_stock: with_stock,
        products_without_stock: total - with_stock,
        stock_source,
        seo_issues,
        simulated: true,
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn simulated_with_stock(total: u64) -> u64 {
    (total as f64 * SIMULATED_STOCK_RATIO).floor() as u64
}

/// Mismatch between a gender and the SEO name, if any.
#[must_use]
pub fn seo_issue(gender: Gender, seo_name: &str) -> Option<&'static str> {
    let name = seo_name.to_lowercase();
    match gender {
        Gender::Nina if name.contains("niño") || name.contains("nino") => {
            Some("El género es \"Niña\" pero el nombre SEO menciona \"Niño\"")
        }
        Gender::Nino if name.contains("niña") => {
            Some("El género es \"Niño\" pero el nombre SEO menciona \"Niña\"")
        }
        Gender::Mujer if name.contains("hombre") => {
            Some("El género es \"Mujer\" pero el nombre SEO menciona \"Hombre\"")
        }
        Gender::Hombre if name.contains("mujer") => {
            Some("El género es \"Hombre\" pero el nombre SEO menciona \"Mujer\"")
        }
        _ => None,
    }
}

// =============================================================================
// Report
// =============================================================================

/// Report file name for `date` (`YYYY-MM-DD`).
#[must_use]
pub fn report_file_name(date: &str) -> String {
    format!("diagnostico_catalogo_{date}.xlsx")
}

/// Report sheets: `Resumen`, `Por Departamento` and, when there are
/// issues, `Problemas SEO`.
#[must_use]
pub fn report_sheets(results: &DiagnosticResults) -> Vec<Sheet> {
    let dist = &results.store_distribution;

    let mut summary = Sheet::new("Resumen").with_column_widths(&[45.0, 20.0]);
    summary.push_row(["Métrica", "Valor"]);
    summary.push_row([
        Cell::from("Total de productos cargados"),
        results.total_products.into(),
    ]);
    summary.push_row([
        Cell::from("Productos con todos los campos 'YES'"),
        results.products_with_all_yes.into(),
    ]);
    summary.push_row([
        Cell::from("Productos activos (con stock y todos YES)"),
        results.active_with_stock().into(),
    ]);
    summary.push_row([Cell::from("Productos con stock"), results.products_with_stock.into()]);
    summary.push_row([
        Cell::from("Productos sin stock"),
        results.products_without_stock.into(),
    ]);
    summary.push_row(["", ""]);
    summary.push_row(["Distribución por canal", ""]);
    for store in [
        Store::TottoCom,
        Store::Mercadolibre,
        Store::B2b,
        Store::Exito,
        Store::Dafiti,
    ] {
        summary.push_row([Cell::from(store.label()), dist.count(store).into()]);
    }
    summary.push_row([
        Cell::from("Totto.com y B2B (compartidos)"),
        dist.totto_and_b2b.into(),
    ]);
    summary.push_row(["", ""]);
    if results.simulated {
        summary.push_row(["Nota", "Canal y género simulados"]);
    }
    if results.stock_source == StockSource::Simulated {
        summary.push_row(["Stock", "Simulado (70% con stock)"]);
    }

    let mut departments = Sheet::new("Por Departamento").with_column_widths(&[40.0, 20.0]);
    departments.push_row(["Departamento", "Cantidad de SKUs"]);
    for (department, count) in &results.department_summary {
        departments.push_row([Cell::from(department.as_str()), (*count).into()]);
    }

    let mut sheets = vec![summary, departments];
    if !results.seo_issues.is_empty() {
        let mut seo = Sheet::new("Problemas SEO")
            .with_column_widths(&[20.0, 40.0, 12.0, 40.0, 60.0]);
        seo.push_row([
            "SKU Ref",
            "Nombre Producto",
            "Género",
            "Nombre SEO",
            "Problema",
        ]);
        for issue in &results.seo_issues {
            seo.push_row([
                issue.sku_ref.as_str(),
                issue.product_name.as_str(),
                issue.gender.as_str(),
                issue.seo_name.as_str(),
                issue.issue.as_str(),
            ]);
        }
        sheets.push(seo);
    }
    sheets
}

/// Serialize the report workbook.
///
/// # Errors
///
/// Returns an error if the workbook cannot be written.
pub fn report_workbook(results: &DiagnosticResults) -> Result<Vec<u8>, DiagnosticError> {
    Ok(write_workbook(&report_sheets(results))?)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::test_support::{FakeCatalog, product};

    fn row(sku_ref: &str, product_name: &str, product_active: bool, sku_active: bool) -> DiagnosticRow {
        DiagnosticRow {
            product_id: Some(ProductId::new(1)),
            product_name: product_name.to_string(),
            product_ref: "P-1".to_string(),
            product_is_active: product_active,
            sku_id: SkuId::new(1),
            sku_name: "SKU".to_string(),
            sku_ref: sku_ref.to_string(),
            sku_is_active: sku_active,
            department: "Mochilas".to_string(),
            brand: "Totto".to_string(),
        }
    }

    #[tokio::test]
    async fn test_load_catalog_one_row_per_sku() {
        let mut no_department = product(2, "Lonchera", &[(21, true)]);
        no_department.department_name = String::new();
        no_department.brand_name = String::new();
        let catalog = FakeCatalog::new(vec![
            product(1, "Mochila", &[(11, true), (12, false)]),
            no_department,
        ]);

        let rows = load_catalog(&catalog, 1, Duration::ZERO).await.expect("rows");

        assert_eq!(rows.len(), 3);
        let last = rows.last().expect("row");
        assert_eq!(last.department, "Sin categoría");
        assert_eq!(last.brand, "Sin marca");
    }

    #[tokio::test]
    async fn test_load_catalog_caps_pages() {
        let catalog = FakeCatalog::generated(3);
        load_catalog(&catalog, 25, Duration::ZERO).await.expect("rows");
        assert_eq!(
            catalog.id_requests.lock().expect("lock").len(),
            MAX_DIAGNOSTIC_PAGES as usize
        );
    }

    #[test]
    fn test_empty_catalog_is_an_error() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            analyze(&[], None, &mut rng),
            Err(DiagnosticError::NoCatalog)
        ));
    }

    #[test]
    fn test_flags_and_all_yes() {
        let mut rng = StdRng::seed_from_u64(7);
        let rows = [
            row("A", "Mochila", true, true),
            row("B", "Mochila", true, false),
            row("C", "Mochila", false, true),
        ];
        let enriched = enrich(&rows, &mut rng);

        assert_eq!(enriched[0].show_on_site, Flag::Yes);
        assert_eq!(enriched[1].activate_sku_if_possible, Flag::No);
        assert_eq!(enriched[2].product_is_active_flag, Flag::No);
        assert_eq!(enriched[2].show_on_site, Flag::No);
        assert_eq!(enriched.iter().filter(|r| r.all_yes()).count(), 1);
        assert!(enriched.iter().all(|r| r.seo_name == "Mochila"));
    }

    #[test]
    fn test_channel_counts_cover_every_row() {
        let mut rng = StdRng::seed_from_u64(42);
        let rows: Vec<_> = (0..200)
            .map(|i| row(&format!("REF-{}", i % 20), "Mochila", true, true))
            .collect();

        let results = analyze(&rows, None, &mut rng).expect("results");
        let dist = results.store_distribution;
        assert_eq!(
            dist.totto_com + dist.mercadolibre + dist.b2b + dist.exito + dist.dafiti,
            200
        );
        assert!(dist.totto_and_b2b <= 20);
        assert!(results.simulated);
    }

    #[test]
    fn test_stock_file_join() {
        let mut rng = StdRng::seed_from_u64(3);
        let rows = [row("ABC", "Mochila", true, true), row("XYZ", "Mochila", true, true)];
        let stock = StockTable::from_pairs([("ABC", 5.0)]);

        let results = analyze(&rows, Some(&stock), &mut rng).expect("results");
        assert_eq!(results.products_with_stock, 1);
        assert_eq!(results.products_without_stock, 1);
        assert_eq!(results.stock_source, StockSource::File);
        assert_eq!(results.active_with_stock(), 1);
    }

    #[test]
    fn test_stock_source_wire_names() {
        assert_eq!(
            serde_json::to_value(StockSource::File).expect("json"),
            serde_json::json!("FILE")
        );
        assert_eq!(
            serde_json::to_value(StockSource::Simulated).expect("json"),
            serde_json::json!("SIMULATED")
        );
    }

    #[test]
    fn test_simulated_stock_split() {
        let mut rng = StdRng::seed_from_u64(3);
        let rows: Vec<_> = (0..10).map(|i| row(&i.to_string(), "M", true, true)).collect();

        let results = analyze(&rows, Some(&StockTable::default()), &mut rng).expect("results");
        assert_eq!(results.products_with_stock, 7);
        assert_eq!(results.products_without_stock, 3);
        assert_eq!(results.stock_source, StockSource::Simulated);
    }

    #[test]
    fn test_department_histogram() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut other = row("B", "M", true, true);
        other.department = "Ropa".to_string();
        let rows = [row("A", "M", true, true), row("C", "M", true, true), other];

        let results = analyze(&rows, None, &mut rng).expect("results");
        assert_eq!(results.department_summary.get("Mochilas"), Some(&2));
        assert_eq!(results.department_summary.get("Ropa"), Some(&1));
    }

    #[test]
    fn test_seo_rules() {
        assert!(seo_issue(Gender::Nina, "Mochila Nino Azul").is_some());
        assert!(seo_issue(Gender::Nina, "Mochila NIÑO").is_some());
        assert!(seo_issue(Gender::Nino, "Mochila Niña").is_some());
        assert!(seo_issue(Gender::Mujer, "Camiseta Hombre").is_some());
        assert!(seo_issue(Gender::Hombre, "Camiseta Mujer").is_some());
        assert!(seo_issue(Gender::Unisex, "Camiseta Mujer Hombre").is_none());
        assert!(seo_issue(Gender::Hombre, "Camiseta Hombre").is_none());
    }

    #[test]
    fn test_seo_issues_follow_simulated_gender_and_cap() {
        let mut rng = StdRng::seed_from_u64(11);
        let rows: Vec<_> = (0..400)
            .map(|i| row(&format!("R{i}"), "Mochila Niño", true, true))
            .collect();

        let enriched = enrich(&rows, &mut rng);
        let expected = enriched.iter().filter(|r| r.gender == Gender::Nina).count();
        let results = summarize(&enriched, None);

        assert_eq!(results.seo_issues.len(), expected.min(MAX_SEO_ISSUES));
        assert!(results.seo_issues.iter().all(|i| i.gender == "Niña"));
    }

    #[test]
    fn test_report_sheets() {
        let mut rng = StdRng::seed_from_u64(5);
        let rows = [row("A", "Mochila", true, true)];
        let mut results = analyze(&rows, None, &mut rng).expect("results");
        results.seo_issues.clear();

        let sheets = report_sheets(&results);
        let names: Vec<_> = sheets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Resumen", "Por Departamento"]);

        results.seo_issues.push(SeoIssue {
            sku_ref: "A".to_string(),
            product_name: "Mochila".to_string(),
            gender: "Mujer".to_string(),
            seo_name: "Mochila Hombre".to_string(),
            issue: "x".to_string(),
        });
        assert_eq!(report_sheets(&results).len(), 3);
        assert!(report_workbook(&results).is_ok());
        assert_eq!(
            report_file_name("2026-10-18"),
            "diagnostico_catalogo_2026-10-18.xlsx"
        );
    }

    #[test]
    fn test_active_with_stock_never_negative() {
        let mut rng = StdRng::seed_from_u64(5);
        let rows = [row("A", "M", false, false), row("B", "M", false, false)];
        let results = analyze(&rows, None, &mut rng).expect("results");
        assert_eq!(results.products_with_all_yes, 0);
        assert_eq!(results.active_with_stock(), 0);
    }
}
