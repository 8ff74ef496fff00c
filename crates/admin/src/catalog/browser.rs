use serde::Serialize;
use thiserror::Error;
use tracing::instrument;
use vtex_console_core::{PageWindow, ProductId, SkuId, page_count};

use super::CatalogSource;
use crate::vtex::{ProductDetail, ProductImage, SkuDetail, VtexError};

/// Errors raised while browsing.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error(transparent)]
    Source(#[from] VtexError),

    /// The detail came back without a product id.
    #[error("Estructura de datos inválida")]
    InvalidProduct,

    #[error("No hay un producto cargado")]
    NoProductLoaded,

    #[error("El SKU {0} no pertenece al producto cargado")]
    UnknownSku(SkuId),

    #[error("La página {0} está fuera de rango")]
    PageOutOfRange(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// Status message shown after a browser operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

/// Browsing state of one user session.
///
/// Holds the current id page, the loaded product and at most one selected
/// SKU, which always belongs to the loaded product.
#[derive(Debug, Default)]
pub struct CatalogBrowser {
    current_page: u64,
    total_products: Option<u64>,
    total_pages: u64,
    product_ids: Vec<ProductId>,
    selected_product_id: Option<ProductId>,
    product: Option<ProductDetail>,
    selected_sku: Option<SkuId>,
    image_index: usize,
    notification: Option<Notification>,
}

impl CatalogBrowser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a page of product ids and open its first product.
    ///
    /// # Errors
    ///
    /// Returns `BrowserError::PageOutOfRange` when the page offset overflows,
    /// or the source error when the id listing fails. A failing detail
    /// fetch of the first product only sets the notification.
    #[instrument(skip(self, source))]
    pub async fn load_page<S: CatalogSource>(
        &mut self,
        source: &S,
        page: u64,
    ) -> Result<(), BrowserError> {
        let page = page.max(1);
        self.product = None;
        self.selected_product_id = None;
        self.selected_sku = None;

        let Some(window) = PageWindow::for_page(page) else {
            let error = BrowserError::PageOutOfRange(page);
            tracing::warn!(page, "Rejected catalog page");
            self.notification = Some(Notification::error(error.to_string()));
            return Err(error);
        };

        let ids = match source.product_ids(window).await {
            Ok(ids) => ids,
            Err(e) => {
                tracing::error!(error = %e, page, "Failed to load product page");
                self.notification = Some(Notification::error(e.to_string()));
                return Err(e.into());
            }
        };

        self.current_page = page;
        self.product_ids = ids.product_ids.clone();
        if let Some(total) = ids.total() {
            self.total_products = Some(total);
            self.total_pages = page_count(Some(total));
        }

        self.notification = Some(Notification::success(format!(
            "Página {page} cargada: {} productos",
            self.product_ids.len()
        )));

        if let Some(first) = self.product_ids.first().copied() {
            // The notification already reports the failure.
            let _ = self.select_product(source, first).await;
        }
        Ok(())
    }

    /// Load a product and select its first active SKU.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails or the detail has no product id.
    #[instrument(skip(self, source))]
    pub async fn select_product<S: CatalogSource>(
        &mut self,
        source: &S,
        id: ProductId,
    ) -> Result<(), BrowserError> {
        self.selected_product_id = Some(id);
        self.product = None;
        self.selected_sku = None;

        let detail = match source.product_detail(id).await {
            Ok(detail) if detail.product_id.is_some() => detail,
            Ok(_) => {
                tracing::error!(product_id = %id, "Product detail without product id");
                self.notification = Some(Notification::error(
                    BrowserError::InvalidProduct.to_string(),
                ));
                return Err(BrowserError::InvalidProduct);
            }
            Err(e) => {
                tracing::error!(error = %e, product_id = %id, "Failed to load product");
                self.notification = Some(Notification::error(e.to_string()));
                return Err(e.into());
            }
        };

        self.selected_sku = detail.default_sku().map(|sku| sku.sku);
        self.image_index = 0;
        self.notification = Some(Notification::success(format!("{} cargado", detail.name)));
        self.product = Some(detail);
        Ok(())
    }

    /// Select a SKU of the loaded product, replacing the previous selection.
    ///
    /// # Errors
    ///
    /// Returns an error if no product is loaded or the SKU belongs to
    /// another product.
    pub fn select_sku(&mut self, sku: SkuId) -> Result<(), BrowserError> {
        let product = self.product.as_ref().ok_or(BrowserError::NoProductLoaded)?;
        if product.sku(sku).is_none() {
            return Err(BrowserError::UnknownSku(sku));
        }
        self.selected_sku = Some(sku);
        self.image_index = 0;
        Ok(())
    }

    /// Go to the next page if there is one.
    ///
    /// # Errors
    ///
    /// Same as [`CatalogBrowser::load_page`].
    pub async fn next_page<S: CatalogSource>(&mut self, source: &S) -> Result<(), BrowserError> {
        if self.has_next() {
            self.load_page(source, self.current_page + 1).await?;
        }
        Ok(())
    }

    /// Go to the previous page if there is one.
    ///
    /// # Errors
    ///
    /// Same as [`CatalogBrowser::load_page`].
    pub async fn previous_page<S: CatalogSource>(
        &mut self,
        source: &S,
    ) -> Result<(), BrowserError> {
        if self.has_previous() {
            self.load_page(source, self.current_page - 1).await?;
        }
        Ok(())
    }

    /// Jump to the last page. Does nothing while the total is unknown.
    ///
    /// # Errors
    ///
    /// Same as [`CatalogBrowser::load_page`].
    pub async fn last_page<S: CatalogSource>(&mut self, source: &S) -> Result<(), BrowserError> {
        if self.total_pages > 0 {
            self.load_page(source, self.total_pages).await?;
        }
        Ok(())
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    #[must_use]
    pub const fn can_jump_to_last(&self) -> bool {
        self.total_pages > 0 && self.current_page != self.total_pages
    }

    #[must_use]
    pub const fn current_page(&self) -> u64 {
        self.current_page
    }

    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.total_pages
    }

    #[must_use]
    pub const fn total_products(&self) -> Option<u64> {
        self.total_products
    }

    #[must_use]
    pub fn product_ids(&self) -> &[ProductId] {
        &self.product_ids
    }

    #[must_use]
    pub const fn selected_product_id(&self) -> Option<ProductId> {
        self.selected_product_id
    }

    #[must_use]
    pub const fn product(&self) -> Option<&ProductDetail> {
        self.product.as_ref()
    }

    #[must_use]
    pub fn selected_sku(&self) -> Option<&SkuDetail> {
        let sku = self.selected_sku?;
        self.product.as_ref()?.sku(sku)
    }

    #[must_use]
    pub const fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    /// Images of the selected SKU, or of the product when the SKU has none.
    #[must_use]
    pub fn images(&self) -> &[ProductImage] {
        match self.selected_sku() {
            Some(sku) if !sku.images.is_empty() => &sku.images,
            _ => self
                .product
                .as_ref()
                .map_or(&[][..], |product| product.images.as_slice()),
        }
    }

    #[must_use]
    pub fn current_image(&self) -> Option<&ProductImage> {
        self.images().get(self.image_index)
    }

    #[must_use]
    pub const fn image_index(&self) -> usize {
        self.image_index
    }

    /// Advance the image carousel, wrapping around.
    pub fn next_image(&mut self) {
        let count = self.images().len();
        if count > 0 {
            self.image_index = (self.image_index + 1) % count;
        }
    }

    /// Step the image carousel back, wrapping around.
    pub fn previous_image(&mut self) {
        let count = self.images().len();
        if count > 0 {
            self.image_index = (self.image_index + count - 1) % count;
        }
    }

    /// Point the carousel at `index`, clamped to the image count.
    pub fn set_image_index(&mut self, index: usize) {
        let count = self.images().len();
        self.image_index = if count == 0 { 0 } else { index.min(count - 1) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeCatalog, product};

    #[tokio::test]
    async fn test_load_page_opens_first_product() {
        let catalog = FakeCatalog::new(vec![
            product(5, "Morral", &[(51, false), (52, true)]),
            product(9, "Lonchera", &[(91, true)]),
        ]);
        let mut browser = CatalogBrowser::new();

        browser.load_page(&catalog, 1).await.expect("page");

        assert_eq!(browser.current_page(), 1);
        assert_eq!(browser.product_ids(), &[ProductId::new(5), ProductId::new(9)]);
        assert_eq!(browser.selected_product_id(), Some(ProductId::new(5)));
        assert_eq!(browser.selected_sku().map(|s| s.sku), Some(SkuId::new(52)));
        assert_eq!(
            browser.notification().map(|n| n.message.as_str()),
            Some("Morral cargado")
        );
    }

    #[tokio::test]
    async fn test_page_count_from_total() {
        let catalog = FakeCatalog::generated(260);
        let mut browser = CatalogBrowser::new();

        browser.load_page(&catalog, 1).await.expect("page");
        assert_eq!(browser.total_pages(), 2);
        assert_eq!(browser.product_ids().len(), 250);
        assert!(browser.has_next());
        assert!(!browser.has_previous());
        assert!(browser.can_jump_to_last());

        browser.last_page(&catalog).await.expect("last");
        assert_eq!(browser.current_page(), 2);
        assert_eq!(browser.product_ids().len(), 10);
        assert!(!browser.has_next());
        assert!(!browser.can_jump_to_last());
    }

    #[tokio::test]
    async fn test_unknown_total_disables_last_page() {
        let catalog = FakeCatalog::generated(3).without_total();
        let mut browser = CatalogBrowser::new();

        browser.load_page(&catalog, 1).await.expect("page");
        assert_eq!(browser.total_pages(), 0);
        assert!(!browser.can_jump_to_last());
        assert!(!browser.has_next());

        browser.last_page(&catalog).await.expect("noop");
        assert_eq!(catalog.id_requests.lock().expect("lock").len(), 1);
    }

    #[tokio::test]
    async fn test_select_sku_only_from_loaded_product() {
        let catalog = FakeCatalog::new(vec![
            product(1, "Mochila", &[(11, true), (12, true)]),
            product(2, "Cartuchera", &[(21, true)]),
        ]);
        let mut browser = CatalogBrowser::new();
        browser.load_page(&catalog, 1).await.expect("page");

        browser.select_sku(SkuId::new(12)).expect("own sku");
        assert_eq!(browser.selected_sku().map(|s| s.sku), Some(SkuId::new(12)));

        let err = browser.select_sku(SkuId::new(21)).expect_err("foreign sku");
        assert!(matches!(err, BrowserError::UnknownSku(id) if id == SkuId::new(21)));
        assert_eq!(browser.selected_sku().map(|s| s.sku), Some(SkuId::new(12)));
    }

    #[tokio::test]
    async fn test_select_product_without_active_sku_falls_back_to_first() {
        let catalog = FakeCatalog::new(vec![product(3, "Agotado", &[(31, false), (32, false)])]);
        let mut browser = CatalogBrowser::new();

        browser
            .select_product(&catalog, ProductId::new(3))
            .await
            .expect("select");
        assert_eq!(browser.selected_sku().map(|s| s.sku), Some(SkuId::new(31)));
    }

    #[tokio::test]
    async fn test_failed_product_sets_error_notification() {
        let catalog = FakeCatalog::generated(2).failing(1);
        let mut browser = CatalogBrowser::new();

        browser.load_page(&catalog, 1).await.expect("page still loads");
        assert!(browser.product().is_none());
        assert_eq!(
            browser.notification().map(|n| n.kind),
            Some(NotificationKind::Error)
        );
    }

    #[tokio::test]
    async fn test_product_without_id_is_rejected() {
        let mut broken = product(4, "Roto", &[]);
        broken.product_id = None;
        let catalog = FakeCatalog::new(vec![broken]);
        let mut browser = CatalogBrowser::new();

        let id = catalog_first_id(&catalog).await;
        let err = browser
            .select_product(&catalog, id)
            .await
            .expect_err("no product id");
        assert!(matches!(err, BrowserError::InvalidProduct));
        assert_eq!(
            browser.notification().map(|n| n.message.as_str()),
            Some("Estructura de datos inválida")
        );
    }

    #[tokio::test]
    async fn test_page_beyond_offset_range_is_rejected() {
        let catalog = FakeCatalog::new(vec![product(5, "Morral", &[(51, true)])]);
        let mut browser = CatalogBrowser::new();

        let err = browser
            .load_page(&catalog, u64::MAX)
            .await
            .expect_err("out of range");

        assert!(matches!(err, BrowserError::PageOutOfRange(u64::MAX)));
        assert!(catalog.id_requests.lock().expect("lock").is_empty());
        assert_eq!(
            browser.notification().map(|n| n.kind),
            Some(NotificationKind::Error)
        );
    }

    #[tokio::test]
    async fn test_image_carousel_wraps() {
        let mut item = product(1, "Mochila", &[(11, true)]);
        item.images = vec![
            ProductImage {
                image_url: "a".to_string(),
                image_name: String::new(),
            },
            ProductImage {
                image_url: "b".to_string(),
                image_name: String::new(),
            },
        ];
        let catalog = FakeCatalog::new(vec![item]);
        let mut browser = CatalogBrowser::new();
        browser.load_page(&catalog, 1).await.expect("page");

        assert_eq!(browser.current_image().map(|i| i.image_url.as_str()), Some("a"));
        browser.previous_image();
        assert_eq!(browser.current_image().map(|i| i.image_url.as_str()), Some("b"));
        browser.next_image();
        assert_eq!(browser.image_index(), 0);
    }

    async fn catalog_first_id(catalog: &FakeCatalog) -> ProductId {
        let page = catalog
            .product_ids(PageWindow::FIRST)
            .await
            .expect("ids");
        *page.product_ids.first().expect("one id")
    }
}
