use std::future::Future;

use vtex_console_core::{PageWindow, ProductId};

use crate::vtex::{ProductDetail, ProductIdPage, VtexClient, VtexError};

/// Read access to a paginated catalog.
pub trait CatalogSource: Send + Sync {
    /// Product ids inside `window`, with the catalog total when known.
    fn product_ids(
        &self,
        window: PageWindow,
    ) -> impl Future<Output = Result<ProductIdPage, VtexError>> + Send;

    /// Display detail of one product.
    fn product_detail(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<ProductDetail, VtexError>> + Send;
}

impl CatalogSource for VtexClient {
    async fn product_ids(&self, window: PageWindow) -> Result<ProductIdPage, VtexError> {
        self.product_and_sku_ids(window).await
    }

    async fn product_detail(&self, id: ProductId) -> Result<ProductDetail, VtexError> {
        self.search_product(id).await.map(ProductDetail::from)
    }
}
