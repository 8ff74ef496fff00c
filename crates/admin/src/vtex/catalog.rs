//! Catalog endpoints (private catalog and `catalog_system`).

use serde_json::Value;
use tracing::instrument;
use vtex_console_core::{PageWindow, ProductId, SkuId};

use super::client::VtexClient;
use super::types::{
    CatalogProduct, ProductDetail, ProductIdPage, ProductInput, RawIdListing, SearchProduct, Sku,
    SkuImageInput, SkuInput, SkuSpecificationInput,
};
use super::VtexError;

impl VtexClient {
    /// Create a product in the private catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_product(&self, input: &ProductInput) -> Result<CatalogProduct, VtexError> {
        self.post("/api/catalog/pvt/product", input).await
    }

    /// Get a product from the private catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> Result<CatalogProduct, VtexError> {
        self.get(&format!("/api/catalog/pvt/product/{id}")).await
    }

    /// List product ids (and their SKU ids) inside `window`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(from = window.from, to = window.to))]
    pub async fn product_and_sku_ids(&self, window: PageWindow) -> Result<ProductIdPage, VtexError> {
        let raw: RawIdListing = self
            .get(&format!(
                "/api/catalog_system/pvt/products/GetProductAndSkuIds?_from={}&_to={}",
                window.from, window.to
            ))
            .await?;
        let page = ProductIdPage::from(raw);
        tracing::debug!(
            count = page.product_ids.len(),
            total = ?page.total(),
            "Fetched product ids"
        );
        Ok(page)
    }

    /// Fetch the public search record of one product.
    ///
    /// # Errors
    ///
    /// Returns `VtexError::NotFound` if the search result is empty.
    #[instrument(skip(self))]
    pub async fn search_product(&self, id: ProductId) -> Result<SearchProduct, VtexError> {
        let results: Vec<SearchProduct> = self
            .get(&format!("/api/catalog_system/pub/products/search/{id}"))
            .await?;
        results
            .into_iter()
            .next()
            .ok_or_else(|| VtexError::NotFound(format!("product {id}")))
    }

    /// Fetch a product and flatten it for display.
    ///
    /// # Errors
    ///
    /// Same as [`VtexClient::search_product`].
    pub async fn product_detail(&self, id: ProductId) -> Result<ProductDetail, VtexError> {
        self.search_product(id).await.map(ProductDetail::from)
    }

    /// Create a SKU.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, input), fields(product_id = %input.product_id))]
    pub async fn create_sku(&self, input: &SkuInput) -> Result<Sku, VtexError> {
        self.post("/api/catalog/pvt/stockkeepingunit", input).await
    }

    /// Get a SKU.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_sku(&self, id: SkuId) -> Result<Sku, VtexError> {
        self.get(&format!("/api/catalog/pvt/stockkeepingunit/{id}"))
            .await
    }

    /// Attach an image to a SKU.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, image), fields(url = %image.image_url))]
    pub async fn add_sku_image(&self, id: SkuId, image: &SkuImageInput) -> Result<Value, VtexError> {
        self.post(&format!("/api/catalog/pvt/stockkeepingunit/{id}/file"), image)
            .await
    }

    /// Attach a specification value to a SKU.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn add_sku_specification(
        &self,
        id: SkuId,
        spec: SkuSpecificationInput,
    ) -> Result<Value, VtexError> {
        self.post(
            &format!("/api/catalog/pvt/stockkeepingunit/{id}/specification"),
            &spec,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeVtex;

    #[tokio::test]
    async fn test_product_and_sku_ids() {
        let fake = FakeVtex::start().await;
        let page = fake
            .client()
            .product_and_sku_ids(PageWindow::FIRST)
            .await
            .expect("ids");

        assert_eq!(
            page.product_ids,
            vec![ProductId::new(1), ProductId::new(2), ProductId::new(3)]
        );
        assert_eq!(page.total(), Some(3));
    }

    #[tokio::test]
    async fn test_product_detail() {
        let fake = FakeVtex::start().await;
        let detail = fake
            .client()
            .product_detail(ProductId::new(1))
            .await
            .expect("detail");

        assert_eq!(detail.product_id, Some(ProductId::new(1)));
        assert_eq!(detail.name, "Mochila Niña Rosada");
        assert_eq!(detail.skus.len(), 2);
    }

    #[tokio::test]
    async fn test_search_empty_is_not_found() {
        let fake = FakeVtex::start().await;
        let err = fake
            .client()
            .search_product(ProductId::new(999))
            .await
            .expect_err("empty search");
        assert_eq!(err.upstream_status(), Some(404));
    }

    #[tokio::test]
    async fn test_create_product_round_trip() {
        let fake = FakeVtex::start().await;
        let created = fake
            .client()
            .create_product(&ProductInput {
                name: "Mochila".to_string(),
                department_id: 1.into(),
                category_id: 2.into(),
                brand_id: 1.into(),
                ref_id: "MOCH-1".to_string(),
                is_visible: true,
                description: "Nueva".to_string(),
                is_active: true,
                show_without_stock: true,
            })
            .await
            .expect("create");

        assert_eq!(created.id, Some(ProductId::new(42)));
        assert_eq!(created.name, "Mochila");
        assert_eq!(created.ref_id.as_deref(), Some("MOCH-1"));
    }
}
