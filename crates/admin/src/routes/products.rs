//! Catalog browser and product creation pages.
//!
//! The browser is stateless on the server: the page, product, SKU and image
//! index travel in the query string and the [`CatalogBrowser`] is rebuilt on
//! every request.

use askama::Template;
use axum::{
    Form,
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;
use tracing::instrument;
use vtex_console_core::{ProductId, SkuId};

use crate::actions::{self, CreatedProduct, NewProductForm};
use crate::catalog::{CatalogBrowser, NotificationKind};
use crate::vtex::{ProductDetail, SkuDetail};
use crate::state::AppState;

use super::dashboard::account_name;
use super::render;

/// Browser query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct BrowserQuery {
    pub page: Option<u64>,
    pub product: Option<ProductId>,
    pub sku: Option<SkuId>,
    pub image: Option<usize>,
}

/// Status message view.
#[derive(Debug, Clone)]
pub struct MessageView {
    pub message: String,
    pub class: &'static str,
}

impl MessageView {
    pub(crate) fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            class: "border-green-300 bg-green-50 text-green-800",
        }
    }

    pub(crate) fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            class: "border-red-300 bg-red-50 text-red-800",
        }
    }
}

/// Product id link in the page listing.
#[derive(Debug, Clone)]
pub struct ProductLinkView {
    pub id: String,
    pub selected: bool,
}

/// SKU row of the loaded product.
#[derive(Debug, Clone)]
pub struct SkuView {
    pub id: String,
    pub name: String,
    pub ref_id: String,
    pub status: &'static str,
    pub status_class: &'static str,
    pub available: i64,
    pub selected: bool,
}

impl SkuView {
    fn new(sku: &SkuDetail, selected: bool) -> Self {
        let (status, status_class) = if sku.is_active {
            ("Activo", "bg-green-100 text-green-700")
        } else {
            ("Inactivo", "bg-gray-100 text-gray-700")
        };
        Self {
            id: sku.sku.to_string(),
            name: sku.name.clone(),
            ref_id: sku.ref_id.clone(),
            status,
            status_class,
            available: sku.available_quantity(),
            selected,
        }
    }
}

/// Detail of the selected SKU.
#[derive(Debug, Clone)]
pub struct SelectedSkuView {
    pub id: String,
    pub name: String,
    pub ref_id: String,
    pub ean: String,
    pub price: String,
    pub list_price: String,
    pub available: i64,
    pub unit: String,
    pub measures: String,
}

impl From<&SkuDetail> for SelectedSkuView {
    fn from(sku: &SkuDetail) -> Self {
        let offer = sku.offers.first();
        let money = |value: Option<f64>| value.map_or_else(|| "-".to_string(), |v| format!("${v:.2}"));
        Self {
            id: sku.sku.to_string(),
            name: sku.name_complete.clone().unwrap_or_else(|| sku.name.clone()),
            ref_id: sku.ref_id.clone(),
            ean: sku.ean.clone().unwrap_or_else(|| "-".to_string()),
            price: money(offer.and_then(|o| o.price)),
            list_price: money(offer.and_then(|o| o.list_price)),
            available: sku.available_quantity(),
            unit: format!(
                "{} × {}",
                sku.measurement_unit.as_deref().unwrap_or("un"),
                sku.unit_multiplier.unwrap_or(1.0)
            ),
            measures: sku.measures.map_or_else(
                || "-".to_string(),
                |m| format!("{} × {} × {} cm · {} kg", m.height, m.width, m.length, m.weight),
            ),
        }
    }
}

/// Loaded product view.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub ref_id: String,
    pub brand: String,
    pub department: String,
    pub category: String,
    pub description: String,
    pub status: &'static str,
    pub status_class: &'static str,
    pub specifications: Vec<(String, String)>,
}

impl From<&ProductDetail> for ProductView {
    fn from(product: &ProductDetail) -> Self {
        let (status, status_class) = if product.is_active {
            ("Activo", "bg-green-100 text-green-700")
        } else {
            ("Inactivo", "bg-gray-100 text-gray-700")
        };
        Self {
            id: product
                .product_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            name: product.name.clone(),
            ref_id: product.ref_id.clone(),
            brand: product.brand_name.clone(),
            department: product.department_name.clone(),
            category: product.category_name.clone(),
            description: product.description.clone(),
            status,
            status_class,
            specifications: product
                .specifications
                .iter()
                .map(|spec| (spec.name.clone(), spec.value.join(", ")))
                .collect(),
        }
    }
}

/// Image carousel view.
#[derive(Debug, Clone)]
pub struct ImageView {
    pub url: String,
    pub name: String,
    pub position: usize,
    pub count: usize,
    pub previous: usize,
    pub next: usize,
}

/// Catalog browser page template.
#[derive(Template)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub current_path: String,
    pub account_name: Option<String>,
    pub message: Option<MessageView>,
    pub page: u64,
    pub total_pages: u64,
    pub total_products: String,
    pub has_previous: bool,
    pub has_next: bool,
    pub can_jump_to_last: bool,
    pub product_links: Vec<ProductLinkView>,
    pub product: Option<ProductView>,
    pub skus: Vec<SkuView>,
    pub selected_sku: Option<SelectedSkuView>,
    pub image: Option<ImageView>,
}

impl ProductsIndexTemplate {
    fn empty(account_name: Option<String>) -> Self {
        Self {
            current_path: "/products".to_string(),
            account_name,
            message: None,
            page: 1,
            total_pages: 0,
            total_products: "-".to_string(),
            has_previous: false,
            has_next: false,
            can_jump_to_last: false,
            product_links: Vec::new(),
            product: None,
            skus: Vec::new(),
            selected_sku: None,
            image: None,
        }
    }

    fn from_browser(browser: &CatalogBrowser, account_name: Option<String>) -> Self {
        let selected_product = browser.selected_product_id();
        let selected_sku = browser.selected_sku().map(|sku| sku.sku);

        let message = browser.notification().map(|n| match n.kind {
            NotificationKind::Success => MessageView::success(n.message.clone()),
            NotificationKind::Error => MessageView::error(n.message.clone()),
        });

        let images = browser.images();
        let image = browser.current_image().map(|current| {
            let count = images.len();
            let position = browser.image_index();
            ImageView {
                url: current.image_url.clone(),
                name: current.image_name.clone(),
                position: position + 1,
                count,
                previous: (position + count - 1) % count,
                next: (position + 1) % count,
            }
        });

        Self {
            message,
            page: browser.current_page(),
            total_pages: browser.total_pages(),
            total_products: browser
                .total_products()
                .map_or_else(|| "-".to_string(), |total| total.to_string()),
            has_previous: browser.has_previous(),
            has_next: browser.has_next(),
            can_jump_to_last: browser.can_jump_to_last(),
            product_links: browser
                .product_ids()
                .iter()
                .map(|id| ProductLinkView {
                    id: id.to_string(),
                    selected: Some(*id) == selected_product,
                })
                .collect(),
            product: browser.product().map(ProductView::from),
            skus: browser
                .product()
                .map(|product| {
                    product
                        .skus
                        .iter()
                        .map(|sku| SkuView::new(sku, Some(sku.sku) == selected_sku))
                        .collect()
                })
                .unwrap_or_default(),
            selected_sku: browser.selected_sku().map(SelectedSkuView::from),
            image,
            ..Self::empty(account_name)
        }
    }
}

/// Catalog browser page handler.
///
/// GET /products?page=&product=&sku=&image=
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<BrowserQuery>,
) -> Html<String> {
    let account = account_name(&state);
    let client = match state.client() {
        Ok(client) => client,
        Err(e) => {
            let mut template = ProductsIndexTemplate::empty(account);
            template.message = Some(MessageView::error(e.to_string()));
            return render(&template);
        }
    };

    let mut browser = CatalogBrowser::new();
    if browser
        .load_page(&client, query.page.unwrap_or(1))
        .await
        .is_ok()
    {
        if let Some(product) = query.product
            && browser.selected_product_id() != Some(product)
        {
            // Failures are reported through the browser notification.
            let _ = browser.select_product(&client, product).await;
        }
        let mut sku_error = None;
        if let Some(sku) = query.sku
            && let Err(e) = browser.select_sku(sku)
        {
            tracing::warn!(error = %e, "Rejected SKU selection");
            sku_error = Some(e.to_string());
        }
        if let Some(image) = query.image {
            browser.set_image_index(image);
        }

        let mut template = ProductsIndexTemplate::from_browser(&browser, account);
        if let Some(error) = sku_error {
            template.message = Some(MessageView::error(error));
        }
        return render(&template);
    }

    render(&ProductsIndexTemplate::from_browser(&browser, account))
}

/// New product page template.
#[derive(Template)]
#[template(path = "products/new.html")]
pub struct NewProductTemplate {
    pub current_path: String,
    pub account_name: Option<String>,
    pub message: Option<MessageView>,
    pub form: NewProductForm,
    pub created: Option<CreatedProductView>,
}

/// Summary of a created product.
#[derive(Debug, Clone)]
pub struct CreatedProductView {
    pub product_id: String,
    pub sku_id: String,
    pub price_updated: bool,
    pub inventory_updated: bool,
}

impl From<&CreatedProduct> for CreatedProductView {
    fn from(created: &CreatedProduct) -> Self {
        Self {
            product_id: created
                .product
                .id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            sku_id: created.sku.id.map(|id| id.to_string()).unwrap_or_default(),
            price_updated: created.price_updated,
            inventory_updated: created.inventory_updated,
        }
    }
}

/// New product form handler.
///
/// GET /products/new
#[instrument(skip(state))]
pub async fn new_form(State(state): State<AppState>) -> Html<String> {
    render(&NewProductTemplate {
        current_path: "/products/new".to_string(),
        account_name: account_name(&state),
        message: None,
        form: NewProductForm::default(),
        created: None,
    })
}

/// Create a product with its SKU, price and stock.
///
/// POST /products/new
#[instrument(skip(state, form))]
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<NewProductForm>,
) -> Html<String> {
    let mut template = NewProductTemplate {
        current_path: "/products/new".to_string(),
        account_name: account_name(&state),
        message: None,
        form: NewProductForm::default(),
        created: None,
    };

    let client = match state.client() {
        Ok(client) => client,
        Err(e) => {
            template.message = Some(MessageView::error(e.to_string()));
            template.form = form;
            return render(&template);
        }
    };

    match actions::create_product_with_sku(&client, &form).await.into_result() {
        Ok(created) => {
            template.message = Some(MessageView::success(format!(
                "Producto {} creado",
                form.product.name.trim()
            )));
            template.created = Some(CreatedProductView::from(&created));
        }
        Err(error) => {
            template.message = Some(MessageView::error(error));
            template.form = form;
        }
    }
    render(&template)
}
