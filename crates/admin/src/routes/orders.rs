//! Order list and order lookup pages.

use askama::Template;
use axum::{
    extract::{Query, State},
    response::Html,
};
use chrono::DateTime;
use serde::Deserialize;
use tracing::instrument;
use vtex_console_core::OrderId;

use crate::actions;
use crate::state::AppState;
use crate::vtex::{DEFAULT_ORDERS_PER_PAGE, Order, OrderSummary, format_cents};

use super::dashboard::account_name;
use super::products::MessageView;
use super::render;

/// Format an OMS timestamp as `YYYY-MM-DD HH:MM`, keeping unparseable
/// values as they came.
fn format_date(raw: Option<&str>) -> String {
    raw.map_or_else(
        || "-".to_string(),
        |raw| {
            DateTime::parse_from_rfc3339(raw)
                .map(|date| date.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|_| raw.to_string())
        },
    )
}

/// Order row for the list page.
#[derive(Debug, Clone)]
pub struct OrderRowView {
    pub order_id: String,
    pub sequence: String,
    pub created: String,
    pub client: String,
    pub total: String,
    pub items: i64,
    pub status: String,
    pub status_class: &'static str,
}

impl From<&OrderSummary> for OrderRowView {
    fn from(order: &OrderSummary) -> Self {
        Self {
            order_id: order.order_id.to_string(),
            sequence: order.sequence.clone().unwrap_or_default(),
            created: format_date(order.creation_date.as_deref()),
            client: order.client_name.clone().unwrap_or_else(|| "-".to_string()),
            total: format_cents(order.total_value),
            items: order.total_items,
            status: order
                .status_description
                .clone()
                .unwrap_or_else(|| order.status.to_string()),
            status_class: order.status.badge_class(),
        }
    }
}

/// List page query.
#[derive(Debug, Default, Deserialize)]
pub struct OrdersPageQuery {
    pub page: Option<u32>,
}

/// Order list page template.
#[derive(Template)]
#[template(path = "orders/index.html")]
pub struct OrdersIndexTemplate {
    pub current_path: String,
    pub account_name: Option<String>,
    pub message: Option<MessageView>,
    pub orders: Vec<OrderRowView>,
    pub page: u32,
    pub pages: u64,
    pub total: u64,
    pub has_next: bool,
}

/// Order list page handler.
///
/// GET /orders?page=N
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<OrdersPageQuery>,
) -> Html<String> {
    let page = query.page.unwrap_or(1).max(1);
    let mut template = OrdersIndexTemplate {
        current_path: "/orders".to_string(),
        account_name: account_name(&state),
        message: None,
        orders: Vec::new(),
        page,
        pages: 0,
        total: 0,
        has_next: false,
    };

    let client = match state.client() {
        Ok(client) => client,
        Err(e) => {
            template.message = Some(MessageView::error(e.to_string()));
            return render(&template);
        }
    };

    match actions::list_orders(&client, page, DEFAULT_ORDERS_PER_PAGE)
        .await
        .into_result()
    {
        Ok(list) => {
            template.orders = list.list.iter().map(OrderRowView::from).collect();
            template.pages = list.paging.pages;
            template.total = list.paging.total;
            template.has_next = u64::from(page) < list.paging.pages;
        }
        Err(error) => template.message = Some(MessageView::error(error)),
    }
    render(&template)
}

/// Order item row.
#[derive(Debug, Clone)]
pub struct OrderItemView {
    pub name: String,
    pub ref_id: String,
    pub quantity: i64,
    pub price: String,
    pub image_url: Option<String>,
}

/// Full order view.
#[derive(Debug, Clone)]
pub struct OrderDetailView {
    pub order_id: String,
    pub sequence: String,
    pub created: String,
    pub status: String,
    pub status_class: &'static str,
    pub origin: String,
    pub sales_channel: String,
    pub client_name: String,
    pub client_email: String,
    pub total: String,
    pub totals: Vec<(String, String)>,
    pub items: Vec<OrderItemView>,
    pub shipping: String,
    pub payment: String,
}

impl From<&Order> for OrderDetailView {
    fn from(order: &Order) -> Self {
        let profile = order.client_profile_data.clone().unwrap_or_default();
        let pretty = |value: &Option<serde_json::Value>| {
            value
                .as_ref()
                .and_then(|v| serde_json::to_string_pretty(v).ok())
                .unwrap_or_default()
        };
        Self {
            order_id: order.order_id.to_string(),
            sequence: order.sequence.clone().unwrap_or_default(),
            created: format_date(order.creation_date.as_deref()),
            status: order
                .status_description
                .clone()
                .unwrap_or_else(|| order.status.to_string()),
            status_class: order.status.badge_class(),
            origin: order.origin.clone().unwrap_or_else(|| "-".to_string()),
            sales_channel: order.sales_channel.clone().unwrap_or_else(|| "-".to_string()),
            client_name: profile.full_name(),
            client_email: profile.email.clone().unwrap_or_default(),
            total: format_cents(order.value),
            totals: order
                .totals
                .iter()
                .map(|t| (t.name.clone(), format_cents(t.value)))
                .collect(),
            items: order
                .items
                .iter()
                .map(|item| OrderItemView {
                    name: item.name.clone(),
                    ref_id: item.ref_id.clone().unwrap_or_default(),
                    quantity: item.quantity,
                    price: format_cents(item.selling_price.unwrap_or(item.price)),
                    image_url: item.image_url.clone(),
                })
                .collect(),
            shipping: pretty(&order.shipping_data),
            payment: pretty(&order.payment_data),
        }
    }
}

/// Order lookup query.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSearchQuery {
    pub order_id: Option<String>,
}

/// Order lookup page template.
#[derive(Template)]
#[template(path = "orders/search.html")]
pub struct OrderSearchTemplate {
    pub current_path: String,
    pub account_name: Option<String>,
    pub message: Option<MessageView>,
    pub query: String,
    pub order: Option<OrderDetailView>,
}

/// Order lookup page handler.
///
/// GET /orders/search?orderId=...
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<OrderSearchQuery>,
) -> Html<String> {
    let order_id = query
        .order_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string);

    let mut template = OrderSearchTemplate {
        current_path: "/orders/search".to_string(),
        account_name: account_name(&state),
        message: None,
        query: order_id.clone().unwrap_or_default(),
        order: None,
    };

    let Some(order_id) = order_id else {
        return render(&template);
    };

    let client = match state.client() {
        Ok(client) => client,
        Err(e) => {
            template.message = Some(MessageView::error(e.to_string()));
            return render(&template);
        }
    };

    match actions::get_order(&client, &OrderId::new(order_id))
        .await
        .into_result()
    {
        Ok(order) => template.order = Some(OrderDetailView::from(&order)),
        Err(error) => template.message = Some(MessageView::error(error)),
    }
    render(&template)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::tests::{body_text, empty_state, get, state_with_settings};
    use crate::test_support::FakeVtex;

    #[test]
    fn test_format_date() {
        assert_eq!(
            format_date(Some("2026-10-01T14:22:03.0000000+00:00")),
            "2026-10-01 14:22"
        );
        assert_eq!(format_date(Some("ayer")), "ayer");
        assert_eq!(format_date(None), "-");
    }

    #[tokio::test]
    async fn test_orders_page_lists_orders() {
        let fake = FakeVtex::start().await;
        let (state, _dir) = state_with_settings(&fake);

        let html = body_text(get(state, "/orders").await).await;
        assert!(html.contains("1500000000001-01"));
        assert!(html.contains("Ana Pérez"));
        assert!(html.contains("159.90"));
        assert!(html.contains("Preparando entrega"));
    }

    #[tokio::test]
    async fn test_orders_page_without_settings() {
        let (state, _dir) = empty_state();
        let html = body_text(get(state, "/orders").await).await;
        assert!(html.contains("VTEX credentials not configured"));
    }

    #[tokio::test]
    async fn test_order_search_found() {
        let fake = FakeVtex::start().await;
        let (state, _dir) = state_with_settings(&fake);

        let html = body_text(get(state, "/orders/search?orderId=1500000000001-01").await).await;
        assert!(html.contains("Mochila Niña Rosada Talla Única"));
        assert!(html.contains("ana@example.com"));
        assert!(html.contains("Costo total del envío"));
    }

    #[tokio::test]
    async fn test_order_search_not_found() {
        let fake = FakeVtex::start().await;
        let (state, _dir) = state_with_settings(&fake);

        let html = body_text(get(state, "/orders/search?orderId=nope").await).await;
        assert!(html.contains("VTEX API Error: 404"));
    }

    #[tokio::test]
    async fn test_order_search_empty_form() {
        let (state, _dir) = empty_state();
        let html = body_text(get(state, "/orders/search").await).await;
        assert!(html.contains("name=\"orderId\""));
    }
}
