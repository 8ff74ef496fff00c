//! Order management (OMS) endpoints.

use tracing::instrument;
use url::form_urlencoded;
use vtex_console_core::OrderId;

use super::client::VtexClient;
use super::types::{Order, OrderList};
use super::VtexError;

/// Default page size of the order list.
pub const DEFAULT_ORDERS_PER_PAGE: u32 = 15;

/// Query parameters of the order list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderListParams {
    pub page: u32,
    pub per_page: u32,
    pub order_by: Option<String>,
    /// Raw `f_creationDate` filter, e.g.
    /// `creationDate:[2024-01-01T00:00:00.000Z TO 2024-01-31T23:59:59.999Z]`.
    pub creation_date: Option<String>,
    /// Raw `f_status` filter, e.g. `invoiced,canceled`.
    pub status: Option<String>,
}

impl Default for OrderListParams {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_ORDERS_PER_PAGE,
            order_by: Some("creationDate,desc".to_string()),
            creation_date: None,
            status: None,
        }
    }
}

impl OrderListParams {
    /// Encode as a query string (without the leading `?`).
    #[must_use]
    pub fn to_query(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("page", &self.page.to_string());
        query.append_pair("per_page", &self.per_page.to_string());
        if let Some(order_by) = &self.order_by {
            query.append_pair("orderBy", order_by);
        }
        if let Some(creation_date) = &self.creation_date {
            query.append_pair("f_creationDate", creation_date);
        }
        if let Some(status) = &self.status {
            query.append_pair("f_status", status);
        }
        query.finish()
    }
}

impl VtexClient {
    /// List orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(page = params.page))]
    pub async fn list_orders(&self, params: &OrderListParams) -> Result<OrderList, VtexError> {
        self.get(&format!("/api/oms/pvt/orders?{}", params.to_query()))
            .await
    }

    /// Get one order with items, totals, customer, shipping and payment.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn get_order(&self, id: &OrderId) -> Result<Order, VtexError> {
        self.get(&format!("/api/oms/pvt/orders/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeVtex;
    use vtex_console_core::OrderStatus;

    #[test]
    fn test_default_query() {
        assert_eq!(
            OrderListParams::default().to_query(),
            "page=1&per_page=15&orderBy=creationDate%2Cdesc"
        );
    }

    #[test]
    fn test_query_with_filters() {
        let params = OrderListParams {
            page: 2,
            per_page: 30,
            order_by: None,
            creation_date: None,
            status: Some("invoiced".to_string()),
        };
        assert_eq!(params.to_query(), "page=2&per_page=30&f_status=invoiced");
    }

    #[tokio::test]
    async fn test_list_and_get_orders() {
        let fake = FakeVtex::start().await;
        let client = fake.client();

        let list = client
            .list_orders(&OrderListParams::default())
            .await
            .expect("list");
        assert_eq!(list.list.len(), 1);
        assert_eq!(list.paging.total, 1);

        let summary = list.list.first().expect("one order");
        let order = client
            .get_order(&summary.order_id)
            .await
            .expect("order");
        assert_eq!(order.status, OrderStatus::Handling);
        assert_eq!(order.items.len(), 1);
    }
}
