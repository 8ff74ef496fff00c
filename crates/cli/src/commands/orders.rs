//! Order commands.

use vtex_console_admin::actions;
use vtex_console_admin::settings::SettingsStore;
use vtex_console_admin::vtex::format_cents;
use vtex_console_core::OrderId;

use super::{CliError, client, print_json};

/// Print a page of orders.
///
/// # Errors
///
/// Returns an error if the credentials are missing or the listing fails.
pub async fn list(store: &SettingsStore, page: u32, per_page: u32) -> Result<(), CliError> {
    let orders = actions::list_orders(&client(store)?, page, per_page)
        .await
        .into_result()
        .map_err(CliError::Action)?;

    for order in &orders.list {
        tracing::info!(
            order = %order.order_id,
            status = %order.status,
            total = %format_cents(order.total_value),
            client = order.client_name.as_deref().unwrap_or_default(),
            "Order"
        );
    }
    tracing::info!(
        page = orders.paging.current_page,
        pages = orders.paging.pages,
        total = orders.paging.total,
        "Orders listed"
    );
    print_json(&orders)
}

/// Print one order.
///
/// # Errors
///
/// Returns an error if the credentials are missing or the order is not found.
pub async fn get(store: &SettingsStore, id: &str) -> Result<(), CliError> {
    let order = actions::get_order(&client(store)?, &OrderId::new(id.trim()))
        .await
        .into_result()
        .map_err(CliError::Action)?;
    print_json(&order)
}
