//! Dashboard route handler.

use askama::Template;
use axum::{extract::State, response::Html};
use tracing::instrument;
use vtex_console_core::PAGE_SIZE;

use crate::services::diagnostic::MAX_DIAGNOSTIC_PAGES;
use crate::state::AppState;

use super::render;

/// Account name of the stored credentials, for the navigation bar.
pub(crate) fn account_name(state: &AppState) -> Option<String> {
    match state.settings().load() {
        Ok(credentials) => credentials
            .map(|c| c.account_name)
            .filter(|name| !name.trim().is_empty()),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read settings");
            None
        }
    }
}

/// Dashboard page template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub current_path: String,
    pub account_name: Option<String>,
    pub page_size: u64,
    pub max_pages: u64,
}

/// Dashboard page handler.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Html<String> {
    render(&DashboardTemplate {
        current_path: "/".to_string(),
        account_name: account_name(&state),
        page_size: PAGE_SIZE,
        max_pages: MAX_DIAGNOSTIC_PAGES,
    })
}
