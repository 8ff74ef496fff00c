//! Catalog browsing.
//!
//! [`CatalogSource`] is the seam between the VTEX client and everything that
//! walks the catalog (the browser, the export and the diagnostic engines).

mod browser;
mod source;

pub use browser::{BrowserError, CatalogBrowser, Notification, NotificationKind};
pub use source::CatalogSource;
