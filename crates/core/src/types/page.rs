//! Catalog pagination.
//!
//! The VTEX id-listing endpoint is addressed with a 0-based `_from`/`_to`
//! window. The console always walks the catalog in windows of
//! [`PAGE_SIZE`] products and numbers pages from 1.

use serde::{Deserialize, Serialize};

/// Products per catalog page.
pub const PAGE_SIZE: u64 = 250;

/// A 0-based `[from, to)` offset window over the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    pub from: u64,
    pub to: u64,
}

impl PageWindow {
    /// The first catalog page.
    pub const FIRST: Self = Self {
        from: 0,
        to: PAGE_SIZE,
    };

    /// Window for a 1-based page number using [`PAGE_SIZE`].
    ///
    /// Page 0 is treated as page 1. Returns `None` when the window does not
    /// fit in a `u64` offset.
    #[must_use]
    pub const fn for_page(page: u64) -> Option<Self> {
        Self::with_size(page, PAGE_SIZE)
    }

    /// Window for a 1-based page number with an explicit page size.
    ///
    /// Returns `None` when the window does not fit in a `u64` offset.
    #[must_use]
    pub const fn with_size(page: u64, page_size: u64) -> Option<Self> {
        let page = if page == 0 { 1 } else { page };
        let Some(from) = (page - 1).checked_mul(page_size) else {
            return None;
        };
        match from.checked_add(page_size) {
            Some(to) => Some(Self { from, to }),
            None => None,
        }
    }

    /// Window of `PAGE_SIZE` products starting at `from`.
    #[must_use]
    pub const fn starting_at(from: u64) -> Option<Self> {
        match from.checked_add(PAGE_SIZE) {
            Some(to) => Some(Self { from, to }),
            None => None,
        }
    }

    /// Number of products the window covers.
    #[must_use]
    pub const fn len(&self) -> u64 {
        self.to.saturating_sub(self.from)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Number of [`PAGE_SIZE`] pages needed for `total` products.
///
/// Returns 0 when the upstream response carried no total, which disables
/// "last page" navigation.
#[must_use]
pub const fn page_count(total: Option<u64>) -> u64 {
    match total {
        Some(total) => total.div_ceil(PAGE_SIZE),
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_for_first_pages() {
        assert_eq!(PageWindow::for_page(1), Some(PageWindow { from: 0, to: 250 }));
        assert_eq!(PageWindow::for_page(2), Some(PageWindow { from: 250, to: 500 }));
        assert_eq!(PageWindow::for_page(0), PageWindow::for_page(1));
        assert_eq!(PageWindow::for_page(1), Some(PageWindow::FIRST));
    }

    #[test]
    fn test_window_with_size() {
        let window = PageWindow::with_size(3, 50).expect("window");
        assert_eq!(window, PageWindow { from: 100, to: 150 });
        assert_eq!(window.len(), 50);
    }

    #[test]
    fn test_window_out_of_range() {
        assert_eq!(PageWindow::for_page(u64::MAX), None);
        assert_eq!(PageWindow::with_size(3, 9_223_372_036_854_775_807), None);
        assert_eq!(PageWindow::with_size(1, u64::MAX).map(|w| w.from), Some(0));
        assert_eq!(PageWindow::with_size(2, u64::MAX), None);

        let last_page = u64::MAX / PAGE_SIZE;
        assert_eq!(PageWindow::for_page(last_page).map(|w| w.len()), Some(PAGE_SIZE));
        assert_eq!(PageWindow::for_page(last_page + 1), None);
    }

    #[test]
    fn test_window_starting_at() {
        assert_eq!(
            PageWindow::starting_at(10),
            Some(PageWindow { from: 10, to: 260 })
        );
        assert_eq!(PageWindow::starting_at(u64::MAX), None);
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(Some(260)), 2);
        assert_eq!(page_count(Some(250)), 1);
        assert_eq!(page_count(Some(251)), 2);
        assert_eq!(page_count(Some(1)), 1);
        assert_eq!(page_count(Some(0)), 0);
    }

    #[test]
    fn test_page_count_without_total() {
        assert_eq!(page_count(None), 0);
    }
}
