//! Pagination types for list endpoints.
//!
//! The store API numbers pages from zero, so everything here is 0-based.
//! Only [`PageItem::Page`] display labels are shifted to 1-based.

use serde::{Deserialize, Serialize};

/// Default page size.
const DEFAULT_PAGE_SIZE: u64 = 10;
/// Maximum page size.
const MAX_PAGE_SIZE: u64 = 100;

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (0-based).
    #[serde(default)]
    pub page: u64,
    /// Number of items per page.
    #[serde(default = "default_page_size")]
    pub size: u64,
}

impl PageRequest {
    /// Create a new page request, clamping the size into `1..=100`.
    pub fn new(page: u64, size: u64) -> Self {
        Self {
            page,
            size: size.clamp(1, MAX_PAGE_SIZE),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Number of pages needed to show `total` items at `size` per page.
pub fn page_count(total: u64, size: u64) -> u64 {
    if size == 0 {
        return 0;
    }
    total.div_ceil(size)
}

/// One slot of a pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageItem {
    /// A selectable page (0-based index).
    Page {
        /// Page index.
        index: u64,
        /// Whether this is the current page.
        active: bool,
    },
    /// A gap between non-adjacent pages.
    Ellipsis,
}

impl PageItem {
    /// Label shown to the user (1-based page number or `...`).
    pub fn label(&self) -> String {
        match self {
            PageItem::Page { index, active: true } => format!("[{}]", index.saturating_add(1)),
            PageItem::Page { index, .. } => index.saturating_add(1).to_string(),
            PageItem::Ellipsis => "...".to_string(),
        }
    }
}

/// Compute the visible pagination slots around `current`.
///
/// Always includes the first page, the neighbours of `current`, and the last
/// page when there is more than one. Gaps collapse into ellipses.
pub fn page_window(current: u64, count: u64) -> Vec<PageItem> {
    let page = |index: u64| PageItem::Page {
        index,
        active: index == current,
    };

    let mut items = vec![page(0)];
    if count <= 1 {
        return items;
    }

    if current > 2 {
        items.push(PageItem::Ellipsis);
    }

    let start = current.saturating_sub(1).max(1);
    let end = current.saturating_add(1).min(count - 2);
    for index in start..=end {
        items.push(page(index));
    }

    if current.saturating_add(3) < count {
        items.push(PageItem::Ellipsis);
    }

    items.push(page(count - 1));
    items
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}
