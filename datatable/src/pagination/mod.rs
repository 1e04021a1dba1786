//! Pagination controls, the sticky overlay, and the page-size preference.

mod preference;
mod render;
mod sticky;

pub use preference::{FileStore, MemoryStore, PageSizePreference, PreferenceStore, PAGE_SIZE_KEY};
pub use render::{render_pagination, PaginationPlacement};
pub use sticky::{StickyBounds, StickyPagination};

use std::fmt;
use std::sync::Arc;

/// Receives the requested page number (1-based).
pub type PageCallback = Arc<dyn Fn(usize) + Send + Sync>;

/// Receives the requested page size.
pub type PageSizeCallback = Arc<dyn Fn(usize) + Send + Sync>;

/// Position within a paginated result set. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub page_size: usize,
}

impl PageInfo {
    pub fn new(current_page: usize, total_items: usize, page_size: usize) -> Self {
        Self {
            current_page,
            total_pages: total_items.div_ceil(page_size.max(1)),
            total_items,
            page_size,
        }
    }

    /// 1-based inclusive item range shown on this page, clamped to the
    /// total. `(0, 0)` when there are no items.
    pub fn range(&self) -> (usize, usize) {
        if self.total_items == 0 {
            return (0, 0);
        }
        let start = (self.current_page.saturating_sub(1) * self.page_size + 1).min(self.total_items);
        let end = (self.current_page * self.page_size).min(self.total_items);
        (start, end.max(start))
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Controls are only shown with more than one page.
    pub fn should_render(&self) -> bool {
        self.total_pages > 1
    }

    /// Numbered buttons: first, last, and current ±1, with gaps collapsed.
    pub fn page_items(&self) -> Vec<PageItem> {
        let total = self.total_pages;
        let current = self.current_page.clamp(1, total.max(1));
        let mut items = Vec::new();
        let mut last_shown = 0;

        for page in 1..=total {
            let near_current = page + 1 >= current && page <= current + 1;
            if page == 1 || page == total || near_current {
                if last_shown != 0 && page > last_shown + 1 {
                    items.push(PageItem::Ellipsis);
                }
                items.push(PageItem::Page(page));
                last_shown = page;
            }
        }
        items
    }
}

/// One slot in the numbered page list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

/// Pagination input supplied by the host page.
#[derive(Clone)]
pub struct Pagination {
    pub info: PageInfo,
    pub on_page_change: PageCallback,
    pub on_page_size_change: Option<PageSizeCallback>,
}

impl Pagination {
    pub fn new(info: PageInfo, on_page_change: PageCallback) -> Self {
        Self {
            info,
            on_page_change,
            on_page_size_change: None,
        }
    }

    pub fn with_page_size_change(mut self, callback: PageSizeCallback) -> Self {
        self.on_page_size_change = Some(callback);
        self
    }

    /// The page `go_to(page)` would request, if any. Out-of-range and
    /// current-page requests yield `None`.
    pub fn target(&self, page: usize) -> Option<usize> {
        (page >= 1 && page <= self.info.total_pages && page != self.info.current_page)
            .then_some(page)
    }
}

impl fmt::Debug for Pagination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pagination").field("info", &self.info).finish()
    }
}
