//! Pagination math shared by every list view
//!
//! `PaginationState` is a small `Copy` value: every operation returns a new
//! state, and the current page is clamped into `1..=total_pages` on
//! construction and after every change. Page numbers are 1-based here;
//! `zero_based_page()` converts for REST queries that count from zero.

use serde::{Deserialize, Serialize};
use std::ops::Range;
use thiserror::Error;

/// Smallest page window that still fits both anchors and the current page.
/// Narrower windows show the anchors only.
pub const MIN_VISIBLE_PAGES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    #[error("Invalid pagination configuration: {0}")]
    InvalidConfiguration(String),
}

/// One button in a rendered page window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageItem {
    Page(usize),
    /// One or more collapsed page numbers
    Gap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    total_items: usize,
    items_per_page: usize,
    current_page: usize,
}

impl PaginationState {
    /// Create a state for `total_items` rows split into pages of `items_per_page`.
    ///
    /// `initial_page` is clamped into the valid range; only a zero page size is an error.
    pub fn new(
        total_items: usize,
        items_per_page: usize,
        initial_page: i64,
    ) -> Result<Self, PaginationError> {
        if items_per_page == 0 {
            return Err(PaginationError::InvalidConfiguration(
                "items per page must be positive".to_string(),
            ));
        }

        let state = Self {
            total_items,
            items_per_page,
            current_page: 1,
        };
        Ok(state.go_to_page(initial_page))
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Number of pages, never less than 1 (an empty list is page 1 of 1)
    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.items_per_page).max(1)
    }

    /// Jump to `page`, silently clamping out-of-range input
    pub fn go_to_page(self, page: i64) -> Self {
        let last = self.total_pages() as i64;
        let current_page = page.clamp(1, last) as usize;
        if current_page != self.current_page {
            log::debug!("pagination: page {} -> {}", self.current_page, current_page);
        }
        Self {
            current_page,
            ..self
        }
    }

    pub fn next_page(self) -> Self {
        if !self.has_next_page() {
            return self;
        }
        self.go_to_page(self.current_page as i64 + 1)
    }

    pub fn previous_page(self) -> Self {
        if !self.has_previous_page() {
            return self;
        }
        self.go_to_page(self.current_page as i64 - 1)
    }

    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages()
    }

    pub fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }

    /// Zero-based index of the first item on the current page
    pub fn start_index(&self) -> usize {
        (self.current_page - 1) * self.items_per_page
    }

    /// Zero-based inclusive index of the last item on the current page.
    /// `None` when the list is empty.
    pub fn end_index(&self) -> Option<usize> {
        let last_item = self.total_items.checked_sub(1)?;
        Some((self.start_index() + self.items_per_page - 1).min(last_item))
    }

    /// Half-open range of the current page's items, suitable for slicing
    pub fn item_range(&self) -> Range<usize> {
        match self.end_index() {
            Some(end) => self.start_index()..end + 1,
            None => 0..0,
        }
    }

    /// Slice of `items` shown on the current page.
    ///
    /// `items` may be shorter than `total_items` while a reload is in flight,
    /// the range is cut to what is actually there.
    pub fn page_slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.item_range();
        let end = range.end.min(items.len());
        let start = range.start.min(end);
        &items[start..end]
    }

    /// Same page position for a reloaded list with a different row count
    pub fn with_total_items(self, total_items: usize) -> Self {
        let current_page = self.current_page as i64;
        Self {
            total_items,
            ..self
        }
        .go_to_page(current_page)
    }

    /// Change the page size, keeping the first item of the current page visible
    pub fn with_items_per_page(self, items_per_page: usize) -> Result<Self, PaginationError> {
        if items_per_page == 0 {
            return Err(PaginationError::InvalidConfiguration(
                "items per page must be positive".to_string(),
            ));
        }
        let page = self.start_index() / items_per_page + 1;
        Self::new(self.total_items, items_per_page, page as i64)
    }

    /// Current page counted from zero, as the list endpoints expect it
    pub fn zero_based_page(&self) -> usize {
        self.current_page - 1
    }

    /// Row offset of the current page for `offset`/`limit` queries
    pub fn offset(&self) -> usize {
        self.start_index()
    }

    /// Compressed page-button sequence for the current position.
    ///
    /// Page 1 and the last page are always present. Between them sits a window
    /// of `max_visible - 2` pages around the current one, shifted inward when
    /// it would run past either anchor. A single `Gap` stands in for every run
    /// of skipped pages. When everything fits, all pages are listed.
    ///
    /// Below `MIN_VISIBLE_PAGES` there is no room for a window: only the two
    /// anchors are listed, with a gap between them when `max_visible > 0`
    /// leaves space for one.
    pub fn visible_page_window(&self, max_visible: usize) -> Vec<PageItem> {
        let total = self.total_pages();

        if total <= max_visible.max(1) {
            return (1..=total).map(PageItem::Page).collect();
        }

        if max_visible < MIN_VISIBLE_PAGES {
            let mut items = vec![PageItem::Page(1)];
            if total > 2 && max_visible > 0 {
                items.push(PageItem::Gap);
            }
            items.push(PageItem::Page(total));
            return items;
        }

        // Interior pages live in 2..=total-1; total > max_visible keeps the window inside it.
        let width = max_visible - 2;
        let lowest_start = 2;
        let highest_start = total - width;
        let start = self
            .current_page
            .saturating_sub((width - 1) / 2)
            .clamp(lowest_start, highest_start);
        let end = start + width - 1;

        let mut items = Vec::with_capacity(max_visible + 2);
        items.push(PageItem::Page(1));
        if start > 2 {
            items.push(PageItem::Gap);
        }
        items.extend((start..=end).map(PageItem::Page));
        if end < total - 1 {
            items.push(PageItem::Gap);
        }
        items.push(PageItem::Page(total));
        items
    }
}
