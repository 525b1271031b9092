//! Viewport-driven list pagination.
//!
//! Narrow viewports show one page of a collection at a time; wide ones show
//! everything. [`Pagination`] is the pure state machine: the caller feeds it
//! viewport widths and collection sizes and asks it which slice to render.

use std::ops::RangeInclusive;

use serde::Serialize;

/// Widths at or below this many logical pixels render in paged mode.
pub const SMALL_SCREEN_MAX_WIDTH: u32 = 640;

/// Items per page in paged mode.
pub const DEFAULT_PAGE_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaginationMode {
    /// Whole collection, no page controls.
    Full,
    /// One page at a time, with page controls.
    Paged,
}

impl PaginationMode {
    pub fn for_width(width: u32) -> Self {
        if width <= SMALL_SCREEN_MAX_WIDTH {
            PaginationMode::Paged
        } else {
            PaginationMode::Full
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    mode: PaginationMode,
    page_index: usize,
    page_size: usize,
}

impl Pagination {
    /// Start on page 1 in the mode `width` implies.
    pub fn new(width: u32) -> Self {
        Self::with_page_size(width, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(width: u32, page_size: usize) -> Self {
        Self {
            mode: PaginationMode::for_width(width),
            page_index: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn mode(&self) -> PaginationMode {
        self.mode
    }

    /// Current 1-based page.
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Whether page controls should be rendered.
    pub fn controls_visible(&self) -> bool {
        self.mode == PaginationMode::Paged
    }

    /// Recompute the mode for a new viewport width.
    ///
    /// The page index is kept across mode changes. Returns `true` when the
    /// mode changed.
    pub fn on_resize(&mut self, width: u32) -> bool {
        let mode = PaginationMode::for_width(width);
        let changed = mode != self.mode;
        self.mode = mode;
        changed
    }

    /// `ceil(len / page_size)`; zero for an empty collection.
    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.page_size)
    }

    /// Highest page the index may hold: never below 1.
    pub fn last_page(&self, len: usize) -> usize {
        self.total_pages(len).max(1)
    }

    /// Pull the page index back inside `[1, last_page]`.
    pub fn clamp(&mut self, len: usize) {
        let last = self.last_page(len);
        if self.page_index > last {
            self.page_index = last;
        }
    }

    /// Jump to page `page`. Out-of-range pages are ignored.
    ///
    /// Returns `true` if the index moved.
    pub fn go_to_page(&mut self, page: usize, len: usize) -> bool {
        if page < 1 || page > self.total_pages(len) {
            return false;
        }
        let moved = page != self.page_index;
        self.page_index = page;
        moved
    }

    pub fn next_page(&mut self, len: usize) -> bool {
        self.go_to_page(self.page_index + 1, len)
    }

    pub fn previous_page(&mut self, len: usize) -> bool {
        match self.page_index.checked_sub(1) {
            Some(page) => self.go_to_page(page, len),
            None => false,
        }
    }

    /// Page numbers for the page control bar.
    pub fn page_numbers(&self, len: usize) -> RangeInclusive<usize> {
        1..=self.total_pages(len)
    }

    /// The slice of `items` to render.
    ///
    /// Clamps first, so a collection that shrank while paged never leaves
    /// the index past the last page.
    pub fn select<'a, T>(&mut self, items: &'a [T]) -> &'a [T] {
        self.clamp(items.len());
        match self.mode {
            PaginationMode::Full => items,
            PaginationMode::Paged => {
                let start = ((self.page_index - 1) * self.page_size).min(items.len());
                let end = (self.page_index * self.page_size).min(items.len());
                &items[start..end]
            }
        }
    }
}
