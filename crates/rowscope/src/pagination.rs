//! Page arithmetic.
//!
//! Pages are 1-based. There is always at least one page, even for an empty
//! collection, so a requested page can always be clamped into range.

use std::ops::Range;

/// Page sizes offered when none are configured.
pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 5] = [5, 10, 25, 50, 100];

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Number of pages needed for `total` rows, never less than one.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

/// Clamps a requested page into `[1, total_pages]`.
pub fn clamp_page(requested: usize, total_pages: usize) -> usize {
    requested.clamp(1, total_pages.max(1))
}

/// One page of a collection of `total` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    page: usize,
    page_size: usize,
    total: usize,
}

impl PageWindow {
    /// Builds a window, clamping `page` into range. A zero page size is
    /// treated as one.
    pub fn new(page: usize, page_size: usize, total: usize) -> Self {
        let page_size = if page_size == 0 {
            log::warn!("page size 0 is invalid, using 1");
            1
        } else {
            page_size
        };
        let page = clamp_page(page, total_pages(total, page_size));
        PageWindow {
            page,
            page_size,
            total,
        }
    }

    /// Current page, 1-based.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Rows per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Rows across all pages.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Page count, at least one.
    pub fn total_pages(&self) -> usize {
        total_pages(self.total, self.page_size)
    }

    /// 1-based position of the first row on this page, or 0 when empty.
    pub fn from(&self) -> usize {
        if self.total == 0 {
            0
        } else {
            (self.page - 1) * self.page_size + 1
        }
    }

    /// 1-based position of the last row on this page, or 0 when empty.
    pub fn to(&self) -> usize {
        (self.page * self.page_size).min(self.total)
    }

    /// Whether a previous page exists.
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Whether a next page exists.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Index range of this page's rows.
    pub fn range(&self) -> Range<usize> {
        let start = ((self.page - 1) * self.page_size).min(self.total);
        start..self.to()
    }

    /// This page's slice of `items`.
    ///
    /// `items` should hold all `total` rows; a shorter slice yields whatever
    /// part of the range it covers.
    pub fn slice<'s, I>(&self, items: &'s [I]) -> &'s [I] {
        let range = self.range();
        let end = range.end.min(items.len());
        let start = range.start.min(end);
        &items[start..end]
    }

    /// The "Showing from-to of total" summary line.
    pub fn summary(&self) -> String {
        format!("Showing {}-{} of {}", self.from(), self.to(), self.total)
    }
}
