//! Fixed-size pagination over the filtered list.

use std::fmt;

use serde::Serialize;

/// Page size and current page (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page_size: usize,
    current: usize,
}

impl Pagination {
    /// Start on page 1. A zero page size is bumped to 1.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current: 1,
        }
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    /// `ceil(len / page_size)`; zero for an empty list.
    #[must_use]
    pub const fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.page_size)
    }

    /// Whether `page` may be shown for a list of `len` items.
    ///
    /// Page 1 is always valid, even for an empty list.
    #[must_use]
    pub fn is_valid(&self, page: usize, len: usize) -> bool {
        page >= 1 && page <= self.total_pages(len).max(1)
    }

    /// Move to `page`. Out-of-range pages return `false` and change nothing.
    pub fn go_to(&mut self, page: usize, len: usize) -> bool {
        if !self.is_valid(page, len) {
            return false;
        }
        self.current = page;
        true
    }

    /// Back to page 1.
    pub const fn reset(&mut self) {
        self.current = 1;
    }

    /// Index of the first item on the current page.
    #[must_use]
    pub const fn offset(&self) -> usize {
        (self.current - 1) * self.page_size
    }

    /// Displayed range for the current page.
    #[must_use]
    pub fn range(&self, len: usize) -> ResultRange {
        ResultRange::new(self.current, self.page_size, len)
    }
}

/// The "Showing start-end of total" line.
///
/// `start` is 1-based. For an empty list it reads 1-0 of 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResultRange {
    pub start: usize,
    pub end: usize,
    pub total: usize,
}

impl ResultRange {
    #[must_use]
    pub fn new(page: usize, page_size: usize, total: usize) -> Self {
        let page = page.max(1);
        Self {
            start: (page - 1) * page_size + 1,
            end: (page * page_size).min(total),
            total,
        }
    }
}

impl fmt::Display for ResultRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Showing {}-{} of {} Results",
            self.start, self.end, self.total
        )
    }
}
