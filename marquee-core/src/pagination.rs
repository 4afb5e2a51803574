//! Pagination math for result pages.

use serde::Serialize;

/// Page ranges up to this size render every page link.
pub const FULL_RANGE_LIMIT: u32 = 7;
/// Pages shown on each side of the current page in collapsed ranges.
pub const SIBLINGS: u32 = 2;

/// One entry of a rendered pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

/// Pagination over `total_pages` pages with a current page that is always
/// within `[1, max(total_pages, 1)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    current: u32,
    total_pages: u32,
}

impl Pagination {
    /// Creates pagination, clamping `requested_page` into range.
    pub fn new(requested_page: u32, total_pages: u32) -> Self {
        let last = total_pages.max(1);
        Self {
            current: requested_page.clamp(1, last),
            total_pages,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    fn last(&self) -> u32 {
        self.total_pages.max(1)
    }

    pub fn previous(&self) -> Option<u32> {
        (self.current > 1).then(|| self.current - 1)
    }

    pub fn next(&self) -> Option<u32> {
        (self.current < self.last()).then(|| self.current + 1)
    }

    /// Page links to render, collapsing long ranges around the current page
    /// while always keeping the first and last page.
    pub fn items(&self) -> Vec<PageItem> {
        let last = self.last();
        if last <= FULL_RANGE_LIMIT {
            return (1..=last).map(PageItem::Page).collect();
        }

        let window_start = self.current.saturating_sub(SIBLINGS).max(1);
        let window_end = self.current.saturating_add(SIBLINGS).min(last);

        let mut pages = vec![1];
        pages.extend(window_start..=window_end);
        pages.push(last);
        pages.sort_unstable();
        pages.dedup();

        let mut items = Vec::with_capacity(pages.len() + 2);
        let mut previous = 0;
        for page in pages {
            match page - previous {
                1 => {}
                // A single hidden page takes as much room as an ellipsis.
                2 => items.push(PageItem::Page(previous + 1)),
                _ => items.push(PageItem::Ellipsis),
            }
            items.push(PageItem::Page(page));
            previous = page;
        }
        items
    }
}
