//! Client-side pagination over an already fetched list

use ecotrack_domain::constants::DEFAULT_PAGE_SIZE;
use serde::Serialize;

/// One window over a list the server returned in full
///
/// `total_items` is the length of the list the server returned for the
/// current query, not a server-side total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number after clamping
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Slice `items` into the requested page
    ///
    /// Page numbers are 1-based and clamped into `1..=total_pages`; a zero
    /// `page_size` falls back to the default of ten.
    pub fn from_items(items: Vec<T>, page: usize, page_size: usize) -> Self {
        let page_size = if page_size == 0 { DEFAULT_PAGE_SIZE } else { page_size };
        let total_items = items.len();
        let total_pages = total_items.div_ceil(page_size);
        let page = page.clamp(1, total_pages.max(1));

        let start = (page - 1) * page_size;
        let items: Vec<T> = items.into_iter().skip(start).take(page_size).collect();

        Self { items, page, page_size, total_items, total_pages }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_into_pages_of_ten() {
        let page = Page::from_items((1..=25).collect::<Vec<_>>(), 3, 10);

        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
        assert_eq!(page.total_items, 25);
        assert_eq!(page.total_pages, 3);
        assert!(!page.has_next());
        assert!(page.has_previous());
    }

    #[test]
    fn clamps_out_of_range_pages() {
        let high = Page::from_items((1..=25).collect::<Vec<_>>(), 9, 10);
        assert_eq!(high.page, 3);

        let low = Page::from_items((1..=25).collect::<Vec<_>>(), 0, 10);
        assert_eq!(low.page, 1);
        assert_eq!(low.items.len(), 10);
    }

    #[test]
    fn empty_list_is_single_empty_page() {
        let page: Page<i32> = Page::from_items(Vec::new(), 4, 10);

        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 0);
        assert!(page.is_empty());
        assert!(!page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn zero_page_size_uses_default() {
        let page = Page::from_items((1..=15).collect::<Vec<_>>(), 1, 0);
        assert_eq!(page.page_size, 10);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn map_keeps_counts() {
        let page = Page::from_items(vec![1, 2, 3], 1, 2).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.total_items, 3);
    }
}
