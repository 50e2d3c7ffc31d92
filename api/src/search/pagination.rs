use crate::domain::{Facets, PageMeta, PartListing, SearchResponse, SearchResults};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// A clamped page window: `page >= 1`, `1 <= page_size <= 100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    page: u32,
    page_size: u32,
}

impl Page {
    /// Accepts any requested numbers, out of range ones are clamped rather than rejected.
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Self {
        let page = page.unwrap_or(1).max(1);
        let page_size = page_size
            .unwrap_or(DEFAULT_PAGE_SIZE.into())
            .clamp(1, MAX_PAGE_SIZE.into());
        Self {
            page: u32::try_from(page).unwrap_or(u32::MAX),
            page_size: u32::try_from(page_size).unwrap_or(MAX_PAGE_SIZE),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn skip(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.page_size)
    }

    pub fn take(&self) -> i64 {
        i64::from(self.page_size)
    }

    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(u64::from(self.page_size))
    }

    pub fn meta(&self, total: u64) -> PageMeta {
        PageMeta {
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages(total),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Assembles the response envelope. Pages past the end simply carry no parts.
pub fn paginate(parts: Vec<PartListing>, total: u64, facets: Facets, page: Page) -> SearchResponse {
    SearchResponse {
        results: SearchResults {
            parts,
            total_count: total,
            facets,
        },
        pagination: page.meta(total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_clamping() {
        assert_eq!(Page::new(None, None), Page::new(Some(1), Some(20)));
        assert_eq!(Page::new(Some(0), Some(0)).page(), 1);
        assert_eq!(Page::new(Some(0), Some(0)).page_size(), 1);
        assert_eq!(Page::new(Some(3), Some(500)).page_size(), MAX_PAGE_SIZE);
        assert_eq!(Page::new(Some(-1), None).page(), 1);
        assert_eq!(Page::new(None, Some(-5)).page_size(), 1);
        assert_eq!(Page::new(None, Some(5_000_000_000)).page_size(), MAX_PAGE_SIZE);
        assert_eq!(Page::new(Some(i64::MAX), None).page(), u32::MAX);
    }

    #[test]
    fn test_skip_take() {
        let page = Page::new(Some(3), Some(25));
        assert_eq!(page.skip(), 50);
        assert_eq!(page.take(), 25);
        assert_eq!(Page::new(Some(1), Some(25)).skip(), 0);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let page = Page::new(Some(1), Some(10));
        assert_eq!(page.total_pages(0), 0);
        assert_eq!(page.total_pages(1), 1);
        assert_eq!(page.total_pages(10), 1);
        assert_eq!(page.total_pages(11), 2);
        assert_eq!(
            page.meta(95),
            PageMeta {
                page: 1,
                page_size: 10,
                total_pages: 10
            }
        );
    }

    #[test]
    fn test_out_of_range_page_is_not_an_error() {
        let page = Page::new(Some(9), Some(10));
        let response = paginate(Vec::new(), 12, Facets::default(), page);
        assert!(response.results.parts.is_empty());
        assert_eq!(response.results.total_count, 12);
        assert_eq!(response.pagination.total_pages, 2);
        assert_eq!(response.pagination.page, 9);
    }
}
