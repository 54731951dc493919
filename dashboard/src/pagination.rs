//! Page number and page size handling.
//!
//! Query parameters are never rejected: anything that does not parse, or
//! falls outside the allowed values, is replaced by a default so a mistyped
//! URL still renders a page.

/// Page sizes offered by the page-size selector.
pub const PAGE_SIZES: [u32; 4] = [10, 20, 50, 100];

/// Page size used when the requested one is not in [`PAGE_SIZES`].
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// A validated page position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number
    pub page: u32,
    /// Rows per page, always one of [`PAGE_SIZES`]
    pub page_size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Build a request, clamping page to at least 1 and falling back to the
    /// default page size for unsupported sizes.
    pub fn new(page: u32, page_size: u32) -> Self {
        let page_size = if PAGE_SIZES.contains(&page_size) {
            page_size
        } else {
            DEFAULT_PAGE_SIZE
        };

        Self {
            page: page.max(1),
            page_size,
        }
    }

    /// Build a request from raw query string values.
    pub fn from_query(page: Option<&str>, page_size: Option<&str>) -> Self {
        // Oversized page numbers saturate so they land past the last page.
        let page = page
            .and_then(|p| p.trim().parse::<u128>().ok())
            .map(|p| u32::try_from(p).unwrap_or(u32::MAX))
            .unwrap_or(1);
        let page_size = page_size
            .and_then(|s| s.trim().parse::<u32>().ok())
            .unwrap_or(DEFAULT_PAGE_SIZE);

        Self::new(page, page_size)
    }

    /// Number of rows skipped before this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }

    pub fn limit(&self) -> u32 {
        self.page_size
    }
}

/// Number of pages needed for `total` rows; an empty table still has one.
pub fn total_pages(total: u64, page_size: u32) -> u64 {
    if total == 0 {
        return 1;
    }
    total.div_ceil(u64::from(page_size.max(1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset() {
        assert_eq!(PageRequest::new(1, 10).offset(), 0);
        assert_eq!(PageRequest::new(3, 10).offset(), 20);
        assert_eq!(PageRequest::new(2, 100).offset(), 100);
    }

    #[test]
    fn test_unsupported_page_size_falls_back() {
        assert_eq!(PageRequest::new(1, 25).page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(PageRequest::new(1, 0).page_size, DEFAULT_PAGE_SIZE);
        for size in PAGE_SIZES {
            assert_eq!(PageRequest::new(1, size).page_size, size);
        }
    }

    #[test]
    fn test_page_clamped_to_first() {
        assert_eq!(PageRequest::new(0, 10).page, 1);
    }

    #[test]
    fn test_from_query() {
        assert_eq!(
            PageRequest::from_query(Some("4"), Some("50")),
            PageRequest::new(4, 50)
        );
        assert_eq!(PageRequest::from_query(None, None), PageRequest::default());
        assert_eq!(
            PageRequest::from_query(Some("-2"), Some("abc")),
            PageRequest::default()
        );
        assert_eq!(
            PageRequest::from_query(Some(" 2 "), Some("1000")),
            PageRequest::new(2, 10)
        );
        assert_eq!(
            PageRequest::from_query(Some("99999999999"), Some("20")),
            PageRequest::new(u32::MAX, 20)
        );
        assert_eq!(
            PageRequest::from_query(Some("340282366920938463463374607431768211456"), None),
            PageRequest::default()
        );
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(25, 10), 3);
        assert_eq!(total_pages(101, 100), 2);
    }

    #[test]
    fn test_large_page_offset_does_not_overflow() {
        let request = PageRequest::new(u32::MAX, 100);
        assert_eq!(request.offset(), (u64::from(u32::MAX) - 1) * 100);
    }
}
