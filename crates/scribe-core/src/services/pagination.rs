//! Fixed-size pagination over an ordered listing.

/// Posts per listing page.
pub const PAGE_SIZE: u64 = 10;

/// A 1-based page number as requested by the client.
///
/// Absent, non-numeric, and zero values all degrade to page 1; they are
/// never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest(u64);

impl PageRequest {
    pub fn first() -> Self {
        Self(1)
    }

    /// Parse the raw `page` query parameter.
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw.and_then(|s| s.parse::<u64>().ok()) {
            Some(n) if n >= 1 => Self(n),
            _ => Self(1),
        }
    }

    pub fn number(self) -> u64 {
        self.0
    }
}

/// Page arithmetic for a listing of `total` items.
///
/// An empty listing still has one (empty) page, and a request past the
/// last page clamps to the last page rather than failing.
#[derive(Debug, Clone, Copy)]
pub struct Pager {
    total: u64,
    per_page: u64,
}

impl Pager {
    pub fn new(total: u64) -> Self {
        Self {
            total,
            per_page: PAGE_SIZE,
        }
    }

    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(self.per_page).max(1)
    }

    /// Resolve a requested page to the page actually served.
    pub fn resolve(&self, requested: PageRequest) -> u64 {
        requested.number().min(self.total_pages())
    }

    pub fn offset(&self, page: u64) -> u64 {
        (page - 1) * self.per_page
    }

    pub fn limit(&self) -> u64 {
        self.per_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_defaults_to_one() {
        assert_eq!(PageRequest::from_query(None).number(), 1);
        assert_eq!(PageRequest::from_query(Some("")).number(), 1);
        assert_eq!(PageRequest::from_query(Some("abc")).number(), 1);
        assert_eq!(PageRequest::from_query(Some("-3")).number(), 1);
        assert_eq!(PageRequest::from_query(Some("0")).number(), 1);
        assert_eq!(PageRequest::from_query(Some("2")).number(), 2);
    }

    #[test]
    fn test_thirteen_items_make_two_pages() {
        let pager = Pager::new(13);
        assert_eq!(pager.total_pages(), 2);
        assert_eq!(pager.offset(1), 0);
        assert_eq!(pager.offset(2), 10);
    }

    #[test]
    fn test_request_past_end_clamps_to_last_page() {
        let pager = Pager::new(13);
        assert_eq!(pager.resolve(PageRequest::from_query(Some("99"))), 2);
    }

    #[test]
    fn test_empty_listing_has_one_page() {
        let pager = Pager::new(0);
        assert_eq!(pager.total_pages(), 1);
        assert_eq!(pager.resolve(PageRequest::first()), 1);
    }

    #[test]
    fn test_exact_multiple_has_no_partial_page() {
        assert_eq!(Pager::new(20).total_pages(), 2);
        assert_eq!(Pager::new(21).total_pages(), 3);
    }
}
