//! Pagination query parameters and the list response envelope.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

pub const DEFAULT_PAGE_SIZE: u32 = 6;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Pagination query parameters.
///
/// Uses `serde_with` to parse page numbers from query strings as integers.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<u32>,
}

impl PaginationParams {
    /// Validates pagination parameters and converts to database offset/limit.
    ///
    /// # Defaults
    ///
    /// - `page`: 1
    /// - `limit`: 6
    ///
    /// # Validation
    ///
    /// - Page must be > 0
    /// - Limit must be between 1 and 100
    ///
    /// # Returns
    ///
    /// `(offset, limit)` tuple for SQL queries.
    pub fn validate_and_get_offset_limit(&self) -> Result<(i64, i64), String> {
        let page = self.page.unwrap_or(1);
        let limit = self.limit.unwrap_or(DEFAULT_PAGE_SIZE);

        if page == 0 {
            return Err("Page must be greater than 0".to_string());
        }

        if !(1..=MAX_PAGE_SIZE).contains(&limit) {
            return Err(format!("Limit must be between 1 and {MAX_PAGE_SIZE}"));
        }

        // Widen before multiplying so an enormous page number cannot
        // overflow u32 arithmetic.
        let offset = i64::from(page - 1) * i64::from(limit);
        let limit = i64::from(limit);

        Ok((offset, limit))
    }

    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE)
    }
}

/// List response envelope with absolute-path page links.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    /// Builds the envelope; `path` is the request path used to render the
    /// `next`/`previous` links.
    pub fn new(path: &str, page: u32, limit: u32, count: i64, results: Vec<T>) -> Self {
        let total_pages = if count == 0 {
            0
        } else {
            (count + i64::from(limit) - 1) / i64::from(limit)
        };

        let next = if i64::from(page) < total_pages {
            Some(format!("{path}?page={}&limit={limit}", page + 1))
        } else {
            None
        };

        let previous = if page > 1 {
            Some(format!("{path}?page={}&limit={limit}", page - 1))
        } else {
            None
        };

        Self {
            count,
            next,
            previous,
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<u32>, limit: Option<u32>) -> PaginationParams {
        PaginationParams { page, limit }
    }

    #[test]
    fn test_defaults() {
        let (offset, limit) = params(None, None).validate_and_get_offset_limit().unwrap();
        assert_eq!(offset, 0);
        assert_eq!(limit, 6);
    }

    #[test]
    fn test_page_2_with_default_size() {
        let (offset, limit) = params(Some(2), None)
            .validate_and_get_offset_limit()
            .unwrap();
        assert_eq!(offset, 6);
        assert_eq!(limit, 6);
    }

    #[test]
    fn test_custom_page_and_size() {
        let (offset, limit) = params(Some(3), Some(50))
            .validate_and_get_offset_limit()
            .unwrap();
        assert_eq!(offset, 100);
        assert_eq!(limit, 50);
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let (offset, limit) = params(Some(u32::MAX), Some(100))
            .validate_and_get_offset_limit()
            .unwrap();
        assert_eq!(offset, i64::from(u32::MAX - 1) * 100);
        assert_eq!(limit, 100);
    }

    #[test]
    fn test_page_zero_is_error() {
        assert!(params(Some(0), None).validate_and_get_offset_limit().is_err());
    }

    #[test]
    fn test_limit_zero_is_error() {
        assert!(params(None, Some(0)).validate_and_get_offset_limit().is_err());
    }

    #[test]
    fn test_limit_at_maximum_is_ok() {
        assert!(params(None, Some(100)).validate_and_get_offset_limit().is_ok());
    }

    #[test]
    fn test_limit_above_maximum_is_error() {
        assert!(params(None, Some(101)).validate_and_get_offset_limit().is_err());
    }

    #[test]
    fn test_envelope_middle_page_has_both_links() {
        let p = Paginated::new("/api/recipes", 2, 6, 20, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(p.count, 20);
        assert_eq!(p.next.as_deref(), Some("/api/recipes?page=3&limit=6"));
        assert_eq!(p.previous.as_deref(), Some("/api/recipes?page=1&limit=6"));
    }

    #[test]
    fn test_envelope_first_page_has_no_previous() {
        let p = Paginated::new("/api/recipes", 1, 6, 7, vec![0; 6]);
        assert!(p.previous.is_none());
        assert!(p.next.is_some());
    }

    #[test]
    fn test_envelope_last_page_has_no_next() {
        let p = Paginated::new("/api/recipes", 2, 6, 7, vec![0]);
        assert!(p.next.is_none());
        assert!(p.previous.is_some());
    }

    #[test]
    fn test_envelope_empty() {
        let p = Paginated::<i32>::new("/api/recipes", 1, 6, 0, vec![]);
        assert_eq!(p.count, 0);
        assert!(p.next.is_none());
        assert!(p.previous.is_none());
        assert!(p.results.is_empty());
    }
}
