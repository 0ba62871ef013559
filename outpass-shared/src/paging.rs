use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PagingError {
    #[error("page must be at least 1 (got {0})")]
    InvalidPage(i64),
    #[error("limit must be greater than 0 (got {0})")]
    InvalidLimit(i64),
}

/// Validated 1-based offset/limit window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Missing values fall back to page 1 / `default_limit`; a limit above
    /// `max_limit` is clamped.
    pub fn from_query(
        page: Option<i64>,
        limit: Option<i64>,
        default_limit: u32,
        max_limit: u32,
    ) -> Result<Self, PagingError> {
        let page = page.unwrap_or(DEFAULT_PAGE as i64);
        let limit = limit.unwrap_or(default_limit as i64);

        if page < 1 || page > u32::MAX as i64 {
            return Err(PagingError::InvalidPage(page));
        }
        if limit < 1 {
            return Err(PagingError::InvalidLimit(limit));
        }

        Ok(Self {
            page: page as u32,
            limit: (limit.min(max_limit as i64)) as u32,
        })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_when_missing() {
        let page = PageRequest::from_query(None, None, DEFAULT_LIMIT, 100).unwrap();
        assert_eq!(page, PageRequest::default());
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn test_offset_is_zero_based() {
        let page = PageRequest::from_query(Some(2), Some(10), DEFAULT_LIMIT, 100).unwrap();
        assert_eq!(page.page(), 2);
        assert_eq!(page.offset(), 10);
        assert_eq!(page.limit(), 10);
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        assert_eq!(
            PageRequest::from_query(Some(0), None, DEFAULT_LIMIT, 100),
            Err(PagingError::InvalidPage(0))
        );
        assert_eq!(
            PageRequest::from_query(Some(1), Some(0), DEFAULT_LIMIT, 100),
            Err(PagingError::InvalidLimit(0))
        );
        assert_eq!(
            PageRequest::from_query(Some(1), Some(-5), DEFAULT_LIMIT, 100),
            Err(PagingError::InvalidLimit(-5))
        );
    }

    #[test]
    fn test_limit_is_clamped() {
        let page = PageRequest::from_query(Some(1), Some(500), DEFAULT_LIMIT, 100).unwrap();
        assert_eq!(page.limit(), 100);
    }
}
