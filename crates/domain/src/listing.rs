//! Pagination and timestamp types shared by every entity.

use chrono::{DateTime, Utc};
use petcare_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Largest page size a listing may request.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Validated pagination and free-text search for a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    page: u32,
    limit: u32,
    search: Option<String>,
}

impl ListQuery {
    /// Validates raw pagination input.
    ///
    /// `page` starts at 1 and `limit` must lie in `1..=100`. A blank search
    /// term is treated as no search.
    pub fn new(page: i64, limit: i64, search: Option<String>) -> AppResult<Self> {
        if page < 1 || page > i64::from(u32::MAX) {
            return Err(AppError::Validation(
                "Page must be greater than or equal to 1".to_owned(),
            ));
        }

        if limit < 1 || limit > i64::from(MAX_PAGE_LIMIT) {
            return Err(AppError::Validation(format!(
                "Limit must be between 1 and {MAX_PAGE_LIMIT}"
            )));
        }

        let search = search
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());

        Ok(Self {
            page: page as u32,
            limit: limit as u32,
            search,
        })
    }

    /// Returns the 1-based page number.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Returns the trimmed search term, if any.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Returns the number of rows to skip.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

/// One page of projected records plus total-count metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Records on this page, in listing order.
    pub items: Vec<T>,
    /// Number of records matching the filters across all pages.
    pub total: u64,
    /// 1-based page number.
    pub page: u32,
    /// Page size used for the listing.
    pub limit: u32,
}

impl<T> Page<T> {
    /// Creates a page for the given query.
    #[must_use]
    pub fn new(items: Vec<T>, total: u64, query: &ListQuery) -> Self {
        Self {
            items,
            total,
            page: query.page(),
            limit: query.limit(),
        }
    }

    /// Returns the number of pages needed to list every matching record.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(u64::from(self.limit.max(1)))
    }

    /// Maps every item while keeping pagination metadata.
    #[must_use]
    pub fn map<U>(self, mapper: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(mapper).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
        }
    }
}

/// Creation and update instants stamped on every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordTimestamps {
    /// Instant the record was inserted.
    pub created_at: DateTime<Utc>,
    /// Instant the record was last written.
    pub updated_at: DateTime<Utc>,
}

impl RecordTimestamps {
    /// Stamps a new record with identical creation and update instants.
    #[must_use]
    pub fn created_at(now: DateTime<Utc>) -> Self {
        Self {
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{ListQuery, Page};

    #[test]
    fn limit_bounds_are_inclusive() {
        assert!(ListQuery::new(1, 1, None).is_ok());
        assert!(ListQuery::new(1, 100, None).is_ok());
        assert!(ListQuery::new(1, 0, None).is_err());
        assert!(ListQuery::new(1, 101, None).is_err());
    }

    #[test]
    fn page_must_start_at_one() {
        assert!(ListQuery::new(0, 10, None).is_err());
        assert!(ListQuery::new(-3, 10, None).is_err());
    }

    #[test]
    fn blank_search_is_treated_as_absent() {
        let query = ListQuery::new(1, 10, Some("   ".to_owned()))
            .unwrap_or_else(|error| panic!("query should be valid: {error}"));
        assert_eq!(query.search(), None);

        let query = ListQuery::new(1, 10, Some("  rex ".to_owned()))
            .unwrap_or_else(|error| panic!("query should be valid: {error}"));
        assert_eq!(query.search(), Some("rex"));
    }

    #[test]
    fn total_pages_rounds_up() {
        let query =
            ListQuery::new(2, 10, None).unwrap_or_else(|error| panic!("valid query: {error}"));
        let page = Page::new(vec![1, 2, 3], 23, &query);
        assert_eq!(page.total_pages(), 3);
        assert_eq!(query.offset(), 10);

        let empty = Page::<u8>::new(Vec::new(), 0, &query);
        assert_eq!(empty.total_pages(), 0);
    }

    proptest! {
        #[test]
        fn limit_is_accepted_only_inside_bounds(limit in -50_i64..200) {
            let accepted = ListQuery::new(1, limit, None).is_ok();
            prop_assert_eq!(accepted, (1..=100).contains(&limit));
        }
    }
}
