//! Pagination parameters and page results.
//!
//! Page numbers are 1-based, with page 0 treated as page 1. A page size of 0
//! selects [`DEFAULT_PAGE_SIZE`]. The resulting skip is decremented by one
//! whenever it is positive, so consecutive pages overlap by one row:
//!
//! | page_size | page_number | skip | limit |
//! |-----------|-------------|------|-------|
//! | 2         | 0           | 0    | 2     |
//! | 2         | 1           | 0    | 2     |
//! | 2         | 2           | 1    | 2     |
//! | 2         | 3           | 3    | 2     |
//! | 0         | 2           | 9    | 10    |

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Page size used when a request asks for a page size of 0.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Paging parameters exactly as the caller supplied them.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    /// Rows per page; 0 selects the default.
    #[serde(default)]
    pub page_size: i64,
    /// 1-based page number; 0 behaves like 1.
    #[serde(default)]
    pub page_number: i64,
}

/// Skip/limit pair handed to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Leading matches to discard.
    pub skip: u64,
    /// Maximum matches to return.
    pub limit: u64,
}

impl PageRequest {
    pub fn new(page_size: i64, page_number: i64) -> Self {
        Self { page_size, page_number }
    }

    /// Resolves this request into the skip/limit pair sent to the store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] for a negative page size or page number,
    /// or when the skip does not fit the store's range.
    pub fn window(&self) -> StoreResult<PageWindow> {
        if self.page_size < 0 {
            return Err(StoreError::Validation(format!(
                "page size must not be negative, got {}",
                self.page_size
            )));
        }
        if self.page_number < 0 {
            return Err(StoreError::Validation(format!(
                "page number must not be negative, got {}",
                self.page_number
            )));
        }

        let limit = match self.page_size {
            0 => DEFAULT_PAGE_SIZE,
            size => size,
        };

        let mut skip = (self.page_number - 1)
            .max(0)
            .checked_mul(limit)
            .ok_or_else(|| {
                StoreError::Validation(format!(
                    "page {} of size {} is out of range",
                    self.page_number, limit
                ))
            })?;

        if skip > 0 {
            skip -= 1;
        }

        Ok(PageWindow {
            skip: skip as u64,
            limit: limit as u64,
        })
    }
}

/// One page of results together with the paging parameters that produced it.
///
/// There is no total count: callers learn whether more rows exist only by
/// requesting the next page.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_size: i64,
    pub page_number: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest) -> Self {
        Self {
            items,
            page_size: request.page_size,
            page_number: request.page_number,
        }
    }

    /// Returns `true` if this page holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
