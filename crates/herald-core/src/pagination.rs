//! Pagination block derivation.

use serde::{Deserialize, Serialize};

/// Caller-supplied paging inputs. `page` is 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParams {
    /// Current page, starting at 1.
    pub page: u64,
    /// Page size.
    pub limit: u64,
    /// Total number of items across all pages.
    pub total: u64,
}

impl PageParams {
    /// Creates paging inputs.
    #[must_use]
    pub const fn new(page: u64, limit: u64, total: u64) -> Self {
        Self { page, limit, total }
    }
}

/// Pagination block of a paginated envelope.
///
/// # Example
///
/// ```
/// use herald_core::{PageParams, Pagination};
///
/// let p = Pagination::from_params(PageParams::new(2, 10, 25));
/// assert_eq!(p.total_pages, 3);
/// assert!(p.has_next_page);
/// assert!(p.has_prev_page);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Current page.
    pub page: u64,
    /// Page size.
    pub limit: u64,
    /// Total item count.
    pub total: u64,
    /// `ceil(total / limit)`.
    pub total_pages: u64,
    /// `page < total_pages`.
    pub has_next_page: bool,
    /// `page > 1`.
    pub has_prev_page: bool,
}

impl Pagination {
    /// Derives the pagination block.
    ///
    /// A `limit` of zero yields zero pages rather than dividing by zero.
    /// Inputs are otherwise not validated, so a `page` beyond `total_pages`
    /// is reported as-is.
    #[must_use]
    pub const fn from_params(params: PageParams) -> Self {
        let total_pages = if params.limit == 0 {
            0
        } else {
            params.total.div_ceil(params.limit)
        };

        Self {
            page: params.page,
            limit: params.limit,
            total: params.total,
            total_pages,
            has_next_page: params.page < total_pages,
            has_prev_page: params.page > 1,
        }
    }
}

impl From<PageParams> for Pagination {
    fn from(params: PageParams) -> Self {
        Self::from_params(params)
    }
}
