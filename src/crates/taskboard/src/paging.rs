//! Paging contracts shared by the storage, service and API layers
//!
//! Pages are 1-based. A listing request carries a page number, a page size
//! and an optional sort order on creation time; each listing decides its own
//! default order when none is supplied.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Page used when the caller does not ask for one
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when the caller does not ask for one
pub const DEFAULT_LIMIT: u32 = 10;

/// Sort direction on creation timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Oldest first
    Asc,
    /// Newest first
    Desc,
}

impl SortOrder {
    /// SQL keyword for this direction
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(format!("order must be 'asc' or 'desc', got '{}'", value)),
        }
    }
}

/// A validated page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number
    pub page: u32,
    /// Maximum number of items on the page
    pub limit: u32,
    /// Requested order, `None` means the listing's default
    pub order: Option<SortOrder>,
}

impl PageRequest {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            order: None,
        }
    }

    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Number of rows to skip before this page
    pub fn offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1)) * i64::from(self.limit)
    }

    /// The requested order, or `default` when none was given
    pub fn order_or(&self, default: SortOrder) -> SortOrder {
        self.order.unwrap_or(default)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_LIMIT)
    }
}

/// Paging metadata returned alongside a page of items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Total number of items across all pages
    pub total: i64,
    /// Page number that was served
    pub page: u32,
    /// `ceil(total / limit)`
    pub total_pages: i64,
}

impl PageMeta {
    pub fn new(total: i64, page: u32, limit: u32) -> Self {
        let total_pages = if limit == 0 || total <= 0 {
            0
        } else {
            let limit = i64::from(limit);
            (total + limit - 1) / limit
        };

        Self {
            total,
            page,
            total_pages,
        }
    }
}

/// One page of items plus its metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedResult<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T> PagedResult<T> {
    pub fn new(data: Vec<T>, total: i64, request: &PageRequest) -> Self {
        Self {
            data,
            meta: PageMeta::new(total, request.page, request.limit),
        }
    }

    /// Convert every item while keeping the metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedResult<U> {
        PagedResult {
            data: self.data.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}
