//! Paging query parameters

use serde::{Deserialize, Serialize};

use crate::api::error::ApiResult;
use crate::api::middleware::validation::{validate_pagination, validate_sort_order};
use crate::paging::{PageRequest, DEFAULT_LIMIT, DEFAULT_PAGE};

/// `?page=&limit=&order=` on listing endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageQuery {
    /// 1-based page number (default 1)
    pub page: Option<i64>,

    /// Page size (default 10)
    pub limit: Option<i64>,

    /// `asc` or `desc`, any case; absent means the listing's default
    pub order: Option<String>,
}

impl PageQuery {
    pub fn into_page_request(self) -> ApiResult<PageRequest> {
        let (page, limit) = validate_pagination(
            self.page.unwrap_or(i64::from(DEFAULT_PAGE)),
            self.limit.unwrap_or(i64::from(DEFAULT_LIMIT)),
        )?;

        let request = PageRequest::new(page, limit);
        match self.order.as_deref() {
            Some(order) => Ok(request.with_order(validate_sort_order(order)?)),
            None => Ok(request),
        }
    }
}
