//! Request validation utilities
//!
//! Field checks run by the request models before anything reaches a service.
//! Every failure is an `InputValidation` error.

use crate::api::error::{ApiError, ApiResult};
use crate::db::models::TaskState;
use crate::paging::SortOrder;

/// Validate that a required string field is not empty or blank
pub fn validate_not_empty(value: &str, field_name: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(ApiError::InputValidation(format!(
            "{} cannot be empty",
            field_name
        )));
    }
    Ok(())
}

/// Validate string length constraints, counted in characters
pub fn validate_string_length(
    value: &str,
    field_name: &str,
    min: usize,
    max: usize,
) -> ApiResult<()> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(ApiError::InputValidation(format!(
            "{} must be between {} and {} characters",
            field_name, min, max
        )));
    }
    Ok(())
}

/// Validate that a priority lies in `[min, max]`
pub fn validate_priority(priority: i64, min: i64, max: i64) -> ApiResult<()> {
    if priority < min || priority > max {
        return Err(ApiError::InputValidation(format!(
            "priority must be between {} and {}",
            min, max
        )));
    }
    Ok(())
}

/// Validate pagination parameters and narrow them to `u32`
pub fn validate_pagination(page: i64, limit: i64) -> ApiResult<(u32, u32)> {
    let page = u32::try_from(page)
        .ok()
        .filter(|p| *p >= 1)
        .ok_or_else(|| ApiError::InputValidation("page must be at least 1".to_string()))?;
    let limit = u32::try_from(limit)
        .ok()
        .filter(|l| *l >= 1)
        .ok_or_else(|| ApiError::InputValidation("limit must be at least 1".to_string()))?;
    Ok((page, limit))
}

/// Validate a sort order, ignoring case
pub fn validate_sort_order(value: &str) -> ApiResult<SortOrder> {
    value.parse().map_err(ApiError::InputValidation)
}

/// Validate a task state name
pub fn validate_task_state(value: &str) -> ApiResult<TaskState> {
    value.parse().map_err(ApiError::InputValidation)
}
