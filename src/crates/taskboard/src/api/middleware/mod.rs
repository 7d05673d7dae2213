//! API middleware layer
//!
//! Provides request logging and the validation helpers used by the request
//! models.

pub mod logging;
pub mod validation;

pub use logging::logging_layer;
pub use validation::{
    validate_not_empty, validate_pagination, validate_priority, validate_sort_order,
    validate_string_length, validate_task_state,
};
