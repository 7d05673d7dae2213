//! API data transfer objects (DTOs) and response models
//!
//! Provides request/response structures for API endpoints with validation.

pub mod health;
pub mod paging;
pub mod subtask;
pub mod task;

pub use health::HealthResponse;
pub use paging::PageQuery;
pub use subtask::{SubTaskRequest, SubTaskResponse};
pub use task::{TaskHistoryResponse, TaskRequest, TaskResponse};
