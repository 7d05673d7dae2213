//! Domain services
//!
//! Services own the business rules that span the task/subtask boundary and
//! translate storage results into classified [`ServiceError`]s. They are built
//! explicitly from a pool; nothing is registered globally.

pub mod error;
pub mod subtask;
pub mod task;

pub use error::{ErrorKind, ServiceError, ServiceResult};
pub use subtask::{NewSubTask, SubTaskChanges, SubTaskService};
pub use task::{ensure_task_exists, NewTask, TaskChanges, TaskService};
