//! API request handlers
//!
//! Handler functions organized by resource.

pub mod health;
pub mod subtasks;
pub mod tasks;

pub use health::health;
pub use subtasks::{create_subtask, delete_subtask, get_subtask, list_subtasks, update_subtask};
pub use tasks::{create_task, delete_task, get_task, list_tasks, task_history, update_task};
