//! Repository pattern implementations for database access
//!
//! Repositories are stateless and take the pool on every call. They carry no
//! business rules: missing rows come back as `None` or `false`.

pub mod subtask_repo;
pub mod task_history_repo;
pub mod task_repo;

pub use subtask_repo::SubTaskRepository;
pub use task_history_repo::TaskHistoryRepository;
pub use task_repo::TaskRepository;
