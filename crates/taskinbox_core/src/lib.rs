//! Core domain logic for the task inbox.
//! This crate is the single source of truth for task invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{
    active_log_spec, default_log_level, init_logging, sanitize_message, start_logging, LogSpec,
    LogTarget, LoggingError,
};
pub use model::task::{
    format_timestamp, normalize_title, trim_title, ParseTaskIdError, Task, TaskId,
    TaskValidationError, TITLE_REQUIRED_MESSAGE,
};
pub use repo::task_repo::{InMemoryTaskRepository, NewTask, RepoError, RepoResult, TaskRepository};
pub use service::task_service::{Clock, TaskService, TaskServiceError};
