//! Task use-case service.
//!
//! # Responsibility
//! - Provide the list/create/toggle/delete entry points used by the HTTP layer.
//! - Normalize raw request candidates (title text, completion flag) into
//!   repository calls.
//!
//! # Invariants
//! - A failed operation leaves the collection unchanged.
//! - Only `update_task` changes `completed`; nothing changes `title`.
//! - Service log lines never include task titles.

use crate::model::task::{normalize_title, Task, TaskId, TaskValidationError};
use crate::repo::task_repo::{NewTask, RepoError, TaskRepository};
use chrono::{DateTime, Utc};
use log::{info, warn};
use thiserror::Error;

/// Source of creation timestamps.
pub type Clock = fn() -> DateTime<Utc>;

/// Service error for task use-cases.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskServiceError {
    /// Create input carried no usable title.
    #[error(transparent)]
    Validation(#[from] TaskValidationError),
    /// Target task does not exist (never existed or was deleted).
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
}

impl From<RepoError> for TaskServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::NotFound(id) => Self::TaskNotFound(id),
        }
    }
}

/// Task service facade over repository implementations.
pub struct TaskService<R: TaskRepository> {
    repo: R,
    clock: Clock,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a service stamping tasks with the system clock.
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, Utc::now)
    }

    pub fn with_clock(repo: R, clock: Clock) -> Self {
        Self { repo, clock }
    }

    /// Lists every task in creation order.
    pub fn list_tasks(&self) -> Result<Vec<Task>, TaskServiceError> {
        Ok(self.repo.list_tasks()?)
    }

    /// Gets one task by identifier.
    pub fn get_task(&self, id: TaskId) -> Result<Task, TaskServiceError> {
        self.repo
            .get_task(id)?
            .ok_or(TaskServiceError::TaskNotFound(id))
    }

    /// Creates a task from a raw title candidate.
    ///
    /// `None` stands for an absent or non-text title.
    ///
    /// # Errors
    /// - `Validation` when the candidate is absent or blank after trimming.
    pub fn create_task(&self, title: Option<&str>) -> Result<Task, TaskServiceError> {
        let title = match normalize_title(title) {
            Ok(title) => title,
            Err(err) => {
                warn!("event=task_create module=service status=error error_code=title_required");
                return Err(err.into());
            }
        };

        let task = self.repo.create_task(&NewTask {
            title,
            created_at: (self.clock)(),
        })?;
        info!(
            "event=task_create module=service status=ok task_id={} title_len={}",
            task.id,
            task.title.chars().count()
        );
        Ok(task)
    }

    /// Applies a completion update.
    ///
    /// `completed = None` stands for an absent or non-boolean value and leaves
    /// the task unchanged; the current task is still returned.
    ///
    /// # Errors
    /// - `TaskNotFound` when no task has this identifier.
    pub fn update_task(
        &self,
        id: TaskId,
        completed: Option<bool>,
    ) -> Result<Task, TaskServiceError> {
        let result: Result<Task, TaskServiceError> = match completed {
            Some(completed) => self.repo.set_completed(id, completed).map_err(Into::into),
            None => self.get_task(id),
        };

        match &result {
            Ok(task) => info!(
                "event=task_update module=service status=ok task_id={} completed={} applied={}",
                task.id,
                task.completed,
                completed.is_some()
            ),
            Err(err) => warn!(
                "event=task_update module=service status=error task_id={} error={}",
                id, err
            ),
        }
        result
    }

    /// Removes a task permanently.
    ///
    /// # Errors
    /// - `TaskNotFound` when no task has this identifier.
    pub fn delete_task(&self, id: TaskId) -> Result<(), TaskServiceError> {
        match self.repo.delete_task(id) {
            Ok(()) => {
                info!("event=task_delete module=service status=ok task_id={id}");
                Ok(())
            }
            Err(err) => {
                warn!(
                    "event=task_delete module=service status=error task_id={} error={}",
                    id, err
                );
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{TaskService, TaskServiceError};
    use crate::model::task::TaskId;
    use crate::repo::task_repo::InMemoryTaskRepository;
    use chrono::{DateTime, TimeZone, Utc};

    fn fixed_clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap()
    }

    #[test]
    fn create_uses_injected_clock() {
        let service = TaskService::with_clock(InMemoryTaskRepository::new(), fixed_clock);
        let task = service.create_task(Some("Water plants")).unwrap();
        assert_eq!(task.created_at, fixed_clock());
    }

    #[test]
    fn update_without_value_reports_missing_task() {
        let service = TaskService::new(InMemoryTaskRepository::new());
        let err = service.update_task(TaskId::new(9), None).unwrap_err();
        assert_eq!(err, TaskServiceError::TaskNotFound(TaskId::new(9)));
    }
}
