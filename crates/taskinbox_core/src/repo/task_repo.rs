//! Task repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Provide create/get/list/update/delete over the canonical task collection.
//! - Allocate task identifiers.
//!
//! # Invariants
//! - Identifiers are strictly increasing and never reissued, even after the
//!   task holding the highest identifier is deleted.
//! - Listing order equals creation order. Tasks are keyed by identifier and
//!   identifiers grow with creation time, so ordered-map iteration is creation
//!   order.
//! - Every operation completes its read-modify-write under one lock, so no
//!   caller observes a partially applied write.

use crate::model::task::{Task, TaskId, TaskValidationError};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use thiserror::Error;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for task storage operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepoError {
    #[error(transparent)]
    Validation(#[from] TaskValidationError),
    #[error("task not found: {0}")]
    NotFound(TaskId),
}

/// Input for creating one task. The repository assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// Repository interface for task CRUD operations.
pub trait TaskRepository {
    /// Allocates the next identifier, stores an active task and returns it.
    fn create_task(&self, new_task: &NewTask) -> RepoResult<Task>;
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    /// Returns all tasks in creation order.
    fn list_tasks(&self) -> RepoResult<Vec<Task>>;
    /// Sets `completed` and returns the stored task after the write.
    fn set_completed(&self, id: TaskId, completed: bool) -> RepoResult<Task>;
    fn delete_task(&self, id: TaskId) -> RepoResult<()>;
}

/// Process-memory task repository.
///
/// Starts empty and is discarded with the process.
#[derive(Debug)]
pub struct InMemoryTaskRepository {
    state: Mutex<StoreState>,
}

#[derive(Debug)]
struct StoreState {
    tasks: BTreeMap<TaskId, Task>,
    next_id: TaskId,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(StoreState {
                tasks: BTreeMap::new(),
                next_id: TaskId::FIRST,
            }),
        }
    }
}

impl Default for InMemoryTaskRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskRepository for InMemoryTaskRepository {
    fn create_task(&self, new_task: &NewTask) -> RepoResult<Task> {
        let mut state = self.state.lock();
        // Rejected input must not consume an identifier.
        let task = Task::new(state.next_id, &new_task.title, new_task.created_at)?;
        state.next_id = task.id.next();
        state.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        Ok(self.state.lock().tasks.get(&id).cloned())
    }

    fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        Ok(self.state.lock().tasks.values().cloned().collect())
    }

    fn set_completed(&self, id: TaskId, completed: bool) -> RepoResult<Task> {
        let mut state = self.state.lock();
        let task = state.tasks.get_mut(&id).ok_or(RepoError::NotFound(id))?;
        task.completed = completed;
        Ok(task.clone())
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        self.state
            .lock()
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound(id))
    }
}
