//! Shared application state injected into handlers.

use std::sync::Arc;
use taskinbox_core::{InMemoryTaskRepository, TaskService};

/// Handle to the process-wide task service.
///
/// Cloning shares the same collection.
#[derive(Clone)]
pub struct AppState {
    tasks: Arc<TaskService<InMemoryTaskRepository>>,
}

impl AppState {
    pub fn new(tasks: TaskService<InMemoryTaskRepository>) -> Self {
        Self {
            tasks: Arc::new(tasks),
        }
    }

    /// Creates state over an empty in-memory collection.
    pub fn in_memory() -> Self {
        Self::new(TaskService::new(InMemoryTaskRepository::new()))
    }

    pub fn tasks(&self) -> &TaskService<InMemoryTaskRepository> {
        &self.tasks
    }
}
