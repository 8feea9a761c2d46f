//! Inbox state machine: the local mirror and the actions that reconcile it.
//!
//! # Responsibility
//! - Hold the mirror, the pending input text and the in-flight create flag.
//! - Forward user intents to `TaskApi` and apply confirmed responses.
//!
//! # Invariants
//! - At most one create is in flight per inbox (single-flight). Submissions
//!   made while one is pending are suppressed, not queued.
//! - The state lock is never held across a request, so concurrent callers
//!   always observe the in-flight flag.
//! - Failures are logged and returned; the mirror and input stay untouched.

use crate::api::TaskApi;
use crate::error::ClientError;
use crate::view::InboxView;
use log::{error, info};
use parking_lot::Mutex;
use taskinbox_core::{trim_title, Task, TaskId};

/// Result of a user action that completed without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The server confirmed the action and the mirror was updated.
    Applied,
    /// The action was a no-op (blank input, create in flight, unknown row).
    Skipped,
}

#[derive(Debug, Default)]
struct InboxState {
    tasks: Vec<Task>,
    input: String,
    creating: bool,
}

/// Client-side task inbox over a `TaskApi` transport.
pub struct TaskInbox<A: TaskApi> {
    api: A,
    state: Mutex<InboxState>,
}

impl<A: TaskApi> TaskInbox<A> {
    /// Creates an inbox with an empty mirror. Call `load` to populate it.
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: Mutex::new(InboxState::default()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Snapshot of the mirror in server order.
    pub fn tasks(&self) -> Vec<Task> {
        self.state.lock().tasks.clone()
    }

    pub fn input(&self) -> String {
        self.state.lock().input.clone()
    }

    /// Replaces the input text. Ignored while a create is in flight.
    pub fn set_input(&self, text: impl Into<String>) -> bool {
        let mut state = self.state.lock();
        if state.creating {
            return false;
        }
        state.input = text.into();
        true
    }

    pub fn is_creating(&self) -> bool {
        self.state.lock().creating
    }

    pub fn view(&self) -> InboxView {
        let state = self.state.lock();
        InboxView::new(&state.tasks, &state.input, state.creating)
    }

    /// Replaces the mirror with the server's list.
    pub async fn load(&self) -> Result<(), ClientError> {
        match self.api.list_tasks().await {
            Ok(tasks) => {
                info!(
                    "event=task_load module=client status=ok count={}",
                    tasks.len()
                );
                self.state.lock().tasks = tasks;
                Ok(())
            }
            Err(err) => {
                error!("event=task_load module=client status=error error={err}");
                Err(err)
            }
        }
    }

    /// Submits the current input as a new task.
    ///
    /// Skipped when the trimmed input is empty or another create is pending.
    /// On success the returned task is appended and the input is cleared.
    pub async fn submit(&self) -> Result<ActionOutcome, ClientError> {
        let title = {
            let mut state = self.state.lock();
            if state.creating || trim_title(&state.input).is_empty() {
                return Ok(ActionOutcome::Skipped);
            }
            state.creating = true;
            state.input.clone()
        };
        let _flight = CreateFlight { state: &self.state };

        match self.api.create_task(&title).await {
            Ok(task) => {
                info!(
                    "event=task_create module=client status=ok task_id={}",
                    task.id
                );
                let mut state = self.state.lock();
                state.tasks.push(task);
                state.input.clear();
                Ok(ActionOutcome::Applied)
            }
            Err(err) => {
                error!("event=task_create module=client status=error error={err}");
                Err(err)
            }
        }
    }

    /// Flips completion of a mirrored task.
    ///
    /// Sends the negation of the mirrored value and stores the task returned
    /// by the server. Skipped when the id is not in the mirror.
    pub async fn toggle(&self, id: TaskId) -> Result<ActionOutcome, ClientError> {
        let completed = {
            let state = self.state.lock();
            match state.tasks.iter().find(|task| task.id == id) {
                Some(task) => !task.completed,
                None => return Ok(ActionOutcome::Skipped),
            }
        };

        match self.api.update_task(id, completed).await {
            Ok(updated) => {
                info!(
                    "event=task_update module=client status=ok task_id={} completed={}",
                    updated.id, updated.completed
                );
                let mut state = self.state.lock();
                if let Some(slot) = state.tasks.iter_mut().find(|task| task.id == id) {
                    *slot = updated;
                }
                Ok(ActionOutcome::Applied)
            }
            Err(err) => {
                error!("event=task_update module=client status=error task_id={id} error={err}");
                Err(err)
            }
        }
    }

    /// Deletes a task and drops it from the mirror once the server confirms.
    pub async fn delete(&self, id: TaskId) -> Result<ActionOutcome, ClientError> {
        match self.api.delete_task(id).await {
            Ok(()) => {
                info!("event=task_delete module=client status=ok task_id={id}");
                self.state.lock().tasks.retain(|task| task.id != id);
                Ok(ActionOutcome::Applied)
            }
            Err(err) => {
                error!("event=task_delete module=client status=error task_id={id} error={err}");
                Err(err)
            }
        }
    }
}

/// Clears the in-flight flag when the create finishes or its future is dropped.
struct CreateFlight<'a> {
    state: &'a Mutex<InboxState>,
}

impl Drop for CreateFlight<'_> {
    fn drop(&mut self) {
        self.state.lock().creating = false;
    }
}
