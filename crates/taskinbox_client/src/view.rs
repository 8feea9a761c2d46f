//! Renderable projection of the inbox mirror.

use std::fmt::{Display, Formatter};
use taskinbox_core::{trim_title, Task, TaskId};

pub const EMPTY_MESSAGE: &str = "No tasks yet. Add one above!";
const INBOX_TITLE: &str = "Task Inbox";

/// One rendered task line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    /// 1-based position in the list, used by the terminal front end.
    pub position: usize,
    pub id: TaskId,
    pub title: String,
    pub completed: bool,
    /// `Complete` for open tasks, `Undo` for completed ones.
    pub toggle_label: &'static str,
}

impl TaskRow {
    fn from_task(position: usize, task: &Task) -> Self {
        Self {
            position,
            id: task.id,
            title: task.title.clone(),
            completed: task.completed,
            toggle_label: if task.completed { "Undo" } else { "Complete" },
        }
    }
}

/// Snapshot of everything the inbox screen shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboxView {
    pub rows: Vec<TaskRow>,
    pub input: String,
    /// False while a create is in flight.
    pub input_enabled: bool,
    /// False while a create is in flight or the trimmed input is empty.
    pub add_enabled: bool,
}

impl InboxView {
    pub fn new(tasks: &[Task], input: &str, creating: bool) -> Self {
        Self {
            rows: tasks
                .iter()
                .enumerate()
                .map(|(index, task)| TaskRow::from_task(index + 1, task))
                .collect(),
            input: input.to_string(),
            input_enabled: !creating,
            add_enabled: !creating && !trim_title(input).is_empty(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Finds the row at a 1-based position.
    pub fn row(&self, position: usize) -> Option<&TaskRow> {
        position.checked_sub(1).and_then(|index| self.rows.get(index))
    }
}

impl Display for InboxView {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{INBOX_TITLE}")?;
        if self.rows.is_empty() {
            return writeln!(f, "  {EMPTY_MESSAGE}");
        }
        for row in &self.rows {
            writeln!(
                f,
                "  {:>2}. [{}] {}  ({} | Delete)",
                row.position,
                if row.completed { 'x' } else { ' ' },
                row.title,
                row.toggle_label
            )?;
        }
        Ok(())
    }
}
