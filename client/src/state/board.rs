//! Kanban board grouping.
//!
//! The board always shows one column per workflow status, in workflow
//! order, even when a column is empty. Tasks keep the order they arrived in.

#[cfg(test)]
#[path = "board_test.rs"]
mod board_test;

use serde::Serialize;

use super::model::{Task, TaskStatus};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BoardColumn<'a> {
    pub status: TaskStatus,
    pub tasks: Vec<&'a Task>,
}

impl BoardColumn<'_> {
    #[must_use]
    pub fn count(&self) -> usize {
        self.tasks.len()
    }
}

/// Split tasks into the three board columns.
#[must_use]
pub fn group_by_status<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Vec<BoardColumn<'a>> {
    let mut columns: Vec<BoardColumn<'a>> = TaskStatus::ALL
        .iter()
        .map(|status| BoardColumn { status: *status, tasks: Vec::new() })
        .collect();
    for task in tasks {
        if let Some(column) = columns.iter_mut().find(|c| c.status == task.status) {
            column.tasks.push(task);
        }
    }
    columns
}
