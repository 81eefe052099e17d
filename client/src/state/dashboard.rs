//! Dashboard and team-page summaries.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use serde::Serialize;

use super::model::{Priority, Task, TaskStatus};

/// Role label for the first member of a roster.
pub const MANAGER_ROLE: &str = "Manager";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PriorityCount {
    pub priority: Priority,
    pub count: usize,
}

/// Tasks assigned to `user_id`, counted per priority from High to Low.
#[must_use]
pub fn priority_breakdown(tasks: &[Task], user_id: &str) -> Vec<PriorityCount> {
    Priority::ALL
        .iter()
        .map(|priority| PriorityCount {
            priority: *priority,
            count: tasks
                .iter()
                .filter(|t| t.assignee_id.as_deref() == Some(user_id) && t.priority == *priority)
                .count(),
        })
        .collect()
}

/// A member's unfinished tasks within one project.
#[must_use]
pub fn open_tasks_for_member<'a>(tasks: &'a [Task], project_id: &str, user_id: &str) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|t| {
            t.project_id == project_id
                && t.assignee_id.as_deref() == Some(user_id)
                && t.status != TaskStatus::Done
        })
        .collect()
}

/// Display role by roster position; the first member manages the project.
#[must_use]
pub fn member_role(index: usize) -> &'static str {
    if index == 0 { MANAGER_ROLE } else { super::model::DEFAULT_ROLE }
}
