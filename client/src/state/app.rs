//! Session store for normalized records.
//!
//! DESIGN
//! ======
//! One owned value holds every collection the pages read. Mutations go
//! through the methods below so invariants stay local: users are unique by
//! id, a project's member list never repeats an id, and a task or meeting
//! appears at most once.
//!
//! The store is a read/write-through view of the backend. It never invents
//! records; callers feed it what the API returned.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use super::forms::{TaskUpdate, TaskUpdateField};
use super::model::{Meeting, Project, Task, TaskStatus, User};
use crate::net::normalize::InitialData;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppState {
    pub current_user: Option<User>,
    pub users: Vec<User>,
    pub projects: Vec<Project>,
    pub tasks: Vec<Task>,
    pub meetings: Vec<Meeting>,
}

impl AppState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // USERS
    // =========================================================================

    pub fn set_current_user(&mut self, user: User) {
        self.merge_users(std::iter::once(user.clone()));
        self.current_user = Some(user);
    }

    /// Insert users, replacing any existing record with the same id.
    pub fn merge_users(&mut self, users: impl IntoIterator<Item = User>) {
        for user in users {
            match self.users.iter_mut().find(|u| u.id == user.id) {
                Some(existing) => *existing = user,
                None => self.users.push(user),
            }
        }
    }

    #[must_use]
    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    // =========================================================================
    // PROJECTS
    // =========================================================================

    /// Replace projects with a fresh load and merge the users lifted from them.
    pub fn load_initial_data(&mut self, data: InitialData) {
        self.projects = data.projects;
        self.merge_users(data.users);
    }

    pub fn add_project(&mut self, project: Project) {
        match self.projects.iter_mut().find(|p| p.id == project.id) {
            Some(existing) => *existing = project,
            None => self.projects.push(project),
        }
    }

    /// Record a new member. Returns `false` if the project is unknown.
    pub fn add_member(&mut self, project_id: &str, user: User) -> bool {
        let Some(project) = self.projects.iter_mut().find(|p| p.id == project_id) else {
            return false;
        };
        if !project.members.contains(&user.id) {
            project.members.push(user.id.clone());
        }
        self.merge_users(std::iter::once(user));
        true
    }

    #[must_use]
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Members of a project resolved to user records, in roster order.
    #[must_use]
    pub fn project_members(&self, project_id: &str) -> Vec<&User> {
        self.project(project_id)
            .map(|project| project.members.iter().filter_map(|id| self.user(id)).collect())
            .unwrap_or_default()
    }

    // =========================================================================
    // TASKS
    // =========================================================================

    /// Swap in a freshly fetched task list for one project.
    pub fn replace_project_tasks(&mut self, project_id: &str, tasks: Vec<Task>) {
        self.tasks.retain(|t| t.project_id != project_id);
        for task in tasks {
            self.upsert_task(task);
        }
    }

    pub fn upsert_task(&mut self, task: Task) {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(existing) => *existing = task,
            None => self.tasks.push(task),
        }
    }

    /// Optimistic board move. Returns `false` if the task is unknown.
    pub fn move_task(&mut self, task_id: &str, status: TaskStatus) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == task_id) {
            Some(task) => {
                task.status = status;
                true
            }
            None => false,
        }
    }

    /// Apply the set fields of a partial edit locally.
    ///
    /// Uses the same presence rule as the outgoing payload, so the local
    /// record matches what the backend was asked to change.
    pub fn apply_task_update(&mut self, task_id: &str, update: &TaskUpdate) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) else {
            return false;
        };
        for field in update.set_fields() {
            match field {
                TaskUpdateField::Title => {
                    if let Some(title) = &update.title {
                        task.title.clone_from(title);
                    }
                }
                TaskUpdateField::Description => {
                    if let Some(description) = &update.description {
                        task.description.clone_from(description);
                    }
                }
                TaskUpdateField::Status => {
                    if let Some(status) = update.status {
                        task.status = status;
                    }
                }
                TaskUpdateField::Priority => {
                    if let Some(priority) = update.priority {
                        task.priority = priority;
                    }
                }
                TaskUpdateField::Tags => {
                    if let Some(tags) = &update.tags {
                        task.tags.clone_from(tags);
                    }
                }
                TaskUpdateField::StartDate => task.start_date.clone_from(&update.start_date),
                TaskUpdateField::DueDate => task.due_date.clone_from(&update.due_date),
                TaskUpdateField::AssigneeId => task.assignee_id.clone_from(&update.assignee_id),
            }
        }
        true
    }

    pub fn remove_task(&mut self, task_id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != task_id);
        self.tasks.len() != before
    }

    #[must_use]
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    #[must_use]
    pub fn tasks_for_project(&self, project_id: &str) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.project_id == project_id).collect()
    }

    #[must_use]
    pub fn tasks_assigned_to(&self, user_id: &str) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.assignee_id.as_deref() == Some(user_id))
            .collect()
    }

    // =========================================================================
    // MEETINGS
    // =========================================================================

    pub fn replace_project_meetings(&mut self, project_id: &str, meetings: Vec<Meeting>) {
        self.meetings.retain(|m| m.project_id != project_id);
        for meeting in meetings {
            self.upsert_meeting(meeting);
        }
    }

    pub fn upsert_meeting(&mut self, meeting: Meeting) {
        match self.meetings.iter_mut().find(|m| m.id == meeting.id) {
            Some(existing) => *existing = meeting,
            None => self.meetings.push(meeting),
        }
    }

    #[must_use]
    pub fn meetings_for_project(&self, project_id: &str) -> Vec<&Meeting> {
        self.meetings.iter().filter(|m| m.project_id == project_id).collect()
    }
}
