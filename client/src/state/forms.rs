//! Form-shaped inputs the UI hands to the API layer.
//!
//! DESIGN
//! ======
//! Create forms are complete records. `TaskUpdate` is a partial record: every
//! field is optional and only the ones the caller set travel to the backend.
//! The set of recognized update keys is the closed enum `TaskUpdateField`.

#[cfg(test)]
#[path = "forms_test.rs"]
mod forms_test;

use serde::{Deserialize, Serialize};

use super::model::{Priority, TaskStatus};

/// Input for creating a project.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCreate {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub member_ids: Vec<String>,
}

/// Input for creating a task. The author comes from the session, not the form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub priority: Priority,
    pub project_id: String,
    pub assignee_id: Option<String>,
    /// Date or date-time as typed into the form.
    pub due_date: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Input for scheduling a meeting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingCreate {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub project_id: String,
    #[serde(default)]
    pub attendees: Vec<String>,
    pub recording_url: Option<String>,
    pub transcript: Option<String>,
    pub summary: Option<String>,
}

/// Input for account registration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Keys a partial task update may carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TaskUpdateField {
    Title,
    Description,
    Status,
    Priority,
    Tags,
    StartDate,
    DueDate,
    AssigneeId,
}

impl TaskUpdateField {
    pub const ALL: [Self; 8] = [
        Self::Title,
        Self::Description,
        Self::Status,
        Self::Priority,
        Self::Tags,
        Self::StartDate,
        Self::DueDate,
        Self::AssigneeId,
    ];

    /// Key in the view model.
    #[must_use]
    pub fn view_key(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Status => "status",
            Self::Priority => "priority",
            Self::Tags => "tags",
            Self::StartDate => "startDate",
            Self::DueDate => "dueDate",
            Self::AssigneeId => "assigneeId",
        }
    }

    /// Key in the backend payload.
    #[must_use]
    pub fn backend_key(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Status => "status",
            Self::Priority => "priority",
            Self::Tags => "tags",
            Self::StartDate => "start_date",
            Self::DueDate => "due_date",
            Self::AssigneeId => "assignee_id",
        }
    }
}

/// Partial task edit. `None` means "leave unchanged".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
}

impl TaskUpdate {
    /// Whether `field` carries a value that should be sent.
    ///
    /// Empty strings count as unset. An empty tag list is a real value
    /// (it clears the tags).
    #[must_use]
    pub fn is_set(&self, field: TaskUpdateField) -> bool {
        match field {
            TaskUpdateField::Title => present(self.title.as_deref()).is_some(),
            TaskUpdateField::Description => present(self.description.as_deref()).is_some(),
            TaskUpdateField::Status => self.status.is_some(),
            TaskUpdateField::Priority => self.priority.is_some(),
            TaskUpdateField::Tags => self.tags.is_some(),
            TaskUpdateField::StartDate => present(self.start_date.as_deref()).is_some(),
            TaskUpdateField::DueDate => present(self.due_date.as_deref()).is_some(),
            TaskUpdateField::AssigneeId => present(self.assignee_id.as_deref()).is_some(),
        }
    }

    /// Fields that will be sent, in canonical order.
    #[must_use]
    pub fn set_fields(&self) -> Vec<TaskUpdateField> {
        TaskUpdateField::ALL.into_iter().filter(|field| self.is_set(*field)).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.set_fields().is_empty()
    }
}

/// `Some` only for non-empty strings.
pub(crate) fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
