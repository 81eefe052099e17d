//! View-model entities consumed by the UI layer.
//!
//! DESIGN
//! ======
//! These records are flat and camelCase on the wire so presentation code can
//! bind to them directly. Relations are identifiers only; the embedded
//! objects the backend sends are lifted into their own collections by the
//! normalizer.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use serde::{Deserialize, Serialize};

/// Avatar used when the backend has no image for a user.
pub const DEFAULT_AVATAR_URL: &str = "https://via.placeholder.com/150";

/// Role assigned to every user until the backend models roles.
pub const DEFAULT_ROLE: &str = "Member";

/// A workspace user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub username: String,
    pub email: String,
    pub avatar: String,
    /// Placeholder until the backend has an authorization model.
    pub role: String,
    pub bio: String,
}

/// A project with its member roster flattened to user ids.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Member user ids in backend order.
    pub members: Vec<String>,
}

/// Kanban workflow state of a task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "To Do")]
    Todo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Done")]
    Done,
}

impl TaskStatus {
    /// Every status in board column order.
    pub const ALL: [Self; 3] = [Self::Todo, Self::InProgress, Self::Done];

    /// Label shared by the backend and the board headers.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }

    /// Parse a backend/board label. Matching is exact.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == raw)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task urgency.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Highest first, matching dashboard chart order.
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|priority| priority.as_str() == raw)
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit of work on a project board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: Priority,
    pub tags: Vec<String>,
    /// Backend creation timestamp.
    pub start_date: Option<String>,
    pub due_date: Option<String>,
    pub author_id: Option<String>,
    pub assignee_id: Option<String>,
    pub project_id: String,
    /// Comment count.
    pub comments: u32,
}

/// A scheduled meeting and its AI-derived artifacts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub id: String,
    pub title: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    /// Attendee user ids.
    pub attendees: Vec<String>,
    pub recording_url: Option<String>,
    pub transcript: Option<String>,
    pub project_id: String,
    pub ai_summary: Option<String>,
    /// Titles of the tasks the AI pulled out of the transcript.
    pub ai_action_items: Vec<String>,
}
