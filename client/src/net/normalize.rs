//! Backend record → view model.
//!
//! DESIGN
//! ======
//! Every function here is pure. Defaults are applied only to the fields the
//! view model documents as defaulted (avatar, role, bio, description, tags,
//! comment count, attendees, action items); everything else is copied
//! through as-is, including `None`.

#[cfg(test)]
#[path = "normalize_test.rs"]
mod normalize_test;

use std::collections::HashSet;

use super::types::{RawMeeting, RawProject, RawTask, RawUser};
use crate::state::model::{DEFAULT_AVATAR_URL, DEFAULT_ROLE, Meeting, Project, Task, User};

#[must_use]
pub fn normalize_user(raw: &RawUser) -> User {
    let avatar = raw
        .avatar
        .as_deref()
        .filter(|url| !url.is_empty())
        .unwrap_or(DEFAULT_AVATAR_URL);
    User {
        id: raw.id.clone(),
        name: raw.name.clone(),
        username: raw.username.clone(),
        email: raw.email.clone(),
        avatar: avatar.to_owned(),
        role: DEFAULT_ROLE.to_owned(),
        bio: String::new(),
    }
}

/// Flatten embedded members to their ids, preserving backend order.
#[must_use]
pub fn normalize_project(raw: &RawProject) -> Project {
    Project {
        id: raw.id.clone(),
        name: raw.name.clone(),
        description: raw.description.clone().unwrap_or_default(),
        members: raw.members.iter().map(|member| member.id.clone()).collect(),
    }
}

/// Lift the members embedded across a batch of projects into one user list.
///
/// Each user id is normalized once; the first occurrence wins and output
/// order is first-seen order.
#[must_use]
pub fn extract_users_from_project_batch(projects: &[RawProject]) -> Vec<User> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut users = Vec::new();
    for member in projects.iter().flat_map(|project| project.members.iter()) {
        if seen.insert(member.id.as_str()) {
            users.push(normalize_user(member));
        }
    }
    users
}

/// Projects plus the users embedded in them, as loaded at session start.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InitialData {
    pub projects: Vec<Project>,
    pub users: Vec<User>,
}

#[must_use]
pub fn normalize_initial_data(projects: &[RawProject]) -> InitialData {
    InitialData {
        projects: projects.iter().map(normalize_project).collect(),
        users: extract_users_from_project_batch(projects),
    }
}

#[must_use]
pub fn normalize_task(raw: &RawTask) -> Task {
    Task {
        id: raw.id.clone(),
        title: raw.title.clone(),
        description: raw.description.clone().unwrap_or_default(),
        status: raw.status,
        priority: raw.priority,
        tags: raw.tags.clone().unwrap_or_default(),
        start_date: raw.created_at.clone(),
        due_date: raw.due_date.clone(),
        author_id: raw.author_id.clone(),
        assignee_id: raw.assignee_id.clone(),
        project_id: raw.project_id.clone(),
        comments: raw.comments.unwrap_or(0),
    }
}

/// Action items keep only the titles of the AI's task objects.
#[must_use]
pub fn normalize_meeting(raw: &RawMeeting) -> Meeting {
    Meeting {
        id: raw.id.clone(),
        title: raw.title.clone(),
        description: raw.description.clone().unwrap_or_default(),
        start_date: raw.start_date.clone(),
        end_date: raw.end_date.clone(),
        attendees: raw.attendee_ids.clone().unwrap_or_default(),
        recording_url: raw.recording_url.clone(),
        transcript: raw.transcript.clone(),
        project_id: raw.project_id.clone(),
        ai_summary: raw.summary.clone(),
        ai_action_items: raw
            .ai_tasks
            .iter()
            .flatten()
            .map(|task| task.title.clone())
            .collect(),
    }
}
