use super::*;
use crate::state::model::{Priority, TaskStatus};
use serde_json::json;

// =============================================================
// Helpers
// =============================================================

fn raw_user(id: &str, avatar: Option<&str>) -> RawUser {
    RawUser {
        id: id.to_owned(),
        name: format!("User {id}"),
        username: id.to_owned(),
        email: format!("{id}@example.com"),
        avatar: avatar.map(str::to_owned),
    }
}

fn raw_project(id: &str, members: &[&str]) -> RawProject {
    RawProject {
        id: id.to_owned(),
        name: format!("Project {id}"),
        description: None,
        members: members.iter().map(|m| raw_user(m, None)).collect(),
    }
}

fn raw_task_json() -> serde_json::Value {
    json!({
        "id": "t1",
        "title": "Write docs",
        "description": "Cover the API",
        "status": "In Progress",
        "priority": "High",
        "tags": ["docs", "api"],
        "created_at": "2024-05-01T09:00:00",
        "due_date": "2024-05-03T17:00:00",
        "author_id": "u1",
        "assignee_id": "u2",
        "project_id": "p1",
        "comments": 3
    })
}

// =============================================================
// normalize_user
// =============================================================

#[test]
fn user_keeps_present_avatar() {
    let user = normalize_user(&raw_user("u1", Some("https://cdn.test/a.png")));
    assert_eq!(user.avatar, "https://cdn.test/a.png");
}

#[test]
fn user_missing_avatar_gets_placeholder() {
    assert_eq!(normalize_user(&raw_user("u1", None)).avatar, DEFAULT_AVATAR_URL);
}

#[test]
fn user_empty_avatar_gets_placeholder() {
    assert_eq!(normalize_user(&raw_user("u1", Some(""))).avatar, DEFAULT_AVATAR_URL);
}

#[test]
fn user_role_and_bio_are_fixed() {
    let user = normalize_user(&raw_user("u1", None));
    assert_eq!(user.role, DEFAULT_ROLE);
    assert_eq!(user.bio, "");
    assert_eq!(user.username, "u1");
    assert_eq!(user.email, "u1@example.com");
}

// =============================================================
// normalize_project
// =============================================================

#[test]
fn project_members_flatten_to_ids_in_order() {
    let project = normalize_project(&raw_project("p1", &["u3", "u1", "u2"]));
    assert_eq!(project.members, vec!["u3", "u1", "u2"]);
}

#[test]
fn project_missing_description_is_empty() {
    let project = normalize_project(&raw_project("p1", &[]));
    assert_eq!(project.description, "");
    assert!(project.members.is_empty());
}

#[test]
fn project_keeps_description() {
    let mut raw = raw_project("p1", &["u1"]);
    raw.description = Some("Moonshot".to_owned());
    assert_eq!(normalize_project(&raw).description, "Moonshot");
}

// =============================================================
// extract_users_from_project_batch
// =============================================================

#[test]
fn shared_member_collapses_to_one_user() {
    let batch = vec![raw_project("a", &["u1", "u2"]), raw_project("b", &["u2", "u3"])];
    let users = extract_users_from_project_batch(&batch);
    let ids: Vec<_> = users.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, vec!["u1", "u2", "u3"]);
}

#[test]
fn extraction_is_idempotent() {
    let batch = vec![raw_project("a", &["u1", "u2"]), raw_project("b", &["u2", "u3"])];
    assert_eq!(extract_users_from_project_batch(&batch), extract_users_from_project_batch(&batch));
}

#[test]
fn extraction_first_occurrence_wins() {
    let mut first = raw_project("a", &[]);
    first.members.push(raw_user("u1", Some("https://cdn.test/first.png")));
    let mut second = raw_project("b", &[]);
    second.members.push(raw_user("u1", Some("https://cdn.test/second.png")));

    let users = extract_users_from_project_batch(&[first, second]);
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].avatar, "https://cdn.test/first.png");
}

#[test]
fn extraction_user_set_is_order_independent() {
    let forward = vec![raw_project("a", &["u1", "u2"]), raw_project("b", &["u2", "u3"])];
    let reverse = vec![raw_project("b", &["u2", "u3"]), raw_project("a", &["u1", "u2"])];

    let mut left: Vec<_> = extract_users_from_project_batch(&forward).into_iter().map(|u| u.id).collect();
    let mut right: Vec<_> = extract_users_from_project_batch(&reverse).into_iter().map(|u| u.id).collect();
    left.sort();
    right.sort();
    assert_eq!(left, right);
}

#[test]
fn extraction_of_empty_batch_is_empty() {
    assert!(extract_users_from_project_batch(&[]).is_empty());
}

#[test]
fn duplicate_member_within_one_project_is_kept_once() {
    let users = extract_users_from_project_batch(&[raw_project("a", &["u1", "u1"])]);
    assert_eq!(users.len(), 1);
}

// =============================================================
// normalize_task
// =============================================================

#[test]
fn task_renames_backend_fields() {
    let raw: RawTask = serde_json::from_value(raw_task_json()).unwrap();
    let task = normalize_task(&raw);
    assert_eq!(task.start_date.as_deref(), Some("2024-05-01T09:00:00"));
    assert_eq!(task.due_date.as_deref(), Some("2024-05-03T17:00:00"));
    assert_eq!(task.author_id.as_deref(), Some("u1"));
    assert_eq!(task.assignee_id.as_deref(), Some("u2"));
    assert_eq!(task.project_id, "p1");
    assert_eq!(task.status, TaskStatus::InProgress);
    assert_eq!(task.priority, Priority::High);
    assert_eq!(task.comments, 3);
    assert_eq!(task.tags, vec!["docs", "api"]);
}

#[test]
fn task_defaults_optional_fields() {
    let raw: RawTask = serde_json::from_value(json!({
        "id": "t2",
        "title": "Bare",
        "description": null,
        "status": "To Do",
        "priority": "Low",
        "tags": null,
        "project_id": "p1"
    }))
    .unwrap();
    let task = normalize_task(&raw);
    assert_eq!(task.description, "");
    assert!(task.tags.is_empty());
    assert_eq!(task.comments, 0);
    assert!(task.start_date.is_none());
    assert!(task.due_date.is_none());
    assert!(task.assignee_id.is_none());
}

// =============================================================
// normalize_meeting
// =============================================================

#[test]
fn meeting_null_attendees_and_ai_titles() {
    let raw: RawMeeting = serde_json::from_value(json!({
        "id": "m1",
        "title": "Sync",
        "start_date": "2024-05-01T09:00:00",
        "end_date": "2024-05-01T10:00:00",
        "project_id": "p1",
        "attendee_ids": null,
        "ai_tasks": [{"title": "Fix bug"}, {"title": "Write docs"}]
    }))
    .unwrap();
    let meeting = normalize_meeting(&raw);
    assert_eq!(meeting.ai_action_items, vec!["Fix bug", "Write docs"]);
    assert!(meeting.attendees.is_empty());
}

#[test]
fn meeting_maps_dates_summary_and_recording() {
    let raw: RawMeeting = serde_json::from_value(json!({
        "id": "m2",
        "title": "Retro",
        "description": "Sprint 4",
        "start_date": "2024-05-02T14:00:00",
        "end_date": "2024-05-02T15:00:00",
        "attendee_ids": ["u1", "u2"],
        "recording_url": "http://localhost:8000/static/recordings/m2.webm",
        "transcript": "we shipped",
        "summary": "Shipped on time",
        "project_id": "p1"
    }))
    .unwrap();
    let meeting = normalize_meeting(&raw);
    assert_eq!(meeting.start_date, "2024-05-02T14:00:00");
    assert_eq!(meeting.end_date, "2024-05-02T15:00:00");
    assert_eq!(meeting.attendees, vec!["u1", "u2"]);
    assert_eq!(meeting.ai_summary.as_deref(), Some("Shipped on time"));
    assert_eq!(meeting.transcript.as_deref(), Some("we shipped"));
    assert!(meeting.recording_url.unwrap().ends_with("m2.webm"));
    assert!(meeting.ai_action_items.is_empty());
}

// =============================================================
// normalize_initial_data
// =============================================================

#[test]
fn initial_data_pairs_projects_with_deduplicated_users() {
    let batch = vec![raw_project("a", &["u1", "u2"]), raw_project("b", &["u2", "u3"])];
    let data = normalize_initial_data(&batch);
    assert_eq!(data.projects.len(), 2);
    assert_eq!(data.projects[1].members, vec!["u2", "u3"]);
    assert_eq!(data.users.len(), 3);
}
