use super::*;
use serde_json::json;

// =============================================================
// RawUser / RawProject
// =============================================================

#[test]
fn raw_user_tolerates_missing_avatar() {
    let user: RawUser =
        serde_json::from_value(json!({"id": "u1", "name": "Ann", "username": "ann", "email": "a@x.io"})).unwrap();
    assert!(user.avatar.is_none());
}

#[test]
fn raw_user_requires_id() {
    let err = serde_json::from_value::<RawUser>(json!({"name": "Ann", "username": "ann", "email": "a@x.io"}));
    assert!(err.is_err());
}

#[test]
fn raw_user_ignores_unknown_keys() {
    let user: RawUser = serde_json::from_value(json!({
        "id": "u1", "name": "Ann", "username": "ann", "email": "a@x.io", "is_active": true
    }))
    .unwrap();
    assert_eq!(user.id, "u1");
}

#[test]
fn raw_project_null_members_is_rejected() {
    let result = serde_json::from_value::<RawProject>(json!({"id": "p1", "name": "Apollo", "members": null}));
    assert!(result.is_err());
}

#[test]
fn raw_project_missing_members_is_rejected() {
    let result = serde_json::from_value::<RawProject>(json!({"id": "p1", "name": "Apollo"}));
    assert!(result.is_err());
}

#[test]
fn raw_project_empty_members_and_missing_description() {
    let project: RawProject = serde_json::from_value(json!({"id": "p1", "name": "Apollo", "members": []})).unwrap();
    assert!(project.members.is_empty());
    assert!(project.description.is_none());
}

// =============================================================
// RawTask
// =============================================================

#[test]
fn raw_task_reads_snake_case_fields() {
    let task: RawTask = serde_json::from_value(json!({
        "id": "t1",
        "title": "Write docs",
        "status": "In Progress",
        "priority": "Medium",
        "created_at": "2024-05-01T09:00:00",
        "due_date": "2024-05-03T17:00:00",
        "author_id": "u1",
        "assignee_id": null,
        "project_id": "p1"
    }))
    .unwrap();
    assert_eq!(task.status, TaskStatus::InProgress);
    assert_eq!(task.priority, Priority::Medium);
    assert_eq!(task.created_at.as_deref(), Some("2024-05-01T09:00:00"));
    assert!(task.assignee_id.is_none());
    assert!(task.comments.is_none());
}

#[test]
fn raw_task_accepts_integral_float_comment_count() {
    let task: RawTask = serde_json::from_value(json!({
        "id": "t1", "title": "A", "status": "Done", "priority": "Low", "project_id": "p1", "comments": 4.0
    }))
    .unwrap();
    assert_eq!(task.comments, Some(4));
}

#[test]
fn raw_task_rejects_negative_comment_count() {
    let result = serde_json::from_value::<RawTask>(json!({
        "id": "t1", "title": "A", "status": "Done", "priority": "Low", "project_id": "p1", "comments": -1
    }));
    assert!(result.is_err());
}

#[test]
fn raw_task_rejects_unknown_status() {
    let result = serde_json::from_value::<RawTask>(json!({
        "id": "t1", "title": "A", "status": "Blocked", "priority": "Low", "project_id": "p1"
    }));
    assert!(result.is_err());
}

// =============================================================
// RawMeeting
// =============================================================

#[test]
fn raw_meeting_ai_tasks_ignore_extra_keys() {
    let meeting: RawMeeting = serde_json::from_value(json!({
        "id": "m1",
        "title": "Sync",
        "start_date": "2024-05-01T09:00:00",
        "end_date": "2024-05-01T10:00:00",
        "project_id": "p1",
        "ai_tasks": [{"title": "Fix bug", "priority": "High", "assignee_name": "Alex"}]
    }))
    .unwrap();
    let tasks = meeting.ai_tasks.unwrap();
    assert_eq!(tasks, vec![RawAiTask { title: "Fix bug".to_owned() }]);
}

// =============================================================
// Auxiliary bodies
// =============================================================

#[test]
fn chat_request_serializes_null_project() {
    let body = ChatRequest { message: "hi", project_id: None, thread_id: "thread_1" };
    assert_eq!(
        serde_json::to_value(body).unwrap(),
        json!({"message": "hi", "project_id": null, "thread_id": "thread_1"})
    );
}

#[test]
fn token_response_parses_bearer_token() {
    let token: TokenResponse =
        serde_json::from_str(r#"{"access_token":"abc","token_type":"bearer"}"#).unwrap();
    assert_eq!(token.access_token, "abc");
}
