use super::*;

// =============================================================
// TaskStatus
// =============================================================

#[test]
fn task_status_serializes_to_backend_labels() {
    assert_eq!(serde_json::to_string(&TaskStatus::Todo).unwrap(), "\"To Do\"");
    assert_eq!(serde_json::to_string(&TaskStatus::InProgress).unwrap(), "\"In Progress\"");
    assert_eq!(serde_json::to_string(&TaskStatus::Done).unwrap(), "\"Done\"");
}

#[test]
fn task_status_rejects_unknown_label() {
    assert!(serde_json::from_str::<TaskStatus>("\"Blocked\"").is_err());
    assert!(serde_json::from_str::<TaskStatus>("\"todo\"").is_err());
}

#[test]
fn task_status_parse_matches_as_str() {
    for status in TaskStatus::ALL {
        assert_eq!(TaskStatus::parse(status.as_str()), Some(status));
    }
    assert_eq!(TaskStatus::parse("done"), None);
}

#[test]
fn task_status_display_uses_label() {
    assert_eq!(TaskStatus::InProgress.to_string(), "In Progress");
}

// =============================================================
// Priority
// =============================================================

#[test]
fn priority_round_trips_through_parse() {
    for priority in Priority::ALL {
        assert_eq!(Priority::parse(priority.as_str()), Some(priority));
    }
    assert_eq!(Priority::parse("Urgent"), None);
}

#[test]
fn priority_all_is_highest_first() {
    assert_eq!(Priority::ALL, [Priority::High, Priority::Medium, Priority::Low]);
}

// =============================================================
// camelCase view model
// =============================================================

#[test]
fn task_serializes_with_camel_case_keys() {
    let task = Task {
        id: "t-1".to_owned(),
        title: "Ship".to_owned(),
        description: String::new(),
        status: TaskStatus::Todo,
        priority: Priority::High,
        tags: vec![],
        start_date: Some("2024-05-01T09:00:00".to_owned()),
        due_date: None,
        author_id: Some("u-1".to_owned()),
        assignee_id: None,
        project_id: "p-1".to_owned(),
        comments: 0,
    };
    let value = serde_json::to_value(&task).unwrap();
    assert_eq!(value["startDate"], "2024-05-01T09:00:00");
    assert_eq!(value["projectId"], "p-1");
    assert_eq!(value["authorId"], "u-1");
    assert!(value.get("project_id").is_none());
}

#[test]
fn meeting_serializes_ai_fields_in_camel_case() {
    let meeting = Meeting {
        id: "m-1".to_owned(),
        title: "Sync".to_owned(),
        description: String::new(),
        start_date: "2024-05-01T09:00:00".to_owned(),
        end_date: "2024-05-01T10:00:00".to_owned(),
        attendees: vec![],
        recording_url: None,
        transcript: None,
        project_id: "p-1".to_owned(),
        ai_summary: Some("ok".to_owned()),
        ai_action_items: vec!["Fix bug".to_owned()],
    };
    let value = serde_json::to_value(&meeting).unwrap();
    assert_eq!(value["aiSummary"], "ok");
    assert_eq!(value["aiActionItems"], serde_json::json!(["Fix bug"]));
}
