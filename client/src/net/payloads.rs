//! View model → backend request payloads.
//!
//! DESIGN
//! ======
//! Two shapes with different absence rules:
//!
//! - Partial updates (`PATCH`) carry only the keys the caller set. Unset keys
//!   are skipped during serialization, so `{}` in means `{}` out.
//! - Create payloads are complete records. Unset optional references are
//!   sent as explicit `null`, and dates are normalized to UTC
//!   `YYYY-MM-DDTHH:MM:SS.mmmZ`.

#[cfg(test)]
#[path = "payloads_test.rs"]
mod payloads_test;

use serde::Serialize;
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};

use super::error::PayloadError;
use crate::state::forms::{MeetingCreate, NewTask, ProjectCreate, TaskUpdate, present};
use crate::state::model::{Priority, TaskStatus};

/// Partial task update in backend key convention.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TaskUpdatePayload {
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

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProjectCreatePayload {
    pub name: String,
    pub description: Option<String>,
    pub member_ids: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TaskCreatePayload {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub project_id: String,
    pub assignee_id: Option<String>,
    pub due_date: Option<String>,
    pub tags: Vec<String>,
    pub author_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MeetingCreatePayload {
    pub title: String,
    pub description: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub project_id: String,
    pub attendee_ids: Vec<String>,
    pub recording_url: Option<String>,
    pub transcript: Option<String>,
    pub summary: Option<String>,
}

/// Translate only the fields the caller set.
#[must_use]
pub fn denormalize_task_update(update: &TaskUpdate) -> TaskUpdatePayload {
    let text = |value: &Option<String>| present(value.as_deref()).map(str::to_owned);
    TaskUpdatePayload {
        title: text(&update.title),
        description: text(&update.description),
        status: update.status,
        priority: update.priority,
        tags: update.tags.clone(),
        start_date: text(&update.start_date),
        due_date: text(&update.due_date),
        assignee_id: text(&update.assignee_id),
    }
}

#[must_use]
pub fn denormalize_project_create(project: &ProjectCreate) -> ProjectCreatePayload {
    ProjectCreatePayload {
        name: project.name.clone(),
        description: project.description.clone(),
        member_ids: project.member_ids.clone(),
    }
}

/// # Errors
///
/// Returns [`PayloadError::InvalidTimestamp`] if the due date is set but
/// does not parse.
pub fn denormalize_task_create(task: &NewTask, author_id: &str) -> Result<TaskCreatePayload, PayloadError> {
    Ok(TaskCreatePayload {
        title: task.title.clone(),
        description: task.description.clone(),
        priority: task.priority,
        project_id: task.project_id.clone(),
        assignee_id: present(task.assignee_id.as_deref()).map(str::to_owned),
        due_date: optional_timestamp("due_date", task.due_date.as_deref())?,
        tags: task.tags.clone(),
        author_id: author_id.to_owned(),
    })
}

/// # Errors
///
/// Returns [`PayloadError::InvalidTimestamp`] if a start or end date is set
/// but does not parse.
pub fn denormalize_meeting_create(meeting: &MeetingCreate) -> Result<MeetingCreatePayload, PayloadError> {
    Ok(MeetingCreatePayload {
        title: meeting.title.clone(),
        description: meeting.description.clone(),
        start_date: optional_timestamp("start_date", meeting.start_date.as_deref())?,
        end_date: optional_timestamp("end_date", meeting.end_date.as_deref())?,
        project_id: meeting.project_id.clone(),
        attendee_ids: meeting.attendees.clone(),
        recording_url: present(meeting.recording_url.as_deref()).map(str::to_owned),
        transcript: present(meeting.transcript.as_deref()).map(str::to_owned),
        summary: present(meeting.summary.as_deref()).map(str::to_owned),
    })
}

/// Parse the date and date-time shapes the forms and backend produce.
///
/// Accepts RFC 3339 with any offset, `YYYY-MM-DDTHH:MM` followed by `Z` or
/// an offset, `YYYY-MM-DDTHH:MM[:SS[.fff]]` (UTC), and `YYYY-MM-DD` (UTC
/// midnight).
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<OffsetDateTime> {
    let value = value.trim();
    if let Ok(parsed) = OffsetDateTime::parse(value, &Rfc3339) {
        return Some(parsed);
    }
    let minute_offset =
        format_description!("[year]-[month]-[day]T[hour]:[minute][offset_hour sign:mandatory]:[offset_minute]");
    if let Ok(parsed) = OffsetDateTime::parse(value, minute_offset) {
        return Some(parsed);
    }
    let naive_formats: [&[BorrowedFormatItem<'_>]; 5] = [
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]Z"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]"),
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    ];
    for format in naive_formats {
        if let Ok(parsed) = PrimitiveDateTime::parse(value, format) {
            return Some(parsed.assume_utc());
        }
    }
    Date::parse(value, format_description!("[year]-[month]-[day]"))
        .ok()
        .map(|date| PrimitiveDateTime::new(date, Time::MIDNIGHT).assume_utc())
}

/// Normalize a date or date-time to `YYYY-MM-DDTHH:MM:SS.mmmZ`.
///
/// # Errors
///
/// Returns [`PayloadError::InvalidTimestamp`] naming `field` when `value`
/// does not parse.
pub fn normalize_timestamp(field: &'static str, value: &str) -> Result<String, PayloadError> {
    let invalid = || PayloadError::InvalidTimestamp { field, value: value.to_owned() };
    let parsed = parse_timestamp(value).ok_or_else(invalid)?;
    parsed
        .to_offset(time::UtcOffset::UTC)
        .format(format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
        ))
        .map_err(|_| invalid())
}

fn optional_timestamp(field: &'static str, value: Option<&str>) -> Result<Option<String>, PayloadError> {
    present(value).map(|v| normalize_timestamp(field, v)).transpose()
}
