//! Backend record shapes as they arrive over HTTP.
//!
//! DESIGN
//! ======
//! These types mirror the backend's snake_case JSON. Fields the backend may
//! omit or send as `null` are `Option`; mandatory fields (ids, titles) are
//! plain so a malformed record fails at deserialization instead of being
//! papered over. Unknown keys are ignored.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::state::model::{Priority, TaskStatus};

/// A user as returned by `/users/*` and embedded in project member lists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawUser {
    pub id: String,
    pub name: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// A project with its members embedded as full user records.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawProject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub members: Vec<RawUser>,
}

/// A task as returned by `/tasks/*` and the transcript processor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTask {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: Priority,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub author_id: Option<String>,
    #[serde(default)]
    pub assignee_id: Option<String>,
    pub project_id: String,
    #[serde(default, deserialize_with = "deserialize_optional_u32_from_number")]
    pub comments: Option<u32>,
}

/// A task-like object the AI extracted from a meeting transcript; only its
/// title becomes an action item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAiTask {
    pub title: String,
}

/// A meeting as returned by `/meetings/*`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMeeting {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub attendee_ids: Option<Vec<String>>,
    #[serde(default)]
    pub recording_url: Option<String>,
    #[serde(default)]
    pub transcript: Option<String>,
    pub project_id: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub ai_tasks: Option<Vec<RawAiTask>>,
}

/// Body of `POST /users/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Response of `POST /users/login`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Body of `POST /projects/{id}/members`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AddMemberRequest<'a> {
    pub email: &'a str,
}

/// Transcript envelope shared by the transcript processor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptBody {
    pub transcript: String,
}

/// Body of `POST /ai/chat`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
    pub project_id: Option<&'a str>,
    pub thread_id: &'a str,
}

/// Response of `POST /ai/chat`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// FastAPI-style error body.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ErrorBody {
    pub detail: serde_json::Value,
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn deserialize_optional_u32_from_number<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::Number(number)) => {
            if let Some(int) = number.as_u64() {
                return u32::try_from(int)
                    .map(Some)
                    .map_err(|_| D::Error::custom(format!("value {int} out of range for u32")));
            }
            if let Some(float) = number.as_f64()
                && float.is_finite()
                && float.fract() == 0.0
                && float >= 0.0
                && float <= f64::from(u32::MAX)
            {
                return Ok(Some(float as u32));
            }
            Err(D::Error::custom("expected non-negative integer"))
        }
        Some(_) => Err(D::Error::custom("expected number")),
    }
}
