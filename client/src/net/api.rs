//! REST client for the project-management backend.
//!
//! Every response body is decoded into the raw records in `types` and then
//! passed once through `normalize` before it reaches the caller, so nothing
//! outside `net` ever sees backend key names.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx answers become `ApiError::Status` carrying the backend's `detail`
//! message. There is no retry; callers decide whether to surface or re-issue.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::normalize::{
    InitialData, normalize_initial_data, normalize_meeting, normalize_project, normalize_task, normalize_user,
};
use super::payloads::{
    denormalize_meeting_create, denormalize_project_create, denormalize_task_create, denormalize_task_update,
};
use super::types::{
    AddMemberRequest, ChatRequest, ChatResponse, LoginRequest, RawMeeting, RawProject, RawTask, RawUser,
    TokenResponse, TranscriptBody,
};
use crate::config::ApiConfig;
use crate::state::forms::{MeetingCreate, NewTask, ProjectCreate, Registration, TaskUpdate};
use crate::state::model::{Meeting, Project, Task, TaskStatus, User};

/// Conversation thread used for assistant chat.
pub const DEFAULT_CHAT_THREAD: &str = "thread_1";

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns [`ApiError::HttpClientBuild`] if the HTTP client cannot be built.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url, token: config.token })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    // =========================================================================
    // USERS
    // =========================================================================

    /// Exchange credentials for a token, keep it, and return the session user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 401 on bad credentials.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<User, ApiError> {
        let body = LoginRequest { username, password };
        let text = self.send(self.request(Method::POST, "/users/login").json(&body)).await?;
        let token: TokenResponse = serde_json::from_str(&text)?;
        self.token = Some(token.access_token);
        tracing::info!(%username, "logged in");
        self.current_user().await
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 400 when the email or username is taken.
    pub async fn register(&self, registration: &Registration) -> Result<User, ApiError> {
        let raw: RawUser = self.send_json(Method::POST, "/users/register", registration).await?;
        Ok(normalize_user(&raw))
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 401 when the token is missing or expired.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        let raw: RawUser = self.get_json("/users/me").await?;
        Ok(normalize_user(&raw))
    }

    // =========================================================================
    // PROJECTS
    // =========================================================================

    /// Fetch the user's projects and lift their embedded members into users.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport, status, or decode failure.
    pub async fn initial_data(&self) -> Result<InitialData, ApiError> {
        let raw: Vec<RawProject> = self.get_json("/projects/").await?;
        Ok(normalize_initial_data(&raw))
    }

    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport, status, or decode failure.
    pub async fn create_project(&self, project: &ProjectCreate) -> Result<Project, ApiError> {
        let payload = denormalize_project_create(project);
        let raw: RawProject = self.send_json(Method::POST, "/projects/", &payload).await?;
        Ok(normalize_project(&raw))
    }

    /// Add a member by email; returns the added user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] carrying the backend's reason on rejection.
    pub async fn add_member(&self, project_id: &str, email: &str) -> Result<User, ApiError> {
        let raw: RawUser = self
            .send_json(Method::POST, &project_members_endpoint(project_id), &AddMemberRequest { email })
            .await?;
        Ok(normalize_user(&raw))
    }

    // =========================================================================
    // TASKS
    // =========================================================================

    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 403 when the user is not a member.
    pub async fn tasks_by_project(&self, project_id: &str, status: Option<TaskStatus>) -> Result<Vec<Task>, ApiError> {
        let raw: Vec<RawTask> = serde_json::from_str(&self.send(self.tasks_request(project_id, status)).await?)?;
        Ok(raw.iter().map(normalize_task).collect())
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Payload`] for an unparseable due date, otherwise
    /// transport, status, or decode failures.
    pub async fn create_task(&self, task: &NewTask, author_id: &str) -> Result<Task, ApiError> {
        let payload = denormalize_task_create(task, author_id)?;
        let raw: RawTask = self.send_json(Method::POST, "/tasks/", &payload).await?;
        Ok(normalize_task(&raw))
    }

    /// Move a task to another board column.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 404 when the task is gone or hidden.
    pub async fn update_task_status(&self, task_id: &str, status: TaskStatus) -> Result<Task, ApiError> {
        let raw: RawTask = serde_json::from_str(&self.send(self.task_status_request(task_id, status)).await?)?;
        Ok(normalize_task(&raw))
    }

    /// Send a partial edit and return the task as the backend now has it.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport, status, or decode failure.
    pub async fn update_task(&self, task_id: &str, update: &TaskUpdate) -> Result<Task, ApiError> {
        let payload = denormalize_task_update(update);
        let raw: RawTask = self.send_json(Method::PATCH, &task_endpoint(task_id), &payload).await?;
        Ok(normalize_task(&raw))
    }

    // =========================================================================
    // MEETINGS & AI
    // =========================================================================

    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 403 when the user is not a member.
    pub async fn meetings_by_project(&self, project_id: &str) -> Result<Vec<Meeting>, ApiError> {
        let raw: Vec<RawMeeting> = self.get_json(&meetings_endpoint(project_id)).await?;
        Ok(raw.iter().map(normalize_meeting).collect())
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Payload`] for unparseable dates, otherwise
    /// transport, status, or decode failures.
    pub async fn create_meeting(&self, meeting: &MeetingCreate) -> Result<Meeting, ApiError> {
        let payload = denormalize_meeting_create(meeting)?;
        let raw: RawMeeting = self.send_json(Method::POST, "/meetings/", &payload).await?;
        Ok(normalize_meeting(&raw))
    }

    /// Have the AI turn a transcript into tasks; returns the created tasks.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 422 when the AI produced nothing.
    pub async fn process_transcript(&self, meeting_id: &str, transcript: &str) -> Result<Vec<Task>, ApiError> {
        let body = TranscriptBody { transcript: transcript.to_owned() };
        let raw: Vec<RawTask> = self
            .send_json(Method::POST, &process_transcript_endpoint(meeting_id), &body)
            .await?;
        Ok(raw.iter().map(normalize_task).collect())
    }

    /// Ask the project-manager assistant a question.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport, status, or decode failure.
    pub async fn chat(&self, message: &str, project_id: Option<&str>) -> Result<String, ApiError> {
        let body = ChatRequest { message, project_id, thread_id: DEFAULT_CHAT_THREAD };
        let reply: ChatResponse = self.send_json(Method::POST, "/ai/chat", &body).await?;
        Ok(reply.response)
    }

    // =========================================================================
    // TRANSPORT
    // =========================================================================

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{path}", self.base_url));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn tasks_request(&self, project_id: &str, status: Option<TaskStatus>) -> RequestBuilder {
        let builder = self.request(Method::GET, &tasks_endpoint(project_id));
        match status {
            Some(status) => builder.query(&[("status_filter", status.as_str())]),
            None => builder,
        }
    }

    fn task_status_request(&self, task_id: &str, status: TaskStatus) -> RequestBuilder {
        self.request(Method::PATCH, &task_status_endpoint(task_id))
            .query(&[("new_status", status.as_str())])
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let text = self.send(self.request(Method::GET, path)).await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, ApiError> {
        let text = self.send(self.request(method, path).json(body)).await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn send(&self, builder: RequestBuilder) -> Result<String, ApiError> {
        let request = builder.build()?;
        let method = request.method().clone();
        let path = request.url().path().to_owned();
        tracing::debug!(%method, %path, "api request");

        let response = self.http.execute(request).await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            tracing::warn!(%method, %path, status = status.as_u16(), "api request rejected");
            return Err(ApiError::from_status(status.as_u16(), &text));
        }
        Ok(text)
    }
}

fn project_members_endpoint(project_id: &str) -> String {
    format!("/projects/{project_id}/members")
}

fn tasks_endpoint(project_id: &str) -> String {
    format!("/tasks/{project_id}")
}

fn task_endpoint(task_id: &str) -> String {
    format!("/tasks/{task_id}")
}

fn task_status_endpoint(task_id: &str) -> String {
    format!("/tasks/{task_id}/status")
}

fn meetings_endpoint(project_id: &str) -> String {
    format!("/meetings/{project_id}")
}

fn process_transcript_endpoint(meeting_id: &str) -> String {
    format!("/ai/meeting/{meeting_id}/process-transcript")
}
