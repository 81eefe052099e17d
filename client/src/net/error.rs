//! Error types for payload building and HTTP calls.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use super::types::ErrorBody;

/// A view-model value could not be turned into a backend payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    /// A date field did not parse as a date or date-time.
    #[error("invalid timestamp for {field}: {value:?}")]
    InvalidTimestamp { field: &'static str, value: String },
}

/// Errors produced by [`crate::net::api::ApiClient`].
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The request never produced a response.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {detail}")]
    Status { status: u16, detail: String },

    /// The response body did not match the expected record shape.
    #[error("response decode failed: {0}")]
    Decode(#[from] serde_json::Error),

    /// The request payload could not be built.
    #[error(transparent)]
    Payload(#[from] PayloadError),
}

impl ApiError {
    /// Build a status error, preferring the backend's `detail` message.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        Self::Status { status, detail: error_detail(body) }
    }

    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// Extract a human-readable message from an error body.
///
/// String details are returned verbatim; structured details (validation
/// errors) are re-serialized. Bodies that are not JSON come back trimmed.
pub(crate) fn error_detail(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody { detail: serde_json::Value::String(message) }) => message,
        Ok(ErrorBody { detail }) => detail.to_string(),
        Err(_) => body.trim().to_owned(),
    }
}
