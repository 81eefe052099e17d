//! API client configuration parsed from environment variables.

use crate::net::error::ApiError;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/v1";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for ApiTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Backend API root without a trailing slash.
    pub base_url: String,
    /// Bearer token replayed on every request.
    pub token: Option<String>,
    pub timeouts: ApiTimeouts,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_API_BASE_URL.to_owned(), token: None, timeouts: ApiTimeouts::default() }
    }
}

impl ApiConfig {
    /// Config for `base_url` with default timeouts and no token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ConfigParse`] if the base URL is not http(s).
    pub fn with_base_url(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self { base_url: validate_base_url(base_url)?, ..Self::default() })
    }

    /// Replace the base URL, keeping token and timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ConfigParse`] if the base URL is not http(s).
    pub fn set_base_url(&mut self, base_url: &str) -> Result<(), ApiError> {
        self.base_url = validate_base_url(base_url)?;
        Ok(())
    }

    /// Build typed API config from environment variables.
    ///
    /// Optional:
    /// - `PM_API_BASE_URL`: default `http://localhost:8000/api/v1`
    /// - `PM_API_TOKEN`: bearer token from a previous login
    /// - `PM_REQUEST_TIMEOUT_SECS`: default 30
    /// - `PM_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ConfigParse`] if the base URL is not http(s).
    pub fn from_env() -> Result<Self, ApiError> {
        let base_url = std::env::var("PM_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_owned());
        let base_url = validate_base_url(&base_url)?;
        let token = std::env::var("PM_API_TOKEN").ok().filter(|t| !t.trim().is_empty());
        let timeouts = ApiTimeouts {
            request_secs: env_parse_u64("PM_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("PM_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        Ok(Self { base_url, token, timeouts })
    }
}

/// Trim whitespace and trailing slashes, then require an http(s) scheme.
fn validate_base_url(raw: &str) -> Result<String, ApiError> {
    let base_url = raw.trim().trim_end_matches('/');
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(ApiError::ConfigParse(format!("base URL must be http(s): {base_url:?}")));
    }
    Ok(base_url.to_owned())
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
