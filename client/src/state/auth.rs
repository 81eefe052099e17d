//! Auth-session state for the signed-in user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The bearer token is opaque here: it is stored after login and handed back
//! to the API client on every request. Nothing inspects or refreshes it.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use super::model::User;

/// The signed-in user and their bearer token.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
}

impl AuthState {
    /// Record a completed login.
    pub fn sign_in(&mut self, user: User, token: String) {
        self.user = Some(user);
        self.token = Some(token);
    }

    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.id.as_str())
    }
}
