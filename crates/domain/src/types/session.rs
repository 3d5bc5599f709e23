//! Session and identity types

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::MIN_PASSWORD_CHARS;
use crate::errors::{CaseDeskError, Result};

/// An authenticated session
///
/// At most one is active at a time. Once revoked it is never reused; a new
/// sign-in produces a new value.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub issued_at: DateTime<Utc>,
}

impl Session {
    pub fn new(token: impl Into<String>, issued_at: DateTime<Utc>) -> Self {
        Self { token: token.into(), issued_at }
    }
}

// Tokens never end up in logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("issued_at", &self.issued_at)
            .finish()
    }
}

/// Lifecycle of the session guard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Bootstrap verification has not finished yet
    Initializing,
    /// A verified token is held
    Ready,
    /// No usable token; the login surface has been requested
    Unauthenticated,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initializing => "initializing",
            Self::Ready => "ready",
            Self::Unauthenticated => "unauthenticated",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The signed-in user as reported by `GET /users/me`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: String,
    pub email: String,
    #[serde(rename = "nombre", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl UserIdentity {
    /// Name to greet the user with, falling back to the email address
    pub fn display_name(&self) -> &str {
        self.name.as_deref().filter(|n| !n.trim().is_empty()).unwrap_or(&self.email)
    }
}

/// Login form payload
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into() }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of a successful `POST /auth/login`
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}

impl fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginResponse").field("access_token", &"<redacted>").finish()
    }
}

/// Payload of `PATCH /users/me`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(rename = "nombre", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Password change form
///
/// Only `currentPass` and `newPass` go on the wire; the confirmation is
/// checked locally by [`PasswordChange::validate`].
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct PasswordChange {
    #[serde(rename = "currentPass")]
    pub current: String,
    #[serde(rename = "newPass")]
    pub new: String,
    #[serde(skip)]
    pub confirmation: String,
}

impl PasswordChange {
    pub fn new(
        current: impl Into<String>,
        new: impl Into<String>,
        confirmation: impl Into<String>,
    ) -> Self {
        Self { current: current.into(), new: new.into(), confirmation: confirmation.into() }
    }

    /// Reject the form before anything is sent
    ///
    /// # Errors
    /// `CaseDeskError::InvalidInput` for an empty current password, a new
    /// password shorter than [`MIN_PASSWORD_CHARS`] or a confirmation that
    /// does not match.
    pub fn validate(&self) -> Result<()> {
        if self.current.is_empty() {
            return Err(CaseDeskError::InvalidInput("current password is required".into()));
        }
        if self.new.chars().count() < MIN_PASSWORD_CHARS {
            return Err(CaseDeskError::InvalidInput(format!(
                "new password must have at least {MIN_PASSWORD_CHARS} characters"
            )));
        }
        if self.new != self.confirmation {
            return Err(CaseDeskError::InvalidInput("Las contraseñas no coinciden".into()));
        }
        Ok(())
    }
}

impl fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordChange")
            .field("current", &"<redacted>")
            .field("new", &"<redacted>")
            .finish()
    }
}
