//! Destructive action confirmation types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A destructive action awaiting explicit confirmation
///
/// At most one exists per target. A second request replaces it with a new
/// token and a fresh deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDestructiveAction {
    pub target_id: String,
    pub confirm_token: Uuid,
    pub expires_by: DateTime<Utc>,
}

impl PendingDestructiveAction {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_by
    }
}

/// Result of a confirm call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmOutcome {
    /// The remote delete succeeded and the item left the visible list
    Deleted,
    /// The remote delete failed; the visible list is untouched
    Failed(String),
    /// A delete for this target is already outstanding
    AlreadyInFlight,
    /// Nothing was pending (never requested, canceled or expired)
    NoPending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Success,
    Error,
    Info,
}

/// User-facing notice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NotificationLevel::Success, message: message.into(), description: None }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NotificationLevel::Error, message: message.into(), description: None }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NotificationLevel::Info, message: message.into(), description: None }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
