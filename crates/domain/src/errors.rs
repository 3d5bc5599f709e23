//! Error types used throughout the client

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for CaseDesk
///
/// `AuthExpired` is recovered globally by the session guard. Every other
/// variant is handled by the component that issued the call.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum CaseDeskError {
    /// The service rejected the credentials attached to the call
    #[error("Session expired: {0}")]
    AuthExpired(String),

    /// No response was received (connect failure, timeout, reset)
    #[error("Network error: {0}")]
    Network(String),

    /// The service rejected the payload; the message is shown verbatim
    #[error("{0}")]
    ValidationRejected(String),

    /// Any other non-success status
    #[error("Remote error ({status}): {message}")]
    Remote { status: u16, message: String },

    /// The response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// A dependent component tried to call out before the session was ready
    #[error("Session not ready")]
    NotReady,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CaseDeskError {
    /// Whether this failure must trigger session invalidation
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::AuthExpired(_))
    }

    /// Stable label suitable for log fields
    pub fn label(&self) -> &'static str {
        match self {
            Self::AuthExpired(_) => "auth_expired",
            Self::Network(_) => "network",
            Self::ValidationRejected(_) => "validation_rejected",
            Self::Remote { .. } => "remote",
            Self::Decode(_) => "decode",
            Self::NotReady => "not_ready",
            Self::InvalidInput(_) => "invalid_input",
            Self::Config(_) => "config",
            Self::Storage(_) => "storage",
            Self::Internal(_) => "internal",
        }
    }
}

/// Result type alias for CaseDesk operations
pub type Result<T> = std::result::Result<T, CaseDeskError>;
