//! API-specific error types
//!
//! Classifies transport outcomes and maps them onto the client error
//! taxonomy.

use casedesk_common::{ErrorClassification, ErrorSeverity};
use casedesk_domain::CaseDeskError;
use thiserror::Error;

/// Categories of API errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// 401 - handled globally by the session guard
    Authentication,
    /// 400 / 422 - the payload was rejected
    Validation,
    /// 5xx
    Server,
    /// Any other 4xx
    Client,
    /// No response received
    Network,
    /// Response received but not understood
    Decode,
    /// Client misconfiguration
    Config,
}

/// API operation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Authentication rejected: {0}")]
    Unauthorized(String),

    /// Server validation message, kept verbatim
    #[error("{0}")]
    Validation(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Client error ({status}): {message}")]
    Client { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Unauthorized(_) => ApiErrorCategory::Authentication,
            Self::Validation(_) => ApiErrorCategory::Validation,
            Self::Server { .. } => ApiErrorCategory::Server,
            Self::Client { .. } => ApiErrorCategory::Client,
            Self::Network(_) => ApiErrorCategory::Network,
            Self::Decode(_) => ApiErrorCategory::Decode,
            Self::Config(_) => ApiErrorCategory::Config,
        }
    }

    /// HTTP status behind the error, if a response was received
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized(_) => Some(401),
            Self::Server { status, .. } | Self::Client { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl ErrorClassification for ApiError {
    fn is_transient(&self) -> bool {
        matches!(self.category(), ApiErrorCategory::Server | ApiErrorCategory::Network)
    }

    fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ApiErrorCategory::Authentication | ApiErrorCategory::Validation => ErrorSeverity::Info,
            ApiErrorCategory::Network | ApiErrorCategory::Client => ErrorSeverity::Warning,
            ApiErrorCategory::Server | ApiErrorCategory::Decode => ErrorSeverity::Error,
            ApiErrorCategory::Config => ErrorSeverity::Critical,
        }
    }
}

impl From<ApiError> for CaseDeskError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized(message) => CaseDeskError::AuthExpired(message),
            ApiError::Validation(message) => CaseDeskError::ValidationRejected(message),
            ApiError::Server { status, message } | ApiError::Client { status, message } => {
                CaseDeskError::Remote { status, message }
            }
            ApiError::Network(message) => CaseDeskError::Network(message),
            ApiError::Decode(message) => CaseDeskError::Decode(message),
            ApiError::Config(message) => CaseDeskError::Config(message),
        }
    }
}

/// Transport failures reported by the HTTP layer
impl From<CaseDeskError> for ApiError {
    fn from(err: CaseDeskError) -> Self {
        match err {
            CaseDeskError::Network(message) => Self::Network(message),
            CaseDeskError::Decode(message) => Self::Decode(message),
            CaseDeskError::Config(message) => Self::Config(message),
            other => Self::Network(other.to_string()),
        }
    }
}
