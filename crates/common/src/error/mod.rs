//! Error classification shared by the CaseDesk crates
//!
//! - **`ErrorClassification`**: whether a failure is transient and how loudly
//!   it should be reported.
//! - **`ErrorSeverity`**: one severity scale used when choosing the log level
//!   for a failure.
//!
//! Layer-specific error enums implement the trait:
//!
//! ```rust,ignore
//! impl ErrorClassification for ApiError {
//!     fn is_transient(&self) -> bool { matches!(self, Self::Network(_)) }
//!     fn severity(&self) -> ErrorSeverity { ErrorSeverity::Warning }
//! }
//! ```
//!
//! ## Transient vs. permanent
//!
//! Nothing in the client retries automatically. `is_transient()` only tells a
//! caller whether a *manual* retry (re-typing a search, re-clicking delete) has
//! a chance of succeeding, which drives the wording of user notices.

use std::fmt;

/// Severity levels for errors
///
/// Ordered from least to most severe so callers can compare with `>=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    /// Expected condition, nothing to act on
    Info,
    /// Degraded but operational
    Warning,
    /// Failure requiring attention
    Error,
    /// Client integrity at risk
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        };
        f.write_str(label)
    }
}

/// Standard interface for classifying errors
pub trait ErrorClassification {
    /// Whether a manual retry of the same action may succeed
    fn is_transient(&self) -> bool;

    /// Severity used to pick the log level
    fn severity(&self) -> ErrorSeverity;

    /// Whether the error points at a bug rather than an environmental failure
    fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }
}
