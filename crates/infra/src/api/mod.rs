//! Remote case-management service
//!
//! The [`ApiClient`] is the transport adapter: it attaches the session's
//! bearer token, reports 401 responses to the session guard and maps every
//! failure into a typed error. [`HttpCaseGateway`] maps the service's
//! endpoints onto the core ports.
//!
//! Nothing here retries. Each call is sent once and its outcome is reported
//! to the caller.

pub mod client;
pub mod errors;
pub mod gateway;

pub use client::{ApiClient, ApiClientBuilder, ApiClientConfig};
pub use errors::{ApiError, ApiErrorCategory};
pub use gateway::HttpCaseGateway;
