//! # CaseDesk Infrastructure
//!
//! Infrastructure implementations of the core ports.
//!
//! This crate contains:
//! - The HTTP transport (`ApiClient`) and the gateway built on it
//! - Session token stores (JSON file, OS keychain)
//! - Navigation adapter
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `casedesk-core`
//! - Contains all "impure" code (network, filesystem, keychain)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod navigation;
pub mod storage;

// Re-export commonly used items
pub use api::{ApiClient, ApiClientConfig, ApiError, ApiErrorCategory, HttpCaseGateway};
pub use errors::InfraError;
pub use http::HttpClient;
pub use navigation::{ChannelNavigator, NavigationRequest};
pub use storage::{FileSessionStore, KeychainSessionStore};
