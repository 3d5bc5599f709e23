//! # CaseDesk Domain
//!
//! Business domain types for the CaseDesk client.
//!
//! This crate contains:
//! - Data types exchanged with the case-management service (cases, calendar
//!   events, identities) and the client-side state derived from them
//! - The client error taxonomy and `Result` alias
//! - Configuration structures and constants
//!
//! ## Architecture
//! - No dependencies on other CaseDesk crates
//! - Pure data structures, no I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
