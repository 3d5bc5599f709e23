//! # CaseDesk App
//!
//! Composition root for the client core.
//!
//! This crate contains:
//! - Application context (dependency wiring)
//! - Logging setup and the plain-text agenda report
//! - The headless `casedesk` binary
//!
//! ## Architecture
//! - Depends on `common`, `domain`, `core` and `infra`
//! - Every component receives its collaborators here; nothing reaches for
//!   global state

pub mod context;
pub mod utils;

pub use context::AppContext;
