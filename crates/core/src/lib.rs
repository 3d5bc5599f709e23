//! # CaseDesk Core
//!
//! Client-side synchronization logic - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces (traits) for the remote service, token storage and
//!   navigation
//! - The session guard, search coordinator, calendar aggregator and the
//!   destructive action confirmation protocol
//!
//! ## Architecture Principles
//! - Only depends on `casedesk-common` and `casedesk-domain`
//! - No HTTP, filesystem or platform code
//! - All external effects go through traits
//! - Locks are never held across an `.await`

pub mod calendar;
pub mod cases;
pub mod mutation;
pub mod search;
pub mod session;

// Re-export specific items to avoid ambiguity
pub use calendar::{build_month_grid, events_on, is_deadline, sort_chronologically};
pub use cases::ports::CaseGateway;
pub use cases::{CaseService, Dashboard, ReadyGate};
pub use mutation::ports::{Identified, RemoteDeleter};
pub use mutation::{
    CaseDeleter, ConfirmationEvent, ConfirmationProtocol, DeleteMessages, EventDeleter,
    TargetState,
};
pub use search::{SearchCoordinator, SearchSettings};
pub use session::ports::{CredentialSource, IdentityApi, Navigator, SessionStore};
pub use session::SessionGuard;
