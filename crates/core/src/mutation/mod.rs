//! Destructive action confirmation
//!
//! A delete is only issued after an explicit confirm inside a bounded window.
//! Cancelling, letting the window lapse or re-requesting never touches the
//! service.

pub mod confirmation;
pub mod deleters;
pub mod ports;

pub use confirmation::{ConfirmationEvent, ConfirmationProtocol, DeleteMessages, TargetState};
pub use deleters::{CaseDeleter, EventDeleter};
