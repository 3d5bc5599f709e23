//! Session lifecycle
//!
//! The guard owns the only copy of the bearer token. Everything else reads it
//! through [`ports::CredentialSource`].

pub mod guard;
pub mod ports;

pub use guard::SessionGuard;
