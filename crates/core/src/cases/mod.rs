//! Case records: gateway port, readiness gate and dashboard service

pub mod activity;
pub mod gate;
pub mod ports;
pub mod service;

pub use gate::ReadyGate;
pub use service::{CaseService, Dashboard};
