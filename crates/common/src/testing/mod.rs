//! Testing utilities
//!
//! Deterministic clocks shared by the unit and integration suites of every
//! CaseDesk crate. Production code depends on the [`Clock`] trait and receives
//! a [`SystemClock`]; tests inject a [`MockClock`].

pub mod time;

pub use time::{Clock, MockClock, SystemClock};
