//! Calendar aggregation
//!
//! Side-effect free: events in, month grid out. Local placement of an event
//! is decided by the zone passed in, never by the zone of the process.

pub mod agenda;
pub mod grid;

pub use agenda::{events_on, is_deadline, sort_chronologically, upcoming};
pub use grid::build_month_grid;
