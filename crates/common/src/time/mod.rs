//! Time utilities and abstractions
//!
//! - **Clock abstractions**: real and mock wall time (re-exported from
//!   testing)
//! - **[`timer`]**: cancelable one-shot timers used for debounce windows,
//!   confirmation deadlines and loading floors

pub mod timer;

pub use timer::{timeout, TimerHandle};

// Re-export Clock abstractions from testing module
pub use crate::testing::time::{Clock, MockClock, SystemClock};
