//! Search-as-you-type
//!
//! Input is debounced; each issued call carries a sequence id and only the
//! response of the most recently issued call is applied.

pub mod coordinator;

pub use coordinator::{SearchCoordinator, SearchSettings};
