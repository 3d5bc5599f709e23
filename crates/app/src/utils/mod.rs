//! Binary support: logging setup and text rendering

pub mod logging;
pub mod report;
