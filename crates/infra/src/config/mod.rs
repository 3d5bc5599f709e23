//! Configuration loading
//!
//! Environment variables win; otherwise a config file is probed, and
//! built-in defaults apply when neither is present.

pub mod loader;

pub use loader::{load, load_from_env, load_from_file, probe_config_paths};
