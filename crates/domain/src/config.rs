//! Configuration management

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    CONFIRMATION_WINDOW_MS, DEFAULT_API_BASE_URL, DEFAULT_API_TIMEOUT_SECS, DEFAULT_SESSION_FILE,
    MIN_LOADING_FLOOR_MS, MIN_SEARCH_CHARS, SEARCH_DEBOUNCE_MS,
};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub search: SearchConfig,
    pub confirmation: ConfirmationConfig,
}

/// Remote service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_API_BASE_URL.to_string(), timeout_secs: DEFAULT_API_TIMEOUT_SECS }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Where the session token lives and how the bootstrap screen behaves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Token store backend
    pub store: SessionStoreKind,
    /// File path used by the `file` backend
    pub path: String,
    /// Minimum perceived duration of the bootstrap verification
    pub min_loading_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store: SessionStoreKind::File,
            path: DEFAULT_SESSION_FILE.to_string(),
            min_loading_ms: MIN_LOADING_FLOOR_MS,
        }
    }
}

impl SessionConfig {
    pub fn min_loading(&self) -> Duration {
        Duration::from_millis(self.min_loading_ms)
    }
}

/// Session token storage backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStoreKind {
    File,
    Keychain,
}

/// Search-as-you-type tuning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub debounce_ms: u64,
    pub min_chars: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { debounce_ms: SEARCH_DEBOUNCE_MS, min_chars: MIN_SEARCH_CHARS }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Destructive action confirmation window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfirmationConfig {
    pub window_ms: u64,
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self { window_ms: CONFIRMATION_WINDOW_MS }
    }
}

impl ConfirmationConfig {
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }
}
