//! Application constants
//!
//! Centralized location for the domain-level constants used by the
//! synchronization services.

// Session
pub const SESSION_TOKEN_KEY: &str = "token";
pub const MIN_LOADING_FLOOR_MS: u64 = 1500;
pub const MIN_PASSWORD_CHARS: usize = 6;

// Search-as-you-type
pub const SEARCH_DEBOUNCE_MS: u64 = 300;
pub const MIN_SEARCH_CHARS: usize = 2;

// Destructive action confirmation window
pub const CONFIRMATION_WINDOW_MS: u64 = 4000;

// Remote service
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SESSION_FILE: &str = "casedesk-session.json";
