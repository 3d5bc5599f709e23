//! Configuration loader
//!
//! ## Loading Strategy
//! 1. Environment variables, when `CASEDESK_API_URL` is set
//! 2. The first config file found by [`probe_config_paths`]
//! 3. Built-in defaults
//!
//! ## Environment Variables
//! - `CASEDESK_API_URL`: Base URL of the case service (required for env mode)
//! - `CASEDESK_API_TIMEOUT_SECS`: Request timeout in seconds
//! - `CASEDESK_SESSION_STORE`: `file` or `keychain`
//! - `CASEDESK_SESSION_PATH`: Token file path for the `file` store
//! - `CASEDESK_MIN_LOADING_MS`: Bootstrap loading floor
//! - `CASEDESK_SEARCH_DEBOUNCE_MS`: Search debounce window
//! - `CASEDESK_CONFIRM_WINDOW_MS`: Delete confirmation window
//!
//! ## File Locations
//! `config.{json,toml}` and `casedesk.{json,toml}` in the working directory,
//! then `config.{json,toml}` one and two levels up, then the same set next to
//! the executable.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use casedesk_domain::{CaseDeskError, Config, Result, SessionStoreKind};

/// Load configuration with automatic fallback
///
/// # Errors
/// Returns `CaseDeskError::Config` when an environment value or a found
/// config file is invalid. A missing config file is not an error.
pub fn load() -> Result<Config> {
    if std::env::var_os("CASEDESK_API_URL").is_some() {
        let config = load_from_env()?;
        tracing::info!("Configuration loaded from environment variables");
        return Ok(config);
    }

    match probe_config_paths() {
        Some(path) => load_from_file(Some(path)),
        None => {
            tracing::info!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}

/// Load configuration from environment variables
///
/// `CASEDESK_API_URL` is required; every other variable falls back to its
/// default.
///
/// # Errors
/// Returns `CaseDeskError::Config` if the URL is missing or a value does not
/// parse.
pub fn load_from_env() -> Result<Config> {
    let mut config = Config::default();

    config.api.base_url = env_var("CASEDESK_API_URL")?;
    if let Some(timeout) = env_parse::<u64>("CASEDESK_API_TIMEOUT_SECS")? {
        config.api.timeout_secs = timeout;
    }

    if let Some(store) = optional_env("CASEDESK_SESSION_STORE") {
        config.session.store = parse_store_kind(&store)?;
    }
    if let Some(path) = optional_env("CASEDESK_SESSION_PATH") {
        config.session.path = path;
    }
    if let Some(floor) = env_parse::<u64>("CASEDESK_MIN_LOADING_MS")? {
        config.session.min_loading_ms = floor;
    }

    if let Some(debounce) = env_parse::<u64>("CASEDESK_SEARCH_DEBOUNCE_MS")? {
        config.search.debounce_ms = debounce;
    }
    if let Some(window) = env_parse::<u64>("CASEDESK_CONFIRM_WINDOW_MS")? {
        config.confirmation.window_ms = window;
    }

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations.
///
/// # Errors
/// Returns `CaseDeskError::Config` if the file is missing, unreadable or
/// malformed.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(CaseDeskError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            CaseDeskError::Config("No config file found in any of the standard locations".into())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| CaseDeskError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration, picking the format from the file extension
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| CaseDeskError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| CaseDeskError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(CaseDeskError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// First existing config file among the standard locations
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("casedesk.json"),
        dir.join("casedesk.toml"),
        dir.join("../config.json"),
        dir.join("../config.toml"),
        dir.join("../../config.json"),
        dir.join("../../config.toml"),
    ]
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        CaseDeskError::Config(format!("Missing required environment variable: {key}"))
    })
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    optional_env(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| CaseDeskError::Config(format!("Invalid value for {key}: {e}")))
        })
        .transpose()
}

fn parse_store_kind(raw: &str) -> Result<SessionStoreKind> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "file" => Ok(SessionStoreKind::File),
        "keychain" => Ok(SessionStoreKind::Keychain),
        other => Err(CaseDeskError::Config(format!("Unknown session store: {other}"))),
    }
}
