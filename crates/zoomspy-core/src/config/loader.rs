//! Config loader — reads `~/.zoomspy/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.zoomspy/config.json` (or an explicit path)
//! 3. Environment variables (override JSON)

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::Config;

pub const ENV_BASE_URL: &str = "MATTERMOST_BASE_URL";
pub const ENV_CHANNEL_ID: &str = "MATTERMOST_CHANNEL_ID";
pub const ENV_TOKEN: &str = "MATTERMOST_TOKEN";
pub const ENV_TEAM_ID: &str = "MATTERMOST_TEAM_ID";
pub const ENV_TIMEOUT_SECS: &str = "ZOOMSPY_TIMEOUT_SECS";
pub const ENV_SCHEDULE: &str = "ZOOMSPY_SCHEDULE";

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the default (or given) path + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path
        .map(PathBuf::from)
        .unwrap_or_else(get_config_path);

    let config = load_config_from_path(&config_path);
    apply_env_overrides(config, |key| std::env::var(key).ok())
}

/// Load config from a specific file path, without env overrides.
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return Config::default();
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return Config::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            Config::default()
        }
    }
}

/// Apply environment overrides on top of a loaded config.
///
/// `lookup` resolves a variable name; empty values are ignored.
fn apply_env_overrides(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(val) = get(ENV_BASE_URL) {
        config.base_url = val;
    }
    if let Some(val) = get(ENV_CHANNEL_ID) {
        config.channel_id = val;
    }
    if let Some(val) = get(ENV_TOKEN) {
        config.token = val;
    }
    if let Some(val) = get(ENV_TEAM_ID) {
        config.team_id = Some(val);
    }
    if let Some(val) = get(ENV_TIMEOUT_SECS) {
        match val.trim().parse::<u64>() {
            Ok(n) => config.timeout_secs = n,
            Err(_) => warn!("Ignoring invalid {}={}", ENV_TIMEOUT_SECS, val),
        }
    }
    if let Some(val) = get(ENV_SCHEDULE) {
        config.schedule = Some(val);
    }

    config
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
