//! Configuration schema.
//!
//! `Config` is the loose, on-disk shape (every field optional so partial
//! files and env-only setups both work). `Settings` is the validated,
//! immutable value the rest of the program runs on.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::utils::normalize_base_url;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Largest accepted per-request timeout (one hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

// ─────────────────────────────────────────────
// Config
// ─────────────────────────────────────────────

/// Root configuration — loaded from `~/.zoomspy/config.json` + env vars.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Mattermost server, e.g. `https://chat.example.com`.
    pub base_url: String,
    /// Channel that receives the reposted permalinks.
    pub channel_id: String,
    /// Personal access token or bot token.
    pub token: String,
    /// Restrict monitoring to a single team.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Cron expression for `zoomspy watch` (6 fields, seconds first).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            channel_id: String::new(),
            token: String::new(),
            team_id: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            schedule: None,
        }
    }
}

impl Config {
    /// Validate into `Settings`.
    ///
    /// Fails with `Error::Config` naming the first missing required key.
    pub fn settings(&self) -> Result<Settings> {
        let base_url = normalize_base_url(&self.base_url);
        if base_url.is_empty() {
            return Err(Error::config("MATTERMOST_BASE_URL is not set"));
        }
        if self.channel_id.trim().is_empty() {
            return Err(Error::config("MATTERMOST_CHANNEL_ID is not set"));
        }
        if self.token.trim().is_empty() {
            return Err(Error::config("MATTERMOST_TOKEN is not set"));
        }

        let team_id = self
            .team_id
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from);

        let timeout_secs = match self.timeout_secs {
            0 => DEFAULT_TIMEOUT_SECS,
            secs if secs > MAX_TIMEOUT_SECS => {
                return Err(Error::config(format!(
                    "ZOOMSPY_TIMEOUT_SECS must be at most {MAX_TIMEOUT_SECS}, got {secs}"
                )));
            }
            secs => secs,
        };

        Ok(Settings {
            base_url,
            channel_id: self.channel_id.trim().to_string(),
            token: self.token.trim().to_string(),
            team_id,
            timeout: Duration::from_secs(timeout_secs),
            schedule: self.schedule.clone().filter(|s| !s.trim().is_empty()),
        })
    }
}

// ─────────────────────────────────────────────
// Settings
// ─────────────────────────────────────────────

/// Validated configuration. Built once at startup, never mutated.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    /// Base URL without trailing slash.
    pub base_url: String,
    pub channel_id: String,
    pub token: String,
    pub team_id: Option<String>,
    pub timeout: Duration,
    pub schedule: Option<String>,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("base_url", &self.base_url)
            .field("channel_id", &self.channel_id)
            .field("token", &"<redacted>")
            .field("team_id", &self.team_id)
            .field("timeout", &self.timeout)
            .field("schedule", &self.schedule)
            .finish()
    }
}
