//! Small helpers — base URL normalization, permalinks, data paths.

use std::path::PathBuf;

/// Get the zoomspy data directory (e.g. `~/.zoomspy/`).
pub fn get_data_path() -> PathBuf {
    let home = home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".zoomspy")
}

/// Strip trailing slashes so paths can be appended with `format!("{base}/...")`.
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

/// Permalink to a post: `{base}/pl/{post_id}`, or
/// `{base}/{team}/pl/{post_id}` when a team name is given.
pub fn build_post_url(base_url: &str, team_name: Option<&str>, post_id: &str) -> String {
    let base = normalize_base_url(base_url);
    match team_name {
        Some(team) if !team.is_empty() => format!("{base}/{team}/pl/{post_id}"),
        _ => format!("{base}/pl/{post_id}"),
    }
}

/// Body of the message posted into the spy channel.
pub fn repost_message(channel_label: &str, permalink: &str) -> String {
    format!("[{channel_label}] {permalink}")
}

/// Mask a secret for display, keeping the first and last 4 characters.
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 8 {
        return "*".repeat(count);
    }
    let head: String = secret.chars().take(4).collect();
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("{head}…{tail}")
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| std::env::var("USERPROFILE").ok().map(PathBuf::from))
}
