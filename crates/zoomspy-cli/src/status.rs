//! `zoomspy status` — show configuration status.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use zoomspy_core::config::{get_config_path, load_config};
use zoomspy_core::utils::mask_secret;

pub fn run(config_path: Option<&Path>) -> Result<()> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(get_config_path);
    let config = load_config(Some(&path));

    println!();
    println!("{}", "zoomspy status".bold());
    println!();

    let exists = if path.exists() {
        "✓".green().to_string()
    } else {
        "(not found)".dimmed().to_string()
    };
    println!("  {:<18} {} {}", "Config:", path.display(), exists);
    println!();

    print_key("Base URL", Some(config.base_url.as_str()));
    print_key("Spy channel", Some(config.channel_id.as_str()));
    let token = mask_secret(&config.token);
    print_key("Token", Some(token.as_str()).filter(|_| !config.token.is_empty()));
    print_key("Team", config.team_id.as_deref());
    print_key("Schedule", config.schedule.as_deref());
    println!("  {:<18} {}s", "Timeout:", config.timeout_secs);

    println!();
    match config.settings() {
        Ok(_) => println!("  {} ready", "✓".green()),
        Err(e) => println!("  {} {}", "✗".red(), e),
    }
    println!();
    Ok(())
}

fn print_key(label: &str, value: Option<&str>) {
    let shown = match value.filter(|v| !v.is_empty()) {
        Some(v) => format!("{} {}", "✓".green(), v),
        None => "not set".dimmed().to_string(),
    };
    println!("  {:<18} {}", format!("{label}:"), shown);
}
