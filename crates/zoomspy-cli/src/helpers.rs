//! Shared CLI helpers — path expansion, report printing.

use std::path::PathBuf;

use colored::Colorize;

use zoomspy_pipeline::{Preview, RunReport};

/// Expand `~` at the start of a path to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_next::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs_next::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

pub fn print_report(report: &RunReport) {
    let summary = &report.summary;
    println!();
    if report.snapshot.is_empty() {
        println!("  {}", "No new meeting links.".dimmed());
    } else {
        for item in &report.snapshot.channels {
            println!(
                "  {} {} link(s)",
                format!("[{}]", item.channel.label()).cyan(),
                item.posts.len()
            );
        }
    }
    println!();
    println!(
        "  Reposted {} | failed {} | channels marked read {} | mark-read failed {}",
        summary.reposted.to_string().green(),
        colorize_failures(summary.repost_failures),
        summary.channels_marked,
        colorize_failures(summary.mark_failures),
    );
    println!();
}

pub fn print_preview(preview: &Preview) {
    println!();
    if preview.reposts.is_empty() {
        println!("  {}", "No new meeting links.".dimmed());
    }
    for repost in &preview.reposts {
        println!("  {} {}", "would post:".dimmed(), repost.message);
    }
    println!();
    println!("  {}", "Dry run: nothing posted, no channel marked read.".yellow());
    println!();
}

fn colorize_failures(n: usize) -> String {
    if n == 0 {
        n.to_string()
    } else {
        n.to_string().red().to_string()
    }
}
