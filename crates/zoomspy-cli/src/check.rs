//! `zoomspy check` — classify a message without touching the server.

use anyhow::Result;
use colored::Colorize;

use zoomspy_core::links::{extract_meeting_links, is_joinable_meeting_link, LinkKind};

pub fn run(text: &str) -> Result<()> {
    let links = extract_meeting_links(text);

    println!();
    if links.is_empty() {
        println!("  {}", "No Zoom links found.".dimmed());
    }
    for link in &links {
        let kind = match link.kind {
            LinkKind::Join => "join".green(),
            LinkKind::Recording => "recording".yellow(),
        };
        println!("  {:<12} {}", kind, link.url);
    }

    println!();
    if is_joinable_meeting_link(text) {
        println!("  {} would be reposted", "✓".green());
    } else {
        println!("  {} would be ignored", "✗".red());
    }
    println!();
    Ok(())
}
