//! Zoom meeting-link classification.
//!
//! A message is interesting when it contains a link somebody can join
//! right now. Zoom also hands out links to cloud recordings
//! (`/rec/share/...`, `/recording/...`); those are archives, not live
//! meetings, and are classified separately.
//!
//! Hosts are matched on a label boundary: `zoom.us`, `us06web.zoom.us`
//! and `company.zoom.com` match, `notzoom.us` and `zoom.us.example.com`
//! do not.

use std::sync::LazyLock;

use regex::Regex;

/// Any http(s) URL on zoom.us / zoom.com / zoom.gov or a subdomain.
/// Group 1 is the path (and query) after the host.
static ZOOM_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)\bhttps?://(?:[a-z0-9-]+\.)*zoom\.(?:us|com|gov)(?::\d+)?(/[^\s<>()\[\]{}"'`]*)"#,
    )
    .expect("zoom url pattern is valid")
});

/// Path segments that mark a recording/archive link.
const RECORDING_SEGMENTS: &[&str] = &["rec", "recording"];

/// What a Zoom URL points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkKind {
    /// A meeting or webinar that can be joined.
    Join,
    /// A cloud recording.
    Recording,
}

/// A Zoom URL found in a message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MeetingLink {
    pub url: String,
    pub kind: LinkKind,
}

impl MeetingLink {
    pub fn is_joinable(&self) -> bool {
        self.kind == LinkKind::Join
    }
}

/// Every Zoom URL in `text`, in order of appearance.
pub fn extract_meeting_links(text: &str) -> Vec<MeetingLink> {
    ZOOM_URL
        .captures_iter(text)
        .map(|caps| {
            let url = caps[0].to_string();
            let kind = classify_path(&caps[1]);
            MeetingLink { url, kind }
        })
        .collect()
}

/// Whether `text` contains any Zoom URL, recordings included.
pub fn has_meeting_url(text: &str) -> bool {
    ZOOM_URL.is_match(text)
}

/// Whether `text` contains at least one joinable Zoom link.
///
/// A message carrying both a join link and a recording link matches:
/// one live link is enough.
pub fn is_joinable_meeting_link(text: &str) -> bool {
    extract_meeting_links(text).iter().any(MeetingLink::is_joinable)
}

fn classify_path(path: &str) -> LinkKind {
    let path = path.split(['?', '#']).next().unwrap_or("");
    let is_recording = path.split('/').any(|segment| {
        RECORDING_SEGMENTS
            .iter()
            .any(|rec| segment.eq_ignore_ascii_case(rec))
    });
    if is_recording {
        LinkKind::Recording
    } else {
        LinkKind::Join
    }
}
