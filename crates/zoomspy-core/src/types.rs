//! Mattermost entities as zoomspy sees them.
//!
//! Field names follow the Mattermost v4 JSON so the types deserialize
//! directly from API responses. Unknown fields are ignored and missing
//! ones default, since the service adds fields between versions.
//! Timestamps are Unix epoch milliseconds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// Team / Channel
// ─────────────────────────────────────────────

/// A team the bot belongs to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Team {
    pub id: String,
    pub display_name: String,
    /// URL slug, used in team-qualified permalinks.
    pub name: String,
}

/// A channel the bot is a member of.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Channel {
    pub id: String,
    pub team_id: String,
    pub display_name: String,
    pub name: String,
    /// `O` (open), `P` (private), `D` (direct), `G` (group).
    #[serde(rename = "type")]
    pub channel_type: String,
}

impl Channel {
    /// Display name, falling back to the slug for DMs and group channels
    /// that have no display name.
    pub fn label(&self) -> &str {
        if self.display_name.is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }
}

/// The bot's membership in a channel. `last_viewed_at` is the unread
/// boundary: everything created strictly after it is unread.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelMembership {
    pub channel_id: String,
    pub user_id: String,
    pub last_viewed_at: i64,
}

// ─────────────────────────────────────────────
// Post
// ─────────────────────────────────────────────

/// A message in a channel. Immutable once created.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Post {
    pub id: String,
    pub channel_id: String,
    pub user_id: String,
    /// Message body.
    pub message: String,
    pub root_id: String,
    pub parent_id: String,
    #[serde(rename = "create_at")]
    pub created_at: i64,
}

impl Post {
    /// `created_at` as a UTC timestamp, for logging. Out-of-range values
    /// render as the epoch.
    pub fn created_at_utc(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.created_at).unwrap_or_default()
    }
}

// ─────────────────────────────────────────────
// ChannelUnread
// ─────────────────────────────────────────────

/// Posts selected from one channel during a run, in service order.
///
/// Built fresh each run and never persisted. The pipeline only emits
/// values with at least one post.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelUnread {
    pub channel: Channel,
    pub posts: Vec<Post>,
}

impl ChannelUnread {
    pub fn new(channel: Channel, posts: Vec<Post>) -> Self {
        Self { channel, posts }
    }

    /// Keep only posts matching `keep`, or `None` if none survive.
    pub fn retain(self, mut keep: impl FnMut(&Post) -> bool) -> Option<Self> {
        let posts: Vec<Post> = self.posts.into_iter().filter(|p| keep(p)).collect();
        if posts.is_empty() {
            None
        } else {
            Some(Self {
                channel: self.channel,
                posts,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: &str, created_at: i64, message: &str) -> Post {
        Post {
            id: id.to_string(),
            channel_id: "ch1".to_string(),
            message: message.to_string(),
            created_at,
            ..Default::default()
        }
    }

    #[test]
    fn test_post_deserializes_create_at() {
        let json = r#"{
            "id": "p1",
            "channel_id": "c1",
            "user_id": "u1",
            "message": "hello",
            "root_id": "",
            "parent_id": "",
            "create_at": 1700000000123,
            "update_at": 1700000000999,
            "props": {}
        }"#;
        let p: Post = serde_json::from_str(json).unwrap();
        assert_eq!(p.id, "p1");
        assert_eq!(p.created_at, 1_700_000_000_123);
        assert_eq!(
            p.created_at_utc().timestamp_millis(),
            1_700_000_000_123
        );
    }

    #[test]
    fn test_channel_type_renamed() {
        let json = r#"{"id":"c1","team_id":"t1","display_name":"Town Square","name":"town-square","type":"O"}"#;
        let c: Channel = serde_json::from_str(json).unwrap();
        assert_eq!(c.channel_type, "O");
        assert_eq!(c.label(), "Town Square");

        let back = serde_json::to_value(&c).unwrap();
        assert_eq!(back["type"], "O");
    }

    #[test]
    fn test_channel_label_falls_back_to_name() {
        let c = Channel {
            name: "u1__u2".to_string(),
            ..Default::default()
        };
        assert_eq!(c.label(), "u1__u2");
    }

    #[test]
    fn test_membership_ignores_extra_fields() {
        let json = r#"{"channel_id":"c1","user_id":"u1","last_viewed_at":100,"msg_count":7,"roles":"channel_user"}"#;
        let m: ChannelMembership = serde_json::from_str(json).unwrap();
        assert_eq!(m.last_viewed_at, 100);
    }

    #[test]
    fn test_retain_keeps_order() {
        let unread = ChannelUnread::new(
            Channel::default(),
            vec![post("a", 1, "x"), post("b", 2, "y"), post("c", 3, "x")],
        );
        let kept = unread.retain(|p| p.message == "x").unwrap();
        let ids: Vec<&str> = kept.posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_retain_drops_empty() {
        let unread = ChannelUnread::new(Channel::default(), vec![post("a", 1, "x")]);
        assert!(unread.retain(|_| false).is_none());
    }
}
