//! In-memory `ChatApi` for pipeline tests.
//!
//! Behaves like the service for the operations zoomspy uses: posts-since
//! honours the boundary, mark-read moves the boundary past every post in
//! the channel, create-post appends to the target channel.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use zoomspy_core::{Channel, ChannelMembership, Error, Post, Result, Team};
use zoomspy_mattermost::ChatApi;

pub fn team(id: &str, name: &str) -> Team {
    Team {
        id: id.to_string(),
        display_name: name.to_uppercase(),
        name: name.to_string(),
    }
}

pub fn channel(id: &str, team_id: &str, display_name: &str) -> Channel {
    Channel {
        id: id.to_string(),
        team_id: team_id.to_string(),
        display_name: display_name.to_string(),
        name: display_name.to_lowercase(),
        channel_type: "O".to_string(),
    }
}

pub fn post(id: &str, channel_id: &str, created_at: i64, message: &str) -> Post {
    Post {
        id: id.to_string(),
        channel_id: channel_id.to_string(),
        user_id: "someone".to_string(),
        message: message.to_string(),
        created_at,
        ..Default::default()
    }
}

#[derive(Default)]
pub struct FakeApi {
    teams: Vec<Team>,
    channels: HashMap<String, Vec<Channel>>,
    boundaries: Mutex<HashMap<String, i64>>,
    posts: Mutex<HashMap<String, Vec<Post>>>,

    fail_teams: bool,
    fail_channels: HashSet<String>,
    fail_membership: HashSet<String>,
    fail_posts: HashSet<String>,
    /// Source post ids whose repost is rejected.
    fail_repost: HashSet<String>,
    fail_mark_read: HashSet<String>,

    /// Every call in order, e.g. `"membership:c1"`.
    pub calls: Mutex<Vec<String>>,
    /// `(channel_id, message)` for each successful `create_post`.
    pub created: Mutex<Vec<(String, String)>>,
    /// Channels successfully marked read.
    pub marked: Mutex<Vec<String>>,
    next_id: Mutex<u32>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_team(mut self, team: Team, channels: Vec<Channel>) -> Self {
        self.channels.insert(team.id.clone(), channels);
        self.teams.push(team);
        self
    }

    pub fn with_channel_state(self, channel_id: &str, boundary: i64, posts: Vec<Post>) -> Self {
        self.boundaries
            .lock()
            .unwrap()
            .insert(channel_id.to_string(), boundary);
        self.posts
            .lock()
            .unwrap()
            .insert(channel_id.to_string(), posts);
        self
    }

    pub fn failing_teams(mut self) -> Self {
        self.fail_teams = true;
        self
    }

    pub fn failing_channels(mut self, team_id: &str) -> Self {
        self.fail_channels.insert(team_id.to_string());
        self
    }

    pub fn failing_membership(mut self, channel_id: &str) -> Self {
        self.fail_membership.insert(channel_id.to_string());
        self
    }

    pub fn failing_posts(mut self, channel_id: &str) -> Self {
        self.fail_posts.insert(channel_id.to_string());
        self
    }

    pub fn failing_repost_of(mut self, post_id: &str) -> Self {
        self.fail_repost.insert(post_id.to_string());
        self
    }

    pub fn failing_mark_read(mut self, channel_id: &str) -> Self {
        self.fail_mark_read.insert(channel_id.to_string());
        self
    }

    /// Add a post after construction, as if someone wrote it between runs.
    pub fn push_post(&self, post: Post) {
        self.posts
            .lock()
            .unwrap()
            .entry(post.channel_id.clone())
            .or_default()
            .push(post);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn created(&self) -> Vec<(String, String)> {
        self.created.lock().unwrap().clone()
    }

    pub fn marked(&self) -> Vec<String> {
        self.marked.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn transport(operation: &'static str) -> Error {
        Error::Transport {
            operation,
            message: "connection reset by peer".to_string(),
        }
    }
}

#[async_trait]
impl ChatApi for FakeApi {
    async fn list_my_teams(&self) -> Result<Vec<Team>> {
        self.record("teams".to_string());
        if self.fail_teams {
            return Err(Self::transport("fetch teams"));
        }
        Ok(self.teams.clone())
    }

    async fn list_channels_for_team(&self, team_id: &str) -> Result<Vec<Channel>> {
        self.record(format!("channels:{team_id}"));
        if self.fail_channels.contains(team_id) {
            return Err(Error::Api {
                operation: "fetch channels",
                status: 503,
                body: "service unavailable".to_string(),
            });
        }
        Ok(self.channels.get(team_id).cloned().unwrap_or_default())
    }

    async fn get_membership(&self, channel_id: &str) -> Result<ChannelMembership> {
        self.record(format!("membership:{channel_id}"));
        if self.fail_membership.contains(channel_id) {
            return Err(Self::transport("fetch channel member"));
        }
        let last_viewed_at = self
            .boundaries
            .lock()
            .unwrap()
            .get(channel_id)
            .copied()
            .unwrap_or(0);
        Ok(ChannelMembership {
            channel_id: channel_id.to_string(),
            user_id: "bot".to_string(),
            last_viewed_at,
        })
    }

    async fn list_posts_since(&self, channel_id: &str, since: i64) -> Result<Vec<Post>> {
        self.record(format!("posts:{channel_id}:{since}"));
        if self.fail_posts.contains(channel_id) {
            return Err(Error::Api {
                operation: "fetch posts",
                status: 500,
                body: "internal error".to_string(),
            });
        }
        Ok(self
            .posts
            .lock()
            .unwrap()
            .get(channel_id)
            .map(|posts| {
                posts
                    .iter()
                    .filter(|p| p.created_at > since)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn mark_channel_read(&self, channel_id: &str) -> Result<()> {
        self.record(format!("view:{channel_id}"));
        if self.fail_mark_read.contains(channel_id) {
            return Err(Error::Api {
                operation: "mark channel read",
                status: 403,
                body: "forbidden".to_string(),
            });
        }
        let newest = self
            .posts
            .lock()
            .unwrap()
            .get(channel_id)
            .and_then(|posts| posts.iter().map(|p| p.created_at).max())
            .unwrap_or(0);
        let mut boundaries = self.boundaries.lock().unwrap();
        let boundary = boundaries.entry(channel_id.to_string()).or_insert(0);
        *boundary = (*boundary).max(newest);
        self.marked.lock().unwrap().push(channel_id.to_string());
        Ok(())
    }

    async fn create_post(&self, channel_id: &str, message: &str) -> Result<Post> {
        self.record(format!("create:{channel_id}"));
        if self
            .fail_repost
            .iter()
            .any(|id| message.ends_with(&format!("/pl/{id}")))
        {
            return Err(Error::Api {
                operation: "create post",
                status: 400,
                body: "bad request".to_string(),
            });
        }
        let id = {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            format!("repost{}", *next)
        };
        self.created
            .lock()
            .unwrap()
            .push((channel_id.to_string(), message.to_string()));
        Ok(Post {
            id,
            channel_id: channel_id.to_string(),
            message: message.to_string(),
            ..Default::default()
        })
    }
}
