//! ChatApi trait — the chat-service operations zoomspy depends on.
//!
//! The pipeline and repost job are written against this trait so they can
//! run over the real `MattermostClient` or an in-memory fake in tests.

use async_trait::async_trait;
use zoomspy_core::{Channel, ChannelMembership, Post, Result, Team};

#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Teams the authenticated user belongs to.
    async fn list_my_teams(&self) -> Result<Vec<Team>>;

    /// Channels the authenticated user belongs to within a team.
    async fn list_channels_for_team(&self, team_id: &str) -> Result<Vec<Channel>>;

    /// The user's membership (and unread boundary) for a channel.
    async fn get_membership(&self, channel_id: &str) -> Result<ChannelMembership>;

    /// Posts created strictly after `since` (epoch ms), in service order.
    ///
    /// Only the first page the service returns is read.
    async fn list_posts_since(&self, channel_id: &str, since: i64) -> Result<Vec<Post>>;

    /// Advance the user's read marker for a channel to now.
    async fn mark_channel_read(&self, channel_id: &str) -> Result<()>;

    /// Create a top-level post. Returns the created post.
    async fn create_post(&self, channel_id: &str, message: &str) -> Result<Post>;
}
