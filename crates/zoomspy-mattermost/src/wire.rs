//! Request and response bodies that only exist on the wire.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use zoomspy_core::Post;

/// Response of `GET /api/v4/channels/{id}/posts`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct PostList {
    /// Post ids in display order.
    pub order: Vec<String>,
    pub posts: HashMap<String, Post>,
    pub next_post_id: String,
    pub prev_post_id: String,
    pub has_more: bool,
}

impl PostList {
    /// Walk `order`, resolve each id in `posts`, and keep only posts
    /// created strictly after `since`. Ids missing from `posts` are skipped.
    pub fn into_ordered_since(mut self, since: i64) -> Vec<Post> {
        let mut ordered = Vec::with_capacity(self.order.len());
        for id in &self.order {
            let Some(post) = self.posts.remove(id) else {
                continue;
            };
            if post.created_at <= since {
                continue;
            }
            ordered.push(post);
        }
        ordered
    }
}

/// Body of `POST /api/v4/posts`.
#[derive(Clone, Debug, Serialize)]
pub struct CreatePostRequest<'a> {
    pub channel_id: &'a str,
    pub message: &'a str,
    /// Always `null`: reposts are top-level.
    pub root_id: Option<&'a str>,
    pub file_ids: Vec<String>,
}

impl<'a> CreatePostRequest<'a> {
    pub fn new(channel_id: &'a str, message: &'a str) -> Self {
        Self {
            channel_id,
            message,
            root_id: None,
            file_ids: Vec::new(),
        }
    }
}

/// Body of `POST /api/v4/channels/members/me/view`.
#[derive(Clone, Debug, Serialize)]
pub struct ViewChannelRequest<'a> {
    pub channel_id: &'a str,
}
