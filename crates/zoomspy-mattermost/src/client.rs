//! Mattermost v4 REST client.
//!
//! Thin and typed: one method per endpoint, bearer auth on every call,
//! no retries. Non-success statuses become `Error::Api` with the
//! response body attached so the caller can log it.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use zoomspy_core::config::schema::{Settings, DEFAULT_TIMEOUT_SECS};
use zoomspy_core::utils::normalize_base_url;
use zoomspy_core::{Channel, ChannelMembership, Error, Post, Result, Team};

use crate::api::ChatApi;
use crate::wire::{CreatePostRequest, PostList, ViewChannelRequest};

// ─────────────────────────────────────────────
// ClientConfig
// ─────────────────────────────────────────────

/// Connection settings for a `MattermostClient`.
///
/// Immutable: `with_*` methods return a modified copy.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    token: String,
    timeout: Duration,
}

impl ClientConfig {
    /// The base URL is normalized (trailing slashes stripped) here, once.
    pub fn new(base_url: &str, token: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            token: token.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Team scope is not part of the connection; `ZoomSpy` takes it from
    /// `Settings`.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.base_url, settings.token.clone()).with_timeout(settings.timeout)
    }

    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self {
            timeout,
            ..self.clone()
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

// ─────────────────────────────────────────────
// MattermostClient
// ─────────────────────────────────────────────

#[derive(Debug)]
pub struct MattermostClient {
    /// HTTP client (shared, connection-pooled).
    http: reqwest::Client,
    config: ClientConfig,
}

impl MattermostClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Transport {
                operation: "build http client",
                message: e.to_string(),
            })?;
        Ok(Self::with_http_client(config, http))
    }

    /// Use a caller-supplied `reqwest::Client` (its own timeout applies).
    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.url(path))
            .bearer_auth(&self.config.token)
            .header(reqwest::header::ACCEPT, "application/json")
    }

    /// Send and require `expected` status. Anything else becomes `Error::Api`.
    async fn send(
        &self,
        operation: &'static str,
        request: RequestBuilder,
        expected: StatusCode,
    ) -> Result<Response> {
        let response = request.send().await.map_err(|e| Error::Transport {
            operation,
            message: e.to_string(),
        })?;

        let status = response.status();
        if status != expected {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(Error::Api {
                operation,
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(operation: &'static str, response: Response) -> Result<T> {
        response.json::<T>().await.map_err(|e| Error::Decode {
            operation,
            message: e.to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<T> {
        let response = self.send(operation, request, StatusCode::OK).await?;
        Self::decode(operation, response).await
    }
}

#[async_trait]
impl ChatApi for MattermostClient {
    async fn list_my_teams(&self) -> Result<Vec<Team>> {
        let teams: Vec<Team> = self
            .get_json("fetch teams", self.request(Method::GET, "/api/v4/users/me/teams"))
            .await?;
        debug!(count = teams.len(), "fetched teams");
        Ok(teams)
    }

    async fn list_channels_for_team(&self, team_id: &str) -> Result<Vec<Channel>> {
        let path = format!("/api/v4/users/me/teams/{team_id}/channels");
        let channels: Vec<Channel> = self
            .get_json("fetch channels", self.request(Method::GET, &path))
            .await?;
        debug!(team_id, count = channels.len(), "fetched channels");
        Ok(channels)
    }

    async fn get_membership(&self, channel_id: &str) -> Result<ChannelMembership> {
        let path = format!("/api/v4/channels/{channel_id}/members/me");
        self.get_json("fetch channel member", self.request(Method::GET, &path))
            .await
    }

    async fn list_posts_since(&self, channel_id: &str, since: i64) -> Result<Vec<Post>> {
        let path = format!("/api/v4/channels/{channel_id}/posts");
        let request = self
            .request(Method::GET, &path)
            .query(&[("since", since)]);
        let list: PostList = self.get_json("fetch posts", request).await?;

        if list.has_more {
            warn!(
                channel_id,
                since,
                "more posts available than one page; only the first page is read"
            );
        }

        let posts = list.into_ordered_since(since);
        debug!(channel_id, since, count = posts.len(), "fetched posts since boundary");
        Ok(posts)
    }

    async fn mark_channel_read(&self, channel_id: &str) -> Result<()> {
        let request = self
            .request(Method::POST, "/api/v4/channels/members/me/view")
            .json(&ViewChannelRequest { channel_id });
        self.send("mark channel read", request, StatusCode::OK).await?;
        debug!(channel_id, "marked channel read");
        Ok(())
    }

    async fn create_post(&self, channel_id: &str, message: &str) -> Result<Post> {
        let request = self
            .request(Method::POST, "/api/v4/posts")
            .json(&CreatePostRequest::new(channel_id, message));
        let response = self.send("create post", request, StatusCode::CREATED).await?;
        let post: Post = Self::decode("create post", response).await?;
        debug!(channel_id, post_id = %post.id, "created post");
        Ok(post)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
