//! Unread pipeline — which channels have new meeting links.
//!
//! One pass, no state kept between passes:
//!
//! 1. Resolve the team scope (a configured team, or every team)
//! 2. List channels of every team in scope
//! 3. Per channel: read the membership boundary, fetch posts after it
//! 4. Drop channels with nothing unread
//! 5. Keep posts with a joinable meeting link, drop channels left empty
//!
//! Every fetch is sequential. The first fetch error aborts the pass and
//! nothing collected so far is returned.

use tracing::{debug, error, info};

use zoomspy_core::links::is_joinable_meeting_link;
use zoomspy_core::{Channel, ChannelUnread, Error, Result, Team};
use zoomspy_mattermost::ChatApi;

// ─────────────────────────────────────────────
// TeamScope
// ─────────────────────────────────────────────

/// The teams a run looks at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TeamScope {
    /// Every team the bot belongs to.
    All(Vec<Team>),
    /// The configured team only.
    Single(Team),
}

impl TeamScope {
    pub fn teams(&self) -> &[Team] {
        match self {
            TeamScope::All(teams) => teams,
            TeamScope::Single(team) => std::slice::from_ref(team),
        }
    }

    /// Team name for team-qualified permalinks (`{base}/{team}/pl/{id}`).
    /// Only a pinned team uses the qualified form.
    pub fn permalink_team(&self) -> Option<&str> {
        match self {
            TeamScope::All(_) => None,
            TeamScope::Single(team) => Some(&team.name),
        }
    }
}

/// Result of one pipeline pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnreadSnapshot {
    pub scope: TeamScope,
    /// Channels with at least one selected post, in enumeration order.
    pub channels: Vec<ChannelUnread>,
}

impl UnreadSnapshot {
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn post_count(&self) -> usize {
        self.channels.iter().map(|c| c.posts.len()).sum()
    }
}

// ─────────────────────────────────────────────
// UnreadPipeline
// ─────────────────────────────────────────────

pub struct UnreadPipeline<'a, A: ChatApi + ?Sized> {
    api: &'a A,
    team_id: Option<String>,
}

impl<'a, A: ChatApi + ?Sized> UnreadPipeline<'a, A> {
    pub fn new(api: &'a A, team_id: Option<String>) -> Self {
        Self { api, team_id }
    }

    /// Full pass: scope, unread posts, meeting-link filter.
    pub async fn run(&self) -> Result<UnreadSnapshot> {
        let scope = self.resolve_scope().await?;
        let unread = self.unread_posts(&scope).await?;
        let channels = select_meeting_posts(unread);

        info!(
            channels = channels.len(),
            posts = channels.iter().map(|c| c.posts.len()).sum::<usize>(),
            "meeting links found"
        );

        Ok(UnreadSnapshot { scope, channels })
    }

    /// Resolve which teams to inspect.
    ///
    /// With a configured team id the bot must be a member of that team;
    /// otherwise the run fails with `Error::Config`.
    pub async fn resolve_scope(&self) -> Result<TeamScope> {
        let teams = self.api.list_my_teams().await.map_err(|e| {
            error!(error = %e, "Error fetching teams");
            e
        })?;

        match &self.team_id {
            None => {
                debug!(teams = teams.len(), "monitoring all teams");
                Ok(TeamScope::All(teams))
            }
            Some(team_id) => {
                let team = teams
                    .into_iter()
                    .find(|t| &t.id == team_id)
                    .ok_or_else(|| {
                        Error::config(format!("team {team_id} is not among the bot's teams"))
                    })?;
                debug!(team_id = %team.id, team = %team.name, "monitoring a single team");
                Ok(TeamScope::Single(team))
            }
        }
    }

    /// Channels of every team in scope, team by team.
    pub async fn list_channels(&self, scope: &TeamScope) -> Result<Vec<Channel>> {
        let mut channels = Vec::new();
        for team in scope.teams() {
            let team_channels = self
                .api
                .list_channels_for_team(&team.id)
                .await
                .map_err(|e| {
                    error!(team_id = %team.id, error = %e, "Error fetching channels");
                    e
                })?;
            channels.extend(team_channels);
        }
        info!(count = channels.len(), "Fetched channels");
        Ok(channels)
    }

    /// Unread posts of one channel, or `None` when there are none.
    pub async fn unread_for_channel(&self, channel: &Channel) -> Result<Option<ChannelUnread>> {
        let member = self.api.get_membership(&channel.id).await.map_err(|e| {
            error!(channel_id = %channel.id, error = %e, "Error fetching channel membership");
            e
        })?;

        let posts = self
            .api
            .list_posts_since(&channel.id, member.last_viewed_at)
            .await
            .map_err(|e| {
                error!(channel_id = %channel.id, error = %e, "Error fetching posts");
                e
            })?;

        // Re-check the boundary; the service is trusted for ordering only.
        let posts: Vec<_> = posts
            .into_iter()
            .filter(|p| p.created_at > member.last_viewed_at)
            .collect();

        if posts.is_empty() {
            return Ok(None);
        }

        debug!(
            channel_id = %channel.id,
            since = member.last_viewed_at,
            count = posts.len(),
            "unread posts"
        );
        Ok(Some(ChannelUnread::new(channel.clone(), posts)))
    }

    /// Every channel in scope with at least one unread post.
    pub async fn unread_posts(&self, scope: &TeamScope) -> Result<Vec<ChannelUnread>> {
        let channels = self.list_channels(scope).await?;

        let mut unread = Vec::new();
        for channel in &channels {
            if let Some(item) = self.unread_for_channel(channel).await? {
                unread.push(item);
            }
        }
        Ok(unread)
    }
}

/// Keep posts with a joinable meeting link; drop channels left empty.
pub fn select_meeting_posts(unread: Vec<ChannelUnread>) -> Vec<ChannelUnread> {
    unread
        .into_iter()
        .filter_map(|item| item.retain(|p| is_joinable_meeting_link(&p.message)))
        .collect()
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
