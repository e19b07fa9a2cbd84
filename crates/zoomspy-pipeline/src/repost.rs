//! Repost job — announce found meeting links in the spy channel.
//!
//! For each channel: one repost per post (`[<channel>] <permalink>`), then
//! mark the channel read. Failures here are per item: they are logged and
//! counted, and the job moves on.

use tracing::{error, info};

use zoomspy_core::utils::{build_post_url, repost_message};
use zoomspy_core::{Channel, ChannelUnread, Post};
use zoomspy_mattermost::ChatApi;

/// A repost the job would send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannedRepost {
    pub source_channel_id: String,
    pub source_post_id: String,
    pub message: String,
}

/// What happened during `RepostJob::execute`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RepostSummary {
    pub reposted: usize,
    pub repost_failures: usize,
    pub channels_marked: usize,
    pub mark_failures: usize,
}

impl RepostSummary {
    /// No repost or mark-read failed.
    pub fn is_clean(&self) -> bool {
        self.repost_failures == 0 && self.mark_failures == 0
    }
}

pub struct RepostJob<'a, A: ChatApi + ?Sized> {
    api: &'a A,
    base_url: String,
    target_channel_id: String,
    team_name: Option<String>,
}

impl<'a, A: ChatApi + ?Sized> RepostJob<'a, A> {
    pub fn new(api: &'a A, base_url: &str, target_channel_id: &str) -> Self {
        Self {
            api,
            base_url: base_url.to_string(),
            target_channel_id: target_channel_id.to_string(),
            team_name: None,
        }
    }

    /// Use team-qualified permalinks.
    pub fn with_team_name(mut self, team_name: Option<&str>) -> Self {
        self.team_name = team_name.map(String::from);
        self
    }

    fn message_for(&self, channel: &Channel, post: &Post) -> String {
        let permalink = build_post_url(&self.base_url, self.team_name.as_deref(), &post.id);
        repost_message(&channel.display_name, &permalink)
    }

    /// The reposts `execute` would send, without sending anything.
    pub fn plan(&self, channels: &[ChannelUnread]) -> Vec<PlannedRepost> {
        channels
            .iter()
            .flat_map(|item| {
                item.posts.iter().map(move |post| PlannedRepost {
                    source_channel_id: item.channel.id.clone(),
                    source_post_id: post.id.clone(),
                    message: self.message_for(&item.channel, post),
                })
            })
            .collect()
    }

    pub async fn execute(&self, channels: &[ChannelUnread]) -> RepostSummary {
        let mut summary = RepostSummary::default();

        for item in channels {
            info!(
                channel_id = %item.channel.id,
                channel = %item.channel.label(),
                count = item.posts.len(),
                "Zoom posts found"
            );

            for post in &item.posts {
                info!(
                    channel_id = %item.channel.id,
                    post_id = %post.id,
                    user_id = %post.user_id,
                    created_at = %post.created_at_utc(),
                    "Post"
                );

                let message = self.message_for(&item.channel, post);
                match self.api.create_post(&self.target_channel_id, &message).await {
                    Ok(_) => summary.reposted += 1,
                    Err(e) => {
                        summary.repost_failures += 1;
                        error!(
                            channel_id = %self.target_channel_id,
                            source_channel_id = %item.channel.id,
                            post_id = %post.id,
                            error = %e,
                            "Error reposting zoom link"
                        );
                    }
                }
            }

            match self.api.mark_channel_read(&item.channel.id).await {
                Ok(()) => summary.channels_marked += 1,
                Err(e) => {
                    summary.mark_failures += 1;
                    error!(
                        channel_id = %item.channel.id,
                        error = %e,
                        "Error marking channel read"
                    );
                }
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{channel, post, FakeApi};

    const BASE: &str = "https://chat.example.com/";

    fn found(channel_id: &str, label: &str, post_ids: &[&str]) -> ChannelUnread {
        ChannelUnread::new(
            channel(channel_id, "t1", label),
            post_ids
                .iter()
                .enumerate()
                .map(|(i, id)| post(id, channel_id, i as i64 + 1, "https://zoom.us/j/1"))
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_reposts_then_marks_read() {
        let api = FakeApi::new();
        let job = RepostJob::new(&api, BASE, "spy");
        let summary = job.execute(&[found("x", "X", &["p1", "p2"])]).await;

        assert_eq!(
            api.created(),
            vec![
                ("spy".to_string(), "[X] https://chat.example.com/pl/p1".to_string()),
                ("spy".to_string(), "[X] https://chat.example.com/pl/p2".to_string()),
            ]
        );
        assert_eq!(api.marked(), vec!["x".to_string()]);
        assert_eq!(api.calls(), vec!["create:spy", "create:spy", "view:x"]);
        assert_eq!(summary.reposted, 2);
        assert!(summary.is_clean());
    }

    #[tokio::test]
    async fn test_team_qualified_permalink() {
        let api = FakeApi::new();
        let job = RepostJob::new(&api, BASE, "spy").with_team_name(Some("eng"));
        job.execute(&[found("x", "X", &["p1"])]).await;

        assert_eq!(api.created()[0].1, "[X] https://chat.example.com/eng/pl/p1");
    }

    #[tokio::test]
    async fn test_repost_failure_does_not_stop_job() {
        let api = FakeApi::new().failing_repost_of("p1");
        let job = RepostJob::new(&api, BASE, "spy");
        let summary = job
            .execute(&[found("x", "X", &["p1", "p2"]), found("z", "Z", &["p3"])])
            .await;

        let messages: Vec<String> = api.created().into_iter().map(|(_, m)| m).collect();
        assert_eq!(
            messages,
            vec![
                "[X] https://chat.example.com/pl/p2".to_string(),
                "[Z] https://chat.example.com/pl/p3".to_string(),
            ]
        );
        // Channel still marked read despite the failed repost
        assert_eq!(api.marked(), vec!["x".to_string(), "z".to_string()]);
        assert_eq!(summary.reposted, 2);
        assert_eq!(summary.repost_failures, 1);
        assert_eq!(summary.channels_marked, 2);
        assert!(!summary.is_clean());
    }

    #[tokio::test]
    async fn test_mark_read_failure_is_tolerated() {
        let api = FakeApi::new().failing_mark_read("x");
        let job = RepostJob::new(&api, BASE, "spy");
        let summary = job
            .execute(&[found("x", "X", &["p1"]), found("z", "Z", &["p2"])])
            .await;

        assert_eq!(api.created().len(), 2);
        assert_eq!(api.marked(), vec!["z".to_string()]);
        assert_eq!(summary.mark_failures, 1);
        assert_eq!(summary.channels_marked, 1);
    }

    #[test]
    fn test_plan_uses_display_name_not_slug() {
        let api = FakeApi::new();
        let job = RepostJob::new(&api, BASE, "spy");
        let mut item = found("d", "Design Review", &["p9"]);
        item.channel.name = "design-review".to_string();

        let plan = job.plan(&[item]);
        assert_eq!(
            plan,
            vec![PlannedRepost {
                source_channel_id: "d".to_string(),
                source_post_id: "p9".to_string(),
                message: "[Design Review] https://chat.example.com/pl/p9".to_string(),
            }]
        );
        assert!(api.calls().is_empty());
    }
}
