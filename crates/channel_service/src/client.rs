use domain::{
    ChannelIdentifier, ChannelSnippet, ChannelStatistics, ChannelStats, MAX_VIDEO_RESULTS,
    VideoStatistics, VideoSummary,
};
use std::sync::Arc;
use youtube_api::models::{self, ChannelResource, SearchResult, parse_count};
use youtube_api::{ApiError, VideoPlatform};

/// Read-only access to channel and video metadata.
///
/// The `fetch_*` methods report failures. The unprefixed methods log the
/// failure and return an empty value instead, so an empty result can mean
/// either "nothing there" or "call failed".
#[derive(Clone)]
pub struct ChannelDataClient {
    platform: Arc<dyn VideoPlatform>,
}

impl ChannelDataClient {
    pub fn new(platform: Arc<dyn VideoPlatform>) -> Self {
        Self { platform }
    }

    pub async fn fetch_channel_stats(
        &self,
        channel_id: &ChannelIdentifier,
    ) -> Result<ChannelStats, ApiError> {
        let response = self.platform.list_channels(channel_id.as_str()).await?;
        Ok(response
            .items
            .into_iter()
            .next()
            .map(channel_stats_from)
            .unwrap_or_default())
    }

    /// Most recent uploads, newest first. Search hits that are not videos
    /// (the channel itself, playlists) are dropped.
    pub async fn fetch_video_list(
        &self,
        channel_id: &ChannelIdentifier,
    ) -> Result<Vec<VideoSummary>, ApiError> {
        let response = self
            .platform
            .search_channel_videos(channel_id.as_str(), MAX_VIDEO_RESULTS as u32)
            .await?;

        Ok(response
            .items
            .iter()
            .filter_map(video_summary_from)
            .take(MAX_VIDEO_RESULTS)
            .collect())
    }

    pub async fn fetch_video_stats(&self, video_id: &str) -> Result<VideoStatistics, ApiError> {
        let response = self.platform.list_video_statistics(video_id).await?;
        Ok(response
            .items
            .into_iter()
            .next()
            .and_then(|item| item.statistics)
            .map(|s| VideoStatistics {
                view_count: parse_count(s.view_count.as_deref()),
                like_count: parse_count(s.like_count.as_deref()),
                comment_count: parse_count(s.comment_count.as_deref()),
            })
            .unwrap_or_default())
    }

    pub async fn channel_stats(&self, channel_id: &ChannelIdentifier) -> ChannelStats {
        self.fetch_channel_stats(channel_id)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(channel_id = %channel_id, error = %e, "error fetching channel stats");
                ChannelStats::default()
            })
    }

    pub async fn video_list(&self, channel_id: &ChannelIdentifier) -> Vec<VideoSummary> {
        self.fetch_video_list(channel_id)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(channel_id = %channel_id, error = %e, "error fetching video list");
                Vec::new()
            })
    }

    pub async fn video_stats(&self, video_id: &str) -> VideoStatistics {
        self.fetch_video_stats(video_id).await.unwrap_or_else(|e| {
            tracing::warn!(video_id, error = %e, "error fetching video stats");
            VideoStatistics::default()
        })
    }
}

fn channel_stats_from(resource: ChannelResource) -> ChannelStats {
    ChannelStats {
        id: resource.id,
        snippet: resource.snippet.map(|s| ChannelSnippet {
            title: s.title,
            description: s.description,
            thumbnail_url: s.thumbnails.as_ref().and_then(models::Thumbnails::best_url),
            published_at: s.published_at,
        }),
        statistics: resource.statistics.map(|s| ChannelStatistics {
            subscriber_count: parse_count(s.subscriber_count.as_deref()),
            view_count: parse_count(s.view_count.as_deref()),
            video_count: parse_count(s.video_count.as_deref()),
        }),
    }
}

fn video_summary_from(item: &SearchResult) -> Option<VideoSummary> {
    let video_id = item.video_id()?;
    let snippet = item.snippet.as_ref();

    Some(VideoSummary {
        video_id: video_id.to_string(),
        title: snippet.and_then(|s| s.title.clone()).unwrap_or_default(),
        description: snippet
            .and_then(|s| s.description.clone())
            .unwrap_or_default(),
        published_at: snippet
            .and_then(|s| s.published_at.clone())
            .unwrap_or_default(),
    })
}
