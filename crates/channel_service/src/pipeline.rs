use crate::client::ChannelDataClient;
use crate::resolver::{IdentifierResolver, ResolveError};
use domain::{ChannelIdentifier, ChannelStats, VideoSummary};
use std::sync::Arc;
use thiserror::Error;
use youtube_api::VideoPlatform;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Could not resolve channel ID from input.")]
    Unresolved(#[from] ResolveError),

    #[error("Channel not found or data unavailable.")]
    ChannelNotFound { channel_id: ChannelIdentifier },
}

/// Everything the overview and video sections need for one channel
#[derive(Debug, Clone)]
pub struct ChannelAnalysis {
    pub channel_id: ChannelIdentifier,
    pub stats: ChannelStats,
    pub videos: Vec<VideoSummary>,
}

impl ChannelAnalysis {
    pub fn find_video_by_title(&self, title: &str) -> Option<&VideoSummary> {
        self.videos.iter().find(|v| v.title == title)
    }
}

/// Resolve, then fetch stats, then fetch the video list, one call at a time
#[derive(Clone)]
pub struct ChannelAnalyzer {
    resolver: IdentifierResolver,
    client: ChannelDataClient,
}

impl ChannelAnalyzer {
    pub fn new(platform: Arc<dyn VideoPlatform>) -> Self {
        Self {
            resolver: IdentifierResolver::new(platform.clone()),
            client: ChannelDataClient::new(platform),
        }
    }

    pub fn client(&self) -> &ChannelDataClient {
        &self.client
    }

    pub async fn analyze(&self, input: &str) -> Result<ChannelAnalysis, AnalysisError> {
        let channel_id = self.resolver.resolve(input).await?;

        let stats = self.client.channel_stats(&channel_id).await;
        let videos = self.client.video_list(&channel_id).await;

        if stats.is_empty() {
            tracing::info!(channel_id = %channel_id, "no channel data");
            return Err(AnalysisError::ChannelNotFound { channel_id });
        }

        tracing::info!(
            channel_id = %channel_id,
            videos = videos.len(),
            "channel analyzed"
        );
        Ok(ChannelAnalysis {
            channel_id,
            stats,
            videos,
        })
    }
}
