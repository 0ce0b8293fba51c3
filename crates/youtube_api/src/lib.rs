//! Client for the read-only subset of the YouTube Data API v3 used by the
//! channel analysis pipeline.

pub mod models;

use async_trait::async_trait;
use models::{ChannelListResponse, ErrorResponse, SearchListResponse, VideoListResponse};
use serde::de::DeserializeOwned;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("YouTube API error {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to parse {resource} response: {source}")]
    Decode {
        resource: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// The four outbound calls the pipeline makes against the video platform.
///
/// `DataApiClient` talks to the real API (or the mock server); tests plug in
/// their own implementations.
#[async_trait]
pub trait VideoPlatform: Send + Sync {
    /// `search.list` restricted to channels, matching `query`
    async fn search_channels(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<SearchListResponse, ApiError>;

    /// `channels.list` with the `snippet,statistics` parts
    async fn list_channels(&self, channel_id: &str) -> Result<ChannelListResponse, ApiError>;

    /// `search.list` of a channel's uploads, newest first
    async fn search_channel_videos(
        &self,
        channel_id: &str,
        max_results: u32,
    ) -> Result<SearchListResponse, ApiError>;

    /// `videos.list` with the `statistics` part
    async fn list_video_statistics(&self, video_id: &str) -> Result<VideoListResponse, ApiError>;
}

/// HTTP implementation of [`VideoPlatform`], authenticated with an API key
#[derive(Debug, Clone)]
pub struct DataApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl DataApiClient {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        params: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = format!("{}/{}", self.base_url, resource);
        tracing::debug!(resource, ?params, "calling YouTube Data API");

        let resp = self
            .http
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&text)
                .ok()
                .and_then(|e| e.error.message)
                .unwrap_or(text);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&text).map_err(|source| ApiError::Decode { resource, source })
    }
}

#[async_trait]
impl VideoPlatform for DataApiClient {
    async fn search_channels(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<SearchListResponse, ApiError> {
        let max_results = max_results.to_string();
        self.get(
            "search",
            &[
                ("part", "snippet"),
                ("q", query),
                ("type", "channel"),
                ("maxResults", &max_results),
            ],
        )
        .await
    }

    async fn list_channels(&self, channel_id: &str) -> Result<ChannelListResponse, ApiError> {
        self.get(
            "channels",
            &[("part", "snippet,statistics"), ("id", channel_id)],
        )
        .await
    }

    async fn search_channel_videos(
        &self,
        channel_id: &str,
        max_results: u32,
    ) -> Result<SearchListResponse, ApiError> {
        let max_results = max_results.to_string();
        self.get(
            "search",
            &[
                ("part", "snippet"),
                ("channelId", channel_id),
                ("maxResults", &max_results),
                ("order", "date"),
            ],
        )
        .await
    }

    async fn list_video_statistics(
        &self,
        video_id: &str,
    ) -> Result<VideoListResponse, ApiError> {
        self.get("videos", &[("part", "statistics"), ("id", video_id)])
            .await
    }
}
