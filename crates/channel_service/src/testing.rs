use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Mutex;
use youtube_api::models::{ChannelListResponse, SearchListResponse, VideoListResponse};
use youtube_api::{ApiError, VideoPlatform};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    SearchChannels { query: String, max_results: u32 },
    ListChannels(String),
    SearchVideos { channel_id: String, max_results: u32 },
    VideoStatistics(String),
}

/// Canned platform: each endpoint answers with a fixed JSON body, or fails
/// when none was configured. Every call is recorded.
#[derive(Default)]
pub struct FakePlatform {
    pub channel_search: Option<Value>,
    pub channels: Option<Value>,
    pub video_search: Option<Value>,
    pub videos: Option<Value>,
    pub(crate) calls: Mutex<Vec<Call>>,
}

impl FakePlatform {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn answer<T: serde::de::DeserializeOwned>(body: &Option<Value>) -> Result<T, ApiError> {
    match body {
        Some(value) => Ok(serde_json::from_value(value.clone()).unwrap()),
        None => Err(ApiError::Status {
            status: 503,
            message: "backend unavailable".to_string(),
        }),
    }
}

#[async_trait]
impl VideoPlatform for FakePlatform {
    async fn search_channels(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<SearchListResponse, ApiError> {
        self.record(Call::SearchChannels {
            query: query.to_string(),
            max_results,
        });
        answer(&self.channel_search)
    }

    async fn list_channels(&self, channel_id: &str) -> Result<ChannelListResponse, ApiError> {
        self.record(Call::ListChannels(channel_id.to_string()));
        answer(&self.channels)
    }

    async fn search_channel_videos(
        &self,
        channel_id: &str,
        max_results: u32,
    ) -> Result<SearchListResponse, ApiError> {
        self.record(Call::SearchVideos {
            channel_id: channel_id.to_string(),
            max_results,
        });
        answer(&self.video_search)
    }

    async fn list_video_statistics(&self, video_id: &str) -> Result<VideoListResponse, ApiError> {
        self.record(Call::VideoStatistics(video_id.to_string()));
        answer(&self.videos)
    }
}

pub fn channel_hits(ids: &[&str]) -> Value {
    let items: Vec<Value> = ids
        .iter()
        .map(|id| {
            json!({
                "id": {"kind": "youtube#channel", "channelId": id},
                "snippet": {"channelId": id, "title": format!("Channel {id}")}
            })
        })
        .collect();
    json!({ "items": items })
}

pub fn channel_body(id: &str, title: &str) -> Value {
    json!({
        "items": [{
            "id": id,
            "snippet": {
                "title": title,
                "description": "About this channel",
                "publishedAt": "2019-05-04T10:00:00Z",
                "thumbnails": {"high": {"url": format!("https://img.example/{id}.jpg")}}
            },
            "statistics": {"subscriberCount": "1500", "viewCount": "98000", "videoCount": "42"}
        }]
    })
}

pub fn video_hits(count: usize) -> Value {
    let items: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "id": {"kind": "youtube#video", "videoId": format!("vid{i}")},
                "snippet": {
                    "title": format!("Video {i}"),
                    "description": format!("Description {i}"),
                    "publishedAt": "2024-03-01T00:00:00Z"
                }
            })
        })
        .collect();
    json!({ "items": items })
}
