//! Serialized shapes of the Data API resources served by the mock

use datastore::{ChannelRecord, VideoRecord};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    pub kind: String,
    pub etag: String,
    pub page_info: PageInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
    pub items: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(kind: &str, items: Vec<T>, total_results: usize, results_per_page: u32) -> Self {
        Self {
            kind: kind.to_string(),
            etag: etag(),
            page_info: PageInfo {
                total_results: total_results as i32,
                results_per_page: results_per_page as i32,
            },
            next_page_token: None,
            items,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total_results: i32,
    pub results_per_page: i32,
}

// search.list

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub kind: String,
    pub etag: String,
    pub id: SearchResultId,
    pub snippet: SearchSnippet,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultId {
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSnippet {
    pub published_at: String,
    pub channel_id: String,
    pub title: String,
    pub description: String,
    pub channel_title: String,
}

impl SearchResult {
    pub fn for_channel(channel: &ChannelRecord) -> Self {
        let snippet = channel.stats.snippet.as_ref();
        Self {
            kind: "youtube#searchResult".to_string(),
            etag: etag(),
            id: SearchResultId {
                kind: "youtube#channel".to_string(),
                video_id: None,
                channel_id: Some(channel.id().to_string()),
            },
            snippet: SearchSnippet {
                published_at: snippet
                    .and_then(|s| s.published_at.clone())
                    .unwrap_or_default(),
                channel_id: channel.id().to_string(),
                title: channel.title().to_string(),
                description: snippet
                    .and_then(|s| s.description.clone())
                    .unwrap_or_default(),
                channel_title: channel.title().to_string(),
            },
        }
    }

    pub fn for_video(video: &VideoRecord, channel_title: &str) -> Self {
        Self {
            kind: "youtube#searchResult".to_string(),
            etag: etag(),
            id: SearchResultId {
                kind: "youtube#video".to_string(),
                video_id: Some(video.summary.video_id.clone()),
                channel_id: None,
            },
            snippet: SearchSnippet {
                published_at: video.summary.published_at.clone(),
                channel_id: video.channel_id.clone(),
                title: video.summary.title.clone(),
                description: video.summary.description.clone(),
                channel_title: channel_title.to_string(),
            },
        }
    }

    pub fn published_at(&self) -> &str {
        &self.snippet.published_at
    }
}

// channels.list

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub kind: String,
    pub etag: String,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<ChannelSnippet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<ChannelStatistics>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSnippet {
    pub title: String,
    pub description: String,
    pub custom_url: String,
    pub published_at: String,
    pub thumbnails: Thumbnails,
}

#[derive(Debug, Serialize)]
pub struct Thumbnails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<Thumbnail>,
}

#[derive(Debug, Serialize)]
pub struct Thumbnail {
    pub url: String,
}

/// Counters are sent as strings, like the real API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStatistics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_count: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscriber_count: Option<String>,
    pub hidden_subscriber_count: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_count: Option<String>,
}

impl Channel {
    pub fn from_record(channel: &ChannelRecord, parts: &Parts) -> Self {
        Self {
            kind: "youtube#channel".to_string(),
            etag: etag(),
            id: channel.id().to_string(),
            snippet: parts
                .includes("snippet")
                .then(|| channel.stats.snippet.as_ref())
                .flatten()
                .map(|s| ChannelSnippet {
                    title: s.title.clone().unwrap_or_default(),
                    description: s.description.clone().unwrap_or_default(),
                    custom_url: format!("@{}", channel.handle),
                    published_at: s.published_at.clone().unwrap_or_default(),
                    thumbnails: Thumbnails {
                        high: s.thumbnail_url.clone().map(|url| Thumbnail { url }),
                    },
                }),
            statistics: parts
                .includes("statistics")
                .then(|| channel.stats.statistics.as_ref())
                .flatten()
                .map(|s| ChannelStatistics {
                    view_count: s.view_count.map(|n| n.to_string()),
                    subscriber_count: s.subscriber_count.map(|n| n.to_string()),
                    hidden_subscriber_count: s.subscriber_count.is_none(),
                    video_count: s.video_count.map(|n| n.to_string()),
                }),
        }
    }
}

// videos.list

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub kind: String,
    pub etag: String,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<VideoSnippet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<VideoStatistics>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    pub published_at: String,
    pub channel_id: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatistics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_count: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub like_count: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<String>,
}

impl Video {
    pub fn from_record(video: &VideoRecord, parts: &Parts) -> Self {
        Self {
            kind: "youtube#video".to_string(),
            etag: etag(),
            id: video.summary.video_id.clone(),
            snippet: parts.includes("snippet").then(|| VideoSnippet {
                published_at: video.summary.published_at.clone(),
                channel_id: video.channel_id.clone(),
                title: video.summary.title.clone(),
                description: video.summary.description.clone(),
            }),
            statistics: parts.includes("statistics").then(|| VideoStatistics {
                view_count: video.statistics.view_count.map(|n| n.to_string()),
                like_count: video.statistics.like_count.map(|n| n.to_string()),
                comment_count: video.statistics.comment_count.map(|n| n.to_string()),
            }),
        }
    }
}

/// The comma-separated `part` parameter
#[derive(Debug)]
pub struct Parts(Vec<String>);

impl Parts {
    pub fn parse(part: &str) -> Self {
        Self(
            part.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn includes(&self, part: &str) -> bool {
        self.0.iter().any(|p| p == part)
    }
}

fn etag() -> String {
    format!("etag-{}", uuid::Uuid::new_v4().simple())
}
