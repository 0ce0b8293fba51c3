use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound on the number of recent uploads fetched for one channel
pub const MAX_VIDEO_RESULTS: usize = 50;

/// Canonical identifier of a channel on the video platform.
///
/// Once built it cannot be changed, so a resolved identifier stays the same
/// for the whole analysis session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelIdentifier(String);

impl ChannelIdentifier {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ChannelIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Channel metadata and counters.
///
/// Every field is optional because the platform may omit any of them. The
/// default value is the empty record, which callers read as "no data".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStats {
    pub id: Option<String>,
    pub snippet: Option<ChannelSnippet>,
    pub statistics: Option<ChannelStatistics>,
}

impl ChannelStats {
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.snippet.is_none() && self.statistics.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSnippet {
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub published_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStatistics {
    pub subscriber_count: Option<u64>,
    pub view_count: Option<u64>,
    pub video_count: Option<u64>,
}

/// One recent upload of a channel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSummary {
    pub video_id: String,
    pub title: String,
    pub description: String,
    pub published_at: String,
}

impl VideoSummary {
    /// Calendar date of publication, if the timestamp is RFC 3339
    pub fn published_on(&self) -> Option<NaiveDate> {
        published_date(&self.published_at)
    }
}

/// Per-video counters, fetched on demand
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatistics {
    pub view_count: Option<u64>,
    pub like_count: Option<u64>,
    pub comment_count: Option<u64>,
}

impl VideoStatistics {
    pub fn is_empty(&self) -> bool {
        self.view_count.is_none() && self.like_count.is_none() && self.comment_count.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    ChannelSummary,
    TitleSuggestions,
}

/// Free text produced by the generative model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub text: String,
}

impl Insight {
    pub fn new(kind: InsightKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Parses an RFC 3339 timestamp and keeps only its date
pub fn published_date(timestamp: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(timestamp)
        .ok()
        .map(|dt| dt.date_naive())
}
