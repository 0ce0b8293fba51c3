use chrono::{Duration, SecondsFormat, TimeZone, Utc};
use domain::{ChannelSnippet, ChannelStatistics, ChannelStats, VideoStatistics, VideoSummary};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// A channel as the mock platform stores it
#[derive(Debug, Clone)]
pub struct ChannelRecord {
    /// Handle without the leading `@`
    pub handle: String,
    pub stats: ChannelStats,
}

impl ChannelRecord {
    pub fn id(&self) -> &str {
        self.stats.id.as_deref().unwrap_or_default()
    }

    pub fn title(&self) -> &str {
        self.stats
            .snippet
            .as_ref()
            .and_then(|s| s.title.as_deref())
            .unwrap_or_default()
    }
}

/// An upload of a channel, with its counters
#[derive(Debug, Clone)]
pub struct VideoRecord {
    pub channel_id: String,
    pub summary: VideoSummary,
    pub statistics: VideoStatistics,
}

/// Repository trait for data access abstraction
/// This allows switching between different storage backends (in-memory, filesystem, database)
pub trait Repository: Send + Sync {
    fn get_channel(&self, id: &str) -> Option<ChannelRecord>;

    /// Channels whose handle or title contains `query`, case-insensitively
    fn search_channels(&self, query: &str) -> Vec<ChannelRecord>;

    /// Uploads of a channel, newest first
    fn get_channel_videos(&self, channel_id: &str) -> Vec<VideoRecord>;

    fn get_video(&self, id: &str) -> Option<VideoRecord>;

    fn add_channel(&self, channel: ChannelRecord);

    fn add_video(&self, video: VideoRecord);
}

/// In-memory implementation of the Repository trait
pub struct InMemoryRepository {
    channels: Arc<RwLock<HashMap<String, ChannelRecord>>>,
    videos: Arc<RwLock<HashMap<String, VideoRecord>>>,
}

impl InMemoryRepository {
    /// Create a new in-memory repository with initial dummy data
    pub fn new() -> Self {
        let repo = Self::empty();
        repo.populate_dummy_data();
        repo
    }

    pub fn empty() -> Self {
        Self {
            channels: Arc::new(RwLock::new(HashMap::new())),
            videos: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Populate the repository with initial dummy data
    fn populate_dummy_data(&self) {
        self.add_channel(ChannelRecord {
            handle: "mockcreator".to_string(),
            stats: ChannelStats {
                id: Some("channel-1".to_string()),
                snippet: Some(ChannelSnippet {
                    title: Some("Mock Channel".to_string()),
                    description: Some(
                        "This is a mock channel for testing the YouTube Data API".to_string(),
                    ),
                    thumbnail_url: Some("https://yt3.example/mock-channel.jpg".to_string()),
                    published_at: Some("2020-01-01T00:00:00Z".to_string()),
                }),
                statistics: Some(ChannelStatistics {
                    subscriber_count: Some(12_500),
                    view_count: Some(1_048_576),
                    video_count: Some(3),
                }),
            },
        });

        let titles = [
            "How I edit videos in 10 minutes",
            "Studio tour 2023",
            "Answering your questions",
        ];
        for (i, title) in titles.iter().enumerate() {
            self.add_video(VideoRecord {
                channel_id: "channel-1".to_string(),
                summary: VideoSummary {
                    video_id: format!("test-video-{}", i + 1),
                    title: title.to_string(),
                    description: format!("Mock upload number {}", i + 1),
                    published_at: timestamp_days_before_fixed(i as i64 * 7),
                },
                statistics: VideoStatistics {
                    view_count: Some(10_000 / (i as u64 + 1)),
                    like_count: Some(500 / (i as u64 + 1)),
                    comment_count: Some(40 / (i as u64 + 1)),
                },
            });
        }
    }
}

// Fixed point in time for consistent dummy data
fn timestamp_days_before_fixed(days: i64) -> String {
    let fixed_time = Utc
        .with_ymd_and_hms(2023, 1, 1, 0, 0, 0)
        .single()
        .expect("Fixed datetime should be valid");
    (fixed_time - Duration::days(days)).to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for InMemoryRepository {
    fn get_channel(&self, id: &str) -> Option<ChannelRecord> {
        self.channels
            .read()
            .expect("Failed to acquire read lock on channels")
            .get(id)
            .cloned()
    }

    fn search_channels(&self, query: &str) -> Vec<ChannelRecord> {
        let query = query.to_lowercase();
        let mut found: Vec<ChannelRecord> = self
            .channels
            .read()
            .expect("Failed to acquire read lock on channels")
            .values()
            .filter(|c| {
                c.handle.to_lowercase().contains(&query)
                    || c.title().to_lowercase().contains(&query)
            })
            .cloned()
            .collect();
        // Exact handle matches rank first
        found.sort_by_key(|c| (c.handle.to_lowercase() != query, c.id().to_string()));
        found
    }

    fn get_channel_videos(&self, channel_id: &str) -> Vec<VideoRecord> {
        let mut videos: Vec<VideoRecord> = self
            .videos
            .read()
            .expect("Failed to acquire read lock on videos")
            .values()
            .filter(|v| v.channel_id == channel_id)
            .cloned()
            .collect();
        // RFC 3339 in UTC sorts lexically
        videos.sort_by(|a, b| b.summary.published_at.cmp(&a.summary.published_at));
        videos
    }

    fn get_video(&self, id: &str) -> Option<VideoRecord> {
        self.videos
            .read()
            .expect("Failed to acquire read lock on videos")
            .get(id)
            .cloned()
    }

    fn add_channel(&self, channel: ChannelRecord) {
        self.channels
            .write()
            .expect("Failed to acquire write lock on channels")
            .insert(channel.id().to_string(), channel);
    }

    fn add_video(&self, video: VideoRecord) {
        self.videos
            .write()
            .expect("Failed to acquire write lock on videos")
            .insert(video.summary.video_id.clone(), video);
    }
}
