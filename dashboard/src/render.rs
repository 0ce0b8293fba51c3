//! Plain-text rendering of analysis results.

use domain::{ChannelStats, Insight, VideoStatistics, VideoSummary};
use insight_service::InsightError;

const MISSING: &str = "N/A";

fn or_missing(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(MISSING)
}

fn count(value: Option<u64>) -> String {
    value.map_or_else(|| MISSING.to_string(), |n| n.to_string())
}

/// First ten characters of a timestamp, the `YYYY-MM-DD` part
fn date_part(timestamp: &str) -> String {
    timestamp.chars().take(10).collect()
}

pub fn heading(title: &str) -> String {
    format!("== {title} ==\n")
}

pub fn overview(stats: &ChannelStats) -> String {
    let snippet = stats.snippet.clone().unwrap_or_default();
    let statistics = stats.statistics.clone().unwrap_or_default();
    let published = snippet
        .published_at
        .as_deref()
        .filter(|p| !p.is_empty())
        .map_or_else(|| MISSING.to_string(), date_part);

    let mut out = heading("Channel Overview");
    out.push_str(&format!(
        "Title:        {}\nDescription:  {}\n",
        or_missing(snippet.title.as_deref()),
        or_missing(snippet.description.as_deref())
    ));
    if let Some(url) = snippet.thumbnail_url.as_deref() {
        out.push_str(&format!("Thumbnail:    {url}\n"));
    }
    out.push_str(&format!(
        "Subscribers:  {}\nTotal views:  {}\nTotal videos: {}\nPublished on: {published}\n",
        count(statistics.subscriber_count),
        count(statistics.view_count),
        count(statistics.video_count)
    ));
    out
}

pub fn video_table(videos: &[VideoSummary]) -> String {
    let mut out = heading("Recent Videos");
    if videos.is_empty() {
        out.push_str("No videos found.\n");
        return out;
    }
    out.push_str(&format!(
        "{:>3}  {:<10}  {:<11}  Title\n",
        "#", "Published", "Video ID"
    ));
    for (i, video) in videos.iter().enumerate() {
        let published = video
            .published_on()
            .map_or_else(|| date_part(&video.published_at), |d| d.to_string());
        out.push_str(&format!(
            "{:>3}  {:<10}  {:<11}  {}\n",
            i + 1,
            published,
            video.video_id,
            video.title
        ));
    }
    out
}

pub fn video_stats(video: &VideoSummary, stats: &VideoStatistics) -> String {
    format!(
        "{}Views:    {}\nLikes:    {}\nComments: {}\n",
        heading(&format!("Video: {}", video.title)),
        count(stats.view_count),
        count(stats.like_count),
        count(stats.comment_count)
    )
}

/// An insight under `title`, or the failure marked so it cannot pass for
/// model output
pub fn insight(title: &str, result: &Result<Insight, InsightError>) -> String {
    let mut out = heading(title);
    match result {
        Ok(insight) => {
            out.push_str(insight.text.trim_end());
            out.push('\n');
        }
        Err(e) => out.push_str(&format!("[!] {e}\n")),
    }
    out
}
