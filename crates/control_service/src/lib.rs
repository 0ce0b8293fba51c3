use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use chrono::{Duration, SecondsFormat, Utc};
use datastore::{ChannelRecord, Repository, VideoRecord};
use domain::{ChannelSnippet, ChannelStatistics, ChannelStats, VideoStatistics, VideoSummary};
use fake::Fake;
use fake::faker::lorem::en::{Sentence, Words};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Request body for creating a new channel
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChannelRequest {
    pub id: String,
    /// With or without the leading `@`
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub subscriber_count: Option<u64>,
    #[serde(default)]
    pub view_count: Option<u64>,
    #[serde(default)]
    pub video_count: Option<u64>,
}

/// Request body for creating a new video
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVideoRequest {
    pub id: String,
    pub channel_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub published_at: String,
    #[serde(default)]
    pub view_count: Option<u64>,
    #[serde(default)]
    pub like_count: Option<u64>,
    #[serde(default)]
    pub comment_count: Option<u64>,
}

/// Request body for generating uploads
#[derive(Debug, Deserialize)]
pub struct GenerateVideosRequest {
    pub count: usize,
}

/// Response for successful creation
#[derive(Debug, Serialize)]
pub struct CreateResponse {
    pub success: bool,
    pub message: String,
}

/// Response listing generated video IDs, newest first
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub success: bool,
    pub video_ids: Vec<String>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

fn error_response(status: StatusCode, error: String) -> axum::response::Response {
    (
        status,
        Json(ErrorResponse {
            success: false,
            error,
        }),
    )
        .into_response()
}

/// Add `count` uploads with fake titles and counters to `channel_id`.
///
/// The newest upload is published now and each following one a minute
/// earlier. Returns the new video IDs, newest first.
pub fn generate_videos(repo: &dyn Repository, channel_id: &str, count: usize) -> Vec<String> {
    let now = Utc::now();
    (0..count)
        .map(|i| {
            let video_id: String = uuid::Uuid::new_v4().simple().to_string()[..11].to_string();
            let words: Vec<String> = Words(2..5).fake();
            let description: String = Sentence(6..12).fake();
            let published = now - Duration::minutes(i as i64);

            repo.add_video(VideoRecord {
                channel_id: channel_id.to_string(),
                summary: VideoSummary {
                    video_id: video_id.clone(),
                    title: capitalize(&words.join(" ")),
                    description,
                    published_at: published.to_rfc3339_opts(SecondsFormat::Secs, true),
                },
                statistics: VideoStatistics {
                    view_count: Some((100..250_000u64).fake()),
                    like_count: Some((0..10_000u64).fake()),
                    comment_count: Some((0..800u64).fake()),
                },
            });
            video_id
        })
        .collect()
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Handler for creating a new channel
async fn create_channel(
    State(repo): State<Arc<dyn Repository>>,
    Json(request): Json<CreateChannelRequest>,
) -> impl IntoResponse {
    if request.id.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Channel id is required".to_string());
    }

    let channel = ChannelRecord {
        handle: request.handle.trim_start_matches('@').to_string(),
        stats: ChannelStats {
            id: Some(request.id.clone()),
            snippet: Some(ChannelSnippet {
                title: Some(request.title),
                description: request.description,
                thumbnail_url: request.thumbnail_url,
                published_at: request.published_at,
            }),
            statistics: Some(ChannelStatistics {
                subscriber_count: request.subscriber_count,
                view_count: request.view_count,
                video_count: request.video_count,
            }),
        },
    };

    repo.add_channel(channel);

    let response = CreateResponse {
        success: true,
        message: format!("Channel '{}' created successfully", request.id),
    };

    (StatusCode::CREATED, Json(response)).into_response()
}

/// Handler for creating a new video
async fn create_video(
    State(repo): State<Arc<dyn Repository>>,
    Json(request): Json<CreateVideoRequest>,
) -> impl IntoResponse {
    if repo.get_channel(&request.channel_id).is_none() {
        return error_response(
            StatusCode::NOT_FOUND,
            format!("Channel '{}' does not exist", request.channel_id),
        );
    }

    let video = VideoRecord {
        channel_id: request.channel_id,
        summary: VideoSummary {
            video_id: request.id.clone(),
            title: request.title,
            description: request.description,
            published_at: request.published_at,
        },
        statistics: VideoStatistics {
            view_count: request.view_count,
            like_count: request.like_count,
            comment_count: request.comment_count,
        },
    };

    repo.add_video(video);

    let response = CreateResponse {
        success: true,
        message: format!("Video '{}' created successfully", request.id),
    };

    (StatusCode::CREATED, Json(response)).into_response()
}

/// Handler for generating uploads of an existing channel
async fn generate_channel_videos(
    State(repo): State<Arc<dyn Repository>>,
    Path(channel_id): Path<String>,
    Json(request): Json<GenerateVideosRequest>,
) -> impl IntoResponse {
    if repo.get_channel(&channel_id).is_none() {
        return error_response(
            StatusCode::NOT_FOUND,
            format!("Channel '{channel_id}' does not exist"),
        );
    }

    let video_ids = generate_videos(repo.as_ref(), &channel_id, request.count);

    (
        StatusCode::CREATED,
        Json(GenerateResponse {
            success: true,
            video_ids,
        }),
    )
        .into_response()
}

/// Create the router for the control API
pub fn create_router(repo: Arc<dyn Repository>) -> Router {
    Router::new()
        .route("/control/channels", post(create_channel))
        .route("/control/videos", post(create_video))
        .route(
            "/control/channels/{channel_id}/videos/generate",
            post(generate_channel_videos),
        )
        .with_state(repo)
}
