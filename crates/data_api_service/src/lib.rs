pub mod resources;

use api_key_service::{ApiKeyPolicy, GoogleError};
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use datastore::Repository;
use resources::{Channel, ListResponse, Parts, SearchResult, Video};
use serde::Deserialize;
use std::sync::Arc;

/// Largest `maxResults` the API accepts
pub const MAX_RESULTS_LIMIT: u32 = 50;
const DEFAULT_MAX_RESULTS: u32 = 5;

#[derive(Clone)]
struct ServiceState {
    repo: Arc<dyn Repository>,
    keys: ApiKeyPolicy,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchListParams {
    #[serde(default)]
    pub part: String,
    pub q: Option<String>,
    #[serde(rename = "type")]
    pub result_type: Option<String>,
    pub channel_id: Option<String>,
    pub max_results: Option<u32>,
    pub order: Option<String>,
    pub key: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelsListParams {
    #[serde(default)]
    pub part: String,
    #[serde(default)]
    pub id: String,
    pub for_handle: Option<String>,
    pub key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VideosListParams {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub part: String,
    pub key: Option<String>,
}

fn required_parts(part: &str) -> Result<Parts, GoogleError> {
    let parts = Parts::parse(part);
    if parts.is_empty() {
        return Err(GoogleError::bad_request("Required parameter: part"));
    }
    Ok(parts)
}

fn wants(result_type: Option<&str>, kind: &str) -> bool {
    result_type.is_none_or(|t| t.split(',').any(|t| t.trim() == kind))
}

async fn search_list(
    State(state): State<ServiceState>,
    Query(params): Query<SearchListParams>,
) -> Result<impl IntoResponse, GoogleError> {
    state.keys.check(params.key.as_deref())?;
    required_parts(&params.part)?;

    let max_results = params.max_results.unwrap_or(DEFAULT_MAX_RESULTS);
    if max_results > MAX_RESULTS_LIMIT {
        return Err(GoogleError::bad_request(format!(
            "Invalid value '{max_results}' for parameter maxResults. Values must be within the range: [0, {MAX_RESULTS_LIMIT}]"
        )));
    }
    let result_type = params.result_type.as_deref();

    let mut results = Vec::new();
    if let Some(channel_id) = params.channel_id.as_deref() {
        // The channel itself comes first, then its uploads newest first
        if let Some(channel) = state.repo.get_channel(channel_id) {
            if wants(result_type, "channel") {
                results.push(SearchResult::for_channel(&channel));
            }
            if wants(result_type, "video") {
                results.extend(
                    state
                        .repo
                        .get_channel_videos(channel_id)
                        .iter()
                        .map(|v| SearchResult::for_video(v, channel.title())),
                );
            }
        }
    } else if let Some(query) = params.q.as_deref() {
        let channels = state.repo.search_channels(query);
        if wants(result_type, "channel") {
            results.extend(channels.iter().map(SearchResult::for_channel));
        }
        if wants(result_type, "video") {
            let needle = query.to_lowercase();
            for channel in &channels {
                results.extend(
                    state
                        .repo
                        .get_channel_videos(channel.id())
                        .iter()
                        .filter(|v| v.summary.title.to_lowercase().contains(&needle))
                        .map(|v| SearchResult::for_video(v, channel.title())),
                );
            }
        }
        if params.order.as_deref() == Some("date") {
            // Stable sort keeps relevance order among equal timestamps
            results.sort_by(|a, b| b.published_at().cmp(a.published_at()));
        }
    }

    let total = results.len();
    results.truncate(max_results as usize);

    Ok((
        StatusCode::OK,
        Json(ListResponse::new(
            "youtube#searchListResponse",
            results,
            total,
            max_results,
        )),
    ))
}

async fn channels_list(
    State(state): State<ServiceState>,
    Query(params): Query<ChannelsListParams>,
) -> Result<impl IntoResponse, GoogleError> {
    state.keys.check(params.key.as_deref())?;
    let parts = required_parts(&params.part)?;

    let channels: Vec<Channel> = if let Some(handle) = params.for_handle.as_deref() {
        let handle = handle.trim_start_matches('@').to_lowercase();
        state
            .repo
            .search_channels(&handle)
            .into_iter()
            .filter(|c| c.handle.to_lowercase() == handle)
            .map(|c| Channel::from_record(&c, &parts))
            .collect()
    } else {
        params
            .id
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .filter_map(|id| state.repo.get_channel(id))
            .map(|c| Channel::from_record(&c, &parts))
            .collect()
    };

    let total = channels.len();
    Ok((
        StatusCode::OK,
        Json(ListResponse::new(
            "youtube#channelListResponse",
            channels,
            total,
            DEFAULT_MAX_RESULTS,
        )),
    ))
}

async fn videos_list(
    State(state): State<ServiceState>,
    Query(params): Query<VideosListParams>,
) -> Result<impl IntoResponse, GoogleError> {
    state.keys.check(params.key.as_deref())?;
    let parts = required_parts(&params.part)?;

    // Unknown IDs are skipped, not reported
    let videos: Vec<Video> = params
        .id
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .filter_map(|id| state.repo.get_video(id))
        .map(|v| Video::from_record(&v, &parts))
        .collect();

    let total = videos.len();
    Ok((
        StatusCode::OK,
        Json(ListResponse::new(
            "youtube#videoListResponse",
            videos,
            total,
            total as u32,
        )),
    ))
}

// Create the router for the Data API
pub fn create_router(repo: Arc<dyn Repository>, keys: ApiKeyPolicy) -> Router {
    Router::new()
        .route("/youtube/v3/search", get(search_list))
        .route("/youtube/v3/channels", get(channels_list))
        .route("/youtube/v3/videos", get(videos_list))
        .with_state(ServiceState { repo, keys })
}
