//! End-to-end runs of the dashboard against the mock backend on a local port.

use api_key_service::ApiKeyPolicy;
use channel_service::AnalysisError;
use dashboard::{Dashboard, Settings};
use datastore::InMemoryRepository;
use std::net::SocketAddr;
use std::sync::Arc;

const KEY: &str = "test-key";

async fn spawn_backend() -> SocketAddr {
    let app = server::app(
        Arc::new(InMemoryRepository::new()),
        ApiKeyPolicy::from_configured(Some(KEY.to_string())),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn settings(addr: SocketAddr) -> Settings {
    Settings {
        youtube_api_key: KEY.to_string(),
        google_api_key: KEY.to_string(),
        youtube_base_url: format!("http://{addr}/youtube/v3"),
        gemini_base_url: format!("http://{addr}"),
        gemini_model: "gemini-1.5-flash".to_string(),
    }
}

#[tokio::test]
async fn handle_resolves_and_loads_channel() {
    let addr = spawn_backend().await;
    let dashboard = Dashboard::from_settings(&settings(addr));

    let analysis = dashboard.analyze("@mockcreator").await.unwrap();

    assert_eq!(analysis.channel_id.as_str(), "channel-1");
    let snippet = analysis.stats.snippet.as_ref().unwrap();
    assert_eq!(snippet.title.as_deref(), Some("Mock Channel"));
    assert_eq!(
        snippet.thumbnail_url.as_deref(),
        Some("https://yt3.example/mock-channel.jpg")
    );
    assert_eq!(
        analysis.stats.statistics.as_ref().unwrap().subscriber_count,
        Some(12_500)
    );

    // The channel's own search hit is filtered out
    let ids: Vec<&str> = analysis.videos.iter().map(|v| v.video_id.as_str()).collect();
    assert_eq!(ids, ["test-video-1", "test-video-2", "test-video-3"]);
}

#[tokio::test]
async fn url_inputs_resolve_like_handles_and_ids() {
    let addr = spawn_backend().await;
    let dashboard = Dashboard::from_settings(&settings(addr));

    let by_url = dashboard
        .analyze("https://www.youtube.com/@mockcreator/videos")
        .await
        .unwrap();
    assert_eq!(by_url.channel_id.as_str(), "channel-1");

    let by_channel_url = dashboard
        .analyze("https://youtube.com/channel/channel-1/featured")
        .await
        .unwrap();
    assert_eq!(by_channel_url.videos.len(), 3);
}

#[tokio::test]
async fn unknown_inputs_are_reported() {
    let addr = spawn_backend().await;
    let dashboard = Dashboard::from_settings(&settings(addr));

    let err = dashboard.analyze("@ghost").await.unwrap_err();
    assert!(matches!(err, AnalysisError::Unresolved(_)));
    assert_eq!(err.to_string(), "Could not resolve channel ID from input.");

    let err = dashboard.analyze("UCdoesnotexist").await.unwrap_err();
    assert!(matches!(err, AnalysisError::ChannelNotFound { .. }));
    assert_eq!(err.to_string(), "Channel not found or data unavailable.");
}

#[tokio::test]
async fn rejected_key_degrades_to_not_found() {
    let addr = spawn_backend().await;
    let mut settings = settings(addr);
    settings.youtube_api_key = String::new();
    let dashboard = Dashboard::from_settings(&settings);

    let client = dashboard.analyzer().client();
    let channel_id = domain::ChannelIdentifier::new("channel-1");
    let err = client.fetch_channel_stats(&channel_id).await.unwrap_err();
    assert!(matches!(
        err,
        youtube_api::ApiError::Status { status: 403, .. }
    ));
    assert!(client.channel_stats(&channel_id).await.is_empty());
    assert!(client.video_list(&channel_id).await.is_empty());

    let err = dashboard.analyze("channel-1").await.unwrap_err();
    assert!(matches!(err, AnalysisError::ChannelNotFound { .. }));
}

#[tokio::test]
async fn video_list_is_capped_at_fifty_hits() {
    let addr = spawn_backend().await;
    let http = reqwest::Client::new();
    let generated: serde_json::Value = http
        .post(format!(
            "http://{addr}/control/channels/channel-1/videos/generate"
        ))
        .json(&serde_json::json!({"count": 60}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let newest = generated["videoIds"][0].as_str().unwrap().to_string();

    let dashboard = Dashboard::from_settings(&settings(addr));
    let analysis = dashboard.analyze("channel-1").await.unwrap();

    // The channel's own hit takes one of the fifty search slots
    assert_eq!(analysis.videos.len(), 49);
    assert_eq!(analysis.videos[0].video_id, newest);
    assert!(analysis.videos.iter().all(|v| !v.video_id.is_empty()));
}

#[tokio::test]
async fn insights_echo_the_prompts() {
    let addr = spawn_backend().await;
    let dashboard = Dashboard::from_settings(&settings(addr));
    let analysis = dashboard.analyze("@mockcreator").await.unwrap();

    let summary = dashboard
        .insights()
        .summarize_strategy(&analysis.videos)
        .await
        .unwrap();
    assert!(summary.text.starts_with("Mock insight from gemini-1.5-flash."));
    assert!(summary.text.contains(
        "How I edit videos in 10 minutes\nStudio tour 2023\nAnswering your questions"
    ));

    let titles = dashboard
        .insights()
        .suggest_titles("Studio tour 2023", "Mock upload number 2")
        .await
        .unwrap();
    assert!(titles.text.contains("Title: Studio tour 2023"));
    assert!(titles.text.contains("Description: Mock upload number 2"));

    let report = dashboard.report(&analysis).await;
    assert!(report.contains("Title:        Mock Channel"));
    assert!(report.contains("Published on: 2020-01-01"));
    assert!(report.contains("== Channel Strategy Summary =="));
}

#[tokio::test]
async fn unknown_model_is_a_tagged_error() {
    let addr = spawn_backend().await;
    let mut settings = settings(addr);
    settings.gemini_model = "not-a-model".to_string();
    let dashboard = Dashboard::from_settings(&settings);

    let err = dashboard
        .insights()
        .suggest_titles("Studio tour 2023", "")
        .await
        .unwrap_err();

    assert!(err.to_string().starts_with("AI error: model API error 404"));

    // The rest of the report still renders
    let analysis = dashboard.analyze("@mockcreator").await.unwrap();
    let report = dashboard.report(&analysis).await;
    assert!(report.contains("== Recent Videos =="));
    assert!(report.contains("[!] AI error:"));
}

#[tokio::test]
async fn interactive_session_reports_picked_videos() {
    let addr = spawn_backend().await;
    let dashboard = Dashboard::from_settings(&settings(addr));
    let analysis = dashboard.analyze("@mockcreator").await.unwrap();

    let input: &[u8] = b"2\nAnswering your questions\nnope\nq\n1\n";
    let mut output = Vec::new();
    dashboard
        .run_interactive(&analysis, input, &mut output)
        .await
        .unwrap();
    let output = String::from_utf8(output).unwrap();

    assert!(output.contains("== Video: Studio tour 2023 =="));
    assert!(output.contains("Views:    5000"));
    assert!(output.contains("== Video: Answering your questions =="));
    assert!(output.contains("No video matches 'nope'."));
    assert!(output.contains("Title: Studio tour 2023"));
    // Input after `q` is never read
    assert!(!output.contains("== Video: How I edit videos in 10 minutes =="));
}
