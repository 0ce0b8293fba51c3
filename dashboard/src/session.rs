use crate::config::Settings;
use crate::render;
use channel_service::{AnalysisError, ChannelAnalysis, ChannelAnalyzer};
use domain::VideoSummary;
use insight_service::{GeminiClient, InsightGenerator};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use youtube_api::DataApiClient;

/// One analysis session: the pipeline, the insight generator, and the
/// clients they share
#[derive(Clone)]
pub struct Dashboard {
    analyzer: ChannelAnalyzer,
    insights: InsightGenerator,
}

impl Dashboard {
    pub fn new(analyzer: ChannelAnalyzer, insights: InsightGenerator) -> Self {
        Self { analyzer, insights }
    }

    /// Wire both API clients over a single HTTP client
    pub fn from_settings(settings: &Settings) -> Self {
        let http = reqwest::Client::new();
        let platform = DataApiClient::new(
            http.clone(),
            settings.youtube_base_url.as_str(),
            settings.youtube_api_key.as_str(),
        );
        let model = GeminiClient::new(
            http,
            settings.gemini_base_url.as_str(),
            settings.gemini_model.as_str(),
            settings.google_api_key.as_str(),
        );
        Self::new(
            ChannelAnalyzer::new(Arc::new(platform)),
            InsightGenerator::new(Arc::new(model)),
        )
    }

    pub fn analyzer(&self) -> &ChannelAnalyzer {
        &self.analyzer
    }

    pub fn insights(&self) -> &InsightGenerator {
        &self.insights
    }

    pub async fn analyze(&self, input: &str) -> Result<ChannelAnalysis, AnalysisError> {
        self.analyzer.analyze(input).await
    }

    /// Overview, video table and strategy summary of an analysed channel
    pub async fn report(&self, analysis: &ChannelAnalysis) -> String {
        let summary = self.insights.summarize_strategy(&analysis.videos).await;
        [
            render::overview(&analysis.stats),
            render::video_table(&analysis.videos),
            render::insight("Channel Strategy Summary", &summary),
        ]
        .join("\n")
    }

    /// Statistics and title suggestions for one video
    pub async fn video_report(&self, video: &VideoSummary) -> String {
        let stats = self.analyzer.client().video_stats(&video.video_id).await;
        let titles = self
            .insights
            .suggest_titles(&video.title, &video.description)
            .await;
        [
            render::video_stats(video, &stats),
            render::insight("Title Optimizer", &titles),
        ]
        .join("\n")
    }

    /// Prompt for videos until an empty line, `q`, or end of input
    pub async fn run_interactive<R, W>(
        &self,
        analysis: &ChannelAnalysis,
        mut input: R,
        mut output: W,
    ) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        if analysis.videos.is_empty() {
            return Ok(());
        }

        let mut line = String::new();
        loop {
            output
                .write_all(b"\nPick a video by number or exact title (empty or q to quit): ")
                .await?;
            output.flush().await?;

            line.clear();
            if input.read_line(&mut line).await? == 0 {
                break;
            }
            let choice = line.trim();
            if choice.is_empty() || choice.eq_ignore_ascii_case("q") {
                break;
            }

            let text = match pick_video(analysis, choice) {
                Some(video) => self.video_report(video).await,
                None => format!("No video matches '{choice}'.\n"),
            };
            output.write_all(b"\n").await?;
            output.write_all(text.as_bytes()).await?;
        }
        output.flush().await
    }
}

/// A 1-based position in the video list, or else an exact title
pub fn pick_video<'a>(analysis: &'a ChannelAnalysis, choice: &str) -> Option<&'a VideoSummary> {
    match choice.parse::<usize>() {
        Ok(n) if n >= 1 => analysis
            .videos
            .get(n - 1)
            .or_else(|| analysis.find_video_by_title(choice)),
        _ => analysis.find_video_by_title(choice),
    }
}
