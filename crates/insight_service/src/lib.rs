//! Generated content insights: a channel strategy summary and alternative
//! titles for a single video.

pub mod gemini;
pub mod prompts;

use async_trait::async_trait;
use domain::{Insight, InsightKind, VideoSummary};
use std::sync::Arc;
use thiserror::Error;

pub use gemini::GeminiClient;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("model API error {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed model response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("model returned no text{}", reason_suffix(.block_reason))]
    EmptyResponse { block_reason: Option<String> },
}

fn reason_suffix(reason: &Option<String>) -> String {
    reason
        .as_ref()
        .map(|r| format!(" ({r})"))
        .unwrap_or_default()
}

/// Failure to produce an insight. Displayed as `AI error: ...`.
#[derive(Debug, Error)]
pub enum InsightError {
    #[error("AI error: {0}")]
    Model(#[from] ModelError),
}

/// Single-turn text completion
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError>;
}

#[derive(Clone)]
pub struct InsightGenerator {
    model: Arc<dyn TextModel>,
}

impl InsightGenerator {
    pub fn new(model: Arc<dyn TextModel>) -> Self {
        Self { model }
    }

    /// Content strategy plus three growth suggestions, from the titles of the
    /// first five videos as given (newest first)
    pub async fn summarize_strategy(
        &self,
        videos: &[VideoSummary],
    ) -> Result<Insight, InsightError> {
        let prompt = prompts::channel_summary(videos);
        self.run(InsightKind::ChannelSummary, &prompt).await
    }

    /// One improved title plus two alternates
    pub async fn suggest_titles(
        &self,
        title: &str,
        description: &str,
    ) -> Result<Insight, InsightError> {
        let prompt = prompts::title_suggestions(title, description);
        self.run(InsightKind::TitleSuggestions, &prompt).await
    }

    async fn run(&self, kind: InsightKind, prompt: &str) -> Result<Insight, InsightError> {
        match self.model.generate(prompt).await {
            Ok(text) => Ok(Insight::new(kind, text)),
            Err(e) => {
                tracing::warn!(?kind, error = %e, "insight generation failed");
                Err(e.into())
            }
        }
    }
}
