//! Mock of the Gemini `generateContent` endpoint.
//!
//! Replies are deterministic: the candidate text names the model and echoes
//! the prompt back, so callers can assert on what they sent.

use api_key_service::{ApiKeyPolicy, GoogleError};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::post,
};
use serde::{Deserialize, Serialize};

/// Prompts containing this marker are refused with a `SAFETY` block
pub const BLOCKED_MARKER: &str = "[[blocked]]";

const MODEL_PREFIX: &str = "gemini-";

#[derive(Debug, Deserialize)]
pub struct GenerateContentRequest {
    #[serde(default)]
    pub contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    pub candidates: Vec<Candidate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Content,
    pub finish_reason: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: String,
}

#[derive(Debug, Deserialize)]
struct KeyParam {
    key: Option<String>,
}

impl GenerateContentRequest {
    fn prompt(&self) -> String {
        self.contents
            .iter()
            .flat_map(|c| c.parts.iter())
            .map(|p| p.text.as_str())
            .collect()
    }
}

/// The text the mock answers `prompt` with
pub fn reply_text(model: &str, prompt: &str) -> String {
    format!("Mock insight from {model}.\n\nPrompt received:\n{prompt}")
}

async fn generate_content(
    State(keys): State<ApiKeyPolicy>,
    Path(model_action): Path<String>,
    Query(params): Query<KeyParam>,
    Json(request): Json<GenerateContentRequest>,
) -> Result<Json<GenerateContentResponse>, GoogleError> {
    keys.check(params.key.as_deref())?;

    let (model, action) = model_action
        .split_once(':')
        .ok_or_else(|| GoogleError::not_found(format!("Method not found: {model_action}")))?;
    if action != "generateContent" {
        return Err(GoogleError::not_found(format!("Method not found: {action}")));
    }
    if !model.starts_with(MODEL_PREFIX) {
        return Err(GoogleError::not_found(format!(
            "models/{model} is not found for API version v1beta, or is not supported for generateContent."
        )));
    }

    let prompt = request.prompt();
    if prompt.trim().is_empty() {
        return Err(GoogleError::bad_request(
            "* GenerateContentRequest.contents: contents is not specified",
        ));
    }

    if prompt.contains(BLOCKED_MARKER) {
        return Ok(Json(GenerateContentResponse {
            candidates: Vec::new(),
            prompt_feedback: Some(PromptFeedback {
                block_reason: "SAFETY".to_string(),
            }),
        }));
    }

    Ok(Json(GenerateContentResponse {
        candidates: vec![Candidate {
            content: Content {
                parts: vec![Part {
                    text: reply_text(model, &prompt),
                }],
                role: Some("model".to_string()),
            },
            finish_reason: "STOP".to_string(),
        }],
        prompt_feedback: None,
    }))
}

// Create the router for the generative model API
pub fn create_router(keys: ApiKeyPolicy) -> Router {
    Router::new()
        .route("/v1beta/models/{model_action}", post(generate_content))
        .with_state(keys)
}
