use insight_service::gemini;

/// Runtime settings, read once from the environment at startup
#[derive(Debug, Clone)]
pub struct Settings {
    pub youtube_api_key: String,
    pub google_api_key: String,
    pub youtube_base_url: String,
    pub gemini_base_url: String,
    pub gemini_model: String,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build settings from any variable source; unset or empty values fall
    /// back to the defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let settings = Self {
            youtube_api_key: var("YOUTUBE_API_KEY").unwrap_or_default(),
            google_api_key: var("GOOGLE_API_KEY").unwrap_or_default(),
            youtube_base_url: var("YOUTUBE_API_BASE_URL")
                .unwrap_or_else(|| youtube_api::DEFAULT_BASE_URL.to_string()),
            gemini_base_url: var("GEMINI_API_BASE_URL")
                .unwrap_or_else(|| gemini::DEFAULT_BASE_URL.to_string()),
            gemini_model: var("GEMINI_MODEL").unwrap_or_else(|| gemini::DEFAULT_MODEL.to_string()),
        };

        // Missing keys are not fatal; the services reject the calls later
        if settings.youtube_api_key.is_empty() {
            tracing::warn!("YOUTUBE_API_KEY is not set, Data API calls will fail");
        }
        if settings.google_api_key.is_empty() {
            tracing::warn!("GOOGLE_API_KEY is not set, insight generation will fail");
        }
        settings
    }
}
