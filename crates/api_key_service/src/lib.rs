use axum::{Json, http::StatusCode, response::IntoResponse, response::Response};
use serde::Serialize;

/// Which `key` query parameters the mock services accept
#[derive(Debug, Clone, Default)]
pub enum ApiKeyPolicy {
    /// Any non-empty key
    #[default]
    AnyNonEmpty,
    /// Only this key
    Exact(String),
}

impl ApiKeyPolicy {
    /// `Exact` when `key` is set and non-empty, `AnyNonEmpty` otherwise
    pub fn from_configured(key: Option<String>) -> Self {
        match key {
            Some(key) if !key.is_empty() => Self::Exact(key),
            _ => Self::AnyNonEmpty,
        }
    }

    /// Validate the `key` parameter of a request
    pub fn check(&self, key: Option<&str>) -> Result<(), GoogleError> {
        let key = match key {
            Some(key) if !key.is_empty() => key,
            _ => {
                return Err(GoogleError::new(
                    StatusCode::FORBIDDEN,
                    "The request is missing a valid API key.",
                ));
            }
        };

        match self {
            Self::Exact(expected) if expected != key => Err(GoogleError::new(
                StatusCode::BAD_REQUEST,
                "API key not valid. Please pass a valid API key.",
            )),
            _ => Ok(()),
        }
    }
}

/// Error response in the format Google APIs use
/// `{"error": {"code": 403, "message": "...", "status": "PERMISSION_DENIED"}}`
#[derive(Debug, Serialize)]
pub struct GoogleError {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
    pub status: String,
}

impl GoogleError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                code: status.as_u16(),
                message: message.into(),
                status: status_name(status).to_string(),
            },
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.error.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for GoogleError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

fn status_name(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "INVALID_ARGUMENT",
        StatusCode::UNAUTHORIZED => "UNAUTHENTICATED",
        StatusCode::FORBIDDEN => "PERMISSION_DENIED",
        StatusCode::NOT_FOUND => "NOT_FOUND",
        StatusCode::TOO_MANY_REQUESTS => "RESOURCE_EXHAUSTED",
        _ => "INTERNAL",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_forbidden() {
        let err = ApiKeyPolicy::AnyNonEmpty.check(None).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(err.error.status, "PERMISSION_DENIED");

        let err = ApiKeyPolicy::AnyNonEmpty.check(Some("")).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn exact_policy_rejects_other_keys() {
        let policy = ApiKeyPolicy::from_configured(Some("secret".to_string()));

        assert!(policy.check(Some("secret")).is_ok());
        let err = policy.check(Some("guess")).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error.status, "INVALID_ARGUMENT");
    }

    #[test]
    fn unset_or_empty_configuration_accepts_any_key() {
        assert!(matches!(
            ApiKeyPolicy::from_configured(None),
            ApiKeyPolicy::AnyNonEmpty
        ));
        assert!(matches!(
            ApiKeyPolicy::from_configured(Some(String::new())),
            ApiKeyPolicy::AnyNonEmpty
        ));
        assert!(ApiKeyPolicy::AnyNonEmpty.check(Some("whatever")).is_ok());
    }

    #[test]
    fn error_serializes_in_google_format() {
        let body = serde_json::to_value(GoogleError::not_found("no such model")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "error": {"code": 404, "message": "no such model", "status": "NOT_FOUND"}
            })
        );
    }
}
