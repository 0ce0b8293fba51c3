use domain::ChannelIdentifier;
use std::sync::Arc;
use thiserror::Error;
use youtube_api::{ApiError, VideoPlatform};

/// What a free-form channel input refers to, decided lexically
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelReference {
    /// Used as-is; nothing checks that the channel exists
    Id(ChannelIdentifier),
    /// `@name` alias that still has to be looked up
    Handle(String),
}

impl ChannelReference {
    /// Classifies the input. First match wins:
    /// `/channel/<id>` anywhere, a `youtube.com/` URL carrying `@<handle>`,
    /// a bare `@<handle>`, and finally the whole input as a channel ID.
    pub fn parse(input: &str) -> Self {
        if let Some((_, rest)) = input.split_once("/channel/") {
            return Self::Id(ChannelIdentifier::new(first_segment(rest)));
        }

        if input.contains("youtube.com/") {
            if let Some((_, rest)) = input.split_once('@') {
                let handle = rest.split(['/', '@']).next().unwrap_or(rest);
                return Self::Handle(handle.to_string());
            }
        }

        if let Some(handle) = input.strip_prefix('@') {
            return Self::Handle(handle.to_string());
        }

        Self::Id(ChannelIdentifier::new(input))
    }
}

fn first_segment(path: &str) -> &str {
    path.split('/').next().unwrap_or(path)
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("input does not name a channel")]
    EmptyId,

    #[error("no channel found for handle @{handle}")]
    NotFound { handle: String },

    #[error("channel search for @{handle} failed: {source}")]
    Search {
        handle: String,
        #[source]
        source: ApiError,
    },
}

impl ResolveError {
    /// The handle that was looked up, if the input was one
    pub fn handle(&self) -> Option<&str> {
        match self {
            Self::EmptyId => None,
            Self::NotFound { handle } | Self::Search { handle, .. } => Some(handle),
        }
    }
}

/// Turns user input into a canonical channel identifier
#[derive(Clone)]
pub struct IdentifierResolver {
    platform: Arc<dyn VideoPlatform>,
}

impl IdentifierResolver {
    pub fn new(platform: Arc<dyn VideoPlatform>) -> Self {
        Self { platform }
    }

    /// Resolves `input`. Only handles cost a network call: exactly one
    /// channel search asking for a single result.
    pub async fn resolve(&self, input: &str) -> Result<ChannelIdentifier, ResolveError> {
        let handle = match ChannelReference::parse(input) {
            ChannelReference::Id(id) if id.as_str().is_empty() => {
                tracing::info!(input, "no channel id in input");
                return Err(ResolveError::EmptyId);
            }
            ChannelReference::Id(id) => {
                tracing::debug!(channel_id = %id, "input is a channel id");
                return Ok(id);
            }
            ChannelReference::Handle(handle) => handle,
        };

        tracing::debug!(%handle, "searching channel by handle");
        let response = match self.platform.search_channels(&handle, 1).await {
            Ok(response) => response,
            Err(source) => {
                tracing::warn!(%handle, error = %source, "error resolving channel id");
                return Err(ResolveError::Search { handle, source });
            }
        };

        match response.items.first().and_then(|item| item.channel_id()) {
            Some(id) => {
                tracing::info!(%handle, channel_id = id, "resolved handle");
                Ok(ChannelIdentifier::new(id))
            }
            None => {
                tracing::info!(%handle, "no channel matches handle");
                Err(ResolveError::NotFound { handle })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, FakePlatform, channel_hits};
    use serde_json::json;

    fn id(s: &str) -> ChannelReference {
        ChannelReference::Id(ChannelIdentifier::new(s))
    }

    fn handle(s: &str) -> ChannelReference {
        ChannelReference::Handle(s.to_string())
    }

    #[test]
    fn channel_path_is_taken_verbatim() {
        assert_eq!(
            ChannelReference::parse("https://youtube.com/channel/UC123/videos"),
            id("UC123")
        );
        assert_eq!(
            ChannelReference::parse("https://www.youtube.com/channel/XYZ123"),
            id("XYZ123")
        );
        // Purely lexical: no validation of what follows
        assert_eq!(ChannelReference::parse("foo/channel/not an id"), id("not an id"));
    }

    #[test]
    fn handle_is_extracted_from_urls() {
        assert_eq!(
            ChannelReference::parse("https://www.youtube.com/@creator/featured"),
            handle("creator")
        );
        assert_eq!(
            ChannelReference::parse("youtube.com/@creator"),
            handle("creator")
        );
        // A second @ ends the handle too
        assert_eq!(
            ChannelReference::parse("https://youtube.com/@a@b/videos"),
            handle("a")
        );
    }

    #[test]
    fn bare_handle_keeps_everything_after_at() {
        assert_eq!(ChannelReference::parse("@creator"), handle("creator"));
        assert_eq!(ChannelReference::parse("@some/thing"), handle("some/thing"));
    }

    #[test]
    fn anything_else_is_an_id() {
        assert_eq!(ChannelReference::parse("UCabc"), id("UCabc"));
        // An @ outside a youtube.com URL does not make a handle
        assert_eq!(
            ChannelReference::parse("https://example.com/@creator"),
            id("https://example.com/@creator")
        );
    }

    #[tokio::test]
    async fn channel_url_resolves_without_network() {
        let platform = Arc::new(FakePlatform::default());
        let resolver = IdentifierResolver::new(platform.clone());

        let resolved = resolver
            .resolve("https://youtube.com/channel/UC123/videos")
            .await
            .unwrap();

        assert_eq!(resolved.as_str(), "UC123");
        assert!(platform.calls().is_empty());
    }

    #[tokio::test]
    async fn empty_channel_id_is_rejected_without_network() {
        let platform = Arc::new(FakePlatform::default());
        let resolver = IdentifierResolver::new(platform.clone());

        for input in ["https://youtube.com/channel/", "foo/channel//x", ""] {
            let err = resolver.resolve(input).await.unwrap_err();
            assert!(matches!(err, ResolveError::EmptyId), "{input:?}");
            assert_eq!(err.handle(), None);
        }
        assert!(platform.calls().is_empty());
    }

    #[tokio::test]
    async fn handle_resolves_through_one_search() {
        let platform = Arc::new(FakePlatform {
            channel_search: Some(channel_hits(&["UCabc"])),
            ..Default::default()
        });
        let resolver = IdentifierResolver::new(platform.clone());

        let resolved = resolver.resolve("@creator").await.unwrap();

        assert_eq!(resolved.as_str(), "UCabc");
        assert_eq!(
            platform.calls(),
            vec![Call::SearchChannels {
                query: "creator".to_string(),
                max_results: 1
            }]
        );
    }

    #[tokio::test]
    async fn handle_in_url_searches_for_the_bare_handle() {
        let platform = Arc::new(FakePlatform {
            channel_search: Some(channel_hits(&["UCabc"])),
            ..Default::default()
        });
        let resolver = IdentifierResolver::new(platform.clone());

        resolver
            .resolve("https://www.youtube.com/@creator/videos")
            .await
            .unwrap();

        assert_eq!(
            platform.calls(),
            vec![Call::SearchChannels {
                query: "creator".to_string(),
                max_results: 1
            }]
        );
    }

    #[tokio::test]
    async fn empty_search_is_not_found() {
        let platform = Arc::new(FakePlatform {
            channel_search: Some(json!({ "items": [] })),
            ..Default::default()
        });
        let resolver = IdentifierResolver::new(platform);

        let err = resolver.resolve("@ghost").await.unwrap_err();

        assert!(matches!(err, ResolveError::NotFound { ref handle } if handle == "ghost"));
    }

    #[tokio::test]
    async fn search_failure_is_reported_not_raised() {
        let platform = Arc::new(FakePlatform::default());
        let resolver = IdentifierResolver::new(platform);

        let err = resolver.resolve("@creator").await.unwrap_err();

        assert!(matches!(err, ResolveError::Search { .. }));
        assert_eq!(err.handle(), Some("creator"));
    }
}
