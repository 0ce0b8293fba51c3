use api_key_service::ApiKeyPolicy;
use axum::Router;
use datastore::Repository;
use std::sync::Arc;

/// Default bind address of the mock backend
pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";

/// Data API, model and control routes over one shared repository
pub fn app(repo: Arc<dyn Repository>, keys: ApiKeyPolicy) -> Router {
    Router::new()
        .merge(data_api_service::create_router(repo.clone(), keys.clone()))
        .merge(model_service::create_router(keys))
        .merge(control_service::create_router(repo))
}
