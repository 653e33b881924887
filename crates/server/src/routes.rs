use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Json, Router,
};
use common::types::MessageBody;
use service::provider::{ProviderRepository, ProviderService};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{warn, Level};
use utoipa::OpenApi;

use crate::openapi::{ApiDoc, MessageDoc};

pub mod providers;

/// Shared handler state: the provider service over whichever store was injected.
#[derive(Clone)]
pub struct AppState {
    pub providers: Arc<ProviderService<dyn ProviderRepository>>,
}

impl AppState {
    pub fn new(repo: Arc<dyn ProviderRepository>) -> Self {
        Self { providers: Arc::new(ProviderService::new(repo)) }
    }
}

/// Liveness probe used by the frontend.
#[utoipa::path(
    get,
    path = "/api/hello",
    tag = "health",
    responses((status = 200, description = "Backend is up", body = MessageDoc))
)]
pub async fn hello() -> Json<MessageBody> {
    Json(MessageBody::hello())
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// CORS restricted to the configured frontend origins. Unparsable origins are skipped.
pub fn build_cors(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(%origin, error = %e, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}

/// Build the full application router.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/api/hello", get(hello))
        .route(
            "/api/providers",
            get(providers::list_providers).post(providers::create_provider),
        )
        .route(
            "/api/providers/",
            get(providers::list_providers).post(providers::create_provider),
        )
        .route(
            "/api/providers/:id",
            get(providers::get_provider)
                .put(providers::update_provider)
                .delete(providers::delete_provider),
        )
        .route("/api-docs/openapi.json", get(openapi_json))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx responses are logged at ERROR
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
