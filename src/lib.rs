use axum::{
    Router,
    extract::FromRef,
    http::HeaderName,
    routing::get,
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Navigation core: the route table engine and the authorization gate.
pub mod guard;
pub mod router;

// Session bootstrap and collaborators at the edges.
pub mod auth;
pub mod client;
pub mod config;
pub mod handlers;
pub mod models;
pub mod proxy;

// The application's route surface, segregated by access level (Public, Authenticated, Admin).
pub mod routes;

// --- Public Re-exports ---

pub use client::ApiClient;
pub use config::AppConfig;
pub use proxy::{HttpUpstream, MockUpstream, UpstreamState};
pub use router::RouteTable;

/// ApiDoc
///
/// OpenAPI document for the portal's own endpoints, served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(handlers::get_navigation),
    components(
        schemas(
            models::NavigationDecision, models::ViewId,
            models::Role, models::AccessRequirement, models::ErrorResponse,
        )
    ),
    tags(
        (name = "quiz-portal", description = "Quiz Master navigation gate")
    )
)]
struct ApiDoc;

/// AppState
///
/// Shared, immutable state for every request: configuration, the validated route
/// table and the dev-proxy upstream.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub routes: Arc<RouteTable>,
    pub upstream: UpstreamState,
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// create_router
///
/// Assembles the HTTP surface, applies the observability layers and registers the state.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(handlers::health))
        .route("/api/navigation", get(handlers::get_navigation))
        // Page loads and dev-proxy forwarding.
        .fallback(handlers::fallback)
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Span per request, tagged with the generated `x-request-id` so every log line of one
/// request correlates.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
