use crate::{
    AppState, guard,
    models::{ErrorResponse, NavigationDecision, SessionState},
};
use axum::{
    Json,
    extract::{Query, Request, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

// --- Query Structs ---

/// NavigationQuery
///
/// The location to evaluate. Accepts a route path (`/quiz/42`), a hash location
/// (`/#/quiz/42`) or a full URL, interpreted per the configured router mode.
#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NavigationQuery {
    pub path: String,
}

// --- Handlers ---

/// health
///
/// Liveness probe. Returns "ok" without touching the route table or the backend.
pub async fn health() -> &'static str {
    "ok"
}

/// get_navigation
///
/// Evaluates one navigation attempt for the caller's session and returns the decision
/// as JSON. This is the gate the front-end consults before rendering a view.
#[utoipa::path(
    get,
    path = "/api/navigation",
    params(NavigationQuery),
    responses(
        (status = 200, description = "Navigation decision", body = NavigationDecision),
        (status = 404, description = "No route matches the path", body = ErrorResponse)
    )
)]
pub async fn get_navigation(
    session: SessionState,
    State(state): State<AppState>,
    Query(query): Query<NavigationQuery>,
) -> Result<Json<NavigationDecision>, (StatusCode, Json<ErrorResponse>)> {
    guard::navigate(&state.routes, &query.path, &session, state.config.router_mode)
        .map(Json)
        .map_err(|not_found| {
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::not_found(not_found.path)),
            )
        })
}

/// fallback
///
/// Everything outside the fixed API surface lands here.
///
/// * Page loads (`GET` accepting `text/html`) get the application shell for every
///   path, in both URL modes. The session lives in browser storage and never rides
///   along on a page load, so gating happens when the shell asks `/api/navigation`.
/// * Anything else is forwarded to the backend when the dev proxy is on.
pub async fn fallback(State(state): State<AppState>, request: Request) -> Response {
    if is_page_request(&request) {
        return Html(SHELL_HTML).into_response();
    }

    if state.config.dev_proxy {
        return state.upstream.forward(request).await;
    }

    let path = request.uri().path().to_string();
    (StatusCode::NOT_FOUND, Json(ErrorResponse::not_found(path))).into_response()
}

fn is_page_request(request: &Request) -> bool {
    request.method() == axum::http::Method::GET
        && request
            .headers()
            .get(header::ACCEPT)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|accept| accept.contains("text/html"))
}

/// The application shell. The client-side router mounts on `#app`.
pub const SHELL_HTML: &str = "<!doctype html>
<html lang=\"en\">
<head><meta charset=\"utf-8\"><title>Quiz Master</title></head>
<body>
<div id=\"app\"></div>
<script src=\"/js/app.js\"></script>
</body>
</html>
";
