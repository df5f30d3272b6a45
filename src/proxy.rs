use async_trait::async_trait;
use axum::{
    body::{Body, to_bytes},
    extract::Request,
    http::{HeaderMap, HeaderName, StatusCode, header},
    response::{IntoResponse, Response},
};
use std::sync::{Arc, Mutex};

use crate::client::ApiClient;

/// Largest request body the dev proxy will buffer before forwarding.
pub const MAX_PROXY_BODY: usize = 10 * 1024 * 1024;

// Connection-scoped headers that must not be copied across the proxy hop.
static HOP_BY_HOP: [HeaderName; 5] = [
    header::CONNECTION,
    header::HOST,
    header::CONTENT_LENGTH,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

// 1. Upstream Contract
/// Upstream
///
/// Where non-page requests go during local development. Swappable so the HTTP
/// surface can be tested without a running backend.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// Forwards the request and returns the backend's response. Transport failures
    /// are answered with `502 Bad Gateway`, never an error.
    async fn forward(&self, request: Request) -> Response;
}

// 2. The Real Implementation
/// HttpUpstream
///
/// Forwards method, path, query, headers and body to the backend origin. The `Host`
/// header is rewritten to the backend's own (the request is re-addressed to the origin).
#[derive(Clone)]
pub struct HttpUpstream {
    client: ApiClient,
}

impl HttpUpstream {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn forward(&self, request: Request) -> Response {
        let (parts, body) = request.into_parts();
        let target = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/")
            .to_string();

        let body = match to_bytes(body, MAX_PROXY_BODY).await {
            Ok(bytes) => bytes,
            Err(_) => return StatusCode::PAYLOAD_TOO_LARGE.into_response(),
        };

        let upstream = self
            .client
            .builder(parts.method.clone(), &target)
            .headers(strip_hop_by_hop(parts.headers))
            .body(body)
            .send()
            .await;

        let upstream = match upstream {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, target = %target, "dev proxy could not reach backend");
                return StatusCode::BAD_GATEWAY.into_response();
            }
        };

        let status = upstream.status();
        let headers = strip_hop_by_hop(upstream.headers().clone());
        match upstream.bytes().await {
            Ok(bytes) => {
                tracing::debug!(method = %parts.method, target = %target, status = %status, "proxied");
                let mut response = Response::new(Body::from(bytes));
                *response.status_mut() = status;
                *response.headers_mut() = headers;
                response
            }
            Err(e) => {
                tracing::warn!(error = %e, target = %target, "dev proxy lost the backend response");
                StatusCode::BAD_GATEWAY.into_response()
            }
        }
    }
}

fn strip_hop_by_hop(mut headers: HeaderMap) -> HeaderMap {
    for name in HOP_BY_HOP.iter() {
        headers.remove(name);
    }
    headers
}

// 3. The Mock Implementation (For Tests)
/// MockUpstream
///
/// Records every forwarded `METHOD path` and answers `200` with `proxied:<path>`.
#[derive(Clone, Default)]
pub struct MockUpstream {
    forwarded: Arc<Mutex<Vec<String>>>,
}

impl MockUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything forwarded so far, in order.
    pub fn forwarded(&self) -> Vec<String> {
        self.forwarded
            .lock()
            .map(|seen| seen.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Upstream for MockUpstream {
    async fn forward(&self, request: Request) -> Response {
        let target = request
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| "/".to_string());

        if let Ok(mut seen) = self.forwarded.lock() {
            seen.push(format!("{} {}", request.method(), target));
        }

        (StatusCode::OK, format!("proxied:{target}")).into_response()
    }
}

/// UpstreamState
///
/// The type used to share the upstream through the application state.
pub type UpstreamState = Arc<dyn Upstream>;
