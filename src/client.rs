use reqwest::{Method, RequestBuilder, StatusCode};
use thiserror::Error;

use crate::{config::AppConfig, models::SessionState};

/// ClientError
///
/// Failures of an outbound backend call.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("backend returned {0}")]
    Status(StatusCode),
    #[error("backend request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// ApiClient
///
/// The outbound HTTP collaborator. All calls target the configured backend origin,
/// and every request built from a session snapshot carries
/// `Authorization: Bearer <token>` when the snapshot has a token.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.api_base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins `path` onto the base URL. Absolute URLs pass through untouched.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        match path.strip_prefix('/') {
            Some(rest) => format!("{}/{}", self.base_url, rest),
            None => format!("{}/{}", self.base_url, path),
        }
    }

    /// A request with no credentials attached.
    pub fn builder(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.url(path))
    }

    /// A request carrying the session's bearer token, if any.
    pub fn request(&self, method: Method, path: &str, session: &SessionState) -> RequestBuilder {
        let builder = self.builder(method, path);
        match session.bearer_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// probe
    ///
    /// Checks that the backend answers on its root path. Used at startup to warn
    /// early when the dev proxy has nothing to forward to.
    pub async fn probe(&self) -> Result<(), ClientError> {
        let response = self.builder(Method::GET, "/").send().await?;
        match response.status() {
            status if status.is_success() => Ok(()),
            status => Err(ClientError::Status(status)),
        }
    }
}
