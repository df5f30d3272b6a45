use std::convert::Infallible;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, header, request::Parts},
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::{
    config::AppConfig,
    models::{Role, SessionState},
};

/// Header carrying the role the front-end keeps next to its token in browser storage.
pub const ROLE_HEADER: &str = "x-user-role";

/// Claims
///
/// The subset of the backend's access-token payload needed to decide whether a token
/// is still a live session. `sub` is the backend user id, numeric or string.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: serde_json::Value,
    pub exp: usize,
}

/// SessionState Extractor Implementation
///
/// Builds the session snapshot for one request. Extraction never fails: a request
/// without credentials is simply an anonymous session, and the navigation guard
/// turns that into a redirect rather than an error.
impl<S> FromRequestParts<S> for SessionState
where
    S: Send + Sync,
    AppConfig: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = AppConfig::from_ref(state);
        Ok(session_from_headers(&parts.headers, config.jwt_secret.as_deref()))
    }
}

/// session_from_headers
///
/// Token from `Authorization: Bearer`, role from `x-user-role`. Unknown roles count
/// as absent. Both are sent explicitly by the front-end on each call.
///
/// When `jwt_secret` is set, a token that fails HS256 validation (bad signature,
/// malformed, expired) is dropped: an invalidated token is a cleared session.
pub fn session_from_headers(headers: &HeaderMap, jwt_secret: Option<&str>) -> SessionState {
    let auth_token = bearer_token(headers)
        .filter(|token| !token.is_empty())
        .filter(|token| match jwt_secret {
            Some(secret) => token_is_valid(token, secret),
            None => true,
        });

    let role = headers
        .get(ROLE_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|role| role.trim().parse::<Role>().ok());

    SessionState {
        auth_token,
        role,
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
}

/// Validates signature and expiry of a backend-issued token.
pub fn token_is_valid(token: &str, secret: &str) -> bool {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    match decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation) {
        Ok(_) => true,
        Err(e) => {
            tracing::debug!(error = %e, "discarding invalid session token");
            false
        }
    }
}
