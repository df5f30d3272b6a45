use axum::{
    extract::FromRequestParts,
    http::{HeaderValue, Method, Request, Uri, header, request::Parts},
};
use jsonwebtoken::{EncodingKey, Header, encode};
use quiz_portal::{
    AppConfig, AppState, MockUpstream,
    auth::{Claims, session_from_headers, token_is_valid},
    models::{Role, SessionState},
    routes,
};
use std::{sync::Arc, time::SystemTime};

// --- Helper Functions ---

const TEST_JWT_SECRET: &str = "test-secret-value-1234567890";

fn create_token(secret: &str, exp_offset: i64) -> String {
    let now = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64;

    let claims = Claims {
        sub: serde_json::json!(1),
        exp: (now + exp_offset) as usize,
    };

    let key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), &claims, &key).unwrap()
}

fn create_app_state(jwt_secret: Option<&str>) -> AppState {
    let config = AppConfig {
        jwt_secret: jwt_secret.map(str::to_string),
        ..AppConfig::default()
    };

    AppState {
        config,
        routes: Arc::new(routes::route_table().unwrap()),
        upstream: Arc::new(MockUpstream::new()),
    }
}

/// Helper to get the mutable Parts struct from a generated Request
fn get_request_parts(method: Method, uri: Uri) -> Parts {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();
    let (parts, _) = request.into_parts();
    parts
}

// --- Tests ---

#[tokio::test]
async fn test_session_from_bearer_and_role_header() {
    let app_state = create_app_state(None);

    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    parts.headers.insert(
        header::AUTHORIZATION,
        HeaderValue::from_static("Bearer t1"),
    );
    parts
        .headers
        .insert("x-user-role", HeaderValue::from_static("admin"));

    let session = SessionState::from_request_parts(&mut parts, &app_state)
        .await
        .unwrap();

    assert_eq!(session, SessionState::authenticated("t1", Some(Role::Admin)));
    assert!(session.is_admin());
}

#[tokio::test]
async fn test_cookies_do_not_create_a_session() {
    let app_state = create_app_state(None);

    let mut parts = get_request_parts(Method::GET, "/dashboard".parse().unwrap());
    parts.headers.insert(
        header::COOKIE,
        HeaderValue::from_static("theme=dark; token=t2; userRole=admin"),
    );

    let session = SessionState::from_request_parts(&mut parts, &app_state)
        .await
        .unwrap();

    assert_eq!(session, SessionState::anonymous());
}

#[tokio::test]
async fn test_missing_credentials_is_anonymous() {
    let app_state = create_app_state(None);
    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());

    let session = SessionState::from_request_parts(&mut parts, &app_state)
        .await
        .unwrap();

    assert_eq!(session, SessionState::anonymous());
}

#[test]
fn test_unknown_role_is_treated_as_absent() {
    let mut headers = axum::http::HeaderMap::new();
    headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer t1"));
    headers.insert("x-user-role", HeaderValue::from_static("superuser"));

    let session = session_from_headers(&headers, None);

    assert!(session.is_authenticated());
    assert_eq!(session.role, None);
    assert!(!session.is_admin());
}

#[test]
fn test_non_bearer_authorization_is_ignored() {
    let mut headers = axum::http::HeaderMap::new();
    headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));

    assert!(!session_from_headers(&headers, None).is_authenticated());
}

#[tokio::test]
async fn test_valid_jwt_is_kept_when_secret_configured() {
    let token = create_token(TEST_JWT_SECRET, 3600);
    let app_state = create_app_state(Some(TEST_JWT_SECRET));

    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    parts.headers.insert(
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );

    let session = SessionState::from_request_parts(&mut parts, &app_state)
        .await
        .unwrap();

    assert_eq!(session.bearer_token(), Some(token.as_str()));
}

#[tokio::test]
async fn test_expired_jwt_clears_session() {
    // Well past the default validation leeway.
    let token = create_token(TEST_JWT_SECRET, -3600);
    let app_state = create_app_state(Some(TEST_JWT_SECRET));

    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    parts.headers.insert(
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );
    parts
        .headers
        .insert("x-user-role", HeaderValue::from_static("admin"));

    let session = SessionState::from_request_parts(&mut parts, &app_state)
        .await
        .unwrap();

    assert!(!session.is_authenticated());
    assert!(!session.is_admin());
}

#[test]
fn test_token_signed_with_other_secret_is_invalid() {
    let token = create_token("some-other-secret", 3600);

    assert!(!token_is_valid(&token, TEST_JWT_SECRET));
    assert!(token_is_valid(&token, "some-other-secret"));
    assert!(!token_is_valid("not-a-jwt", TEST_JWT_SECRET));
}

#[test]
fn test_opaque_token_accepted_without_secret() {
    let mut headers = axum::http::HeaderMap::new();
    headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer not-a-jwt"));

    assert!(session_from_headers(&headers, None).is_authenticated());
}
