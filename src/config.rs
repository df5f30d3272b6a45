use std::env;

use crate::router::HistoryMode;

/// Backend origin used when `API_BASE_URL` is not set.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
/// Listener address used when `BIND_ADDRESS` is not set.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// AppConfig
///
/// Holds the portal's configuration. Immutable once loaded and shared through
/// `AppState` via `FromRef`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Controls the dev proxy default and log format.
    pub env: Env,
    // Origin of the quiz backend API. Every outbound call and the dev proxy target it.
    pub api_base_url: String,
    // Address the portal listens on.
    pub bind_address: String,
    // Where route paths live in browser URLs (fragment or path).
    pub router_mode: HistoryMode,
    // Forward non-page requests to the backend origin.
    pub dev_proxy: bool,
    // Secret the backend signs session tokens with. When unset, any token counts as a session.
    pub jwt_secret: Option<String>,
}

/// Env
///
/// Runtime context: `Local` enables development conveniences (dev proxy, pretty logs),
/// `Production` demands the token secret and emits JSON logs.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// Safe values for test state setup, no environment variables needed.
    fn default() -> Self {
        Self {
            env: Env::Local,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            router_mode: HistoryMode::Hash,
            dev_proxy: true,
            jwt_secret: None,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from environment variables at startup.
    ///
    /// # Panics
    /// Panics in `production` when `JWT_SECRET_KEY` is missing: without it the portal
    /// would accept any expired or forged token as a session.
    pub fn load() -> Self {
        let env = match env::var("APP_ENV").as_deref() {
            Ok("production") => Env::Production,
            _ => Env::Local,
        };

        let jwt_secret = match env {
            Env::Production => Some(
                env::var("JWT_SECRET_KEY").expect("FATAL: JWT_SECRET_KEY must be set in production."),
            ),
            Env::Local => env::var("JWT_SECRET_KEY").ok().filter(|secret| !secret.is_empty()),
        };

        let router_mode = match env::var("ROUTER_MODE").as_deref() {
            Ok("history") => HistoryMode::History,
            _ => HistoryMode::Hash,
        };

        // The dev proxy is a local convenience unless explicitly requested.
        let dev_proxy = match env::var("DEV_PROXY").as_deref() {
            Ok("1") | Ok("true") => true,
            Ok("0") | Ok("false") => false,
            _ => env == Env::Local,
        };

        Self {
            env,
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
            bind_address: env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string()),
            router_mode,
            dev_proxy,
            jwt_secret,
        }
    }
}
