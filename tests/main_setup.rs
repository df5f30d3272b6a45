use quiz_portal::{
    AppConfig,
    config::{DEFAULT_API_BASE_URL, Env},
    router::HistoryMode,
};
use serial_test::serial;
use std::{env, panic};

const CONFIG_VARS: [&str; 6] = [
    "APP_ENV",
    "API_BASE_URL",
    "BIND_ADDRESS",
    "ROUTER_MODE",
    "DEV_PROXY",
    "JWT_SECRET_KEY",
];

// --- Setup/Teardown Utilities ---

/// Runs `test` with a clean configuration environment and restores the previous values afterward.
fn run_with_env<T, R>(test: T) -> R
where
    T: FnOnce() -> R + panic::UnwindSafe,
{
    let originals: Vec<(String, Option<String>)> = CONFIG_VARS
        .iter()
        .map(|&var| (var.to_string(), env::var(var).ok()))
        .collect();

    unsafe {
        for var in CONFIG_VARS {
            env::remove_var(var);
        }
    }

    let result = panic::catch_unwind(test);

    for (key, original_value) in originals.into_iter().rev() {
        unsafe {
            if let Some(val) = original_value {
                env::set_var(&key, val);
            } else {
                env::remove_var(&key);
            }
        }
    }

    match result {
        Ok(value) => value,
        Err(e) => panic::resume_unwind(e),
    }
}

// --- Tests ---

#[test]
#[serial]
fn test_app_config_production_fail_fast() {
    let result = run_with_env(|| {
        panic::catch_unwind(|| {
            unsafe {
                env::set_var("APP_ENV", "production");
            }
            // JWT_SECRET_KEY is missing
            AppConfig::load()
        })
    });

    assert!(
        result.is_err(),
        "Production config loading should panic on a missing token secret"
    );
}

#[test]
#[serial]
fn test_app_config_local_env_defaults() {
    let config = run_with_env(|| {
        unsafe {
            env::set_var("APP_ENV", "local");
        }
        AppConfig::load()
    });

    assert_eq!(config.env, Env::Local);
    assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(config.bind_address, "0.0.0.0:8080");
    assert_eq!(config.router_mode, HistoryMode::Hash);
    assert!(config.dev_proxy, "dev proxy is on by default in local");
    assert_eq!(config.jwt_secret, None);
}

#[test]
#[serial]
fn test_app_config_production_with_secret() {
    let config = run_with_env(|| {
        unsafe {
            env::set_var("APP_ENV", "production");
            env::set_var("JWT_SECRET_KEY", "prod-secret");
            env::set_var("API_BASE_URL", "https://api.quiz.example");
            env::set_var("ROUTER_MODE", "history");
        }
        AppConfig::load()
    });

    assert_eq!(config.env, Env::Production);
    assert_eq!(config.jwt_secret.as_deref(), Some("prod-secret"));
    assert_eq!(config.api_base_url, "https://api.quiz.example");
    assert_eq!(config.router_mode, HistoryMode::History);
    assert!(!config.dev_proxy, "dev proxy is off by default in production");
}

#[test]
#[serial]
fn test_app_config_dev_proxy_override() {
    let config = run_with_env(|| {
        unsafe {
            env::set_var("DEV_PROXY", "false");
            env::set_var("JWT_SECRET_KEY", "");
        }
        AppConfig::load()
    });

    assert!(!config.dev_proxy);
    // An empty secret is treated as unset in local.
    assert_eq!(config.jwt_secret, None);
}
