use quiz_portal::{
    AppState, HttpUpstream,
    client::ApiClient,
    config::{AppConfig, Env},
    create_router,
    proxy::UpstreamState,
    routes,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// Entry point: configuration, logging, route table, backend client, then the HTTP server.
#[tokio::main]
async fn main() {
    // 1. Configuration (fail-fast on missing production secrets)
    dotenv::dotenv().ok();
    let config = AppConfig::load();

    // 2. Logging: RUST_LOG wins, otherwise sensible local defaults.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "quiz_portal=debug,tower_http=info".into());

    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Application starting in {:?} mode", config.env);

    // 3. Route table. An inconsistent table is a programming error; refuse to start.
    let table = routes::route_table().expect("FATAL: route table is inconsistent");
    tracing::info!(
        routes = table.len(),
        router_mode = ?config.router_mode,
        "Route table loaded"
    );

    // 4. Backend collaborator
    let client = ApiClient::from_config(&config);
    if config.dev_proxy {
        match client.probe().await {
            Ok(()) => tracing::info!(backend = %client.base_url(), "Dev proxy enabled"),
            Err(e) => tracing::warn!(
                backend = %client.base_url(),
                error = %e,
                "Dev proxy enabled but backend is not answering"
            ),
        }
    }
    let upstream = Arc::new(HttpUpstream::new(client)) as UpstreamState;

    // 5. State and server
    let bind_address = config.bind_address.clone();
    let app_state = AppState {
        config,
        routes: Arc::new(table),
        upstream,
    };

    let app = create_router(app_state);

    let listener = TcpListener::bind(&bind_address)
        .await
        .expect("FATAL: could not bind listener. Check BIND_ADDRESS.");

    tracing::info!("Listening on {}", bind_address);
    tracing::info!("API Documentation (Swagger UI) available at: http://{}/swagger-ui", bind_address);

    axum::serve(listener, app)
        .await
        .expect("FATAL: HTTP server terminated unexpectedly");
}
