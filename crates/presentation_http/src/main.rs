//! Weather API HTTP Server
//!
//! Main entry point for the read-only forecast API.

use std::{sync::Arc, time::Duration};

use application::{DatabaseHealthPort, ForecastQueryService};
use infrastructure::{
    AppConfig, SqliteDatabaseHealth, SqliteForecastQueries, SqliteLocationStore, create_pool,
    init_tracing,
};
use presentation_http::{routes, set_expose_internal_errors, state::AppState};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

const DEFAULT_LOG_FILTER: &str =
    "weatherapi_server=debug,presentation_http=debug,infrastructure=info,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    init_tracing(DEFAULT_LOG_FILTER, config.server.log_format);
    info!("Weather API v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Some(e) = load_error {
        warn!("Failed to load config, using defaults: {}", e);
    }

    info!(
        host = %config.server.host,
        port = %config.server.port,
        database = %config.database.path,
        environment = %config.environment(),
        "Configuration loaded"
    );

    set_expose_internal_errors(config.expose_internal_errors());

    let state = build_state(&config);
    let app = routes::create_router(state).layer(TraceLayer::new_for_http());
    let app = if config.server.cors_enabled {
        app.layer(cors_layer(&config.server.allowed_origins))
    } else {
        app
    };

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// Wire the SQLite adapters into the shared state.
///
/// A database that cannot be opened leaves the state without storage; the
/// server still starts and reports itself as not ready.
fn build_state(config: &AppConfig) -> AppState {
    let pool = match create_pool(&config.database) {
        Ok(pool) => Arc::new(pool),
        Err(e) => {
            warn!(error = %e, "Database unavailable, serving without storage");
            return AppState::default();
        },
    };

    let health: Arc<dyn DatabaseHealthPort> =
        Arc::new(SqliteDatabaseHealth::new(Arc::clone(&pool)));

    let queries = match SqliteForecastQueries::new(Arc::clone(&pool)) {
        Ok(queries) => queries,
        Err(e) => {
            warn!(error = %e, "Failed to read forecast schema, serving without storage");
            return AppState {
                query_service: None,
                database_health: Some(health),
            };
        },
    };

    let service = ForecastQueryService::new(
        Arc::new(SqliteLocationStore::new(pool)),
        Arc::new(queries),
    );

    AppState::new(Arc::new(service), health)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    use axum::http::{HeaderValue, Method};

    if allowed_origins.is_empty() {
        // Development mode: allow all origins
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET])
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET])
            .allow_headers(Any)
    }
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("Waiting up to {:?} for connections to close...", timeout);
}
