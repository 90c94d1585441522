use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use admisiones_api::background::token_blacklist_pruning;
use admisiones_api::bootstrap::{ensure_admin, AdminSeed};
use admisiones_api::config::ServerConfig;
use admisiones_api::router::build_app_router;
use admisiones_api::state::AppState;
use admisiones_db::DbPool;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    init_tracing();

    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = prepare_database(&database_url).await;

    match AdminSeed::from_env() {
        Some(seed) => ensure_admin(&pool, &seed)
            .await
            .expect("Failed to provision the admin account"),
        None => tracing::info!("ADMIN_EMAIL/ADMIN_PASSWORD not set, skipping admin seed"),
    }

    let cancel = tokio_util::sync::CancellationToken::new();
    let prune_handle = tokio::spawn(token_blacklist_pruning::run(
        pool.clone(),
        Duration::from_secs(config.blacklist_prune_interval_secs),
        cancel.clone(),
    ));

    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state, &config);

    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    cancel.cancel();
    let drain = Duration::from_secs(config.shutdown_timeout_secs);
    if tokio::time::timeout(drain, prune_handle).await.is_err() {
        tracing::warn!("Token blacklist pruning did not stop in time");
    }

    pool.close().await;
    tracing::info!("Graceful shutdown complete");
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "admisiones_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Connect, verify connectivity and apply pending migrations. Any failure
/// aborts startup.
async fn prepare_database(url: &str) -> DbPool {
    let pool = admisiones_db::create_pool(url)
        .await
        .expect("Failed to connect to database");
    admisiones_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    admisiones_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database ready (pool created, health check passed, migrations applied)");
    pool
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let signal = tokio::select! {
        () = ctrl_c => "SIGINT",
        () = terminate => "SIGTERM",
    };
    tracing::info!(signal, "Shutdown signal received, draining connections");
}
