use anyhow::Context;

use crate::config::AppConfig;
use crate::database::DatabaseManager;
use crate::state::AppState;

pub async fn handle(config: AppConfig) -> anyhow::Result<()> {
    tracing::info!("Starting blog CMS in {:?} mode", config.environment);
    if config.security.jwt_secret.is_empty() {
        tracing::warn!("JWT_SECRET is not set; every request will be treated as anonymous");
    }
    if config.security.cron_secret.is_empty() {
        tracing::warn!("CRON_SECRET is not set; cron endpoints are locked");
    }

    let store = DatabaseManager::settings_store(&config.database)
        .await
        .context("failed to open settings store")?;

    let bind_addr = config.bind_addr();
    let app = crate::app::app(AppState::new(store, config));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
