use std::net::{IpAddr, SocketAddr};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use mandiwatch::{
    config, routes,
    services::{db_init, SqlAlertStore},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = config::load();

    let pool = db_init::connect(&settings)
        .await
        .with_context(|| format!("failed to open database {}", settings.database_url))?;
    db_init::ensure_schema(&pool)
        .await
        .context("failed to create alerts table")?;

    let state = AppState::new(SqlAlertStore::new(pool), settings.clone());
    let app = routes::app(state);

    let ip = settings
        .host
        .parse::<IpAddr>()
        .with_context(|| format!("invalid HOST {:?}", settings.host))?;
    let addr = SocketAddr::from((ip, settings.port));
    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
