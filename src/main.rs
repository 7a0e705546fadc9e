//! Local development server speaking the todolists API wire format.

use todolists::{config, http::{routes::todolists as routes, routing}, infrastructure::in_memory_api::InMemoryTodolistsApi};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let addr = config::bind_addr_from_env()?;
    let seed = std::env::var("TODOLISTS_SEED").unwrap_or_default();
    let api = InMemoryTodolistsApi::with_titles(seed.split(',').map(str::trim).filter(|t| !t.is_empty()));
    let router = routing::app(routes::router(routes::AppState { api }));

    tracing::info!(%addr, "listening");
    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal::ctrl_c;
    let _ = ctrl_c().await;
    tracing::info!("shutdown");
}
