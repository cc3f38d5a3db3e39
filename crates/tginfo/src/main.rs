use std::sync::Arc;

use tokio::net::TcpListener;

use tginfo_core::config::Config;
use tginfo_http::AppState;
use tginfo_telegram::TelegramLookup;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tginfo_core::logging::init("tginfo")?;

    let cfg = Config::load()?;

    let lookup = Arc::new(TelegramLookup::connect(&cfg).await?);
    let app = tginfo_http::router(AppState::new(lookup.clone()));

    let listener = TcpListener::bind(cfg.bind_addr()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Err(e) = lookup.close().await {
        tracing::warn!("{e}");
    }
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
}
