mod config;
mod error;
mod formatter;
mod http;
mod transcript;

use std::sync::Arc;

use crate::config::Config;
use crate::http::{create_router, AppState};
use crate::transcript::{TranscriptService, YoutubeCaptionFetcher};

type MainResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> MainResult {
    pretty_env_logger::init();

    let cfg = Config::load("config/captionproxy")?;
    let addr = cfg.socket_addr()?;

    let transcripts = TranscriptService::new(Arc::new(YoutubeCaptionFetcher))
        .with_default_language(cfg.default_language.clone())
        .with_attempt_timeout(cfg.attempt_timeout());
    let router = create_router(AppState::new(transcripts));

    log::info!(
        "Launching transcript API on {} (default language: {})",
        addr,
        cfg.default_language
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl-C: {}", e);
    }
}
