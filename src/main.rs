mod config;
mod handlers;
mod models;
mod server;
mod services;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use dotenv::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;

use config::Config;
use server::{create_router, AppState};
use services::{GroqClient, ImgbbClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables before the logger so RUST_LOG can live in .env
    dotenv().ok();

    // Initialize logger
    env_logger::init();

    log::info!("🚀 Starting Food Vision Relay...");

    let config = Config::from_env();
    config.warn_missing_keys();

    let image_host = Arc::new(ImgbbClient::new(&config));
    log::info!("✅ Image host client initialized: {}", config.imgbb_api_url);

    let vision = Arc::new(GroqClient::new(&config));
    log::info!("✅ Vision client initialized with model: {}", config.groq_model);

    let app = create_router(AppState { image_host, vision }, config.max_upload_bytes);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("🌐 Server running on port {}", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("🛑 Shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("❌ Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
