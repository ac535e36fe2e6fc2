use anyhow::{Context, Result};
use parle_core::{Config, PromptRelay};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let config = Config::from_env();
    if config.api_key.is_none() {
        tracing::warn!("GOOGLE_API_KEY not set - /chat will answer 500 until it is");
    }
    tracing::info!("Starting ParleGPT web server (model: {})", config.model);

    // Built once; shared read-only across all requests
    let relay = Arc::new(PromptRelay::new(&config));
    let app = parle_web::app(relay);

    let host = std::env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("SERVER_PORT")
        .unwrap_or_else(|_| "5000".to_string())
        .parse()
        .context("Invalid SERVER_PORT")?;
    let addr = format!("{host}:{port}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    tracing::info!("Server running at http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
