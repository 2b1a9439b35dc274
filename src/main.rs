use std::sync::Arc;

use tracing::{info, warn};
use virtual_try_on::{build_router, AppState, Config, VertexTryOn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,virtual_try_on=debug".into()),
        )
        .init();

    let config = Config::from_env();

    if config.vertex.project_id.is_none() {
        warn!("GOOGLE_CLOUD_PROJECT is not set; try-on requests will fail until it is");
    }
    info!(
        location = config.vertex.location(),
        public_dir = %config.public_dir.display(),
        timeout_secs = config.vertex.timeout.as_secs(),
        "configuration loaded"
    );

    let try_on = VertexTryOn::from_config(config.vertex.clone(), config.auth.clone())?;
    let state = AppState::new(Arc::new(try_on), config.public_dir.clone());
    let app = build_router(state, config.max_body_bytes);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("🚀 Server running on http://localhost:{}", config.port);
    info!("👕 Open in your browser to start trying on clothes!");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("shutdown signal received");
            }
        })
        .await?;

    Ok(())
}
