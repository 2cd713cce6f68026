//! Web server entry point for the image converter.

use std::sync::Arc;

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use imgconv::core::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = Arc::new(AppConfig::from_env());
    debug!("Resolved config: {}", serde_json::to_string(&*config)?);
    config.ensure_dirs().await?;
    info!(
        "Staging uploads in {}, outputs in {} (max upload {}MB)",
        config.upload_dir.display(),
        config.output_dir.display(),
        config.max_upload_mib()
    );

    let app = imgconv::web::router(config.clone());
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Listening on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
