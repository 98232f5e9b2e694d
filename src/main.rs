use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

use confscrape::{create_router, AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let config = AppConfig::from_env()?;
    let bind_addr = config.bind_addr.clone();
    info!(
        "Browser mode: {} (pool size {}), page timeout: {}ms, CSV dir: {}",
        config.browser_mode,
        config.browser_pool_size,
        config.page_timeout.as_millis(),
        config.csv_output_dir.display()
    );

    let app = create_router(AppState::with_browser(config)?);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Server is running on http://{}", bind_addr);
    info!("Swagger UI available at http://{}/swagger-ui", bind_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
