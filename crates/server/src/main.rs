use anyhow::Context;
use clap::Parser;
use fire_area_server::{init_logging, load_service, router, AppState, ServerConfig};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_filter);

    let service = load_service(&config.model)
        .inspect_err(|e| error!("Cannot start without a model: {e}"))
        .with_context(|| format!("loading model from {}", config.model.display()))?;
    info!("Prediction service ready: {service:?}");

    let static_dir = config.static_dir_if_present();
    if static_dir.is_none() {
        info!(
            "Static directory {} not found, /static disabled",
            config.static_dir.display()
        );
    }
    let app = router(AppState::new(service), static_dir);

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("binding {}", config.bind))?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
    }
}
