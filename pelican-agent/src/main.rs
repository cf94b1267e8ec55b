use pelican_agent::core::tasks;
use pelican_agent::{AppState, Config, logging, routes};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment (.env is optional)
    dotenv::dotenv().ok();

    // 2. Configuration - fails fast when API_TOKEN is missing
    let config = Config::from_env()?;

    logging::init_logger(config.log_level.as_deref(), config.log_dir.as_deref());

    tracing::info!("Pelican printer agent starting...");
    tracing::info!(api = %config.api_url, "Polling every {} ms", config.poll_interval_ms);

    // 3. Pipeline state (dispatcher selected here, once)
    let state = AppState::initialize(&config)?;

    // 4. Background poll task
    let shutdown = CancellationToken::new();
    let poller = tasks::spawn_poller(state.clone(), shutdown.clone());

    // 5. Local callback server
    let app = routes::build_app(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.http_port));
    tracing::info!("Callback server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
            shutdown.cancel();
        })
        .await?;

    // Drain the in-flight poll cycle before exiting
    poller.await?;

    Ok(())
}
