use std::net::SocketAddr;
use tokio::{fs, signal};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};
use ucan_contact::{router, AppState, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    if let Err(err) = fs::create_dir_all(&config.log_dir).await {
        warn!("could not create inquiry log dir {}: {err}", config.log_dir.display());
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(
        mail = ?config.mail_transport,
        client_mode = config.client_mode.as_str(),
        log_dir = %config.log_dir.display(),
        "starting contact service"
    );

    let app = router(AppState::new(config));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {err}");
        return;
    }
    info!("shutting down");
}
