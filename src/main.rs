use anyhow::Result;
use hydra_energy_dashboard::{api, config, dashboard, telemetry};
use config::Config;
use telemetry::init_tracing;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cfg = Config::load()?;

    if cfg.identity.client_secret == "secret" {
        warn!("Using the default identity client secret - override DASHBOARD__IDENTITY__CLIENT_SECRET outside local development");
    }

    let app_state = dashboard::AppState::new(cfg.clone())?;
    let app = api::router(app_state);

    let addr = cfg.server.socket_addr()?;

    if cfg.server.host == "0.0.0.0" {
        warn!("Server binding to 0.0.0.0 - service will be accessible from the network");
    }

    info!(%addr, "starting Hydra Energy Dashboard");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(telemetry::shutdown_signal())
        .await?;

    warn!("shutdown complete");
    Ok(())
}
