use booking_calendar::{
    clock::SystemClock,
    models::LoadOutcome,
    source::Source,
    AppState, CalendarController, Config,
};
use std::net::SocketAddr;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env()?;
    let source = Source::from_config(&config.source)?;
    let clock = SystemClock::new(config.zone);

    let mut controller = CalendarController::from_clock(&clock, config.zone, config.policy);
    info!("loading booked dates from {source} (zone {})", config.zone);
    if let LoadOutcome::Degraded { reason } = controller.load(&source).await {
        warn!("starting with no booked dates: {reason}");
    }

    let app = booking_calendar::router(AppState::new(controller, source, clock));
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
