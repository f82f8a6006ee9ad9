use habitboard::insights::InsightClient;
use habitboard::seed::Catalog;
use habitboard::{router, AppState, Config, Tracker};
use chrono::Local;
use std::net::SocketAddr;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    let today = Local::now().date_naive();

    let client = InsightClient::new(config.insight.clone())?;
    if !client.has_credential() {
        warn!("no API key configured; insight requests will fail until API_KEY is set");
    }

    let tracker = Tracker::seeded(today);
    info!(
        goals = tracker.goals.len(),
        habits = tracker.habits.len(),
        "seeded dashboard for {today}"
    );

    let state = AppState::new(tracker, Catalog::seeded(), client);
    let app = router(state);

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
