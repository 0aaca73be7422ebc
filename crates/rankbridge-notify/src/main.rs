use tracing_subscriber::EnvFilter;

use rankbridge_notify::state::NotifyState;

/// The relay always listens on 3000; both the web client and the bot
/// command that posts to /api/notify hardcode it.
const PORT: u16 = 3000;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let app = rankbridge_notify::build_router(NotifyState::new());
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", PORT)).await?;
    tracing::info!("notification relay listening on http://localhost:{PORT}");

    axum::serve(listener, app).await?;
    Ok(())
}
