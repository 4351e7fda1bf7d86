use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pop_quiz_backend::api;
use pop_quiz_backend::config::Config;
use pop_quiz_backend::constants::{payout_amount, API_VERSION, PAYOUT_TOKEN_SYMBOL};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pop_quiz_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration once; handlers only read it
    let config = Config::from_env()?;
    config.validate()?;

    tracing::info!("Starting Pop Quiz Backend");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!("API Version: {}", API_VERSION);
    tracing::info!(
        "Reward: {} {} (payment gate {})",
        payout_amount(),
        PAYOUT_TOKEN_SYMBOL,
        if config.payment_gate_enabled { "on" } else { "off" }
    );

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let app = api::build_router(api::AppState::new(config));

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
