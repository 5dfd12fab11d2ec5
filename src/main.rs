use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use auction_desk::{AppState, app::build_router, config::Settings, services::gateway::ApiGateway};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env();
    info!("Using tournament API at {}", settings.api_base);

    let gateway = Arc::new(ApiGateway::new(settings.api_base.clone()));
    let bind_addr = settings.bind_addr.clone();
    let state = AppState::new(settings, gateway);
    let tasks = state.start().await;

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Auction desk listening on {}", bind_addr);
    axum::serve(listener, app).await?;

    for task in tasks {
        task.abort();
    }
    Ok(())
}
