use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use meeple_api::config::Config;
use meeple_api::routes::create_router;
use meeple_api::services::bgg::BggClient;
use meeple_api::services::prediction::PredictionClient;
use meeple_api::services::reference::ReferenceData;
use meeple_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    let reference = ReferenceData::load(Path::new(&config.reference_data_dir));
    let prediction = PredictionClient::new(config.prediction_api_url.clone());
    let catalog = BggClient::new(config.bgg_api_url.clone(), config.bgg_legacy_api_url.clone());
    let state = AppState::new(Arc::new(prediction), Arc::new(catalog), reference);

    let app = create_router(state).layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "meeple-api listening");
    axum::serve(listener, app).await?;

    Ok(())
}
