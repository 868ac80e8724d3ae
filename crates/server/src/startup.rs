use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use common::utils::logging::init_logging_default;
use service::assets::{AssetStore, UrlResolver};
use service::store::backend::Store;
use service::seed;

use crate::routes;
use crate::state::AppState;

fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Public entry: load configuration, pick the storage backend, seed sample
/// data and run the HTTP server.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let config = configs::AppConfig::load_and_validate()?;

    let assets = AssetStore::open(&config.assets.root).await?;
    let resolver = UrlResolver::new(&config.assets.root, config.assets.public_base_url.clone());

    let probe_timeout = Duration::from_secs(config.database.probe_timeout_secs);
    let store = Store::initialize(&config.database, probe_timeout).await;
    info!(mode = store.mode().as_str(), "storage backend selected");

    seed::run(&store).await?;

    let state = AppState::new(store, assets, resolver);
    let app: Router = routes::build_router(state, build_cors());

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!(%addr, "starting homemeals server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
