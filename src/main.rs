//! Shop Price Proxy — Binary Entrypoint
//! Boots the Axum HTTP server, wiring routes, shared state, and middleware.
//!
//! The proxy fetches Coupang / Naver Shopping listing pages server-side and
//! hands the app frontend normalized JSON, so the browser never has to fight
//! the sites' CORS policies itself.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use shop_price_proxy::api::{self, AppState};
use shop_price_proxy::config::ServerConfig;
use shop_price_proxy::scrape::HttpFetcher;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("shop_price_proxy=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();

    init_tracing();

    let cfg = ServerConfig::from_env();
    let fetcher = HttpFetcher::new()?;
    let app = api::router(AppState::new(Arc::new(fetcher)));

    let listener = tokio::net::TcpListener::bind(cfg.bind_addr()).await?;
    let addr = listener.local_addr()?;
    info!("proxy listening on http://{addr}");
    info!("  GET http://{addr}/api/coupang?page=0&limit=10");
    info!("  GET http://{addr}/api/naver?keyword=노트북&page=0&limit=10");

    axum::serve(listener, app).await?;
    Ok(())
}
