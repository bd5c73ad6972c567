// src/api.rs
// HTTP surface: two scraping endpoints plus a health probe. Handlers hold no
// state beyond the shared fetcher; every request is independent.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::record::ProductRecord;
use crate::scrape::{self, sites, PageFetcher};

#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<dyn PageFetcher>,
}

impl AppState {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/coupang", get(coupang_products))
        .route("/api/naver", get(naver_products))
        // Wildcard origin: this proxy exists so the app frontend can scrape
        // without CORS trouble. Local development only.
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn default_limit() -> usize {
    10
}

fn default_keyword() -> String {
    "노트북".to_string()
}

#[derive(serde::Deserialize)]
struct CoupangQuery {
    #[serde(default)]
    page: u32,
    #[serde(default = "default_limit")]
    limit: usize,
}

#[derive(serde::Deserialize)]
struct NaverQuery {
    #[serde(default = "default_keyword")]
    keyword: String,
    #[serde(default)]
    page: u32,
    #[serde(default = "default_limit")]
    limit: usize,
}

async fn coupang_products(
    State(state): State<AppState>,
    Query(q): Query<CoupangQuery>,
) -> Response {
    let url = sites::coupang_url(q.page);
    info!(source = "coupang", url, "fetching listing page");
    let result = scrape::scrape_listing(&*state.fetcher, sites::coupang(), url, q.limit).await;
    respond(result, "coupang", url)
}

async fn naver_products(State(state): State<AppState>, Query(q): Query<NaverQuery>) -> Response {
    let url = sites::naver_url(&q.keyword, q.page, q.limit);
    info!(source = "naver", url, "fetching listing page");
    let result = scrape::scrape_listing(&*state.fetcher, sites::naver(), &url, q.limit).await;
    respond(result, "naver", &url)
}

/// 200 with the record array, or 500 carrying the raw error text. All error
/// kinds (network, upstream status, parse) are handled identically.
fn respond(result: anyhow::Result<Vec<ProductRecord>>, source: &str, url: &str) -> Response {
    match result {
        Ok(products) => {
            info!(source, url, returned = products.len(), "listing scraped");
            Json(products).into_response()
        }
        Err(e) => {
            let msg = format!("{e:#}");
            error!(source, url, error = %msg, "scrape failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": msg })),
            )
                .into_response()
        }
    }
}
