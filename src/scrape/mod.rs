// src/scrape/mod.rs
// Fetch-and-scrape pipeline shared by both site adapters. Each invocation is
// one linear pass: fetch → parse → filter/transform → truncate. No retries,
// no partial results; any failure surfaces to the request boundary.

pub mod extract;
pub mod sites;

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT};

use crate::record::ProductRecord;
use crate::scrape::sites::SiteProfile;

const BROWSER_UA: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Seam between the adapters and the network, so tests can feed canned markup.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str, referer: &str) -> Result<String>;
}

/// Real fetcher: one reqwest client with a browser-like header set and the
/// 30-second timeout that bounds total request latency.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_UA));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("ko-KR,ko;q=0.9"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(FETCH_TIMEOUT)
            .build()
            .context("building http client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, referer: &str) -> Result<String> {
        let resp = self
            .client
            .get(url)
            .header(REFERER, referer)
            .send()
            .await
            .with_context(|| format!("GET {url}"))?;
        let resp = resp
            .error_for_status()
            .with_context(|| format!("upstream status for {url}"))?;
        resp.text().await.context("reading response body")
    }
}

/// One adapter invocation against `url`, returning at most `limit` records.
pub async fn scrape_listing(
    fetcher: &dyn PageFetcher,
    profile: &SiteProfile,
    url: &str,
    limit: usize,
) -> Result<Vec<ProductRecord>> {
    let body = fetcher.fetch(url, profile.referer).await?;

    let records = extract::collect_listings(&body, profile, limit)
        .into_iter()
        .map(|l| {
            ProductRecord::from_scraped(
                profile.source,
                l.index,
                profile.origin,
                &l.title,
                &l.image_url,
                &l.price_text,
                &l.href,
            )
        })
        .collect();
    Ok(records)
}
