// src/scrape/sites.rs
// Per-site configuration: target URLs, headers, and the selector chains the
// extractor walks. The two adapters share one control flow and differ only in
// the data here.

use once_cell::sync::Lazy;
use scraper::Selector;

use crate::record::Source;

/// Everything that varies between the scraped sites.
pub struct SiteProfile {
    pub source: Source,
    /// Origin prepended to relative product hrefs.
    pub origin: &'static str,
    pub referer: &'static str,
    /// Product candidate elements (comma list, document order).
    pub candidates: Selector,
    /// Title fallback chain, first non-empty text wins.
    pub title: Vec<Selector>,
    /// First matching image element; attributes tried in order.
    pub image: Selector,
    pub image_attrs: &'static [&'static str],
    /// Price-text fallback chain.
    pub price: Vec<Selector>,
    /// First matching link, `href` attribute.
    pub link: Selector,
}

fn sel(s: &str) -> Selector {
    Selector::parse(s).expect("valid static selector")
}

static COUPANG: Lazy<SiteProfile> = Lazy::new(|| SiteProfile {
    source: Source::Coupang,
    origin: "https://www.coupang.com",
    referer: "https://www.coupang.com/",
    candidates: sel("li.baby-product, li.search-product"),
    title: vec![sel(".name"), sel(".product-name")],
    image: sel("img"),
    image_attrs: &["src", "data-img-src"],
    price: vec![sel(".price-value"), sel(".price")],
    link: sel("a"),
});

static NAVER: Lazy<SiteProfile> = Lazy::new(|| SiteProfile {
    source: Source::Naver,
    origin: "https://shopping.naver.com",
    referer: "https://shopping.naver.com/",
    candidates: sel(".product_item, .productList_item, .basicList_item"),
    title: vec![
        sel(".product_title"),
        sel(".basicList_title"),
        sel(r#"a[class*="title"]"#),
    ],
    image: sel("img"),
    image_attrs: &["src", "data-src"],
    price: vec![sel(".price"), sel(".price_num")],
    link: sel("a"),
});

pub fn coupang() -> &'static SiteProfile {
    &COUPANG
}

pub fn naver() -> &'static SiteProfile {
    &NAVER
}

/// Coupang has no real pagination here: `page` rotates across three
/// unrelated category pages.
const COUPANG_URLS: [&str; 3] = [
    "https://www.coupang.com/np/bestSeller",
    "https://www.coupang.com/np/categories/186764",
    "https://www.coupang.com/np/categories/186765",
];

pub fn coupang_url(page: u32) -> &'static str {
    COUPANG_URLS[page as usize % COUPANG_URLS.len()]
}

/// Naver search URL; upstream pages are 1-indexed.
pub fn naver_url(keyword: &str, page: u32, limit: usize) -> String {
    format!(
        "https://search.shopping.naver.com/search/all?query={}&pagingIndex={}&pagingSize={}",
        urlencoding::encode(keyword),
        u64::from(page) + 1,
        limit
    )
}
