// src/record.rs
// Normalized product records returned to API callers.

use serde::Serialize;

/// Which site a record was scraped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Coupang,
    Naver,
}

impl Source {
    pub fn tag(self) -> &'static str {
        match self {
            Source::Coupang => "coupang",
            Source::Naver => "naver",
        }
    }
}

/// Placeholder trend value; no real price history backs it.
pub const PRICE_CHANGE_STUB: i32 = -10;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub current_price: i64,
    pub average_price: i64,
    pub price_change_percent: i32,
    pub source: Source,
    pub product_url: String,
}

impl ProductRecord {
    /// Build a record from raw scraped fields. Callers have already verified
    /// that title, image and price text are non-empty; `index` is the
    /// candidate's position in document order (skipped candidates included).
    pub fn from_scraped(
        source: Source,
        index: usize,
        origin: &str,
        title: &str,
        image_url: &str,
        price_text: &str,
        href: &str,
    ) -> Self {
        let price = parse_price(price_text);
        ProductRecord {
            id: format!(
                "{}_{}_{}",
                source.tag(),
                index,
                chrono::Utc::now().timestamp_millis()
            ),
            title: title.to_string(),
            image_url: absolute_image_url(image_url),
            current_price: price,
            average_price: estimate_average(price),
            price_change_percent: PRICE_CHANGE_STUB,
            source,
            product_url: absolute_product_url(href, origin),
        }
    }
}

/// Integer value of the digits in free-form price text ("1,089,000원" -> 1089000).
/// Anything that doesn't parse comes back as 0.
pub fn parse_price(text: &str) -> i64 {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

/// Stub estimate: +10% over the current price, rounded. Not sourced from the
/// page; kept so the response shape carries all three price fields.
pub fn estimate_average(price: i64) -> i64 {
    (price as f64 * 1.1).round() as i64
}

/// Thumbnails usually come back protocol-relative (`//cdn...`).
fn absolute_image_url(raw: &str) -> String {
    if raw.starts_with("http") {
        raw.to_string()
    } else {
        format!("https:{raw}")
    }
}

/// Relative hrefs get the site origin prepended; an empty href collapses to
/// the bare origin.
fn absolute_product_url(href: &str, origin: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else {
        format!("{origin}{href}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_parsing_strips_everything_but_digits() {
        assert_eq!(parse_price("1,089,000원"), 1_089_000);
        assert_eq!(parse_price("₩ 12 345"), 12_345);
        assert_eq!(parse_price("품절"), 0);
        assert_eq!(parse_price(""), 0);
    }

    #[test]
    fn average_is_ten_percent_over_current() {
        assert_eq!(estimate_average(1000), 1100);
        assert_eq!(estimate_average(0), 0);
        // 5 * 1.1 = 5.5 rounds away from zero
        assert_eq!(estimate_average(5), 6);
    }

    #[test]
    fn urls_are_absolutized() {
        let r = ProductRecord::from_scraped(
            Source::Coupang,
            2,
            "https://www.coupang.com",
            "노트북",
            "//thumbnail1.coupangcdn.com/a.jpg",
            "1,000원",
            "/vp/products/1",
        );
        assert_eq!(r.image_url, "https://thumbnail1.coupangcdn.com/a.jpg");
        assert_eq!(r.product_url, "https://www.coupang.com/vp/products/1");
        assert!(r.id.starts_with("coupang_2_"));
        assert_eq!(r.current_price, 1000);
        assert_eq!(r.average_price, 1100);
        assert_eq!(r.price_change_percent, PRICE_CHANGE_STUB);
    }

    #[test]
    fn absolute_urls_pass_through_and_empty_href_yields_origin() {
        let r = ProductRecord::from_scraped(
            Source::Naver,
            0,
            "https://shopping.naver.com",
            "키보드",
            "https://cdn.example.com/kb.jpg",
            "89,000",
            "",
        );
        assert_eq!(r.image_url, "https://cdn.example.com/kb.jpg");
        assert_eq!(r.product_url, "https://shopping.naver.com");
        assert_eq!(r.source, Source::Naver);
    }

    #[test]
    fn record_serializes_camel_case() {
        let r = ProductRecord::from_scraped(
            Source::Naver,
            0,
            "https://shopping.naver.com",
            "마우스",
            "//cdn/a.jpg",
            "10,000",
            "/p/1",
        );
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["source"], "naver");
        assert!(v["imageUrl"].is_string());
        assert!(v["currentPrice"].is_number());
        assert!(v["averagePrice"].is_number());
        assert_eq!(v["priceChangePercent"], -10);
        assert!(v["productUrl"].is_string());
    }
}
