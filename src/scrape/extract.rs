// src/scrape/extract.rs
// CSS-selector extraction over a fetched listing page. Pure and synchronous;
// the DOM never crosses an await point.

use scraper::{ElementRef, Html, Selector};

use crate::scrape::sites::SiteProfile;

/// One candidate element's raw fields, before normalization. `index` is the
/// candidate's position among all candidates, including skipped ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawListing {
    pub index: usize,
    pub title: String,
    pub image_url: String,
    pub price_text: String,
    pub href: String,
}

/// Walk candidate elements in document order and pull out raw listings.
/// A candidate missing title, image or price text is silently skipped;
/// scanning stops once `limit` listings are accepted. Markup the parser
/// can't make sense of simply yields no candidates.
pub fn collect_listings(html: &str, profile: &SiteProfile, limit: usize) -> Vec<RawListing> {
    let doc = Html::parse_document(html);
    let mut out = Vec::new();

    for (index, el) in doc.select(&profile.candidates).enumerate() {
        if out.len() >= limit {
            break;
        }

        let Some(title) = first_text(el, &profile.title) else {
            continue;
        };
        let Some(image_url) = first_attr(el, &profile.image, profile.image_attrs) else {
            continue;
        };
        let Some(price_text) = first_text(el, &profile.price) else {
            continue;
        };
        let href = link_href(el, &profile.link);

        out.push(RawListing {
            index,
            title,
            image_url,
            price_text,
            href,
        });
    }

    out
}

/// Fallback chain: first selector whose match has non-empty trimmed text wins.
fn first_text(el: ElementRef<'_>, chain: &[Selector]) -> Option<String> {
    for sel in chain {
        if let Some(found) = el.select(sel).next() {
            let text = found.text().collect::<String>().trim().to_string();
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

/// First element matching `sel`, first non-empty attribute in `attrs`.
fn first_attr(el: ElementRef<'_>, sel: &Selector, attrs: &[&str]) -> Option<String> {
    let found = el.select(sel).next()?;
    for name in attrs {
        if let Some(v) = found.value().attr(name) {
            if !v.trim().is_empty() {
                return Some(v.to_string());
            }
        }
    }
    None
}

/// `href` of the first matching link, empty string when there is none.
fn link_href(el: ElementRef<'_>, sel: &Selector) -> String {
    el.select(sel)
        .next()
        .and_then(|a| a.value().attr("href"))
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrape::sites;

    const PAGE: &str = r#"
        <ul>
          <li class="search-product">
            <a href="/vp/products/1">
              <img src="//cdn/1.jpg">
              <div class="name">첫째 상품</div>
              <strong class="price-value">1,000</strong>
            </a>
          </li>
          <li class="search-product">
            <a href="/vp/products/2">
              <img data-img-src="//cdn/2.jpg">
              <div class="product-name">둘째 상품</div>
              <em class="price">2,000원</em>
            </a>
          </li>
          <li class="search-product">
            <a href="/vp/products/3">
              <img src="//cdn/3.jpg">
              <div class="name">가격 없는 상품</div>
            </a>
          </li>
          <li class="baby-product">
            <a href="/vp/products/4">
              <img src="//cdn/4.jpg">
              <div class="name">넷째 상품</div>
              <strong class="price-value">4,000</strong>
            </a>
          </li>
        </ul>
    "#;

    #[test]
    fn walks_candidates_and_skips_incomplete_ones() {
        let got = collect_listings(PAGE, sites::coupang(), 10);
        assert_eq!(got.len(), 3);
        assert_eq!(got[0].title, "첫째 상품");
        assert_eq!(got[0].href, "/vp/products/1");
        // fallback selectors: title from .product-name, image from data-img-src
        assert_eq!(got[1].title, "둘째 상품");
        assert_eq!(got[1].image_url, "//cdn/2.jpg");
        assert_eq!(got[1].price_text, "2,000원");
        // the priceless candidate consumed index 2
        assert_eq!(got[2].index, 3);
        assert_eq!(got[2].title, "넷째 상품");
    }

    #[test]
    fn limit_stops_the_scan() {
        let got = collect_listings(PAGE, sites::coupang(), 2);
        assert_eq!(got.len(), 2);
        assert_eq!(got[1].title, "둘째 상품");

        assert!(collect_listings(PAGE, sites::coupang(), 0).is_empty());
    }

    #[test]
    fn empty_or_alien_markup_yields_nothing() {
        assert!(collect_listings("", sites::coupang(), 10).is_empty());
        assert!(collect_listings("<p>안녕하세요</p>", sites::coupang(), 10).is_empty());
        // coupang markup contains no naver candidates
        assert!(collect_listings(PAGE, sites::naver(), 10).is_empty());
    }

    #[test]
    fn naver_title_chain_reaches_class_substring_match() {
        let page = r#"
          <div class="basicList_item">
            <a class="thumb_title_link" href="/catalog/9">
              <img src="https://cdn/9.jpg">
            </a>
            <span class="price_num">9,000원</span>
          </div>
        "#;
        let got = collect_listings(page, sites::naver(), 10);
        assert_eq!(got.len(), 0); // the anchor has no text, so no title

        let page = page.replace(
            r#"<a class="thumb_title_link" href="/catalog/9">"#,
            r#"<a class="thumb_title_link" href="/catalog/9">검색 결과 상품"#,
        );
        let got = collect_listings(&page, sites::naver(), 10);
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].title, "검색 결과 상품");
        assert_eq!(got[0].price_text, "9,000원");
    }
}
