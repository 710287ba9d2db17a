//! 2GIS directory rules.

use chrono::NaiveDateTime;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use revmap_core::CompanyIdentity;

use super::{absolutize, collect_hrefs, dedup, is_sub_page, Platform};
use crate::extract::{extract_card, CardMarkup};
use crate::types::CardRecord;

const BASE_URL: &str = "https://2gis.ru";

/// Primary selector: listing links inside the search-results list.
const PRIMARY_LINK_RES: [&str; 2] = [
    r#"(?is)<a[^>]*class\s*=\s*["'](?:[^"']*\s)?directory-list-item-link(?:\s[^"']*)?["'][^>]*href\s*=\s*["']([^"']+)["']"#,
    r#"(?is)<a[^>]*href\s*=\s*["']([^"']+)["'][^>]*class\s*=\s*["'](?:[^"']*\s)?directory-list-item-link(?:\s[^"']*)?["']"#,
];

/// Broader fallback when the result list renders without item links.
const FALLBACK_LINK_RES: [&str; 2] = [
    r#"(?is)<a[^>]*data-testid\s*=\s*["']card-link["'][^>]*href\s*=\s*["']([^"']+)["']"#,
    r#"(?is)<a[^>]*href\s*=\s*["']([^"']+)["'][^>]*data-testid\s*=\s*["']card-link["']"#,
];

const MARKUP: CardMarkup = CardMarkup {
    rating: r#"(?is)<span[^>]*data-testid\s*=\s*["']rating-value["'][^>]*>(.*?)</span>"#,
    review_count: r#"(?is)<a[^>]*data-testid\s*=\s*["']reviews-link["'][^>]*>(.*?)</a>"#,
    review_section: r#"(?is)<section[^>]*data-id\s*=\s*["']reviews["'][^>]*>"#,
    review_block: r#"(?is)<div[^>]*class\s*=\s*["'](?:[^"']*\s)?review-item(?:\s[^"']*)?["'][^>]*>"#,
    review_rating: r#"(?is)<span[^>]*class\s*=\s*["'](?:[^"']*\s)?star-rating(?:\s[^"']*)?["'][^>]*(?:aria-label|data-rating)\s*=\s*["']([^"']*)["']"#,
    review_text: r#"(?is)<div[^>]*class\s*=\s*["'](?:[^"']*\s)?review-text(?:\s[^"']*)?["'][^>]*>(.*?)</div>"#,
    review_date: r#"(?is)<span[^>]*class\s*=\s*["'](?:[^"']*\s)?review-date(?:\s[^"']*)?["'][^>]*>(.*?)</span>"#,
    response_block: r#"(?is)<div[^>]*class\s*=\s*["'](?:[^"']*\s)?response-block(?:\s[^"']*)?["'][^>]*>"#,
    response_text: r#"(?is)<div[^>]*class\s*=\s*["'](?:[^"']*\s)?response-text(?:\s[^"']*)?["'][^>]*>(.*?)</div>"#,
    response_date: r#"(?is)<span[^>]*class\s*=\s*["'](?:[^"']*\s)?response-date(?:\s[^"']*)?["'][^>]*>(.*?)</span>"#,
};

/// The 2GIS business directory.
pub struct TwoGis {
    base_url: String,
}

impl TwoGis {
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    /// Overrides the platform origin; tests point this at a local server.
    #[must_use]
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }
}

impl Default for TwoGis {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for TwoGis {
    fn name(&self) -> &'static str {
        "2gis"
    }

    fn search_url(&self, identity: &CompanyIdentity) -> String {
        let query = utf8_percent_encode(&identity.name, NON_ALPHANUMERIC).to_string();
        format!("{}/search/{query}", self.base_url)
    }

    fn card_urls(&self, search_html: &str) -> Vec<String> {
        let mut hrefs = collect_hrefs(&PRIMARY_LINK_RES, search_html);
        if hrefs.is_empty() {
            hrefs = collect_hrefs(&FALLBACK_LINK_RES, search_html);
        }

        let urls = hrefs
            .into_iter()
            .filter_map(|href| absolutize(&href, &self.base_url))
            .filter(|url| url.contains("/firms/") && !is_sub_page(url))
            .collect();
        dedup(urls)
    }

    fn parse_card(
        &self,
        card_html: &str,
        card_url: &str,
        now: NaiveDateTime,
    ) -> Option<CardRecord> {
        extract_card(&MARKUP, card_html, card_url, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn search_url_percent_encodes_the_name() {
        let platform = TwoGis::new();
        let identity = CompanyIdentity {
            name: "ВкусВилл Москва".to_owned(),
            website: "vkusvill.ru".to_owned(),
        };
        let url = platform.search_url(&identity);
        assert!(url.starts_with("https://2gis.ru/search/"));
        assert!(!url.contains(' '), "spaces must be encoded: {url}");
    }

    #[test]
    fn primary_selector_finds_listing_links() {
        let html = r#"
            <div data-id="results_list">
                <div class="result-item">
                    <a class="directory-list-item-link" href="/firms/70000001">ВкусВилл</a>
                </div>
                <div class="result-item">
                    <a class="directory-list-item-link" href="https://2gis.ru/firms/70000002">ВкусВилл на Тверской</a>
                </div>
                <a class="directory-list-item-link" href="/firms/70000001/tab/reviews">Отзывы</a>
                <a class="directory-list-item-link" href="/search/page/2">Дальше</a>
            </div>
        "#;
        let urls = TwoGis::new().card_urls(html);
        assert_eq!(
            urls,
            vec![
                "https://2gis.ru/firms/70000001".to_owned(),
                "https://2gis.ru/firms/70000002".to_owned(),
            ]
        );
    }

    #[test]
    fn fallback_selector_kicks_in_when_primary_is_empty() {
        let html = r#"
            <a data-testid="card-link" href="/firms/70000003">Карточка</a>
        "#;
        let urls = TwoGis::new().card_urls(html);
        assert_eq!(urls, vec!["https://2gis.ru/firms/70000003".to_owned()]);
    }

    #[test]
    fn duplicate_links_collapse() {
        let html = r#"
            <a class="directory-list-item-link" href="/firms/70000001">a</a>
            <a class="directory-list-item-link" href="/firms/70000001">b</a>
        "#;
        let urls = TwoGis::new().card_urls(html);
        assert_eq!(urls.len(), 1);
    }

    #[test]
    fn no_links_means_no_candidates() {
        assert!(TwoGis::new().card_urls("<html><body>пусто</body></html>").is_empty());
    }

    #[test]
    fn parse_card_uses_the_gis_markup() {
        let html = r#"
            <span data-testid="rating-value">4,6</span>
            <a data-testid="reviews-link">324 отзыва</a>
            <section data-id="reviews">
                <div class="review-item">
                    <span class="star-rating" aria-label="Оценка 5 из 5"></span>
                    <div class="review-text">Отличный магазин</div>
                    <span class="review-date">15.03.2024</span>
                    <div class="response-block">
                        <div class="response-text">Спасибо!</div>
                        <span class="response-date">17.03.2024</span>
                    </div>
                </div>
                <div class="review-item">
                    <span class="star-rating" data-rating="2"></span>
                    <div class="review-text">Долгая доставка</div>
                    <span class="review-date">2 дня назад</span>
                </div>
            </section>
        "#;
        let card = TwoGis::new()
            .parse_card(html, "https://2gis.ru/firms/70000001", now())
            .expect("valid listing page");

        assert_eq!(card.rating, Some(4.6));
        assert_eq!(card.total_reviews, 324);
        assert_eq!(card.reviews.len(), 2);
        assert_eq!(card.answered_reviews, 1);
        assert_eq!(card.unanswered_reviews, 1);
        assert_eq!(card.positive_reviews, 1);
        assert_eq!(card.negative_reviews, 1);
        assert_eq!(card.avg_response_time_seconds, Some(172_800.0));
    }

    #[test]
    fn parse_card_rejects_non_listing_page() {
        let html = "<html><body>Ничего не найдено</body></html>";
        assert!(TwoGis::new().parse_card(html, "u", now()).is_none());
    }
}
