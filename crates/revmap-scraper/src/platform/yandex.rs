//! Yandex Maps rules.

use chrono::NaiveDateTime;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use revmap_core::CompanyIdentity;

use super::{absolutize, collect_hrefs, dedup, is_sub_page, Platform};
use crate::extract::{extract_card, CardMarkup};
use crate::types::CardRecord;

const BASE_URL: &str = "https://yandex.ru";

/// Primary selector: organization links in search-result cards.
const PRIMARY_LINK_RES: [&str; 2] = [
    r#"(?is)<a[^>]*class\s*=\s*["'](?:[^"']*\s)?card-title-view__title-link(?:\s[^"']*)?["'][^>]*href\s*=\s*["']([^"']+)["']"#,
    r#"(?is)<a[^>]*href\s*=\s*["']([^"']+)["'][^>]*class\s*=\s*["'](?:[^"']*\s)?card-title-view__title-link(?:\s[^"']*)?["']"#,
];

/// Broader fallback: any anchor that points into the org namespace.
const FALLBACK_LINK_RES: [&str; 1] =
    [r#"(?is)<a[^>]*href\s*=\s*["'](/maps/org/[^"']+)["']"#];

const MARKUP: CardMarkup = CardMarkup {
    rating: r#"(?is)<span[^>]*class\s*=\s*["'](?:[^"']*\s)?business-rating-badge-view__rating-text(?:\s[^"']*)?["'][^>]*>(.*?)</span>"#,
    review_count: r#"(?is)<div[^>]*class\s*=\s*["'](?:[^"']*\s)?business-header-rating-view__text(?:\s[^"']*)?["'][^>]*>(.*?)</div>"#,
    review_section: r#"(?is)<div[^>]*class\s*=\s*["'](?:[^"']*\s)?business-reviews-card-view__reviews-list(?:\s[^"']*)?["'][^>]*>"#,
    review_block: r#"(?is)<div[^>]*class\s*=\s*["'](?:[^"']*\s)?business-reviews-card-view__review(?:\s[^"']*)?["'][^>]*>"#,
    review_rating: r#"(?is)<meta[^>]*itemprop\s*=\s*["']ratingValue["'][^>]*content\s*=\s*["']([^"']*)["']"#,
    review_text: r#"(?is)<span[^>]*class\s*=\s*["'](?:[^"']*\s)?business-review-view__body-text(?:\s[^"']*)?["'][^>]*>(.*?)</span>"#,
    review_date: r#"(?is)<span[^>]*class\s*=\s*["'](?:[^"']*\s)?business-review-view__date(?:\s[^"']*)?["'][^>]*>(.*?)</span>"#,
    response_block: r#"(?is)<div[^>]*class\s*=\s*["'](?:[^"']*\s)?business-review-view__comment(?:\s[^"']*)?["'][^>]*>"#,
    response_text: r#"(?is)<div[^>]*class\s*=\s*["'](?:[^"']*\s)?business-review-view__comment-text(?:\s[^"']*)?["'][^>]*>(.*?)</div>"#,
    response_date: r#"(?is)<span[^>]*class\s*=\s*["'](?:[^"']*\s)?business-review-view__comment-date(?:\s[^"']*)?["'][^>]*>(.*?)</span>"#,
};

/// Yandex Maps organization listings.
pub struct YandexMaps {
    base_url: String,
}

impl YandexMaps {
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

impl Default for YandexMaps {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for YandexMaps {
    fn name(&self) -> &'static str {
        "yandex"
    }

    /// The query carries the website next to the name — Yandex search ranks
    /// the official organization first when the site is part of the query.
    fn search_url(&self, identity: &CompanyIdentity) -> String {
        let query = format!("{} {}", identity.name, identity.website);
        let query = utf8_percent_encode(&query, NON_ALPHANUMERIC).to_string();
        format!("{}/maps/search/?text={query}", self.base_url)
    }

    fn card_urls(&self, search_html: &str) -> Vec<String> {
        let mut hrefs = collect_hrefs(&PRIMARY_LINK_RES, search_html);
        if hrefs.is_empty() {
            hrefs = collect_hrefs(&FALLBACK_LINK_RES, search_html);
        }

        let urls = hrefs
            .into_iter()
            .filter_map(|href| absolutize(&href, &self.base_url))
            .filter(|url| url.contains("/maps/org/") && !is_sub_page(url))
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
    fn search_query_includes_the_website() {
        let identity = CompanyIdentity {
            name: "ВкусВилл".to_owned(),
            website: "vkusvill.ru".to_owned(),
        };
        let url = YandexMaps::new().search_url(&identity);
        assert!(url.starts_with("https://yandex.ru/maps/search/?text="));
        assert!(url.contains("vkusvill%2Eru"), "website in query: {url}");
    }

    #[test]
    fn primary_selector_finds_org_links() {
        let html = r#"
            <a class="card-title-view__title-link" href="/maps/org/vkusvill/1124715036/">ВкусВилл</a>
            <a class="card-title-view__title-link" href="/maps/org/vkusvill/1124715036/reviews/">Отзывы</a>
            <a class="card-title-view__title-link" href="/maps/moscow/">Москва</a>
        "#;
        let urls = YandexMaps::new().card_urls(html);
        assert_eq!(
            urls,
            vec!["https://yandex.ru/maps/org/vkusvill/1124715036/".to_owned()]
        );
    }

    #[test]
    fn fallback_scans_bare_org_anchors() {
        let html = r#"
            <a href="/maps/org/teremok/1018633471/">Теремок</a>
            <a href="/maps/org/teremok/1018633471/">Теремок</a>
        "#;
        let urls = YandexMaps::new().card_urls(html);
        assert_eq!(
            urls,
            vec!["https://yandex.ru/maps/org/teremok/1018633471/".to_owned()]
        );
    }

    #[test]
    fn parse_card_uses_the_yandex_markup() {
        let html = r#"
            <span class="business-rating-badge-view__rating-text">4,8</span>
            <div class="business-header-rating-view__text">92 отзыва</div>
            <div class="business-reviews-card-view__reviews-list">
                <div class="business-reviews-card-view__review">
                    <meta itemprop="ratingValue" content="5">
                    <span class="business-review-view__body-text">Любимый магазин</span>
                    <span class="business-review-view__date">сегодня 09:15</span>
                    <div class="business-review-view__comment">
                        <div class="business-review-view__comment-text">Рады видеть вас снова!</div>
                        <span class="business-review-view__comment-date">сегодня 10:15</span>
                    </div>
                </div>
            </div>
        "#;
        let card = YandexMaps::new()
            .parse_card(html, "https://yandex.ru/maps/org/vkusvill/1/", now())
            .expect("valid listing page");

        assert_eq!(card.rating, Some(4.8));
        assert_eq!(card.total_reviews, 92);
        assert_eq!(card.reviews.len(), 1);
        assert_eq!(card.answered_reviews, 1);
        assert_eq!(card.positive_reviews, 1);
        // Reply exactly one hour after the review.
        assert_eq!(card.avg_response_time_seconds, Some(3600.0));
    }

    #[test]
    fn parse_card_rejects_non_listing_page() {
        assert!(YandexMaps::new().parse_card("<html></html>", "u", now()).is_none());
    }
}
