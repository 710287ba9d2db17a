//! Registrable-domain extraction and matching.
//!
//! Used to confirm that a discovered listing belongs to the target company.
//! The matching unit is a deliberately simplified "last two labels" domain —
//! not public-suffix aware, so `sub.example.co.uk` reduces to `co.uk`.

/// Extracts the registrable domain of `url`: the host, lowercased, with a
/// leading `www.` stripped and only the last two labels kept for longer
/// hosts. Bare hostnames without a scheme ("vkusvill.ru") are accepted.
/// Unparseable or empty input yields an empty string.
#[must_use]
pub fn registrable_domain(url: &str) -> String {
    let host = match reqwest::Url::parse(url) {
        Ok(parsed) => parsed.host_str().map(str::to_owned).or_else(|| bare_host(url)),
        Err(_) => bare_host(url),
    };
    let Some(host) = host else {
        return String::new();
    };

    let host = host.to_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);

    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() > 2 {
        labels[labels.len() - 2..].join(".")
    } else {
        host.to_owned()
    }
}

/// Returns `true` iff one registrable domain is a suffix of the other —
/// covers subdomain variants in both directions. Empty domains never match.
#[must_use]
pub fn domains_match(card_url: &str, company_website: &str) -> bool {
    let card = registrable_domain(card_url);
    let company = registrable_domain(company_website);
    if card.is_empty() || company.is_empty() {
        return false;
    }
    card.ends_with(&company) || company.ends_with(&card)
}

/// Host extraction for scheme-less input: everything before the first `/`
/// or `:`, provided it still looks like a hostname.
fn bare_host(url: &str) -> Option<String> {
    let without_path = url.trim().split('/').next().unwrap_or("");
    let candidate = without_path.split(':').next().unwrap_or("").to_lowercase();
    if candidate.is_empty() || candidate.contains(char::is_whitespace) || !candidate.contains('.') {
        return None;
    }
    Some(candidate)
}
