//! Proxy-list handling for the HTTP fetcher.

use std::path::Path;

use rand::seq::IndexedRandom;

/// Reads `host:port` proxy entries from `path`, one per line, skipping blank
/// lines. A missing or unreadable file is not an error — the pipeline simply
/// runs without a proxy.
#[must_use]
pub fn load_proxies(path: &Path) -> Vec<String> {
    let Ok(contents) = std::fs::read_to_string(path) else {
        tracing::debug!(path = %path.display(), "proxy file not found — continuing without proxies");
        return Vec::new();
    };
    parse_proxies(&contents)
}

/// Picks one proxy with the caller's RNG; `None` when the list is empty.
/// The RNG is injected so selection is deterministic under test.
#[must_use]
pub fn choose_proxy<'a, R: rand::Rng + ?Sized>(
    proxies: &'a [String],
    rng: &mut R,
) -> Option<&'a str> {
    proxies.choose(rng).map(String::as_str)
}

fn parse_proxies(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}
