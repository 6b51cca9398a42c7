//! Site dispatch and per-site extraction strategies.
//!
//! Dispatch is an ordered list of `(host substring, Source)` pairs; the
//! first match selects the strategy. Adding a shop means adding a pair and
//! a strategy module, not touching branching logic.

mod ably;
mod musinsa;
mod zigzag;

use crate::error::ResolveError;
use crate::types::{RawProduct, Source};

/// Host substrings checked in order against the product URL.
const SITES: &[(&str, Source)] = &[
    ("musinsa.com", Source::Musinsa),
    ("a-bly.com", Source::Ably),
    ("zigzag.kr", Source::Zigzag),
];

/// Select the extraction source for a product URL, if its host belongs to a
/// supported shop.
#[must_use]
pub fn detect_source(url: &str) -> Option<Source> {
    let host = url_host(url)?;
    SITES
        .iter()
        .find(|(marker, _)| host.contains(marker))
        .map(|&(_, source)| source)
}

/// Run the site's extraction strategy over the raw page HTML.
pub(crate) fn extract(source: Source, html: &str) -> Result<RawProduct, ResolveError> {
    match source {
        Source::Musinsa => musinsa::extract(html),
        Source::Ably => ably::extract(html),
        Source::Zigzag => zigzag::extract(html),
    }
}

/// The host portion of a URL, without scheme, path, query, or fragment.
pub(crate) fn url_host(url: &str) -> Option<&str> {
    let rest = match url.find("://") {
        Some(idx) => &url[idx + 3..],
        None => url,
    };
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let host = &rest[..end];
    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}
