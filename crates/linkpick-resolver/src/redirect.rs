//! Short-link expansion.
//!
//! The shops' share links go through app-link redirectors that embed the
//! destination product URL in the returned page body instead of answering
//! with a 3xx, so expansion means fetching the short link and scanning the
//! body for the first URL on a supported shop domain.

use regex::Regex;

use crate::client::ResolverClient;
use crate::error::ResolveError;
use crate::sites;

/// Hosts that serve redirector pages rather than product pages.
const SHORT_LINK_HOSTS: &[&str] = &["onelink.me", "s.zigzag.kr"];

/// Whether the URL's host is a known short-link redirector.
pub(crate) fn is_short_link(url: &str) -> bool {
    let Some(host) = sites::url_host(url) else {
        return false;
    };
    SHORT_LINK_HOSTS.iter().any(|h| host.contains(h))
}

/// Fetch a short link and substitute the canonical product URL found in its
/// body.
///
/// # Errors
///
/// - [`ResolveError::RedirectResolutionFailed`] — body held no product URL.
/// - Fetch errors from [`ResolverClient::fetch_html`].
pub(crate) async fn expand_short_link(
    client: &ResolverClient,
    url: &str,
) -> Result<String, ResolveError> {
    let body = client.fetch_html(url).await?;
    find_canonical_url(&body).ok_or_else(|| ResolveError::RedirectResolutionFailed {
        url: url.to_owned(),
    })
}

/// Find the first URL on a supported shop domain embedded in a page body.
pub(crate) fn find_canonical_url(body: &str) -> Option<String> {
    let url_re = Regex::new(r#"https?://[^\s"'<>\\]+"#).expect("valid regex");

    for m in url_re.find_iter(body) {
        let candidate = m.as_str().trim_end_matches([')', ',', ';', '.']);
        // A short link in the body is not a destination.
        if !is_short_link(candidate) && sites::detect_source(candidate).is_some() {
            return Some(candidate.to_string());
        }
    }
    None
}
