//! The resolution pipeline.

use crate::client::ResolverClient;
use crate::error::ResolveError;
use crate::types::ProductRecord;
use crate::{normalize, redirect, sites};

/// Resolve a product URL into a [`ProductRecord`].
///
/// Five stateless steps: validate input, expand short links, dispatch to a
/// site strategy by hostname, fetch the page, extract and normalize.
/// Unsupported or empty URLs fail before any product-page fetch.
///
/// # Errors
///
/// - [`ResolveError::InvalidInput`] — empty or blank URL.
/// - [`ResolveError::RedirectResolutionFailed`] — short-link body held no
///   product URL.
/// - [`ResolveError::UnsupportedSite`] — host matches no supported shop.
/// - [`ResolveError::Http`] / [`ResolveError::UnexpectedStatus`] — fetch
///   failure.
/// - [`ResolveError::Extraction`] / [`ResolveError::Parse`] — page did not
///   carry usable product data.
pub async fn resolve(client: &ResolverClient, url: &str) -> Result<ProductRecord, ResolveError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ResolveError::InvalidInput);
    }

    let product_url = if redirect::is_short_link(url) {
        let expanded = redirect::expand_short_link(client, url).await?;
        tracing::debug!(short_link = url, product_url = %expanded, "expanded short link");
        expanded
    } else {
        url.to_string()
    };

    let source = sites::detect_source(&product_url).ok_or_else(|| ResolveError::UnsupportedSite {
        url: product_url.clone(),
    })?;
    tracing::debug!(%source, url = %product_url, "dispatched product URL");

    let html = client.fetch_html(&product_url).await?;
    let raw = sites::extract(source, &html)?;

    Ok(normalize::into_record(source, raw, product_url))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> ResolverClient {
        ResolverClient::new(5, "linkpick-test/0.1").expect("failed to build test client")
    }

    #[tokio::test]
    async fn empty_url_is_invalid_input() {
        let err = resolve(&test_client(), "   ").await.unwrap_err();
        assert!(matches!(err, ResolveError::InvalidInput));
    }

    #[tokio::test]
    async fn unsupported_host_fails_without_fetching() {
        // No mock server is running; if dispatch fetched first this would
        // surface as an HTTP error instead of UnsupportedSite.
        let err = resolve(&test_client(), "https://smartstore.naver.com/item/1")
            .await
            .unwrap_err();
        assert!(
            matches!(err, ResolveError::UnsupportedSite { .. }),
            "expected UnsupportedSite, got: {err:?}"
        );
    }
}
