//! HTTP client for product-page fetches.

use std::time::Duration;

use reqwest::Client;

use crate::error::ResolveError;

/// HTTP client used for every fetch in the resolution pipeline.
///
/// One GET per page, no retries: a network failure is terminal for the
/// request. Connections are reused via reqwest's keep-alive pool, so the
/// client should be built once and cloned across requests.
#[derive(Debug, Clone)]
pub struct ResolverClient {
    client: Client,
}

impl ResolverClient {
    /// Creates a `ResolverClient` with the configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ResolveError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches the HTML body of a URL with a single plain GET.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::UnexpectedStatus`] — any non-2xx status.
    /// - [`ResolveError::Http`] — network or TLS failure, or timeout.
    pub async fn fetch_html(&self, url: &str) -> Result<String, ResolveError> {
        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "ko-KR,ko;q=0.9,en;q=0.8")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response.text().await?)
    }
}
