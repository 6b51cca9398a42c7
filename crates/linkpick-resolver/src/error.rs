use thiserror::Error;

use crate::types::Source;

/// Errors that can occur while resolving a product link.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("product URL is missing or empty")]
    InvalidInput,

    #[error("short link {url} did not contain a product URL")]
    RedirectResolutionFailed { url: String },

    #[error("unsupported shop URL: {url}")]
    UnsupportedSite { url: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("no product data found on {site} page: {reason}")]
    Extraction { site: Source, reason: String },

    #[error("JSON parse error for {context}: {source}")]
    Parse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ResolveError {
    /// Whether the failure is the caller's fault (bad or unsupported URL)
    /// rather than an internal fetch/parse failure.
    #[must_use]
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            ResolveError::InvalidInput | ResolveError::UnsupportedSite { .. }
        )
    }
}
