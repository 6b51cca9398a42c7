//! Domain types for product-link resolution.

use serde::{Deserialize, Serialize};

/// Supported shopping sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Musinsa,
    Ably,
    Zigzag,
}

impl Source {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Source::Musinsa => "musinsa",
            Source::Ably => "ably",
            Source::Zigzag => "zigzag",
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized product record, built per request and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    pub source: Source,
    pub brand: Option<String>,
    /// Product display name; empty when the page carried none.
    pub name: String,
    /// Price in KRW.
    pub price: Option<i64>,
    /// Absolute image URL.
    pub image: Option<String>,
    /// The final direct product-page URL, after short-link expansion.
    #[serde(rename = "productUrl")]
    pub product_url: String,
}

/// Fields pulled from a page by an extraction strategy, before
/// normalization into a [`ProductRecord`].
#[derive(Debug, Clone, Default)]
pub(crate) struct RawProduct {
    pub brand: Option<String>,
    pub name: Option<String>,
    pub price: Option<i64>,
    pub image: Option<String>,
}
