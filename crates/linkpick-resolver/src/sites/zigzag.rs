//! Zigzag: JSON-LD structured-data extraction.
//!
//! The product detail container carries a fixed pair of CSS classes and
//! wraps one or more `application/ld+json` blocks; the first block at or
//! after the container is the schema.org Product.

use regex::Regex;

use crate::error::ResolveError;
use crate::normalize::{strip_brand_prefix, value_to_price};
use crate::types::{RawProduct, Source};

/// Both classes must appear on the container element.
const CONTAINER_CLASSES: [&str; 2] = ["pdp__root", "product-detail"];

pub(super) fn extract(html: &str) -> Result<RawProduct, ResolveError> {
    let container_at = find_container(html)
        .ok_or_else(|| extraction_error("product detail container not found"))?;

    let ldjson_re = Regex::new(
        r#"(?is)<script[^>]+type\s*=\s*["']application/ld\+json["'][^>]*>(.*?)</script>"#,
    )
    .expect("valid regex");

    let json_text = ldjson_re
        .captures(&html[container_at..])
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| extraction_error("no ld+json block inside container"))?;

    let value: serde_json::Value =
        serde_json::from_str(json_text.trim()).map_err(|e| ResolveError::Parse {
            context: "zigzag ld+json block".to_string(),
            source: e,
        })?;

    // Some pages wrap the Product in a one-element array.
    let item = match &value {
        serde_json::Value::Array(arr) => arr
            .first()
            .ok_or_else(|| extraction_error("empty ld+json array"))?,
        _ => &value,
    };

    let brand = item
        .get("brand")
        .and_then(|b| {
            b.get("name")
                .and_then(serde_json::Value::as_str)
                .or_else(|| b.as_str())
        })
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let name = item
        .get("name")
        .and_then(serde_json::Value::as_str)
        .map(|n| strip_brand_prefix(n, brand.as_deref()));

    let price = item.get("offers").and_then(|offers| {
        let offer = match offers {
            serde_json::Value::Array(arr) => arr.first()?,
            other => other,
        };
        offer.get("price").and_then(value_to_price)
    });

    let image = item
        .get("image")
        .and_then(|img| match img {
            serde_json::Value::Array(arr) => arr.first().and_then(serde_json::Value::as_str),
            other => other.as_str(),
        })
        .map(str::to_string);

    Ok(RawProduct {
        brand,
        name,
        price,
        image,
    })
}

/// Byte offset of the element whose class attribute carries both container
/// classes, if any.
fn find_container(html: &str) -> Option<usize> {
    let class_re = Regex::new(r#"(?is)<[a-z][a-z0-9]*\b[^>]*class\s*=\s*["']([^"']*)["']"#)
        .expect("valid regex");

    for cap in class_re.captures_iter(html) {
        let classes = cap.get(1)?.as_str();
        if CONTAINER_CLASSES.iter().all(|c| {
            classes
                .split_ascii_whitespace()
                .any(|candidate| candidate == *c)
        }) {
            return Some(cap.get(0)?.start());
        }
    }
    None
}

fn extraction_error(reason: &str) -> ResolveError {
    ResolveError::Extraction {
        site: Source::Zigzag,
        reason: reason.to_string(),
    }
}
