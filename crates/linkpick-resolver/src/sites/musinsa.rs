//! Musinsa: script-state extraction.
//!
//! The product page assigns the product state object to
//! `window.__MSS__.product.state` inside an inline script. The object is
//! carved out with the balanced-brace scanner and parsed strict-then-loose.

use crate::error::ResolveError;
use crate::normalize::{absolutize_image, value_to_price};
use crate::scan::{extract_balanced_object, parse_object_literal};
use crate::types::{RawProduct, Source};

const STATE_MARKER: &str = "window.__MSS__.product.state";
const CDN_HOST: &str = "https://image.msscdn.net";

pub(super) fn extract(html: &str) -> Result<RawProduct, ResolveError> {
    let marker_at = html
        .find(STATE_MARKER)
        .ok_or_else(|| extraction_error("product state marker not found"))?;
    let after_marker = &html[marker_at + STATE_MARKER.len()..];

    let brace_at = after_marker
        .find('{')
        .ok_or_else(|| extraction_error("no object literal after state marker"))?;
    let literal = extract_balanced_object(&after_marker[brace_at..])
        .ok_or_else(|| extraction_error("unbalanced object literal after state marker"))?;

    let state = parse_object_literal(literal).map_err(|e| ResolveError::Parse {
        context: "musinsa product state".to_string(),
        source: e,
    })?;

    let brand = state
        .get("brandName")
        .and_then(serde_json::Value::as_str)
        .filter(|s| !s.is_empty())
        .or_else(|| state.get("brand").and_then(serde_json::Value::as_str))
        .map(str::to_string);

    let name = state
        .get("goodsNm")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string);

    let price = state.get("goodsPrice").and_then(|p| {
        p.get("salePrice")
            .and_then(value_to_price)
            .or_else(|| p.get("normalPrice").and_then(value_to_price))
    });

    let image = state
        .get("thumbnailImageUrl")
        .and_then(serde_json::Value::as_str)
        .filter(|s| !s.is_empty())
        .or_else(|| {
            state
                .get("goodsImages")
                .and_then(serde_json::Value::as_array)
                .and_then(|imgs| imgs.first())
                .and_then(|img| img.get("imageUrl"))
                .and_then(serde_json::Value::as_str)
        })
        .map(|path| absolutize_image(path, CDN_HOST));

    Ok(RawProduct {
        brand,
        name,
        price,
        image,
    })
}

fn extraction_error(reason: &str) -> ResolveError {
    ResolveError::Extraction {
        site: Source::Musinsa,
        reason: reason.to_string(),
    }
}
