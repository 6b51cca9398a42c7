//! Ably: hydration-payload extraction.
//!
//! The product page ships its data in the Next.js `__NEXT_DATA__` script.
//! The product object sits in the dehydrated react-query cache, keyed
//! `goods` — or `sale_goods` on pages still serving the older schema.

use regex::Regex;

use crate::error::ResolveError;
use crate::normalize::value_to_price;
use crate::types::{RawProduct, Source};

pub(super) fn extract(html: &str) -> Result<RawProduct, ResolveError> {
    let script_re = Regex::new(
        r#"(?is)<script[^>]+id\s*=\s*["']__NEXT_DATA__["'][^>]*>(.*?)</script>"#,
    )
    .expect("valid regex");

    let json_text = script_re
        .captures(html)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| extraction_error("hydration payload not found"))?;

    let payload: serde_json::Value =
        serde_json::from_str(json_text).map_err(|e| ResolveError::Parse {
            context: "ably hydration payload".to_string(),
            source: e,
        })?;

    let queries = payload
        .pointer("/props/pageProps/dehydratedState/queries")
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| extraction_error("no query cache in hydration payload"))?;

    for query in queries {
        let Some(data) = query.pointer("/state/data") else {
            continue;
        };
        if let Some(goods) = find_goods(data) {
            return Ok(map_goods(goods));
        }
    }

    Err(extraction_error("no goods entry in query cache"))
}

/// Look up the product object under the current key, then the legacy one.
fn find_goods(data: &serde_json::Value) -> Option<&serde_json::Value> {
    if let Some(goods) = data.get("goods").filter(|g| g.is_object()) {
        return Some(goods);
    }
    if let Some(goods) = data.get("sale_goods").filter(|g| g.is_object()) {
        // Legacy schema; worth noticing if the upstream flips back.
        tracing::warn!("ably payload matched legacy sale_goods key");
        return Some(goods);
    }
    None
}

fn map_goods(goods: &serde_json::Value) -> RawProduct {
    let brand = goods
        .get("market_name")
        .and_then(serde_json::Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let name = goods
        .get("name")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string);

    let price = goods.get("price").and_then(value_to_price);

    let image = goods
        .get("cover_images")
        .and_then(serde_json::Value::as_array)
        .and_then(|imgs| imgs.first())
        .and_then(serde_json::Value::as_str)
        .map(str::to_string);

    RawProduct {
        brand,
        name,
        price,
        image,
    }
}

fn extraction_error(reason: &str) -> ResolveError {
    ResolveError::Extraction {
        site: Source::Ably,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(queries: &str) -> String {
        format!(
            r#"<html><body><div id="__next"></div>
            <script id="__NEXT_DATA__" type="application/json">
            {{"props":{{"pageProps":{{"dehydratedState":{{"queries":{queries}}}}}}},"page":"/goods/[sno]"}}
            </script></body></html>"#
        )
    }

    #[test]
    fn extracts_goods_under_primary_key() {
        let html = page(
            r#"[{"queryKey":["goods",7654321],"state":{"data":{"goods":{"sno":7654321,"name":"Pleated Long Skirt","market_name":"from ably","price":28900,"cover_images":["https://cdn.a-bly.com/goods/7654321_cover.jpg"]}}}}]"#,
        );
        let raw = extract(&html).expect("extraction should succeed");
        assert_eq!(raw.brand.as_deref(), Some("from ably"));
        assert_eq!(raw.name.as_deref(), Some("Pleated Long Skirt"));
        assert_eq!(raw.price, Some(28_900));
        assert_eq!(
            raw.image.as_deref(),
            Some("https://cdn.a-bly.com/goods/7654321_cover.jpg")
        );
    }

    #[test]
    fn falls_back_to_legacy_sale_goods_key() {
        let html = page(
            r#"[{"queryKey":["other"],"state":{"data":{"reviews":[]}}},{"queryKey":["goods",1],"state":{"data":{"sale_goods":{"name":"Knit Cardigan","market_name":"soim","price":19800,"cover_images":[]}}}}]"#,
        );
        let raw = extract(&html).expect("legacy key should still match");
        assert_eq!(raw.name.as_deref(), Some("Knit Cardigan"));
        assert_eq!(raw.brand.as_deref(), Some("soim"));
        assert_eq!(raw.price, Some(19_800));
        assert!(raw.image.is_none(), "empty cover_images maps to None");
    }

    #[test]
    fn skips_queries_without_product_data() {
        let html = page(
            r#"[{"queryKey":["banner"],"state":{"data":{"banners":[1,2]}}},{"queryKey":["goods"],"state":{"data":{"goods":{"name":"Found It","price":1000}}}}]"#,
        );
        let raw = extract(&html).expect("later query should be found");
        assert_eq!(raw.name.as_deref(), Some("Found It"));
    }

    #[test]
    fn no_goods_in_any_query_fails_extraction() {
        let html = page(r#"[{"queryKey":["banner"],"state":{"data":{"banners":[]}}}]"#);
        let err = extract(&html).unwrap_err();
        assert!(
            matches!(err, ResolveError::Extraction { site: Source::Ably, .. }),
            "expected Extraction error, got: {err:?}"
        );
    }

    #[test]
    fn missing_script_fails_extraction() {
        let err = extract("<html><body>no payload</body></html>").unwrap_err();
        assert!(matches!(err, ResolveError::Extraction { .. }));
    }

    #[test]
    fn invalid_payload_json_is_a_parse_error() {
        let html = r#"<script id="__NEXT_DATA__" type="application/json">{broken</script>"#;
        let err = extract(html).unwrap_err();
        assert!(
            matches!(err, ResolveError::Parse { .. }),
            "expected Parse error, got: {err:?}"
        );
    }
}
