//! Field normalization shared across extraction strategies.

use crate::types::{ProductRecord, RawProduct, Source};

/// Assemble the final record. Missing optional fields stay `None`; a
/// missing name becomes the empty string rather than an error.
pub(crate) fn into_record(source: Source, raw: RawProduct, product_url: String) -> ProductRecord {
    ProductRecord {
        source,
        brand: raw.brand,
        name: raw.name.unwrap_or_default(),
        price: raw.price,
        image: raw.image,
        product_url,
    }
}

/// Read a price from a JSON value that may be a number or a numeric string.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn value_to_price(value: &serde_json::Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f.trunc() as i64))
        .or_else(|| value.as_str().and_then(|s| s.trim().parse::<i64>().ok()))
}

/// Turn a possibly-relative image path into an absolute URL against the
/// site's CDN host.
pub(crate) fn absolutize_image(path: &str, cdn_host: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    if let Some(rest) = path.strip_prefix("//") {
        return format!("https://{rest}");
    }
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    format!("{cdn_host}/{trimmed}")
}

/// Strip a leading `"<brand> "` from the product name. Sites sometimes
/// duplicate the brand into the title; a non-prefix occurrence is left as-is.
pub(crate) fn strip_brand_prefix(name: &str, brand: Option<&str>) -> String {
    if let Some(brand) = brand {
        if !brand.is_empty() {
            if let Some(rest) = name.strip_prefix(brand) {
                if let Some(stripped) = rest.strip_prefix(' ') {
                    if !stripped.is_empty() {
                        return stripped.to_string();
                    }
                }
            }
        }
    }
    name.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn price_accepts_number_and_numeric_string() {
        assert_eq!(value_to_price(&json!(12900)), Some(12_900));
        assert_eq!(value_to_price(&json!(12900.0)), Some(12_900));
        assert_eq!(value_to_price(&json!("32900")), Some(32_900));
        assert_eq!(value_to_price(&json!(" 1000 ")), Some(1_000));
        assert_eq!(value_to_price(&json!("free")), None);
        assert_eq!(value_to_price(&json!(null)), None);
    }

    #[test]
    fn absolutize_leaves_absolute_urls_alone() {
        assert_eq!(
            absolutize_image("https://image.msscdn.net/a.jpg", "https://image.msscdn.net"),
            "https://image.msscdn.net/a.jpg"
        );
    }

    #[test]
    fn absolutize_upgrades_protocol_relative_urls() {
        assert_eq!(
            absolutize_image("//image.msscdn.net/a.jpg", "https://image.msscdn.net"),
            "https://image.msscdn.net/a.jpg"
        );
    }

    #[test]
    fn absolutize_prefixes_relative_paths() {
        assert_eq!(
            absolutize_image("/images/goods_img/1.jpg", "https://image.msscdn.net"),
            "https://image.msscdn.net/images/goods_img/1.jpg"
        );
        assert_eq!(
            absolutize_image("images/goods_img/1.jpg", "https://image.msscdn.net"),
            "https://image.msscdn.net/images/goods_img/1.jpg"
        );
    }

    #[test]
    fn brand_prefix_is_stripped() {
        assert_eq!(strip_brand_prefix("Acme Cool Shirt", Some("Acme")), "Cool Shirt");
    }

    #[test]
    fn brand_in_the_middle_is_kept() {
        assert_eq!(
            strip_brand_prefix("Cool Acme Shirt", Some("Acme")),
            "Cool Acme Shirt"
        );
    }

    #[test]
    fn brand_equal_to_name_is_kept() {
        // Stripping would leave an empty name, which helps nobody.
        assert_eq!(strip_brand_prefix("Acme", Some("Acme")), "Acme");
        assert_eq!(strip_brand_prefix("Acme ", Some("Acme")), "Acme ");
    }

    #[test]
    fn no_brand_means_no_stripping() {
        assert_eq!(strip_brand_prefix("Cool Shirt", None), "Cool Shirt");
        assert_eq!(strip_brand_prefix("Cool Shirt", Some("")), "Cool Shirt");
    }

    #[test]
    fn record_defaults_empty_name() {
        let record = into_record(
            Source::Musinsa,
            RawProduct::default(),
            "https://www.musinsa.com/products/1".to_string(),
        );
        assert_eq!(record.name, "");
        assert!(record.brand.is_none());
        assert!(record.price.is_none());
        assert!(record.image.is_none());
    }
}
