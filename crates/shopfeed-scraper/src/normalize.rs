//! Normalization from raw storefront types to [`shopfeed_core::NormalizedProduct`].
//!
//! Normalization is total: any record the listing endpoint returns, however
//! sparse, yields a fully populated product.

use std::sync::LazyLock;

use regex::Regex;
use shopfeed_core::{Availability, NormalizedProduct};

use crate::types::ShopifyProduct;

/// Price advertised for a product without a usable variant price.
pub const DEFAULT_PRICE: &str = "0.00";

/// Matches `<...>` runs, including an unterminated trailing `<...`.
static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>?").expect("valid regex"));

/// Normalizes a raw [`ShopifyProduct`] into a [`NormalizedProduct`].
///
/// `shop_url` is joined verbatim with `/products/<handle>`; `brand` always
/// replaces whatever vendor the storefront reports.
#[must_use]
pub fn normalize_product(
    product: &ShopifyProduct,
    shop_url: &str,
    brand: &str,
) -> NormalizedProduct {
    // No variants behaves like a single unpriced, unavailable variant.
    let (price, currency, available) = product.variants.first().map_or(
        (DEFAULT_PRICE, "", false),
        |variant| {
            (
                variant
                    .price
                    .as_deref()
                    .filter(|p| !p.is_empty())
                    .unwrap_or(DEFAULT_PRICE),
                variant.currency.as_deref().unwrap_or_default(),
                variant.available,
            )
        },
    );

    let image_link = product
        .images
        .first()
        .map(|image| image.src.clone())
        .unwrap_or_default();

    let description =
        escape_markup(&strip_markup(product.body_html.as_deref().unwrap_or_default()));

    NormalizedProduct {
        id: product.id.map(|id| id.to_string()).unwrap_or_default(),
        title: product.title.clone().unwrap_or_default(),
        description,
        link: format!(
            "{shop_url}/products/{}",
            product.handle.as_deref().unwrap_or_default()
        ),
        image_link,
        price: price.to_string(),
        currency: currency.to_string(),
        availability: Availability::from_available(available),
        brand: brand.to_string(),
        category: product.product_type.clone().unwrap_or_default(),
    }
}

/// Removes every `<...>` run from `html`, leaving the text between tags.
#[must_use]
pub fn strip_markup(html: &str) -> String {
    MARKUP_TAG.replace_all(html, "").into_owned()
}

/// Entity-escapes `&`, `<`, `>`, `"` and `'`.
///
/// `&` goes first so the entities introduced for the other characters are
/// not escaped a second time.
#[must_use]
pub fn escape_markup(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
