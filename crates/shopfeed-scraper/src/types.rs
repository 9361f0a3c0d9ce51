//! Storefront response types for the public
//! `collections/<handle>/products.json` endpoint.
//!
//! ## Tolerance
//!
//! Records are read as loosely as possible. Every field carries
//! `#[serde(default)]` so a sparse product (no variants, no images, no
//! handle) still deserializes and can be normalized with defaults.
//!
//! ### `available` on variants
//! Boolean; `true` when the variant is in stock. Treated as `false` when
//! absent, so a variant without stock data never advertises itself as
//! purchasable.
//!
//! ### `currency` on variants
//! The public listing normally omits it. Some storefront proxies add an ISO
//! 4217 code; it is passed through when present.

use serde::Deserialize;

/// Top-level response from `GET /collections/<handle>/products.json`.
#[derive(Debug, Deserialize)]
pub struct ShopifyProductsResponse {
    pub products: Vec<ShopifyProduct>,
}

/// A single product from the storefront listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShopifyProduct {
    /// Numeric product ID (e.g., `6789012345678`).
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(default)]
    pub title: Option<String>,

    /// URL slug for the product page (e.g., `"classic-blue-tee"`).
    #[serde(default)]
    pub handle: Option<String>,

    /// Raw HTML product description. May be `null` or absent.
    #[serde(default)]
    pub body_html: Option<String>,

    /// Free-text product category. May be an empty string.
    #[serde(default)]
    pub product_type: Option<String>,

    #[serde(default)]
    pub images: Vec<ShopifyImage>,

    #[serde(default)]
    pub variants: Vec<ShopifyVariant>,
}

/// A purchasable variant of a [`ShopifyProduct`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShopifyVariant {
    /// Decimal price string (e.g., `"30.00"`).
    #[serde(default)]
    pub price: Option<String>,

    #[serde(default)]
    pub currency: Option<String>,

    #[serde(default)]
    pub available: bool,
}

/// A product image.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShopifyImage {
    /// Canonical CDN URL.
    #[serde(default)]
    pub src: String,
}
