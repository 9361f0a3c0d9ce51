use serde::Deserialize;
use shopfeed_core::FeedSchema;

use super::FeedError;

pub const DEFAULT_COLLECTION: &str = "all";
pub const DEFAULT_BRAND: &str = "Unknown";

/// Raw query parameters shared by every feed endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct FeedParams {
    pub shop: Option<String>,
    pub brand: Option<String>,
    pub collection: Option<String>,
}

/// A validated feed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRequest {
    /// Absolute storefront base URL as supplied, minus surrounding whitespace.
    pub shop_url: String,
    pub collection: String,
    pub brand: String,
    pub schema: FeedSchema,
}

impl FeedRequest {
    /// Validates query parameters. Empty `brand`/`collection` values fall back
    /// to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::InvalidRequest`] when `shop` is missing, blank, or
    /// not an absolute `http(s)` URL.
    pub fn from_params(params: FeedParams, schema: FeedSchema) -> Result<Self, FeedError> {
        let shop_url = params
            .shop
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| FeedError::InvalidRequest("Missing ?shop=".to_string()))?
            .to_owned();

        let is_http_url = reqwest::Url::parse(&shop_url)
            .is_ok_and(|url| matches!(url.scheme(), "http" | "https") && url.has_host());
        if !is_http_url {
            return Err(FeedError::InvalidRequest(
                "Invalid ?shop=: expected an absolute http(s) URL".to_string(),
            ));
        }

        let non_empty = |value: Option<String>, default: &str| {
            value
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Ok(Self {
            shop_url,
            collection: non_empty(params.collection, DEFAULT_COLLECTION),
            brand: non_empty(params.brand, DEFAULT_BRAND),
            schema,
        })
    }
}
