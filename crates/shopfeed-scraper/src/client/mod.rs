//! HTTP client for the storefront's public collection listing endpoint.

mod pager;

use std::time::Duration;

use reqwest::Client;

use crate::error::ScraperError;
use crate::types::{ShopifyProduct, ShopifyProductsResponse};

pub use pager::CollectionPager;

/// Records requested per page. A page holding fewer records than this is the
/// last page of the collection.
pub const PAGE_SIZE: usize = 250;

/// HTTP client for `GET <shop>/collections/<handle>/products.json`.
///
/// Cloning is cheap: clones share one connection pool, which is the only
/// state reused across feed requests. Failures are never retried; 404 and
/// other non-2xx responses surface as typed errors.
#[derive(Clone)]
pub struct ShopifyClient {
    client: Client,
}

impl ShopifyClient {
    /// Creates a `ShopifyClient` with a per-request timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Starts a sequential walk over every page of `collection`.
    #[must_use]
    pub fn pager(&self, shop_url: &str, collection: &str) -> CollectionPager {
        CollectionPager::new(self.clone(), shop_url, collection)
    }

    /// Fetches one page (1-indexed) of a collection listing.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidShopUrl`] or [`ScraperError::InvalidCollection`]: the
    ///   listing URL cannot be built.
    /// - [`ScraperError::NotFound`]: HTTP 404.
    /// - [`ScraperError::UnexpectedStatus`]: any other non-2xx status.
    /// - [`ScraperError::Http`]: network, TLS, or timeout failure.
    /// - [`ScraperError::Deserialize`]: body is not a `{"products": [...]}` document.
    pub async fn fetch_collection_page(
        &self,
        shop_url: &str,
        collection: &str,
        page: u32,
    ) -> Result<Vec<ShopifyProduct>, ScraperError> {
        let url = Self::products_url(shop_url, collection, page)?;

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ScraperError::NotFound { url });
        }

        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str::<ShopifyProductsResponse>(&body).map_err(|e| {
            ScraperError::Deserialize {
                context: format!("page {page} of collection \"{collection}\" from {shop_url}"),
                source: e,
            }
        })?;

        tracing::debug!(
            shop_url,
            collection,
            page,
            count = parsed.products.len(),
            "fetched collection page"
        );

        Ok(parsed.products)
    }

    /// Builds the listing URL for one page of a collection.
    ///
    /// One trailing empty path segment on `shop_url` is dropped, so
    /// `https://shop.com/` and `https://shop.com` address the same listing.
    /// Any query or fragment on `shop_url` is discarded.
    ///
    /// `collection` always lands in exactly one path segment: `/`, `?` and `#`
    /// inside it are percent-encoded.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidShopUrl`]: `shop_url` is not an absolute base URL.
    /// - [`ScraperError::InvalidCollection`]: `collection` is empty, `.` or `..`.
    fn products_url(shop_url: &str, collection: &str, page: u32) -> Result<String, ScraperError> {
        if matches!(collection, "" | "." | "..") {
            return Err(ScraperError::InvalidCollection {
                collection: collection.to_owned(),
            });
        }

        let invalid_shop = |reason: String| ScraperError::InvalidShopUrl {
            shop_url: shop_url.to_owned(),
            reason,
        };

        let mut url = reqwest::Url::parse(shop_url).map_err(|e| invalid_shop(e.to_string()))?;
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|()| invalid_shop("cannot be used as a base URL".to_string()))?
            .pop_if_empty()
            .extend(["collections", collection, "products.json"]);

        url.query_pairs_mut()
            .append_pair("limit", &PAGE_SIZE.to_string())
            .append_pair("page", &page.to_string());

        Ok(url.to_string())
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
