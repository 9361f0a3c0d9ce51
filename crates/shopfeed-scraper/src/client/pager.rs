//! Page-number pagination over a collection listing.

use crate::error::ScraperError;
use crate::types::ShopifyProduct;

use super::{ShopifyClient, PAGE_SIZE};

/// Sequential walk over the pages of one collection.
///
/// The listing endpoint gives no total count, so a page holding exactly
/// [`PAGE_SIZE`] records is always followed by another request. A collection
/// whose size is an exact multiple of [`PAGE_SIZE`] therefore ends with one
/// empty page.
pub struct CollectionPager {
    client: ShopifyClient,
    shop_url: String,
    collection: String,
    next_page: u32,
    exhausted: bool,
}

impl CollectionPager {
    pub(super) fn new(client: ShopifyClient, shop_url: &str, collection: &str) -> Self {
        Self {
            client,
            shop_url: shop_url.to_owned(),
            collection: collection.to_owned(),
            next_page: 1,
            exhausted: false,
        }
    }

    /// Fetches the next page, or returns `Ok(None)` once the short page has
    /// been seen.
    ///
    /// A failed fetch also ends the walk; later calls return `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`ShopifyClient::fetch_collection_page`].
    pub async fn next_page(&mut self) -> Result<Option<Vec<ShopifyProduct>>, ScraperError> {
        if self.exhausted {
            return Ok(None);
        }

        let page = self.next_page;
        let products = match self
            .client
            .fetch_collection_page(&self.shop_url, &self.collection, page)
            .await
        {
            Ok(products) => products,
            Err(e) => {
                self.exhausted = true;
                return Err(e);
            }
        };

        self.next_page += 1;
        if products.len() < PAGE_SIZE {
            self.exhausted = true;
        }

        Ok(Some(products))
    }

    /// Number of page requests that completed successfully so far.
    #[must_use]
    pub fn pages_fetched(&self) -> u32 {
        self.next_page - 1
    }
}

impl ShopifyClient {
    /// Fetches every product in a collection, in listing order.
    ///
    /// **All-or-nothing semantics**: on any page failure, records from earlier
    /// pages are discarded and the error is returned. There is no page cap;
    /// callers bound the total time instead.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_collection_page`].
    pub async fn fetch_all_products(
        &self,
        shop_url: &str,
        collection: &str,
    ) -> Result<Vec<ShopifyProduct>, ScraperError> {
        let mut all_products: Vec<ShopifyProduct> = Vec::new();
        let mut pager = self.pager(shop_url, collection);

        while let Some(batch) = pager.next_page().await? {
            all_products.extend(batch);
        }

        tracing::debug!(
            shop_url,
            collection,
            pages = pager.pages_fetched(),
            count = all_products.len(),
            "fetched full collection"
        );

        Ok(all_products)
    }
}
