use std::time::Duration;

use futures::stream::{self, Stream, StreamExt};
use shopfeed_core::NormalizedProduct;
use shopfeed_render::{render, renderer_for, FeedRenderer};
use shopfeed_scraper::{normalize_product, CollectionPager, ShopifyClient, ShopifyProduct};
use tokio::sync::mpsc;
use tokio::time::{timeout, timeout_at, Instant};

use super::{FeedError, FeedRequest};

/// Chunks buffered between the pump task and the HTTP body.
const CHANNEL_CAPACITY: usize = 4;

/// Builds feeds from a shared storefront client. Cloning shares the client's
/// connection pool; nothing else is kept between requests.
#[derive(Clone)]
pub struct FeedService {
    client: ShopifyClient,
    deadline: Duration,
}

impl FeedService {
    /// `deadline` bounds every page fetch of a single feed request combined.
    #[must_use]
    pub fn new(client: ShopifyClient, deadline: Duration) -> Self {
        Self { client, deadline }
    }

    /// Fetches the whole collection, then renders it in one pass.
    ///
    /// # Errors
    ///
    /// - [`FeedError::SourceUnavailable`] if any page fetch fails.
    /// - [`FeedError::Timeout`] if the collection is not fetched within the deadline.
    /// - [`FeedError::RenderFailure`] if the products cannot be serialized.
    pub async fn generate(&self, request: &FeedRequest) -> Result<Vec<u8>, FeedError> {
        let raw = timeout(
            self.deadline,
            self.client
                .fetch_all_products(&request.shop_url, &request.collection),
        )
        .await
        .map_err(|_| FeedError::Timeout(self.deadline))??;

        let products = normalize_all(&raw, request);
        let metadata = request.schema.metadata(&request.shop_url, &request.brand);
        let mut renderer = renderer_for(request.schema);
        let body = render(renderer.as_mut(), &products, &metadata)?;

        tracing::info!(
            shop_url = %request.shop_url,
            collection = %request.collection,
            schema = %request.schema,
            products = products.len(),
            bytes = body.len(),
            "feed generated"
        );

        Ok(body)
    }

    /// Starts a pipelined feed: pages are rendered and handed to the returned
    /// stream as they arrive.
    ///
    /// The first page is fetched before this returns, so a source that fails
    /// immediately surfaces here rather than inside the stream.
    ///
    /// # Errors
    ///
    /// Same as [`Self::generate`], limited to the first page.
    pub async fn stream(&self, request: FeedRequest) -> Result<FeedStream, FeedError> {
        let mut pipeline = FeedPipeline {
            pager: self.client.pager(&request.shop_url, &request.collection),
            renderer: renderer_for(request.schema),
            request,
            deadline: Instant::now() + self.deadline,
            limit: self.deadline,
            products: 0,
            finished: false,
        };

        let first = pipeline.first_chunk().await?;

        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        tokio::spawn(pump(pipeline, tx));

        Ok(FeedStream { first, rx })
    }
}

fn normalize_all(raw: &[ShopifyProduct], request: &FeedRequest) -> Vec<NormalizedProduct> {
    raw.iter()
        .map(|product| normalize_product(product, &request.shop_url, &request.brand))
        .collect()
}

/// Rendered feed bytes, in document order.
///
/// An `Err` item means the document was cut short; no further items follow.
pub struct FeedStream {
    first: Vec<u8>,
    rx: mpsc::Receiver<Result<Vec<u8>, FeedError>>,
}

impl FeedStream {
    pub fn into_stream(self) -> impl Stream<Item = Result<Vec<u8>, FeedError>> + Send + 'static {
        let rest = stream::unfold(self.rx, |mut rx| async move {
            rx.recv().await.map(|item| (item, rx))
        });
        stream::iter([Ok(self.first)]).chain(rest)
    }
}

/// Page-at-a-time fetch, normalize, and render state for one request.
struct FeedPipeline {
    pager: CollectionPager,
    renderer: Box<dyn FeedRenderer>,
    request: FeedRequest,
    deadline: Instant,
    limit: Duration,
    products: usize,
    finished: bool,
}

impl FeedPipeline {
    /// Document start plus the first page.
    async fn first_chunk(&mut self) -> Result<Vec<u8>, FeedError> {
        let metadata = self
            .request
            .schema
            .metadata(&self.request.shop_url, &self.request.brand);
        let mut chunk = self.renderer.start(&metadata)?;
        if let Some(page) = self.next_chunk().await? {
            chunk.extend(page);
        }
        Ok(chunk)
    }

    /// The next rendered page, the closing markup once the pager is drained,
    /// then `None`.
    async fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, FeedError> {
        if self.finished {
            return Ok(None);
        }

        let page = timeout_at(self.deadline, self.pager.next_page())
            .await
            .map_err(|_| FeedError::Timeout(self.limit))??;

        match page {
            Some(raw) => {
                let products = normalize_all(&raw, &self.request);
                self.products += products.len();
                Ok(Some(self.renderer.write_products(&products)?))
            }
            None => {
                self.finished = true;
                Ok(Some(self.renderer.finish()?))
            }
        }
    }
}

async fn pump(mut pipeline: FeedPipeline, tx: mpsc::Sender<Result<Vec<u8>, FeedError>>) {
    loop {
        match pipeline.next_chunk().await {
            Ok(Some(chunk)) => {
                if tx.send(Ok(chunk)).await.is_err() {
                    tracing::debug!(
                        shop_url = %pipeline.request.shop_url,
                        "feed receiver dropped; stopping"
                    );
                    return;
                }
            }
            Ok(None) => {
                tracing::info!(
                    shop_url = %pipeline.request.shop_url,
                    collection = %pipeline.request.collection,
                    schema = %pipeline.request.schema,
                    products = pipeline.products,
                    pages = pipeline.pager.pages_fetched(),
                    "feed streamed"
                );
                return;
            }
            Err(e) => {
                tracing::error!(
                    shop_url = %pipeline.request.shop_url,
                    collection = %pipeline.request.collection,
                    error = %e,
                    products = pipeline.products,
                    "feed stream aborted"
                );
                // The receiver may already be gone; nothing else to notify.
                let _ = tx.send(Err(e)).await;
                return;
            }
        }
    }
}

#[cfg(test)]
#[path = "service_test.rs"]
mod tests;
