//! Feed renderers: serialize [`NormalizedProduct`] sequences into the
//! document format an advertising platform ingests.
//!
//! Every renderer emits incrementally. [`FeedRenderer::start`] opens the
//! document, [`FeedRenderer::write_products`] appends a batch, and
//! [`FeedRenderer::finish`] closes it. Each call returns only the bytes
//! produced since the previous call, so a caller can forward them while the
//! rest of the catalog is still being fetched. [`render`] is the buffered
//! form of the same sequence.

pub mod csv_feed;
pub mod error;
pub mod xml_feed;

use shopfeed_core::{FeedMetadata, FeedSchema, NormalizedProduct};

pub use csv_feed::{CsvFeedRenderer, CSV_COLUMNS};
pub use error::RenderError;
pub use xml_feed::{XmlFeedRenderer, GOOGLE_NS};

/// One target feed schema.
///
/// Output must depend only on the inputs: no timestamps, no reordering.
pub trait FeedRenderer: Send {
    /// Opens the document (declaration, header row, channel metadata).
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the preamble cannot be serialized.
    fn start(&mut self, metadata: &FeedMetadata) -> Result<Vec<u8>, RenderError>;

    /// Serializes one batch of products, in order.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if a field cannot be represented in the target format.
    fn write_products(&mut self, products: &[NormalizedProduct]) -> Result<Vec<u8>, RenderError>;

    /// Closes the document.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the closing markup cannot be written.
    fn finish(&mut self) -> Result<Vec<u8>, RenderError>;
}

/// Returns a fresh renderer for `schema`.
#[must_use]
pub fn renderer_for(schema: FeedSchema) -> Box<dyn FeedRenderer> {
    match schema {
        FeedSchema::GoogleXml => Box::new(XmlFeedRenderer::google()),
        FeedSchema::TiktokXml => Box::new(XmlFeedRenderer::tiktok()),
        FeedSchema::Csv => Box::new(CsvFeedRenderer::new()),
    }
}

/// Renders a complete document in one pass.
///
/// # Errors
///
/// Propagates the first [`RenderError`] from the renderer; no partial
/// document is returned.
pub fn render(
    renderer: &mut dyn FeedRenderer,
    products: &[NormalizedProduct],
    metadata: &FeedMetadata,
) -> Result<Vec<u8>, RenderError> {
    let mut out = renderer.start(metadata)?;
    out.extend(renderer.write_products(products)?);
    out.extend(renderer.finish()?);
    Ok(out)
}
