//! Flat CSV feed with a fixed column set.

use csv::{QuoteStyle, WriterBuilder};
use serde::Serialize;
use shopfeed_core::{FeedMetadata, NormalizedProduct};

use crate::error::RenderError;
use crate::FeedRenderer;

/// Header row, in column order.
pub const CSV_COLUMNS: [&str; 8] = [
    "id",
    "title",
    "description",
    "link",
    "image_link",
    "price",
    "availability",
    "brand",
];

/// One data row; field order must match [`CSV_COLUMNS`].
#[derive(Serialize)]
struct CsvRow<'a> {
    id: &'a str,
    title: &'a str,
    description: &'a str,
    link: &'a str,
    image_link: &'a str,
    price: &'a str,
    availability: &'static str,
    brand: &'a str,
}

impl<'a> From<&'a NormalizedProduct> for CsvRow<'a> {
    fn from(product: &'a NormalizedProduct) -> Self {
        Self {
            id: &product.id,
            title: &product.title,
            description: &product.description,
            link: &product.link,
            image_link: &product.image_link,
            price: &product.price,
            availability: product.availability.as_feed_str(),
            brand: &product.brand,
        }
    }
}

/// CSV feed renderer. Fields holding delimiters, quotes, or line breaks are
/// quoted; everything else is written bare.
#[derive(Debug, Default)]
pub struct CsvFeedRenderer;

impl CsvFeedRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn writer() -> csv::Writer<Vec<u8>> {
        WriterBuilder::new()
            .has_headers(false)
            .quote_style(QuoteStyle::Necessary)
            .from_writer(Vec::new())
    }
}

fn into_bytes(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>, RenderError> {
    writer
        .into_inner()
        .map_err(|e| RenderError::Io(std::io::Error::other(e.to_string())))
}

impl FeedRenderer for CsvFeedRenderer {
    // The header is written even for an empty catalog.
    fn start(&mut self, _metadata: &FeedMetadata) -> Result<Vec<u8>, RenderError> {
        let mut writer = Self::writer();
        writer.write_record(CSV_COLUMNS)?;
        into_bytes(writer)
    }

    fn write_products(&mut self, products: &[NormalizedProduct]) -> Result<Vec<u8>, RenderError> {
        let mut writer = Self::writer();
        for product in products {
            writer.serialize(CsvRow::from(product))?;
        }
        into_bytes(writer)
    }

    fn finish(&mut self) -> Result<Vec<u8>, RenderError> {
        Ok(Vec::new())
    }
}
