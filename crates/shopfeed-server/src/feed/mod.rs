//! Feed generation pipeline: fetch a collection, normalize it, render it.

mod request;
mod service;

use std::time::Duration;

use shopfeed_render::RenderError;
use shopfeed_scraper::ScraperError;
use thiserror::Error;

pub use request::{FeedParams, FeedRequest};
pub use service::{FeedService, FeedStream};

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("invalid feed request: {0}")]
    InvalidRequest(String),

    #[error("product source unavailable: {0}")]
    SourceUnavailable(#[from] ScraperError),

    #[error("product source did not finish within {0:?}")]
    Timeout(Duration),

    #[error("feed rendering failed: {0}")]
    RenderFailure(#[from] RenderError),
}

impl FeedError {
    /// True when the failure happened while talking to the storefront.
    #[must_use]
    pub fn is_source_failure(&self) -> bool {
        matches!(self, Self::SourceUnavailable(_) | Self::Timeout(_))
    }
}
