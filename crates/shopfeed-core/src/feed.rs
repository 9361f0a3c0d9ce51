//! Feed target descriptions shared by the renderers and the HTTP layer.

/// Target document schema for a generated feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedSchema {
    /// Google Shopping RSS item feed with channel metadata and category fields.
    GoogleXml,
    /// TikTok catalog RSS item feed.
    TiktokXml,
    /// Flat CSV feed accepted by Snapchat and Meta catalogs.
    Csv,
}

impl FeedSchema {
    #[must_use]
    pub fn content_type(self) -> &'static str {
        match self {
            Self::GoogleXml | Self::TiktokXml => "application/xml",
            Self::Csv => "text/csv",
        }
    }

    /// File name offered to downloaders, for schemas served as attachments.
    #[must_use]
    pub fn attachment_name(self) -> Option<&'static str> {
        match self {
            Self::Csv => Some("shopify-feed.csv"),
            Self::GoogleXml | Self::TiktokXml => None,
        }
    }

    /// Channel-level metadata this schema advertises for a feed.
    #[must_use]
    pub fn metadata(self, shop_url: &str, brand: &str) -> FeedMetadata {
        match self {
            Self::GoogleXml => FeedMetadata {
                title: Some(format!("Google CSS feed for {brand}")),
                link: Some(shop_url.to_string()),
                description: Some(format!("A Google Shopping feed for {brand}")),
            },
            Self::TiktokXml | Self::Csv => FeedMetadata::default(),
        }
    }
}

impl std::fmt::Display for FeedSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GoogleXml => write!(f, "google-xml"),
            Self::TiktokXml => write!(f, "tiktok-xml"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

/// Optional document-level metadata. Renderers omit any field left as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedMetadata {
    pub title: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
}
