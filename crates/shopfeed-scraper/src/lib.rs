pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::{CollectionPager, ShopifyClient, PAGE_SIZE};
pub use error::ScraperError;
pub use normalize::normalize_product;
pub use types::{ShopifyImage, ShopifyProduct, ShopifyProductsResponse, ShopifyVariant};
