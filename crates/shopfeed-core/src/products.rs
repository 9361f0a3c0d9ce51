use serde::{Deserialize, Serialize};

/// Stock state of a product, derived from its first variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    InStock,
    OutOfStock,
}

impl Availability {
    #[must_use]
    pub fn from_available(available: bool) -> Self {
        if available {
            Self::InStock
        } else {
            Self::OutOfStock
        }
    }

    /// The value advertising platforms expect in feed documents.
    #[must_use]
    pub fn as_feed_str(self) -> &'static str {
        match self {
            Self::InStock => "in stock",
            Self::OutOfStock => "out of stock",
        }
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_feed_str())
    }
}

/// A storefront product in the canonical shape every feed renderer consumes.
///
/// Every field is populated. Data missing from the storefront record maps to
/// a documented default rather than an absent value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedProduct {
    /// Storefront numeric product ID as text, e.g. `"6789012345678"`.
    pub id: String,
    pub title: String,
    /// Description with markup removed and `& < > " '` entity-escaped.
    pub description: String,
    /// Storefront product page, e.g. `"https://example.com/products/blue-tee"`.
    pub link: String,
    /// First product image, or empty.
    pub image_link: String,
    /// Decimal price as text exactly as the storefront returns it; `"0.00"` when absent.
    pub price: String,
    /// ISO 4217 currency code, or empty when the storefront omits it.
    pub currency: String,
    pub availability: Availability,
    pub brand: String,
    /// Free-text product type, or empty.
    pub category: String,
}

impl NormalizedProduct {
    /// Price in the `"<amount> <currency>"` form used by item feeds.
    ///
    /// Trailing whitespace is trimmed, so a product without a currency yields
    /// the bare amount.
    #[must_use]
    pub fn feed_price(&self) -> String {
        format!("{} {}", self.price, self.currency)
            .trim_end()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_product(price: &str, currency: &str) -> NormalizedProduct {
        NormalizedProduct {
            id: "123456789".to_string(),
            title: "Blue Tee".to_string(),
            description: "Soft cotton".to_string(),
            link: "https://example.com/products/blue-tee".to_string(),
            image_link: String::new(),
            price: price.to_string(),
            currency: currency.to_string(),
            availability: Availability::InStock,
            brand: "Unknown".to_string(),
            category: String::new(),
        }
    }

    #[test]
    fn feed_price_joins_amount_and_currency() {
        assert_eq!(make_product("19.99", "USD").feed_price(), "19.99 USD");
    }

    #[test]
    fn feed_price_trims_when_currency_is_empty() {
        assert_eq!(make_product("0.00", "").feed_price(), "0.00");
    }

    #[test]
    fn availability_from_available_flag() {
        assert_eq!(Availability::from_available(true), Availability::InStock);
        assert_eq!(
            Availability::from_available(false),
            Availability::OutOfStock
        );
    }

    #[test]
    fn availability_feed_strings() {
        assert_eq!(Availability::InStock.as_feed_str(), "in stock");
        assert_eq!(Availability::OutOfStock.to_string(), "out of stock");
    }

    #[test]
    fn availability_serializes_snake_case() {
        let json = serde_json::to_string(&Availability::OutOfStock).expect("serialize");
        assert_eq!(json, "\"out_of_stock\"");
    }

    #[test]
    fn serde_roundtrip_product() {
        let product = make_product("12.99", "USD");
        let json = serde_json::to_string(&product).expect("serialization failed");
        let decoded: NormalizedProduct =
            serde_json::from_str(&json).expect("deserialization failed");
        assert_eq!(decoded, product);
    }
}
