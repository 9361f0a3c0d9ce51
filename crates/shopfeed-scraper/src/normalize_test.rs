use super::*;
use crate::types::{ShopifyImage, ShopifyVariant};

const SHOP: &str = "https://example-store.myshopify.com";

fn make_variant(price: &str, currency: Option<&str>, available: bool) -> ShopifyVariant {
    ShopifyVariant {
        price: Some(price.to_owned()),
        currency: currency.map(str::to_owned),
        available,
    }
}

fn make_product(variants: Vec<ShopifyVariant>) -> ShopifyProduct {
    ShopifyProduct {
        id: Some(123_456_789),
        title: Some("Classic Blue Tee".to_owned()),
        handle: Some("classic-blue-tee".to_owned()),
        body_html: Some("<p>Soft <strong>organic</strong> cotton.</p>".to_owned()),
        product_type: Some("Shirts".to_owned()),
        images: vec![
            ShopifyImage {
                src: "https://cdn.example.com/front.jpg".to_owned(),
            },
            ShopifyImage {
                src: "https://cdn.example.com/back.jpg".to_owned(),
            },
        ],
        variants,
    }
}

// -----------------------------------------------------------------------
// normalize_product
// -----------------------------------------------------------------------

#[test]
fn normalize_product_maps_all_fields() {
    let product = make_product(vec![make_variant("19.99", Some("USD"), true)]);
    let normalized = normalize_product(&product, SHOP, "Acme");
    assert_eq!(normalized.id, "123456789");
    assert_eq!(normalized.title, "Classic Blue Tee");
    assert_eq!(normalized.description, "Soft organic cotton.");
    assert_eq!(
        normalized.link,
        "https://example-store.myshopify.com/products/classic-blue-tee"
    );
    assert_eq!(normalized.image_link, "https://cdn.example.com/front.jpg");
    assert_eq!(normalized.price, "19.99");
    assert_eq!(normalized.currency, "USD");
    assert_eq!(normalized.availability, Availability::InStock);
    assert_eq!(normalized.brand, "Acme");
    assert_eq!(normalized.category, "Shirts");
}

#[test]
fn normalize_product_uses_first_variant_only() {
    let product = make_product(vec![
        make_variant("10.00", None, false),
        make_variant("12.00", Some("EUR"), true),
    ]);
    let normalized = normalize_product(&product, SHOP, "Acme");
    assert_eq!(normalized.price, "10.00");
    assert_eq!(normalized.currency, "");
    assert_eq!(normalized.availability, Availability::OutOfStock);
}

#[test]
fn normalize_product_without_variants_uses_zero_variant() {
    let product = make_product(vec![]);
    let normalized = normalize_product(&product, SHOP, "Acme");
    assert_eq!(normalized.price, "0.00");
    assert_eq!(normalized.currency, "");
    assert_eq!(normalized.availability, Availability::OutOfStock);
}

#[test]
fn normalize_product_empty_price_defaults() {
    let product = make_product(vec![make_variant("", Some("USD"), true)]);
    let normalized = normalize_product(&product, SHOP, "Acme");
    assert_eq!(normalized.price, "0.00");
}

#[test]
fn normalize_product_sparse_record_gets_defaults() {
    let normalized = normalize_product(&ShopifyProduct::default(), SHOP, "Unknown");
    assert_eq!(normalized.id, "");
    assert_eq!(normalized.title, "");
    assert_eq!(normalized.description, "");
    assert_eq!(
        normalized.link,
        "https://example-store.myshopify.com/products/"
    );
    assert_eq!(normalized.image_link, "");
    assert_eq!(normalized.price, "0.00");
    assert_eq!(normalized.availability, Availability::OutOfStock);
    assert_eq!(normalized.brand, "Unknown");
    assert_eq!(normalized.category, "");
}

#[test]
fn normalize_product_keeps_shop_url_verbatim() {
    let product = make_product(vec![]);
    let normalized = normalize_product(&product, "https://example.com/", "Acme");
    assert_eq!(
        normalized.link,
        "https://example.com//products/classic-blue-tee"
    );
}

#[test]
fn normalize_product_is_deterministic() {
    let product = make_product(vec![make_variant("5.00", Some("USD"), true)]);
    assert_eq!(
        normalize_product(&product, SHOP, "Acme"),
        normalize_product(&product, SHOP, "Acme")
    );
}

#[test]
fn normalize_product_escapes_description_once() {
    let mut product = make_product(vec![]);
    product.body_html = Some("<b>A & B</b>".to_owned());
    let normalized = normalize_product(&product, SHOP, "Acme");
    assert_eq!(normalized.description, "A &amp; B");
}

// -----------------------------------------------------------------------
// strip_markup / escape_markup
// -----------------------------------------------------------------------

#[test]
fn strip_markup_removes_nested_tags() {
    assert_eq!(
        strip_markup(r#"<div class="x"><p>Hello <em>world</em></p></div>"#),
        "Hello world"
    );
}

#[test]
fn strip_markup_removes_unterminated_tag() {
    assert_eq!(strip_markup("Price <br"), "Price ");
}

#[test]
fn strip_markup_leaves_plain_text() {
    assert_eq!(strip_markup("no markup here"), "no markup here");
}

#[test]
fn escape_markup_escapes_all_reserved_characters() {
    assert_eq!(
        escape_markup(r#"a & b < c > d "e" 'f'"#),
        "a &amp; b &lt; c &gt; d &quot;e&quot; &apos;f&apos;"
    );
}

#[test]
fn escape_markup_escapes_existing_entities() {
    assert_eq!(escape_markup("&amp;"), "&amp;amp;");
}
