//! RSS 2.0 item feeds using the Google Merchant `g:` namespace.
//!
//! Both Google Shopping and TikTok catalogs ingest this layout; the Google
//! flavour adds channel metadata and the two category fields.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use shopfeed_core::{FeedMetadata, NormalizedProduct};

use crate::error::RenderError;
use crate::FeedRenderer;

/// Namespace declared for the item-level `g:` fields.
pub const GOOGLE_NS: &str = "http://base.google.com/ns/1.0";

/// Every feed lists products as new stock.
const CONDITION: &str = "new";

/// Pretty-printed (2-space indent) XML item feed.
pub struct XmlFeedRenderer {
    writer: Writer<Vec<u8>>,
    include_categories: bool,
}

impl XmlFeedRenderer {
    /// Google Shopping flavour: items also carry `g:product_type` and
    /// `g:google_product_category`.
    #[must_use]
    pub fn google() -> Self {
        Self::new(true)
    }

    /// TikTok catalog flavour.
    #[must_use]
    pub fn tiktok() -> Self {
        Self::new(false)
    }

    fn new(include_categories: bool) -> Self {
        Self {
            writer: Writer::new_with_indent(Vec::new(), b' ', 2),
            include_categories,
        }
    }

    /// Drains everything written since the last call.
    fn take(&mut self) -> Vec<u8> {
        std::mem::take(self.writer.get_mut())
    }

    fn open(&mut self, name: &str) -> Result<(), RenderError> {
        self.writer.write_event(Event::Start(BytesStart::new(name)))?;
        Ok(())
    }

    fn close(&mut self, name: &str) -> Result<(), RenderError> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    /// Writes `<name>value</name>`, escaping `value`.
    fn text_element(&mut self, name: &str, value: &str) -> Result<(), RenderError> {
        self.open(name)?;
        self.writer.write_event(Event::Text(BytesText::new(value)))?;
        self.close(name)
    }

    /// Writes `<name>value</name>` for a value that is already entity-escaped.
    fn escaped_element(&mut self, name: &str, value: &str) -> Result<(), RenderError> {
        self.open(name)?;
        self.writer
            .write_event(Event::Text(BytesText::from_escaped(value)))?;
        self.close(name)
    }

    fn write_item(&mut self, product: &NormalizedProduct) -> Result<(), RenderError> {
        check_item(product)?;

        let price = product.feed_price();
        self.open("item")?;
        self.text_element("g:id", &product.id)?;
        self.text_element("g:title", &product.title)?;
        // Normalization already escaped the description for markup targets.
        self.escaped_element("g:description", &product.description)?;
        self.text_element("g:availability", product.availability.as_feed_str())?;
        self.text_element("g:condition", CONDITION)?;
        self.text_element("g:price", &price)?;
        self.text_element("g:link", &product.link)?;
        self.text_element("g:image_link", &product.image_link)?;
        self.text_element("g:brand", &product.brand)?;
        if self.include_categories {
            self.text_element("g:product_type", &product.category)?;
            self.text_element("g:google_product_category", &product.category)?;
        }
        self.close("item")
    }
}

impl FeedRenderer for XmlFeedRenderer {
    fn start(&mut self, metadata: &FeedMetadata) -> Result<Vec<u8>, RenderError> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut rss = BytesStart::new("rss");
        rss.push_attribute(("xmlns:g", GOOGLE_NS));
        rss.push_attribute(("version", "2.0"));
        self.writer.write_event(Event::Start(rss))?;
        self.open("channel")?;

        let channel_fields = [
            ("title", &metadata.title),
            ("link", &metadata.link),
            ("description", &metadata.description),
        ];
        for (name, value) in channel_fields {
            if let Some(value) = value {
                check_field("channel", name, value)?;
                self.text_element(name, value)?;
            }
        }

        Ok(self.take())
    }

    fn write_products(&mut self, products: &[NormalizedProduct]) -> Result<Vec<u8>, RenderError> {
        for product in products {
            self.write_item(product)?;
        }
        Ok(self.take())
    }

    fn finish(&mut self) -> Result<Vec<u8>, RenderError> {
        self.close("channel")?;
        self.close("rss")?;
        let mut out = self.take();
        out.push(b'\n');
        Ok(out)
    }
}

fn check_item(product: &NormalizedProduct) -> Result<(), RenderError> {
    let fields: [(&'static str, &str); 9] = [
        ("id", &product.id),
        ("title", &product.title),
        ("description", &product.description),
        ("link", &product.link),
        ("image_link", &product.image_link),
        ("price", &product.price),
        ("currency", &product.currency),
        ("brand", &product.brand),
        ("category", &product.category),
    ];
    fields
        .into_iter()
        .try_for_each(|(field, value)| check_field(&product.id, field, value))
}

/// Rejects characters outside the XML 1.0 `Char` production.
fn check_field(product_id: &str, field: &'static str, value: &str) -> Result<(), RenderError> {
    match value.chars().find(|&c| !is_xml_char(c)) {
        Some(character) => Err(RenderError::InvalidCharacter {
            product_id: product_id.to_string(),
            field,
            character,
        }),
        None => Ok(()),
    }
}

fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_xml_char_accepts_text_and_whitespace() {
        assert!(is_xml_char('a'));
        assert!(is_xml_char('\n'));
        assert!(is_xml_char('é'));
        assert!(is_xml_char('🙂'));
    }

    #[test]
    fn is_xml_char_rejects_control_characters() {
        assert!(!is_xml_char('\u{0}'));
        assert!(!is_xml_char('\u{8}'));
        assert!(!is_xml_char('\u{1B}'));
        assert!(!is_xml_char('\u{FFFE}'));
    }

    #[test]
    fn check_field_reports_offending_character() {
        let err = check_field("42", "title", "bad\u{7}bell").unwrap_err();
        assert!(matches!(
            err,
            RenderError::InvalidCharacter {
                field: "title",
                character: '\u{7}',
                ref product_id,
            } if product_id == "42"
        ));
    }

    #[test]
    fn empty_document_has_channel_only() {
        let mut renderer = XmlFeedRenderer::tiktok();
        let xml = crate::render(&mut renderer, &[], &FeedMetadata::default()).unwrap();
        let xml = String::from_utf8(xml).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<rss "));
        assert!(xml.contains(r#"xmlns:g="http://base.google.com/ns/1.0""#));
        assert!(xml.contains("<channel>"));
        assert!(!xml.contains("<item>"));
        assert!(xml.ends_with("</rss>\n"));
    }
}
