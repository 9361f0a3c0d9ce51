use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("XML serialization error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error while rendering: {0}")]
    Io(#[from] std::io::Error),

    #[error(
        "field {field} of product \"{product_id}\" contains {character:?}, \
         which the target format cannot represent"
    )]
    InvalidCharacter {
        product_id: String,
        field: &'static str,
        character: char,
    },
}
