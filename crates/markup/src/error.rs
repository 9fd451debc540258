use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarkupError {
    #[error("XML parsing error: {0}")]
    XmlParse(#[from] roxmltree::Error),
}
