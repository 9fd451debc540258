use quire_core::TransformError;
use quire_markup::MarkupError;
use thiserror::Error;

/// Everything that can go wrong between markup and layout tree.
#[derive(Error, Debug)]
pub enum QuireError {
    #[error("Reading markup failed: {0}")]
    Markup(#[from] MarkupError),

    #[error("Transformation failed: {0}")]
    Transform(#[from] TransformError),
}
