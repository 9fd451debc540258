use crate::meta::{NodeMetadata, TextStr};
use quire_types::Size;
use std::sync::Arc;

/// A reference-counted container for shared, immutable data like images.
pub type SharedData = Arc<Vec<u8>>;

#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    /// A resource reference, already resolved against the base URI.
    Url(TextStr),
    /// Vector markup serialized from an inline `svg` element.
    InlineSvg(TextStr),
}

/// Replaced content. The intrinsic size is fixed at construction so layout
/// never needs to query the resource again.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageNode {
    pub meta: NodeMetadata,
    pub source: ImageSource,
    pub data: Option<SharedData>,
    pub alt: Option<TextStr>,
    /// Intrinsic size in points.
    pub intrinsic: Size,
}
