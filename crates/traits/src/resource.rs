//! ImageResolver trait for abstracting replaced-content lookup.
//!
//! The transformation never decodes images itself. It asks a resolver for
//! the bytes and the intrinsic pixel size of a reference and records both on
//! the image node.

use quire_nodes::SharedData;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Error type for resource loading operations.
#[derive(Error, Debug, Clone)]
pub enum ResourceError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Failed to load resource '{path}': {message}")]
    LoadFailed { path: String, message: String },

    #[error("Invalid resource format: {0}")]
    InvalidFormat(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ResourceError {
    fn from(err: std::io::Error) -> Self {
        ResourceError::Io(err.to_string())
    }
}

/// A resolved image: its bytes and intrinsic size in CSS pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedImage {
    pub data: SharedData,
    pub width_px: f32,
    pub height_px: f32,
}

/// Looks up replaced content by reference.
///
/// Retrying, caching and remote fetching are the resolver's business; the
/// transformation calls `resolve` once per element and treats an error as
/// "no visual node".
pub trait ImageResolver: Send + Sync + Debug {
    fn resolve(&self, src: &str) -> Result<ResolvedImage, ResourceError>;

    /// Returns a human-readable name for this resolver (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// An in-memory image resolver.
///
/// Images are stored in memory and must be pre-populated before use.
#[derive(Debug, Default)]
pub struct InMemoryImageResolver {
    images: RwLock<HashMap<String, ResolvedImage>>,
}

impl InMemoryImageResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an image under `src` with its intrinsic pixel size.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError::LoadFailed` if the internal lock is poisoned.
    pub fn add(
        &self,
        src: impl Into<String>,
        data: Vec<u8>,
        width_px: f32,
        height_px: f32,
    ) -> Result<(), ResourceError> {
        let src = src.into();
        let mut images = self.images.write().map_err(|_| ResourceError::LoadFailed {
            path: src.clone(),
            message: "image store lock poisoned".to_string(),
        })?;
        images.insert(
            src,
            ResolvedImage {
                data: Arc::new(data),
                width_px,
                height_px,
            },
        );
        Ok(())
    }

    /// Returns `None` if the lock is poisoned or the image doesn't exist.
    pub fn remove(&self, src: &str) -> Option<ResolvedImage> {
        self.images.write().ok()?.remove(src)
    }

    /// Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.images.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.images.read().map(|r| r.is_empty()).unwrap_or(true)
    }
}

impl ImageResolver for InMemoryImageResolver {
    fn resolve(&self, src: &str) -> Result<ResolvedImage, ResourceError> {
        let images = self.images.read().map_err(|_| ResourceError::LoadFailed {
            path: src.to_string(),
            message: "image store lock poisoned".to_string(),
        })?;
        images
            .get(src)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound(src.to_string()))
    }

    fn name(&self) -> &'static str {
        "InMemoryImageResolver"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_resolver_add_and_resolve() {
        let resolver = InMemoryImageResolver::new();
        resolver.add("logo.png", vec![1, 2, 3], 40.0, 20.0).unwrap();

        let image = resolver.resolve("logo.png").unwrap();
        assert_eq!(&*image.data, &[1, 2, 3]);
        assert_eq!((image.width_px, image.height_px), (40.0, 20.0));
    }

    #[test]
    fn test_in_memory_resolver_not_found() {
        let resolver = InMemoryImageResolver::new();
        let result = resolver.resolve("missing.png");
        assert!(matches!(result, Err(ResourceError::NotFound(_))));
    }

    #[test]
    fn test_in_memory_resolver_overwrite_and_remove() {
        let resolver = InMemoryImageResolver::new();
        resolver.add("a.png", vec![1], 1.0, 1.0).unwrap();
        resolver.add("a.png", vec![2], 2.0, 2.0).unwrap();
        assert_eq!(resolver.len(), 1);
        assert_eq!(resolver.resolve("a.png").unwrap().width_px, 2.0);

        assert!(resolver.remove("a.png").is_some());
        assert!(resolver.is_empty());
        assert!(resolver.remove("a.png").is_none());
    }

    #[test]
    fn test_resource_error_display() {
        let err = ResourceError::LoadFailed {
            path: "file.bin".to_string(),
            message: "permission denied".to_string(),
        };
        assert!(err.to_string().contains("file.bin"));
        assert!(err.to_string().contains("permission denied"));

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let resource_err: ResourceError = io_err.into();
        assert!(matches!(resource_err, ResourceError::Io(_)));
    }
}
