pub mod resource;
pub mod sink;
pub mod style;

pub use resource::{ImageResolver, InMemoryImageResolver, ResolvedImage, ResourceError};
pub use sink::{CollectingSink, DocumentSink};
pub use style::{ApplyPhase, ApplyTarget, StyleApplier, StyleContext};
