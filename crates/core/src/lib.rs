//! # quire-core
//!
//! Turns a depth-first stream of styled elements into a layout tree.
//!
//! - **engine**: the worker stack and its builder
//! - **workers**: one worker per element, with a fixed start/text/child/end
//!   lifecycle
//! - **inline**, **block**: buffering of inline content until a block
//!   boundary
//! - **table**, **list**: reconstruction of table grids and list items from
//!   markup that does not nest the way the layout model requires
//! - **applier**: the built-in style appliers
//!
//! The crate does no I/O. Images are looked up through an
//! [`ImageResolver`](quire_traits::ImageResolver), styles are mapped by a
//! [`StyleApplier`](quire_traits::StyleApplier) and finished top-level
//! blocks can be streamed to a [`DocumentSink`](quire_traits::DocumentSink).

pub use quire_nodes as nodes;
pub use quire_style as style;
pub use quire_traits as traits;
pub use quire_types as types;

pub mod applier;
pub mod block;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod element;
pub mod engine;
pub mod error;
pub mod factory;
pub mod inline;
pub mod list;
pub mod table;
pub mod workers;

pub use applier::{DeclaredStyleApplier, NoopStyleApplier};
pub use config::{FormFieldConfig, TransformConfig};
pub use context::{FieldNameResolver, ProcessorContext, SlotToken, StackFrame};
pub use dispatch::{ChildResult, Contribution, ControlKind, FORM_CONTROL_PLACEMENT};
pub use element::{DocumentEvent, Element};
pub use engine::{Transformer, TransformerBuilder};
pub use error::TransformError;
pub use factory::WorkerFactory;
pub use inline::InlineBuffer;
pub use workers::{ElementWorker, Worker};
