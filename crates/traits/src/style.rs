//! The style applier seam.
//!
//! Mapping individual declarations (colors, borders, spacing, ...) onto node
//! properties is not the transformation's job. After a worker has built its
//! node, and again once the node is finished, the engine hands the resolved
//! style map and the node to a `StyleApplier` and never looks at what it set.

use quire_nodes::{ColumnDefinition, InlineNode, LayoutNode};
use quire_style::ComputedStyles;
use std::fmt::Debug;

/// When in a worker's lifecycle the applier is being invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyPhase {
    /// Right after the worker was started; the node is an empty shell.
    Start,
    /// After the worker's `end`; the node is complete.
    End,
}

/// What the applier may mutate.
#[derive(Debug)]
pub enum ApplyTarget<'a> {
    Node(&'a mut LayoutNode),
    /// The flattened leaves of an inline element without a box of its own.
    Leaves(Vec<&'a mut InlineNode>),
    /// Column definitions produced by `col`/`colgroup`.
    Columns(&'a mut [ColumnDefinition]),
}

/// The styles of the elements enclosing the one being styled.
#[derive(Debug, Clone)]
pub struct StyleContext<'a> {
    pub phase: ApplyPhase,
    /// Ancestor style maps, closest first.
    pub ancestors: Vec<&'a ComputedStyles>,
}

impl<'a> StyleContext<'a> {
    pub fn new(phase: ApplyPhase, ancestors: Vec<&'a ComputedStyles>) -> Self {
        Self { phase, ancestors }
    }

    pub fn parent(&self) -> Option<&'a ComputedStyles> {
        self.ancestors.first().copied()
    }
}

pub trait StyleApplier: Debug {
    fn apply(&self, styles: &ComputedStyles, target: ApplyTarget<'_>, context: &StyleContext<'_>);
}
