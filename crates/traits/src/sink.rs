//! Hand-off of finished top-level blocks to the pagination engine.

use quire_nodes::LayoutNode;

/// Receives top-level blocks as soon as they are finished when the engine
/// runs in immediate-flush mode.
pub trait DocumentSink {
    fn accept(&mut self, node: LayoutNode);
}

/// A sink that keeps everything it receives, in order.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub nodes: Vec<LayoutNode>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_nodes(self) -> Vec<LayoutNode> {
        self.nodes
    }
}

impl DocumentSink for CollectingSink {
    fn accept(&mut self, node: LayoutNode) {
        self.nodes.push(node);
    }
}

impl<S: DocumentSink + ?Sized> DocumentSink for &mut S {
    fn accept(&mut self, node: LayoutNode) {
        (**self).accept(node);
    }
}
