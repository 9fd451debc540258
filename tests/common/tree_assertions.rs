//! Assertion macros over finished layout trees.

use quire::LayoutNode;

pub fn kinds(nodes: &[LayoutNode]) -> Vec<&'static str> {
    nodes.iter().map(LayoutNode::kind).collect()
}

/// Assert the kinds of a node sequence, in order
#[macro_export]
macro_rules! assert_kinds {
    ($nodes:expr, [$($kind:expr),* $(,)?]) => {
        let found = $crate::common::tree_assertions::kinds(&$nodes);
        let expected: Vec<&str> = vec![$($kind),*];
        assert_eq!(found, expected, "Unexpected node kinds");
    };
}

/// Assert that the document outline contains a line
#[macro_export]
macro_rules! assert_outline_contains {
    ($doc:expr, $text:expr) => {
        let outline = $doc.outline();
        assert!(
            outline.contains($text),
            "Outline should contain '{}', but was:\n{}",
            $text,
            outline
        );
    };
}
