//! What a finished worker hands to its parent, and where block-capable
//! parents put it.

use crate::context::SlotToken;
use quire_nodes::{ColumnDefinition, InlineNode, LayoutNode, SectionKind, SelectOption, TableRow};
use quire_style::{BreakKind, ComputedStyles, Display};

/// Replaced and interactive content that is block-capable but may be placed
/// on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    Image,
    Object,
    Svg,
    Input,
    Button,
    Select,
    TextArea,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPlacement {
    /// On the line, unless the element's display is explicitly `block`.
    Inline,
    /// Follows the element's display like any other node.
    ByDisplay,
}

/// Default placement per control kind.
pub const FORM_CONTROL_PLACEMENT: &[(ControlKind, ControlPlacement)] = &[
    (ControlKind::Image, ControlPlacement::Inline),
    (ControlKind::Object, ControlPlacement::Inline),
    (ControlKind::Svg, ControlPlacement::Inline),
    (ControlKind::Input, ControlPlacement::Inline),
    (ControlKind::Button, ControlPlacement::Inline),
    (ControlKind::Select, ControlPlacement::Inline),
    (ControlKind::TextArea, ControlPlacement::Inline),
];

impl ControlKind {
    pub fn placement(self) -> ControlPlacement {
        FORM_CONTROL_PLACEMENT
            .iter()
            .find(|(kind, _)| *kind == self)
            .map(|(_, placement)| *placement)
            .unwrap_or(ControlPlacement::ByDisplay)
    }
}

/// Forced breaks requested around a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Breaks {
    pub before: Option<BreakKind>,
    pub after: Option<BreakKind>,
}

impl Breaks {
    pub fn from_styles(styles: &ComputedStyles) -> Self {
        Self {
            before: styles.break_before(),
            after: styles.break_after(),
        }
    }
}

/// One member of a run group's flattened content.
#[derive(Debug, Clone, PartialEq)]
pub enum RunMember {
    Leaf(InlineNode),
    Block(LayoutNode),
}

/// Rows of a `thead`/`tbody`/`tfoot`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowGroup {
    pub section: SectionKind,
    pub rows: Vec<TableRow>,
    pub lang: Option<String>,
}

/// The content a worker contributes to its parent.
#[derive(Debug, Clone, PartialEq)]
pub enum Contribution {
    /// Nothing to attach; the parent is routed around.
    Absent,
    LineBreak,
    /// Inline-flattened content of an element without a box of its own.
    Run(Vec<RunMember>),
    Node(LayoutNode),
    RowGroup(RowGroup),
    Columns(Vec<ColumnDefinition>),
    Choice(Vec<SelectOption>),
}

impl Contribution {
    pub fn is_absent(&self) -> bool {
        matches!(self, Contribution::Absent)
    }
}

/// A finished child as its parent sees it: a tag to switch on, never the
/// child worker itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildResult {
    pub display: Display,
    pub control: Option<ControlKind>,
    pub token: Option<SlotToken>,
    pub breaks: Breaks,
    pub content: Contribution,
}

impl ChildResult {
    pub fn new(display: Display, content: Contribution) -> Self {
        Self {
            display,
            control: None,
            token: None,
            breaks: Breaks::default(),
            content,
        }
    }

    /// Whether the child is a table part (cell, row, row group) rather than
    /// ordinary content.
    pub fn is_table_part(&self) -> bool {
        match &self.content {
            Contribution::RowGroup(_) => true,
            Contribution::Node(LayoutNode::TableCell(_) | LayoutNode::TableRow(_)) => true,
            _ => false,
        }
    }
}

/// Where a block-capable container puts a child.
#[derive(Debug)]
pub enum Placement {
    /// On the current line, through the inline buffer.
    Inline(InlineNode),
    /// Leaves and blocks of a run group, in order.
    Run(Vec<RunMember>),
    /// After flushing the inline buffer, as a block of its own.
    Block(LayoutNode, Breaks),
    /// A cell, row or row group outside any table.
    TablePart(ChildResult),
    /// Content a generic container has no place for.
    Unplaceable(Contribution),
}

/// Decides placement, in order: line breaks are inline; inline-level
/// results and form controls not explicitly `block` go on the line as atomic
/// content; run groups are spread; anything else is a block.
pub fn place(child: ChildResult) -> Placement {
    if child.is_table_part() {
        return Placement::TablePart(child);
    }
    let inline_control = child
        .control
        .is_some_and(|kind| kind.placement() == ControlPlacement::Inline)
        && child.display != Display::Block;
    match child.content {
        Contribution::LineBreak => Placement::Inline(InlineNode::LineBreak),
        Contribution::Node(node) if inline_control || child.display.is_inline_level() => {
            Placement::Inline(InlineNode::atomic(node))
        }
        Contribution::Run(members) => Placement::Run(members),
        Contribution::Node(node) => Placement::Block(node, child.breaks),
        other => Placement::Unplaceable(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_nodes::{BlockKind, NodeMetadata, TableCell};

    fn block() -> LayoutNode {
        LayoutNode::block(BlockKind::Division, NodeMetadata::default())
    }

    #[test]
    fn inline_level_nodes_become_atomic() {
        let child = ChildResult::new(Display::InlineBlock, Contribution::Node(block()));
        assert!(matches!(place(child), Placement::Inline(InlineNode::Atomic(_))));
        let child = ChildResult::new(Display::Block, Contribution::Node(block()));
        assert!(matches!(place(child), Placement::Block(_, _)));
    }

    #[test]
    fn form_controls_are_inline_unless_display_block() {
        let mut child = ChildResult::new(Display::InlineBlock, Contribution::Node(block()));
        child.control = Some(ControlKind::Select);
        child.display = Display::ListItem;
        assert!(matches!(place(child.clone()), Placement::Inline(_)));
        child.display = Display::Block;
        assert!(matches!(place(child), Placement::Block(_, _)));
    }

    #[test]
    fn cells_are_table_parts() {
        let child = ChildResult::new(
            Display::TableCell,
            Contribution::Node(TableCell::default().into()),
        );
        assert!(matches!(place(child), Placement::TablePart(_)));
    }

    #[test]
    fn every_control_kind_has_a_policy() {
        for kind in [
            ControlKind::Image,
            ControlKind::Object,
            ControlKind::Svg,
            ControlKind::Input,
            ControlKind::Button,
            ControlKind::Select,
            ControlKind::TextArea,
        ] {
            assert!(FORM_CONTROL_PLACEMENT.iter().any(|(k, _)| *k == kind));
        }
    }
}
