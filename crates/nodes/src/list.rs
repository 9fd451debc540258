use crate::meta::NodeMetadata;
use crate::node::LayoutNode;
use quire_style::ListStyleType;

/// An ordered or unordered list. Its children are always list items.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListNode {
    pub meta: NodeMetadata,
    /// First ordinal; defaults to 1, or to the item count when reversed.
    pub start: Option<i32>,
    pub reversed: bool,
    pub marker: ListStyleType,
    pub items: Vec<ListItemNode>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListItemNode {
    pub meta: NodeMetadata,
    /// Explicit ordinal (`value` attribute); following items count on from it.
    pub ordinal: Option<i32>,
    /// Synthesized around raw list content; carries no visible marker and
    /// does not advance the counter.
    pub synthetic: bool,
    pub children: Vec<LayoutNode>,
}

impl ListItemNode {
    pub fn new(meta: NodeMetadata) -> Self {
        Self {
            meta,
            ..Default::default()
        }
    }

    pub fn synthetic(children: Vec<LayoutNode>) -> Self {
        Self {
            meta: NodeMetadata::anonymous(),
            ordinal: None,
            synthetic: true,
            children,
        }
    }
}

impl ListNode {
    pub fn new(meta: NodeMetadata) -> Self {
        Self {
            meta,
            ..Default::default()
        }
    }

    /// The ordinal each item displays; `None` for synthetic items. Counting
    /// saturates at the bounds of `i32`.
    pub fn ordinals(&self) -> Vec<Option<i32>> {
        let step = if self.reversed { -1 } else { 1 };
        let real = self.items.iter().filter(|i| !i.synthetic).count();
        let real = i32::try_from(real).unwrap_or(i32::MAX);
        let mut next = self
            .start
            .unwrap_or(if self.reversed { real } else { 1 });
        self.items
            .iter()
            .map(|item| {
                if item.synthetic {
                    return None;
                }
                let current = item.ordinal.unwrap_or(next);
                next = current.saturating_add(step);
                Some(current)
            })
            .collect()
    }
}
