//! Staging area for inline-level content.
//!
//! Text, line breaks and atomic inline nodes are buffered here until a block
//! boundary forces them into a container. White-space collapsing and
//! `text-transform` happen as content is added, with the collapse state
//! carried from one `add` to the next, so the result does not depend on how
//! the text was split into fragments.

use quire_nodes::{InlineNode, LayoutNode, ParagraphNode, TextRun};
use quire_style::{ComputedStyles, TextTransform, WhiteSpace};

#[derive(Debug, Clone, Default)]
pub struct InlineBuffer {
    white_space: WhiteSpace,
    transform: TextTransform,
    items: Vec<InlineNode>,
    /// Buffered content ends in a collapsible space or a forced break.
    trailing_space: bool,
    /// Last character added, for word boundaries of `capitalize`.
    last_char: Option<char>,
}

fn is_collapsible_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\u{000C}')
}

fn starts_word(previous: Option<char>) -> bool {
    previous.is_none_or(|p| !(p.is_alphanumeric() || p == '\'' || p == '\u{2019}'))
}

impl InlineBuffer {
    pub fn new(white_space: WhiteSpace, transform: TextTransform) -> Self {
        Self {
            white_space,
            transform,
            ..Default::default()
        }
    }

    pub fn for_styles(styles: &ComputedStyles) -> Self {
        Self::new(styles.white_space(), styles.text_transform())
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[InlineNode] {
        &self.items
    }

    /// Whether anything visible is buffered. Collapsible white space alone
    /// does not count.
    pub fn has_non_whitespace(&self) -> bool {
        self.items.iter().any(InlineNode::is_significant)
    }

    pub fn add_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.white_space.collapses_spaces() {
            self.add_collapsible(text);
        } else {
            self.add_preserved(text);
        }
    }

    fn add_collapsible(&mut self, text: &str) {
        let keep_newlines = self.white_space.preserves_newlines();
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            if c == '\n' && keep_newlines {
                let kept = out.trim_end_matches(' ').len();
                out.truncate(kept);
                self.push_run(std::mem::take(&mut out), true);
                self.add_line_break();
            } else if is_collapsible_space(c) {
                if !self.trailing_space {
                    out.push(' ');
                    self.trailing_space = true;
                }
                self.last_char = Some(' ');
            } else {
                self.push_transformed(&mut out, c);
                self.trailing_space = false;
            }
        }
        self.push_run(out, true);
    }

    fn add_preserved(&mut self, text: &str) {
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                self.add_line_break();
            }
            let mut out = String::with_capacity(line.len());
            for c in line.chars().filter(|c| *c != '\r') {
                self.push_transformed(&mut out, c);
            }
            self.push_run(out, false);
        }
        self.trailing_space = false;
    }

    fn push_transformed(&mut self, out: &mut String, c: char) {
        match self.transform {
            TextTransform::None => out.push(c),
            TextTransform::Uppercase => out.extend(c.to_uppercase()),
            TextTransform::Lowercase => out.extend(c.to_lowercase()),
            TextTransform::Capitalize if starts_word(self.last_char) => {
                out.extend(c.to_uppercase())
            }
            TextTransform::Capitalize => out.push(c),
        }
        self.last_char = Some(c);
    }

    fn push_run(&mut self, text: String, collapsible: bool) {
        if text.is_empty() {
            return;
        }
        self.items.push(InlineNode::Text(TextRun {
            text,
            collapsible,
            ..Default::default()
        }));
    }

    /// Adds a leaf produced elsewhere (by an inline element's own buffer).
    /// A leading space is collapsed against a trailing space already here.
    pub fn add_leaf(&mut self, leaf: InlineNode) {
        match leaf {
            InlineNode::Text(mut run) => {
                if run.collapsible && self.trailing_space && run.text.starts_with(' ') {
                    run.text.remove(0);
                }
                if run.text.is_empty() {
                    return;
                }
                self.trailing_space = run.collapsible && run.text.ends_with(' ');
                self.last_char = run.text.chars().last();
                self.items.push(InlineNode::Text(run));
            }
            InlineNode::LineBreak => self.add_line_break(),
            InlineNode::Atomic(node) => self.add_atomic(*node),
        }
    }

    pub fn add_line_break(&mut self) {
        self.items.push(InlineNode::LineBreak);
        self.trailing_space = true;
        self.last_char = None;
    }

    pub fn add_atomic(&mut self, node: LayoutNode) {
        self.items.push(InlineNode::atomic(node));
        self.trailing_space = false;
        self.last_char = None;
    }

    /// Moves the buffered run into `container` as one anonymous paragraph.
    /// Does nothing (apart from discarding white space) when nothing visible
    /// is buffered. Returns whether a paragraph was appended.
    pub fn flush_into(&mut self, container: &mut Vec<LayoutNode>) -> bool {
        if !self.has_non_whitespace() {
            self.clear();
            return false;
        }
        let items = self.take_trimmed();
        container.push(ParagraphNode::anonymous(items).into());
        true
    }

    /// Like `flush_into`, but appends the run to an existing paragraph.
    pub fn flush_into_paragraph(&mut self, children: &mut Vec<InlineNode>) -> bool {
        if !self.has_non_whitespace() {
            self.clear();
            return false;
        }
        let items = self.take_trimmed();
        children.extend(items);
        true
    }

    /// Hands the buffered leaves over untrimmed, for a parent buffer to
    /// continue collapsing across the element boundary.
    pub fn take_leaves(&mut self) -> Vec<InlineNode> {
        let items = std::mem::take(&mut self.items);
        self.clear();
        items
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.trailing_space = false;
        self.last_char = None;
    }

    fn take_trimmed(&mut self) -> Vec<InlineNode> {
        let items = std::mem::take(&mut self.items);
        self.clear();
        trim_line_edges(items)
    }
}

/// Removes collapsible spaces at the start and end of the run and around
/// forced line breaks, dropping runs that end up empty.
fn trim_line_edges(items: Vec<InlineNode>) -> Vec<InlineNode> {
    let mut out = Vec::with_capacity(items.len());
    let mut at_line_start = true;
    for item in items {
        match item {
            InlineNode::Text(mut run) if run.collapsible => {
                if at_line_start {
                    run.text = run.text.trim_start_matches(' ').to_string();
                }
                if run.text.is_empty() {
                    continue;
                }
                at_line_start = false;
                out.push(InlineNode::Text(run));
            }
            InlineNode::LineBreak => {
                trim_trailing(&mut out);
                out.push(InlineNode::LineBreak);
                at_line_start = true;
            }
            other => {
                at_line_start = false;
                out.push(other);
            }
        }
    }
    trim_trailing(&mut out);
    out
}

fn trim_trailing(out: &mut Vec<InlineNode>) {
    while let Some(InlineNode::Text(run)) = out.last_mut() {
        if !run.collapsible {
            break;
        }
        let kept = run.text.trim_end_matches(' ').len();
        run.text.truncate(kept);
        if !run.text.is_empty() {
            break;
        }
        out.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_nodes::NodeMetadata;

    fn texts(items: &[InlineNode]) -> Vec<String> {
        items.iter().map(InlineNode::text_content).collect()
    }

    fn flushed(buffer: &mut InlineBuffer) -> Vec<InlineNode> {
        let mut container = Vec::new();
        assert!(buffer.flush_into(&mut container));
        match container.pop() {
            Some(LayoutNode::Paragraph(p)) => {
                assert!(p.meta.anonymous);
                p.children
            }
            other => panic!("expected paragraph, got {:?}", other),
        }
    }

    #[test]
    fn flush_preserves_order_across_sources() {
        let mut buffer = InlineBuffer::default();
        buffer.add_text("one ");
        buffer.add_leaf(InlineNode::text("two"));
        buffer.add_atomic(LayoutNode::paragraph(NodeMetadata::default()));
        buffer.add_text(" three");
        let items = flushed(&mut buffer);
        assert_eq!(items.len(), 4);
        assert_eq!(texts(&items), vec!["one ", "two", "", " three"]);
        assert!(matches!(items[2], InlineNode::Atomic(_)));
    }

    #[test]
    fn whitespace_only_flush_is_a_noop() {
        let mut buffer = InlineBuffer::default();
        buffer.add_text("  \n\t ");
        buffer.add_leaf(InlineNode::text(" "));
        let mut container = Vec::new();
        assert!(!buffer.flush_into(&mut container));
        assert!(container.is_empty());
        assert!(buffer.is_empty());
    }

    #[test]
    fn collapsing_continues_across_adds() {
        let mut buffer = InlineBuffer::default();
        buffer.add_text("  a  ");
        buffer.add_text("  b\n\n");
        buffer.add_text("c ");
        let items = flushed(&mut buffer);
        let joined: String = texts(&items).concat();
        assert_eq!(joined, "a b c");
    }

    #[test]
    fn leaf_leading_space_collapses_against_buffer() {
        let mut buffer = InlineBuffer::default();
        buffer.add_text("A ");
        buffer.add_leaf(InlineNode::text(" bold "));
        buffer.add_text(" B");
        let items = flushed(&mut buffer);
        assert_eq!(texts(&items), vec!["A ", "bold ", "B"]);
    }

    #[test]
    fn flushing_twice_does_not_duplicate() {
        let mut buffer = InlineBuffer::default();
        buffer.add_text("once");
        let mut container = Vec::new();
        assert!(buffer.flush_into(&mut container));
        assert!(!buffer.flush_into(&mut container));
        assert_eq!(container.len(), 1);
    }

    #[test]
    fn preformatted_text_keeps_spaces_and_breaks() {
        let mut buffer = InlineBuffer::new(WhiteSpace::Pre, TextTransform::None);
        buffer.add_text("  a  b\r\n c");
        let items = flushed(&mut buffer);
        assert_eq!(texts(&items), vec!["  a  b", "\n", " c"]);
        assert!(items.iter().all(|i| match i {
            InlineNode::Text(run) => !run.collapsible,
            _ => true,
        }));
    }

    #[test]
    fn pre_line_keeps_breaks_but_collapses_spaces() {
        let mut buffer = InlineBuffer::new(WhiteSpace::PreLine, TextTransform::None);
        buffer.add_text("a   b  \n   c");
        let items = flushed(&mut buffer);
        assert_eq!(texts(&items), vec!["a b", "\n", "c"]);
    }

    #[test]
    fn preserved_whitespace_counts_as_content() {
        let mut buffer = InlineBuffer::new(WhiteSpace::Pre, TextTransform::None);
        buffer.add_text("   ");
        assert!(buffer.has_non_whitespace());
    }

    #[test]
    fn text_transform_applies_at_add_time() {
        let mut upper = InlineBuffer::new(WhiteSpace::Normal, TextTransform::Uppercase);
        upper.add_text("straße");
        assert_eq!(texts(upper.items()), vec!["STRASSE"]);

        let mut capitalized = InlineBuffer::new(WhiteSpace::Normal, TextTransform::Capitalize);
        capitalized.add_text("hello wor");
        capitalized.add_text("ld it's (new)");
        assert_eq!(texts(capitalized.items()).concat(), "Hello World It's (New)");
    }

    #[test]
    fn take_leaves_is_untrimmed() {
        let mut buffer = InlineBuffer::default();
        buffer.add_text(" x ");
        assert_eq!(texts(&buffer.take_leaves()), vec![" x "]);
        assert!(buffer.is_empty());
    }
}
