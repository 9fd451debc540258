use quire_style::ElementStyle;
use std::fmt;

/// A string type for the layout tree.
pub type TextStr = String;

/// Accessible structure role, used when the output is tagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Document,
    Division,
    Paragraph,
    Heading(u8),
    Table,
    TableRow,
    TableCell,
    TableHeaderCell,
    Caption,
    List,
    ListItem,
    Figure,
    Link,
    Form,
    Artifact,
}

impl Role {
    /// The standard structure type name for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Document => "Document",
            Role::Division => "Div",
            Role::Paragraph => "P",
            Role::Heading(1) => "H1",
            Role::Heading(2) => "H2",
            Role::Heading(3) => "H3",
            Role::Heading(4) => "H4",
            Role::Heading(5) => "H5",
            Role::Heading(6) => "H6",
            Role::Heading(_) => "H",
            Role::Table => "Table",
            Role::TableRow => "TR",
            Role::TableCell => "TD",
            Role::TableHeaderCell => "TH",
            Role::Caption => "Caption",
            Role::List => "L",
            Role::ListItem => "LI",
            Role::Figure => "Figure",
            Role::Link => "Link",
            Role::Form => "Form",
            Role::Artifact => "Artifact",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A common metadata structure for all block-level `LayoutNode`s.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeMetadata {
    pub id: Option<TextStr>,
    pub lang: Option<TextStr>,
    pub role: Option<Role>,
    pub style: ElementStyle,
    /// Synthesized by the transformation rather than declared in markup.
    pub anonymous: bool,
}

impl NodeMetadata {
    pub fn anonymous() -> Self {
        Self {
            anonymous: true,
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: Option<TextStr>) -> Self {
        self.id = id;
        self
    }
}

/// A common metadata structure for all inline text runs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InlineMetadata {
    pub id: Option<TextStr>,
    pub lang: Option<TextStr>,
    /// Hyperlink target of the enclosing anchor, if any.
    pub link: Option<TextStr>,
    pub style: ElementStyle,
}
