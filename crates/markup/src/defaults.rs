//! The user-agent default stylesheet: what an element looks like before any
//! author style is applied.

use quire_style::ComputedStyles;

const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "center", "dd", "details", "dialog", "dir",
    "div", "dl", "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3",
    "h4", "h5", "h6", "header", "hgroup", "hr", "legend", "main", "menu", "nav", "ol", "p",
    "pre", "section", "summary", "ul",
];

/// Default declarations for an HTML element.
pub fn user_agent_styles(name: &str) -> ComputedStyles {
    let mut styles = ComputedStyles::new();
    let display = match name {
        "li" => Some("list-item"),
        "table" => Some("table"),
        "thead" => Some("table-header-group"),
        "tbody" => Some("table-row-group"),
        "tfoot" => Some("table-footer-group"),
        "tr" => Some("table-row"),
        "td" | "th" => Some("table-cell"),
        "caption" => Some("table-caption"),
        "colgroup" => Some("table-column-group"),
        "col" => Some("table-column"),
        "button" | "select" | "textarea" => Some("inline-block"),
        "head" | "script" | "style" | "template" | "noscript" => Some("none"),
        name if BLOCK_ELEMENTS.contains(&name) => Some("block"),
        _ => None,
    };
    if let Some(display) = display {
        styles.set("display", display);
    }

    match name {
        "b" | "strong" | "th" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            styles.set("font-weight", "bold");
        }
        "i" | "em" | "cite" | "var" => {
            styles.set("font-style", "italic");
        }
        "u" | "ins" => {
            styles.set("text-decoration", "underline");
        }
        "pre" | "textarea" => {
            styles.set("white-space", "pre");
        }
        "ul" | "menu" | "dir" => {
            styles.set("list-style-type", "disc");
        }
        "ol" => {
            styles.set("list-style-type", "decimal");
        }
        _ => {}
    }
    styles
}
