//! # quire-markup
//!
//! Reads well-formed XHTML with `roxmltree` and produces the depth-first
//! [`DocumentEvent`] stream the transformer consumes. Each element carries
//! its computed styles: the user-agent defaults, presentational attributes,
//! the inline `style` attribute, and inherited properties from its parent.
//! There is no selector matching; `<style>` sheets are ignored.

pub mod defaults;
pub mod error;

pub use defaults::user_agent_styles;
pub use error::MarkupError;

use quire_core::{DocumentEvent, Element};
use quire_style::parsers::parse_declarations;
use quire_style::{ComputedStyles, ListStyleType};
use roxmltree::Node;

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// Parses `markup` into document events, starting at its document element.
pub fn parse_events(markup: &str) -> Result<Vec<DocumentEvent>, MarkupError> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };
    let doc = roxmltree::Document::parse_with_options(markup, options)?;
    let mut events = Vec::new();
    emit(doc.root_element(), &ComputedStyles::new(), false, &mut events);
    log::debug!("Read {} document event(s)", events.len());
    Ok(events)
}

fn emit(
    node: Node<'_, '_>,
    parent: &ComputedStyles,
    in_svg: bool,
    events: &mut Vec<DocumentEvent>,
) {
    let tag = node.tag_name();
    let in_svg =
        in_svg || tag.namespace() == Some(SVG_NS) || tag.name().eq_ignore_ascii_case("svg");
    let element = build_element(node, parent, in_svg);
    let styles = element.styles.clone();
    events.push(DocumentEvent::Enter(element));
    for child in node.children() {
        if child.is_element() {
            emit(child, &styles, in_svg, events);
        } else if child.is_text() {
            if let Some(text) = child.text() {
                events.push(DocumentEvent::text(text));
            }
        }
    }
    events.push(DocumentEvent::Exit);
}

/// HTML names are case-insensitive and lowercased; SVG keeps its
/// camel-cased names (`viewBox`, `linearGradient`).
fn build_element(node: Node<'_, '_>, parent: &ComputedStyles, in_svg: bool) -> Element {
    let fold = |name: String| if in_svg { name } else { name.to_ascii_lowercase() };
    let name = fold(node.tag_name().name().to_string());
    let attributes = node
        .attributes()
        .map(|attr| {
            let attr_name = match attr.namespace() {
                Some(XML_NS) => format!("xml:{}", attr.name()),
                _ => attr.name().to_string(),
            };
            (fold(attr_name), attr.value().to_string())
        })
        .collect();

    let mut styles = if in_svg {
        ComputedStyles::new()
    } else {
        user_agent_styles(&name)
    };
    if !in_svg {
        presentational_hints(&name, node, &mut styles);
    }
    if let Some(css) = node.attribute("style") {
        for (property, value) in parse_declarations(css) {
            styles.set(&property, value);
        }
    }
    styles.inherit_from(parent);
    Element {
        name,
        attributes,
        styles,
    }
}

/// Attributes that map onto styles.
fn presentational_hints(name: &str, node: Node<'_, '_>, styles: &mut ComputedStyles) {
    if node.has_attribute("hidden") {
        styles.set("display", "none");
    }
    if matches!(name, "ol" | "ul" | "li") {
        if let Some(marker) = node.attribute("type").and_then(ListStyleType::from_html_type) {
            styles.set("list-style-type", marker.as_str());
        }
    }
}
