mod common;

use common::{as_paragraph, children, convert_markup, init_logger, root, TestResult};
use quire::{
    BreakKind, CollectingSink, ImageSource, InMemoryImageResolver, InlineNode, LayoutNode,
    QuireError, Role, Size, TransformConfig, Transformer,
};
use std::sync::Arc;

#[test]
fn test_inline_runs_around_a_block_become_anonymous_paragraphs() -> TestResult {
    let doc = convert_markup("<div>A<b>bold</b><p>para</p>B</div>")?;
    let div = root(&doc);
    assert_eq!(div.kind(), "block");

    let parts = children(div);
    assert_kinds!(parts, ["paragraph", "paragraph", "paragraph"]);
    assert!(parts[0].is_anonymous());
    assert!(!parts[1].is_anonymous());
    assert!(parts[2].is_anonymous());

    let texts: Vec<String> = parts.iter().map(LayoutNode::text_content).collect();
    assert_eq!(texts, vec!["Abold", "para", "B"]);

    let run = as_paragraph(&parts[0]);
    assert_eq!(run.children.len(), 2);
    match &run.children[1] {
        InlineNode::Text(text) => {
            assert_eq!(text.text, "bold");
            assert_eq!(text.meta.style.font_weight, Some(quire::FontWeight::Bold));
        }
        other => panic!("Expected text, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_white_space_collapses_across_elements() -> TestResult {
    let doc = convert_markup("<p>  one   <i> two </i>  three  </p>")?;
    assert_eq!(doc.text_content(), "one two three");
    Ok(())
}

#[test]
fn test_preformatted_text_keeps_spaces_and_breaks() -> TestResult {
    let doc = convert_markup("<div><pre>a  b\nc</pre></div>")?;
    let pre = &children(root(&doc))[0];
    assert_eq!(pre.text_content(), "a  b\nc");
    Ok(())
}

#[test]
fn test_line_break_element() -> TestResult {
    let doc = convert_markup("<p>first<br/>second</p>")?;
    let paragraph = as_paragraph(root(&doc));
    assert!(paragraph.children.contains(&InlineNode::LineBreak));
    assert_eq!(doc.text_content(), "first\nsecond");
    Ok(())
}

#[test]
fn test_headings_carry_their_level() -> TestResult {
    let doc = convert_markup("<div><h2 id=\"intro\">Intro</h2><p>Body</p></div>")?;
    let parts = children(root(&doc));
    let heading = parts[0].meta().ok_or("heading without metadata")?;
    assert_eq!(heading.role, Some(Role::Heading(2)));
    assert_eq!(heading.id.as_deref(), Some("intro"));
    assert_eq!(parts[1].meta().and_then(|m| m.role), Some(Role::Paragraph));
    Ok(())
}

#[test]
fn test_forced_breaks_become_area_breaks() -> TestResult {
    let doc = convert_markup(
        r#"<div><p>one</p><p style="break-before: page">two</p><p style="page-break-after: right">three</p></div>"#,
    )?;
    let parts = children(root(&doc));
    assert_kinds!(parts, ["paragraph", "area-break", "paragraph", "paragraph", "area-break"]);
    assert_eq!(parts[1], LayoutNode::area_break(BreakKind::Page));
    assert_eq!(parts[4], LayoutNode::area_break(BreakKind::Right));
    Ok(())
}

#[test]
fn test_hidden_and_metadata_content_is_dropped() -> TestResult {
    let doc = convert_markup(
        r#"<html lang="en"><head><title>Quarterly  report</title><style>p { color: red }</style></head><body><p hidden="">secret</p><p style="display: none">also secret</p><p>shown</p></body></html>"#,
    )?;
    assert_eq!(doc.title.as_deref(), Some("Quarterly report"));
    assert_eq!(doc.lang.as_deref(), Some("en"));
    assert_eq!(doc.text_content(), "shown");
    Ok(())
}

#[test]
fn test_default_lang_applies_without_declaration() -> TestResult {
    init_logger();
    let config = TransformConfig {
        default_lang: Some("de".into()),
        ..Default::default()
    };
    let doc = quire::convert("<div><p>Hallo</p></div>", config)?;
    assert_eq!(doc.lang.as_deref(), Some("de"));
    Ok(())
}

#[test]
fn test_display_contents_element_leaves_no_box() -> TestResult {
    let doc =
        convert_markup(r#"<div><section style="display: contents"><p>inner</p></section></div>"#)?;
    assert_kinds!(children(root(&doc)), ["paragraph"]);
    Ok(())
}

#[test]
fn test_multi_column_container() -> TestResult {
    let doc = convert_markup(r#"<div style="column-count: 2"><p>a</p><p>b</p></div>"#)?;
    assert_outline_contains!(doc, "multi-column(2)");
    Ok(())
}

#[test]
fn test_anchor_links_resolve_against_base_uri() -> TestResult {
    init_logger();
    let builder = Transformer::builder()
        .with_config_json(r#"{"baseUri": "https://example.com/docs", "tagged": false}"#)?;
    let doc = quire::convert_with(
        r##"<p>See <a href="page.html">the <b>page</b></a> or <a href="#top">top</a></p>"##,
        builder,
    )?;
    let paragraph = as_paragraph(root(&doc));
    assert_eq!(paragraph.meta.role, None);
    let links: Vec<Option<&str>> = paragraph
        .children
        .iter()
        .filter_map(|leaf| match leaf {
            InlineNode::Text(run) => Some(run.meta.link.as_deref()),
            _ => None,
        })
        .collect();
    assert_eq!(
        links,
        vec![
            None,
            Some("https://example.com/docs/page.html"),
            Some("https://example.com/docs/page.html"),
            None,
            Some("#top"),
        ]
    );
    Ok(())
}

#[test]
fn test_images_are_sized_in_points() -> TestResult {
    init_logger();
    let resolver = InMemoryImageResolver::new();
    resolver.add("logo.png", vec![0x89, 0x50], 400.0, 200.0)?;
    let builder = Transformer::builder().with_image_resolver(Arc::new(resolver));
    let doc = quire::convert_with(
        r#"<div><img src="logo.png" alt="Logo" width="200"/><img src="logo.png" style="display: block"/><img src="missing.png"/></div>"#,
        builder,
    )?;
    let parts = children(root(&doc));
    assert_kinds!(parts, ["paragraph", "image"]);

    let line = as_paragraph(&parts[0]);
    let inline_image = match line.children.as_slice() {
        [InlineNode::Atomic(node)] => match node.as_ref() {
            LayoutNode::Image(image) => image,
            other => panic!("Expected image, got {}", other.outline()),
        },
        other => panic!("Expected one atomic leaf, got {:?}", other),
    };
    assert_eq!(inline_image.alt.as_deref(), Some("Logo"));
    assert_eq!(inline_image.source, ImageSource::Url("logo.png".into()));
    assert_eq!(inline_image.intrinsic, Size::new(150.0, 75.0));

    match &parts[1] {
        LayoutNode::Image(image) => assert_eq!(image.intrinsic, Size::new(300.0, 150.0)),
        other => panic!("Expected image, got {}", other.outline()),
    }
    Ok(())
}

#[test]
fn test_inline_svg_is_serialized() -> TestResult {
    let doc = convert_markup(
        r#"<div><svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 40 20"><rect width="4" height="2"/></svg></div>"#,
    )?;
    assert_outline_contains!(doc, "<image>");
    let line = as_paragraph(&children(root(&doc))[0]);
    let Some(InlineNode::Atomic(node)) = line.children.first() else {
        panic!("Expected an atomic leaf in {:?}", line);
    };
    match node.as_ref() {
        LayoutNode::Image(image) => {
            let ImageSource::InlineSvg(markup) = &image.source else {
                panic!("Expected inline svg, got {:?}", image.source);
            };
            assert!(markup.starts_with("<svg"));
            assert!(markup.contains("<rect"));
            assert!(markup.ends_with("</svg>"));
        }
        other => panic!("Expected image, got {}", other.outline()),
    }
    Ok(())
}

#[test]
fn test_immediate_flush_streams_top_level_blocks() -> TestResult {
    init_logger();
    let mut sink = CollectingSink::new();
    let builder = Transformer::builder()
        .with_config(TransformConfig {
            immediate_flush: true,
            ..Default::default()
        })
        .with_sink(&mut sink);
    let doc = quire::convert_with("<body><p>one</p><div>two</div>tail</body>", builder)?;
    assert!(doc.children.is_empty());
    let texts: Vec<String> = sink.nodes.iter().map(LayoutNode::text_content).collect();
    assert_eq!(texts, vec!["one", "two", "tail"]);
    Ok(())
}

#[test]
fn test_malformed_markup_is_reported() {
    init_logger();
    let result = convert_markup("<div><p>unclosed</div>");
    assert!(matches!(result, Err(QuireError::Markup(_))));
}

#[test]
fn test_malformed_config_is_reported() {
    init_logger();
    assert!(Transformer::builder().with_config_json("{ not json").is_err());
}
