mod common;

use common::{as_list, children, convert_markup, root, TestResult};
use quire::{LayoutNode, ListStyleType, Role};

fn item_texts(list: &quire::ListNode) -> Vec<String> {
    list.items
        .iter()
        .map(|item| item.children.iter().map(LayoutNode::text_content).collect())
        .collect()
}

#[test]
fn test_loose_text_becomes_a_synthetic_first_item() -> TestResult {
    let doc = convert_markup("<ul>text<li>item</li></ul>")?;
    let list = as_list(root(&doc));
    assert_eq!(list.items.len(), 2);
    assert!(list.items[0].synthetic);
    assert!(!list.items[1].synthetic);
    assert_eq!(item_texts(list), vec!["text", "item"]);
    assert_eq!(list.ordinals(), vec![None, Some(1)]);
    Ok(())
}

#[test]
fn test_blocks_between_items_stay_in_place() -> TestResult {
    let doc = convert_markup("<ul><li>a</li><p>note</p><li>b</li>tail</ul>")?;
    let list = as_list(root(&doc));
    let synthetic: Vec<bool> = list.items.iter().map(|item| item.synthetic).collect();
    assert_eq!(synthetic, vec![false, true, false, true]);
    assert_eq!(item_texts(list), vec!["a", "note", "b", "tail"]);
    Ok(())
}

#[test]
fn test_unordered_markers() -> TestResult {
    let doc = convert_markup(
        r#"<div><ul><li>a</li></ul><ul type="square"><li>b</li></ul><ul style="list-style-type: circle"><li>c</li></ul></div>"#,
    )?;
    let markers: Vec<ListStyleType> = children(root(&doc))
        .iter()
        .map(|node| as_list(node).marker)
        .collect();
    assert_eq!(
        markers,
        vec![ListStyleType::Disc, ListStyleType::Square, ListStyleType::Circle]
    );
    Ok(())
}

#[test]
fn test_ordered_list_numbering() -> TestResult {
    let doc = convert_markup(
        r#"<ol start="3" type="a"><li>a</li><li value="10">b</li><li>c</li></ol>"#,
    )?;
    let list = as_list(root(&doc));
    assert_eq!(list.marker, ListStyleType::LowerAlpha);
    assert_eq!(list.start, Some(3));
    assert_eq!(list.ordinals(), vec![Some(3), Some(10), Some(11)]);
    assert_eq!(list.meta.role, Some(Role::List));
    assert_eq!(list.items[0].meta.role, Some(Role::ListItem));
    Ok(())
}

#[test]
fn test_reversed_list_counts_down() -> TestResult {
    let doc = convert_markup(r#"<ol reversed="reversed"><li>a</li><li>b</li><li>c</li></ol>"#)?;
    let list = as_list(root(&doc));
    assert!(list.reversed);
    assert_eq!(list.marker, ListStyleType::Decimal);
    assert_eq!(list.ordinals(), vec![Some(3), Some(2), Some(1)]);
    Ok(())
}

#[test]
fn test_nested_lists_live_inside_items() -> TestResult {
    let doc = convert_markup("<ul><li>outer<ol><li>inner</li></ol></li></ul>")?;
    let list = as_list(root(&doc));
    assert_eq!(list.items.len(), 1);
    let item = &list.items[0];
    assert_kinds!(item.children, ["paragraph", "list"]);
    let nested = as_list(&item.children[1]);
    assert_eq!(nested.marker, ListStyleType::Decimal);
    assert_eq!(item_texts(nested), vec!["inner"]);
    Ok(())
}

#[test]
fn test_orphan_items_share_an_anonymous_list() -> TestResult {
    let doc = convert_markup("<div><li>a</li><li>b</li><p>after</p><li>c</li></div>")?;
    let parts = children(root(&doc));
    assert_kinds!(parts, ["list", "paragraph", "list"]);
    let first = as_list(&parts[0]);
    assert!(first.meta.anonymous);
    assert_eq!(item_texts(first), vec!["a", "b"]);
    assert_eq!(item_texts(as_list(&parts[2])), vec!["c"]);
    Ok(())
}

#[test]
fn test_cells_inside_a_list_get_a_table_item() -> TestResult {
    let doc = convert_markup("<ul><li>a</li><td>cell</td></ul>")?;
    let list = as_list(root(&doc));
    assert_eq!(list.items.len(), 2);
    assert!(list.items[1].synthetic);
    assert_kinds!(list.items[1].children, ["table"]);
    Ok(())
}

#[test]
fn test_numbering_stops_at_the_largest_ordinal() -> TestResult {
    let doc = convert_markup(r#"<ol start="2147483647"><li>a</li><li>b</li></ol>"#)?;
    let list = as_list(root(&doc));
    assert_eq!(list.ordinals(), vec![Some(i32::MAX), Some(i32::MAX)]);
    assert!(doc.outline().contains("list-item 2147483647"));
    Ok(())
}
