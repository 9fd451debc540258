mod common;

use common::{as_paragraph, children, convert_markup, form_fields, init_logger, root, TestResult};
use quire::{FormFieldConfig, FormFieldKind, InlineNode, TransformConfig};

#[test]
fn test_controls_sit_on_the_line() -> TestResult {
    let doc = convert_markup(
        r#"<p>Name: <input name="name" size="20"/> <input type="checkbox" name="ok" checked="checked"/></p>"#,
    )?;
    let paragraph = as_paragraph(root(&doc));
    let atomic = paragraph
        .children
        .iter()
        .filter(|leaf| matches!(leaf, InlineNode::Atomic(_)))
        .count();
    assert_eq!(atomic, 2);

    let fields = form_fields(&doc);
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].kind, FormFieldKind::Text);
    assert_eq!(fields[0].name, "name");
    assert_eq!(fields[0].cols, Some(20));
    assert_eq!(fields[1].kind, FormFieldKind::Checkbox);
    assert!(fields[1].checked);
    Ok(())
}

#[test]
fn test_block_display_places_a_control_as_a_block() -> TestResult {
    let doc = convert_markup(r#"<form><input name="q" style="display: block"/>after</form>"#)?;
    assert_kinds!(children(root(&doc)), ["form-field", "paragraph"]);
    Ok(())
}

#[test]
fn test_field_names_are_unique() -> TestResult {
    init_logger();
    let config = TransformConfig {
        form_fields: FormFieldConfig {
            unnamed_prefix: "input".into(),
        },
        ..Default::default()
    };
    let doc = quire::convert(
        r#"<div><input name="email"/><input name="email"/><input/><input type="password"/><input type="hidden" name="token"/></div>"#,
        config,
    )?;
    let names: Vec<&str> = form_fields(&doc).iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["email", "email_1", "input", "input_1"]);
    Ok(())
}

#[test]
fn test_radio_buttons_share_a_group() -> TestResult {
    let doc = convert_markup(
        r#"<div><input type="radio" name="size" value="s"/><input type="radio" name="size" value="m" checked="checked"/><input type="radio" name="color"/></div>"#,
    )?;
    let fields = form_fields(&doc);
    assert_eq!(fields.len(), 3);
    assert_eq!(fields[0].name, fields[1].name);
    assert_ne!(fields[1].name, fields[2].name);
    assert!(!fields[0].checked && fields[1].checked);
    assert_eq!(fields[1].value.as_deref(), Some("m"));
    Ok(())
}

#[test]
fn test_buttons() -> TestResult {
    let doc = convert_markup(
        r#"<div><input type="submit"/><input type="reset" value="Clear"/><button type="button" name="go">Go <b>now</b></button></div>"#,
    )?;
    let fields = form_fields(&doc);
    let kinds: Vec<FormFieldKind> = fields.iter().map(|f| f.kind).collect();
    assert_eq!(
        kinds,
        vec![FormFieldKind::Submit, FormFieldKind::Reset, FormFieldKind::Button]
    );
    assert_eq!(fields[0].value.as_deref(), Some("Submit"));
    assert_eq!(fields[1].value.as_deref(), Some("Clear"));
    let content: String = fields[2].content.iter().map(|n| n.text_content()).collect();
    assert_eq!(content, "Go now");
    Ok(())
}

#[test]
fn test_text_area_takes_its_text_as_value() -> TestResult {
    let doc = convert_markup(
        "<div><textarea name=\"notes\" rows=\"4\" cols=\"30\">\nfirst line\nsecond</textarea></div>",
    )?;
    let fields = form_fields(&doc);
    assert_eq!(fields[0].kind, FormFieldKind::TextArea);
    assert_eq!(fields[0].value.as_deref(), Some("first line\nsecond"));
    assert_eq!(fields[0].rows, Some(4));
    assert_eq!(fields[0].cols, Some(30));
    Ok(())
}

#[test]
fn test_select_collects_options() -> TestResult {
    let doc = convert_markup(
        r#"<div><select name="fruit">
            <option value="a">Apple</option>
            <optgroup label="Citrus"><option selected="selected">Lemon</option><option disabled="disabled">Lime</option></optgroup>
            <option selected="selected" label="Kiwi fruit">kiwi</option>
        </select></div>"#,
    )?;
    let field = form_fields(&doc)[0];
    assert_eq!(field.kind, FormFieldKind::ComboBox);
    let labels: Vec<&str> = field.options.iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, vec!["Apple", "Lemon", "Lime", "Kiwi fruit"]);
    let values: Vec<&str> = field.options.iter().map(|o| o.value.as_str()).collect();
    assert_eq!(values, vec!["a", "Lemon", "Lime", "kiwi"]);
    assert_eq!(field.options[1].group.as_deref(), Some("Citrus"));
    assert!(field.options[2].disabled);
    assert_eq!(field.selected_values(), vec!["kiwi"]);
    Ok(())
}

#[test]
fn test_multiple_select_is_a_list_box() -> TestResult {
    let doc = convert_markup(
        r#"<div><select name="tags" multiple="multiple" size="3"><option selected="selected">x</option><option selected="selected">y</option></select></div>"#,
    )?;
    let field = form_fields(&doc)[0];
    assert_eq!(field.kind, FormFieldKind::ListBox);
    assert_eq!(field.rows, Some(3));
    assert_eq!(field.selected_values(), vec!["x", "y"]);
    Ok(())
}
