use crate::meta::{NodeMetadata, TextStr};
use crate::node::LayoutNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormFieldKind {
    Text,
    Password,
    Checkbox,
    Radio,
    Button,
    Submit,
    Reset,
    /// A drop-down choice (`select` without `multiple` or `size`).
    ComboBox,
    /// A scrolling choice list (`select multiple` or `size > 1`).
    ListBox,
    TextArea,
}

impl FormFieldKind {
    pub fn is_button(self) -> bool {
        matches!(
            self,
            FormFieldKind::Button | FormFieldKind::Submit | FormFieldKind::Reset
        )
    }

    pub fn is_choice(self) -> bool {
        matches!(self, FormFieldKind::ComboBox | FormFieldKind::ListBox)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectOption {
    pub label: TextStr,
    pub value: TextStr,
    pub selected: bool,
    pub disabled: bool,
    /// Label of the enclosing `optgroup`, if any.
    pub group: Option<TextStr>,
}

/// A placeholder for an interactive form control.
#[derive(Debug, Clone, PartialEq)]
pub struct FormFieldNode {
    pub meta: NodeMetadata,
    /// Document-unique field name.
    pub name: TextStr,
    pub kind: FormFieldKind,
    pub value: Option<TextStr>,
    pub checked: bool,
    pub placeholder: Option<TextStr>,
    pub options: Vec<SelectOption>,
    /// Visible rows (`size` of a list box, `rows` of a text area).
    pub rows: Option<u32>,
    /// Visible columns (`size` of a text input, `cols` of a text area).
    pub cols: Option<u32>,
    pub max_length: Option<u32>,
    pub read_only: bool,
    pub disabled: bool,
    pub required: bool,
    /// Rendered content of a `button` element.
    pub content: Vec<LayoutNode>,
}

impl FormFieldNode {
    pub fn new(kind: FormFieldKind, name: impl Into<TextStr>, meta: NodeMetadata) -> Self {
        Self {
            meta,
            name: name.into(),
            kind,
            value: None,
            checked: false,
            placeholder: None,
            options: Vec::new(),
            rows: None,
            cols: None,
            max_length: None,
            read_only: false,
            disabled: false,
            required: false,
            content: Vec::new(),
        }
    }

    /// Values of the selected options; the first enabled option when a
    /// single-choice field has nothing selected.
    pub fn selected_values(&self) -> Vec<&str> {
        let selected: Vec<&str> = self
            .options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.value.as_str())
            .collect();
        if !selected.is_empty() || self.kind != FormFieldKind::ComboBox {
            return selected;
        }
        self.options
            .iter()
            .find(|o| !o.disabled)
            .map(|o| vec![o.value.as_str()])
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(value: &str, selected: bool) -> SelectOption {
        SelectOption {
            label: value.to_uppercase(),
            value: value.to_string(),
            selected,
            ..Default::default()
        }
    }

    #[test]
    fn combo_box_defaults_to_first_option() {
        let mut field = FormFieldNode::new(FormFieldKind::ComboBox, "f", NodeMetadata::default());
        field.options = vec![option("a", false), option("b", false)];
        assert_eq!(field.selected_values(), vec!["a"]);
        field.options[1].selected = true;
        assert_eq!(field.selected_values(), vec!["b"]);

        field.kind = FormFieldKind::ListBox;
        field.options[1].selected = false;
        assert!(field.selected_values().is_empty());
    }
}
