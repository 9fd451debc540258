//! Interactive form controls. Each control becomes one `FormField`
//! placeholder with a document-unique name.

use super::{collapse_whitespace, node_meta, ElementWorker, Shell};
use crate::block::BlockContent;
use crate::context::{ProcessorContext, StackFrame};
use crate::dispatch::{ChildResult, Contribution, ControlKind, RunMember};
use crate::element::Element;
use quire_nodes::{FormFieldKind, FormFieldNode, InlineNode, LayoutNode, Role, SelectOption};
use quire_style::Display;
use quire_traits::{ApplyPhase, ApplyTarget};

/// Attributes shared by every text-entry control.
fn apply_common(field: &mut FormFieldNode, element: &Element) {
    field.placeholder = element.attr_text("placeholder");
    field.max_length = element.parse_attr("maxlength");
    field.read_only = element.has_attr("readonly");
    field.disabled = element.has_attr("disabled");
    field.required = element.has_attr("required");
}

fn field_node(field: FormFieldNode) -> LayoutNode {
    LayoutNode::FormField(field)
}

fn field_mut(shell: &mut Shell) -> Option<&mut FormFieldNode> {
    match shell.node_mut() {
        Some(LayoutNode::FormField(field)) => Some(field),
        _ => None,
    }
}

/// `None` for `type="hidden"`, which never produces a field.
fn input_kind(element: &Element) -> Option<FormFieldKind> {
    let raw = element.attr_text("type").unwrap_or_default().to_ascii_lowercase();
    let kind = match raw.as_str() {
        "" | "text" | "search" | "email" | "url" | "tel" | "number" | "date"
        | "datetime-local" | "month" | "week" | "time" | "color" | "range" => FormFieldKind::Text,
        "password" => FormFieldKind::Password,
        "checkbox" => FormFieldKind::Checkbox,
        "radio" => FormFieldKind::Radio,
        "submit" | "image" => FormFieldKind::Submit,
        "reset" => FormFieldKind::Reset,
        "button" => FormFieldKind::Button,
        "hidden" => return None,
        other => {
            log::warn!("Unsupported input type \"{}\"; treating it as text", other);
            FormFieldKind::Text
        }
    };
    Some(kind)
}

/// `input`.
#[derive(Debug)]
pub struct InputWorker {
    shell: Shell,
}

impl InputWorker {
    pub fn new(element: &Element, ctx: &mut ProcessorContext) -> Self {
        let Some(kind) = input_kind(element) else {
            log::trace!("Hidden input contributes nothing");
            return Self {
                shell: Shell::empty(element).with_control(ControlKind::Input),
            };
        };
        let requested = element.attr("name");
        let name = match kind {
            FormFieldKind::Radio => ctx.names.radio_group(requested),
            _ => ctx.names.allocate(requested),
        };
        let mut field = FormFieldNode::new(kind, name, node_meta(element, Role::Form, ctx));
        apply_common(&mut field, element);
        field.value = element.attr("value").map(str::to_string).or(match kind {
            FormFieldKind::Submit => Some("Submit".to_string()),
            FormFieldKind::Reset => Some("Reset".to_string()),
            _ => None,
        });
        match kind {
            FormFieldKind::Checkbox | FormFieldKind::Radio => {
                field.checked = element.has_attr("checked");
            }
            FormFieldKind::Text | FormFieldKind::Password => {
                field.cols = element.parse_attr("size");
            }
            _ => {}
        }
        Self {
            shell: Shell::new(field_node(field), element).with_control(ControlKind::Input),
        }
    }
}

impl ElementWorker for InputWorker {
    fn display(&self) -> Display {
        self.shell.display()
    }

    fn accept_text(&mut self, _text: &str, _ctx: &mut ProcessorContext) -> bool {
        false
    }

    fn accept_child(&mut self, _child: ChildResult, _ctx: &mut ProcessorContext) -> bool {
        false
    }

    fn end(&mut self, _element: &Element, _ctx: &mut ProcessorContext) {}

    fn result(&self) -> Option<&LayoutNode> {
        self.shell.node()
    }

    fn style_target(&mut self, _phase: ApplyPhase) -> Option<ApplyTarget<'_>> {
        self.shell.style_target()
    }

    fn take_result(&mut self) -> ChildResult {
        self.shell.take()
    }
}

/// `textarea`: its raw text is the initial value.
#[derive(Debug)]
pub struct TextAreaWorker {
    shell: Shell,
    text: String,
}

impl TextAreaWorker {
    pub fn new(element: &Element, ctx: &mut ProcessorContext) -> Self {
        let name = ctx.names.allocate(element.attr("name"));
        let meta = node_meta(element, Role::Form, ctx);
        let mut field = FormFieldNode::new(FormFieldKind::TextArea, name, meta);
        apply_common(&mut field, element);
        field.rows = element.parse_attr("rows");
        field.cols = element.parse_attr("cols");
        Self {
            shell: Shell::new(field_node(field), element).with_control(ControlKind::TextArea),
            text: String::new(),
        }
    }
}

impl ElementWorker for TextAreaWorker {
    fn display(&self) -> Display {
        self.shell.display()
    }

    fn accept_text(&mut self, text: &str, _ctx: &mut ProcessorContext) -> bool {
        self.text.push_str(text);
        true
    }

    fn accept_child(&mut self, _child: ChildResult, _ctx: &mut ProcessorContext) -> bool {
        false
    }

    fn end(&mut self, _element: &Element, _ctx: &mut ProcessorContext) {
        let Some(field) = field_mut(&mut self.shell) else {
            return;
        };
        if field.value.is_some() {
            return;
        }
        let text = std::mem::take(&mut self.text);
        let text = text
            .strip_prefix("\r\n")
            .or_else(|| text.strip_prefix('\n'))
            .unwrap_or(&text);
        if !text.is_empty() {
            field.value = Some(text.to_string());
        }
    }

    fn result(&self) -> Option<&LayoutNode> {
        self.shell.node()
    }

    fn style_target(&mut self, _phase: ApplyPhase) -> Option<ApplyTarget<'_>> {
        self.shell.style_target()
    }

    fn take_result(&mut self) -> ChildResult {
        self.shell.take()
    }
}

/// `select`. Collects the options of its `option`/`optgroup` children.
#[derive(Debug)]
pub struct SelectWorker {
    shell: Shell,
}

impl SelectWorker {
    pub fn new(element: &Element, ctx: &mut ProcessorContext) -> Self {
        let size: Option<u32> = element.parse_attr("size");
        let list_box = element.has_attr("multiple") || size.is_some_and(|s| s > 1);
        let kind = if list_box {
            FormFieldKind::ListBox
        } else {
            FormFieldKind::ComboBox
        };
        let name = ctx.names.allocate(element.attr("name"));
        let mut field = FormFieldNode::new(kind, name, node_meta(element, Role::Form, ctx));
        field.disabled = element.has_attr("disabled");
        field.required = element.has_attr("required");
        if list_box {
            field.rows = size;
        }
        Self {
            shell: Shell::new(field_node(field), element).with_control(ControlKind::Select),
        }
    }
}

impl ElementWorker for SelectWorker {
    fn display(&self) -> Display {
        self.shell.display()
    }

    fn child_frame(&self, _frame: &StackFrame) -> StackFrame {
        StackFrame::select()
    }

    fn accept_text(&mut self, text: &str, _ctx: &mut ProcessorContext) -> bool {
        text.trim().is_empty()
    }

    fn accept_child(&mut self, child: ChildResult, _ctx: &mut ProcessorContext) -> bool {
        let Contribution::Choice(options) = child.content else {
            return false;
        };
        match field_mut(&mut self.shell) {
            Some(field) => {
                field.options.extend(options);
                true
            }
            None => false,
        }
    }

    fn end(&mut self, _element: &Element, _ctx: &mut ProcessorContext) {
        let Some(field) = field_mut(&mut self.shell) else {
            return;
        };
        if field.kind != FormFieldKind::ComboBox {
            return;
        }
        // A drop-down shows one value: the last selected option wins.
        if let Some(last) = field.options.iter().rposition(|o| o.selected) {
            for (i, option) in field.options.iter_mut().enumerate() {
                option.selected = i == last;
            }
        }
    }

    fn result(&self) -> Option<&LayoutNode> {
        self.shell.node()
    }

    fn style_target(&mut self, _phase: ApplyPhase) -> Option<ApplyTarget<'_>> {
        self.shell.style_target()
    }

    fn take_result(&mut self) -> ChildResult {
        self.shell.take()
    }
}

/// `optgroup` inside a `select`.
#[derive(Debug)]
pub struct OptGroupWorker {
    label: Option<String>,
    disabled: bool,
    options: Vec<SelectOption>,
}

impl OptGroupWorker {
    pub fn new(element: &Element) -> Self {
        Self {
            label: element.attr_text("label"),
            disabled: element.has_attr("disabled"),
            options: Vec::new(),
        }
    }
}

impl ElementWorker for OptGroupWorker {
    fn display(&self) -> Display {
        Display::Block
    }

    fn child_frame(&self, _frame: &StackFrame) -> StackFrame {
        StackFrame::select()
    }

    fn accept_text(&mut self, text: &str, _ctx: &mut ProcessorContext) -> bool {
        text.trim().is_empty()
    }

    fn accept_child(&mut self, child: ChildResult, _ctx: &mut ProcessorContext) -> bool {
        let Contribution::Choice(options) = child.content else {
            return false;
        };
        for mut option in options {
            if option.group.is_none() {
                option.group = self.label.clone();
            }
            option.disabled |= self.disabled;
            self.options.push(option);
        }
        true
    }

    fn end(&mut self, _element: &Element, _ctx: &mut ProcessorContext) {}

    fn result(&self) -> Option<&LayoutNode> {
        None
    }

    fn style_target(&mut self, _phase: ApplyPhase) -> Option<ApplyTarget<'_>> {
        None
    }

    fn take_result(&mut self) -> ChildResult {
        ChildResult::new(Display::Block, Contribution::Choice(std::mem::take(&mut self.options)))
    }
}

/// `option` inside a `select` or `optgroup`.
#[derive(Debug)]
pub struct OptionWorker {
    text: String,
    option: Option<SelectOption>,
    label: Option<String>,
    value: Option<String>,
}

impl OptionWorker {
    pub fn new(element: &Element) -> Self {
        Self {
            text: String::new(),
            option: Some(SelectOption {
                selected: element.has_attr("selected"),
                disabled: element.has_attr("disabled"),
                ..Default::default()
            }),
            label: element.attr_text("label"),
            value: element.attr("value").map(str::to_string),
        }
    }
}

impl ElementWorker for OptionWorker {
    fn display(&self) -> Display {
        Display::Block
    }

    fn accept_text(&mut self, text: &str, _ctx: &mut ProcessorContext) -> bool {
        self.text.push_str(text);
        true
    }

    fn accept_child(&mut self, child: ChildResult, _ctx: &mut ProcessorContext) -> bool {
        let Contribution::Run(members) = child.content else {
            return false;
        };
        for member in members {
            if let RunMember::Leaf(leaf @ InlineNode::Text(_)) = member {
                self.text.push_str(&leaf.text_content());
            }
        }
        true
    }

    fn end(&mut self, _element: &Element, _ctx: &mut ProcessorContext) {
        let Some(option) = self.option.as_mut() else {
            return;
        };
        let text = collapse_whitespace(&self.text);
        option.label = self.label.clone().unwrap_or_else(|| text.clone());
        option.value = self.value.clone().unwrap_or(text);
    }

    fn result(&self) -> Option<&LayoutNode> {
        None
    }

    fn style_target(&mut self, _phase: ApplyPhase) -> Option<ApplyTarget<'_>> {
        None
    }

    fn take_result(&mut self) -> ChildResult {
        let options = self.option.take().into_iter().collect();
        ChildResult::new(Display::Block, Contribution::Choice(options))
    }
}

/// `button`: a push button whose content is laid out like a block.
#[derive(Debug)]
pub struct ButtonWorker {
    shell: Shell,
    content: BlockContent,
}

impl ButtonWorker {
    pub fn new(element: &Element, ctx: &mut ProcessorContext) -> Self {
        let kind = match element.attr_text("type").map(|t| t.to_ascii_lowercase()).as_deref() {
            None | Some("submit") => FormFieldKind::Submit,
            Some("reset") => FormFieldKind::Reset,
            Some("button") => FormFieldKind::Button,
            Some(other) => {
                log::warn!("Unsupported button type \"{}\"; treating it as submit", other);
                FormFieldKind::Submit
            }
        };
        let name = ctx.names.allocate(element.attr("name"));
        let mut field = FormFieldNode::new(kind, name, node_meta(element, Role::Form, ctx));
        field.value = element.attr("value").map(str::to_string);
        field.disabled = element.has_attr("disabled");
        Self {
            shell: Shell::new(field_node(field), element).with_control(ControlKind::Button),
            content: BlockContent::for_styles(&element.styles),
        }
    }
}

impl ElementWorker for ButtonWorker {
    fn display(&self) -> Display {
        self.shell.display()
    }

    fn accept_text(&mut self, text: &str, _ctx: &mut ProcessorContext) -> bool {
        self.content.accept_text(text)
    }

    fn accept_child(&mut self, child: ChildResult, ctx: &mut ProcessorContext) -> bool {
        self.content.accept(child, ctx)
    }

    fn end(&mut self, _element: &Element, ctx: &mut ProcessorContext) {
        let children = self.content.finish(ctx);
        if let Some(field) = field_mut(&mut self.shell) {
            field.content.extend(children);
        }
    }

    fn result(&self) -> Option<&LayoutNode> {
        self.shell.node()
    }

    fn style_target(&mut self, _phase: ApplyPhase) -> Option<ApplyTarget<'_>> {
        self.shell.style_target()
    }

    fn take_result(&mut self) -> ChildResult {
        self.shell.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TransformConfig;
    use quire_traits::InMemoryImageResolver;
    use std::sync::Arc;

    fn ctx() -> ProcessorContext {
        let _ = env_logger::builder().is_test(true).try_init();
        ProcessorContext::new(TransformConfig::default(), Arc::new(InMemoryImageResolver::new()))
    }

    fn field_of(result: ChildResult) -> FormFieldNode {
        match result.content {
            Contribution::Node(LayoutNode::FormField(field)) => field,
            other => panic!("expected form field, got {:?}", other),
        }
    }

    fn option(
        worker: &mut OptionWorker,
        element: &Element,
        text: &str,
        ctx: &mut ProcessorContext,
    ) -> ChildResult {
        worker.accept_text(text, ctx);
        worker.end(element, ctx);
        worker.take_result()
    }

    #[test]
    fn input_types_map_to_field_kinds() {
        let mut ctx = ctx();
        let cases = [
            ("email", FormFieldKind::Text),
            ("password", FormFieldKind::Password),
            ("checkbox", FormFieldKind::Checkbox),
            ("image", FormFieldKind::Submit),
            ("reset", FormFieldKind::Reset),
            ("file", FormFieldKind::Text),
        ];
        for (ty, kind) in cases {
            let element = Element::new("input").with_attr("type", ty);
            assert_eq!(field_of(InputWorker::new(&element, &mut ctx).take_result()).kind, kind);
        }
        let hidden = Element::new("input").with_attr("type", "hidden").with_attr("name", "token");
        assert!(InputWorker::new(&hidden, &mut ctx).take_result().content.is_absent());
        assert_eq!(ctx.names.allocate(Some("token")), "token");
    }

    #[test]
    fn input_attributes() {
        let mut ctx = ctx();
        let element = Element::new("input")
            .with_attr("name", "email")
            .with_attr("size", "30")
            .with_attr("maxlength", "80")
            .with_attr("placeholder", "you@example.com")
            .with_attr("required", "");
        let result = InputWorker::new(&element, &mut ctx).take_result();
        assert_eq!(result.control, Some(ControlKind::Input));
        let field = field_of(result);
        assert_eq!(field.name, "email");
        assert_eq!(field.cols, Some(30));
        assert_eq!(field.max_length, Some(80));
        assert_eq!(field.placeholder.as_deref(), Some("you@example.com"));
        assert!(field.required);
        assert_eq!(field.meta.role, Some(Role::Form));

        let submit = Element::new("input").with_attr("type", "submit");
        let field = field_of(InputWorker::new(&submit, &mut ctx).take_result());
        assert_eq!(field.value.as_deref(), Some("Submit"));
    }

    #[test]
    fn radios_share_a_group_and_names_are_unique() {
        let mut ctx = ctx();
        let radio = Element::new("input")
            .with_attr("type", "radio")
            .with_attr("name", "size")
            .with_attr("checked", "");
        let a = field_of(InputWorker::new(&radio, &mut ctx).take_result());
        let b = field_of(InputWorker::new(&radio, &mut ctx).take_result());
        assert_eq!(a.name, b.name);
        assert!(a.checked);

        let text = Element::new("input").with_attr("name", "size");
        let c = field_of(InputWorker::new(&text, &mut ctx).take_result());
        assert_ne!(c.name, a.name);
    }

    #[test]
    fn textarea_value_drops_leading_newline() {
        let mut ctx = ctx();
        let element = Element::new("textarea").with_attr("rows", "4").with_attr("cols", "40");
        let mut worker = TextAreaWorker::new(&element, &mut ctx);
        worker.accept_text("\nline one\n", &mut ctx);
        worker.accept_text("line two", &mut ctx);
        worker.end(&element, &mut ctx);
        worker.end(&element, &mut ctx);
        let field = field_of(worker.take_result());
        assert_eq!(field.kind, FormFieldKind::TextArea);
        assert_eq!(field.value.as_deref(), Some("line one\nline two"));
        assert_eq!((field.rows, field.cols), (Some(4), Some(40)));
    }

    #[test]
    fn select_collects_grouped_options() {
        let mut ctx = ctx();
        let select = Element::new("select").with_attr("name", "car");
        let mut worker = SelectWorker::new(&select, &mut ctx);
        assert_eq!(worker.child_frame(&StackFrame::default()), StackFrame::select());
        assert!(worker.accept_text("\n  ", &mut ctx));
        assert!(!worker.accept_text("stray", &mut ctx));

        let group = Element::new("optgroup").with_attr("label", "German").with_attr("disabled", "");
        let mut optgroup = OptGroupWorker::new(&group);
        let audi = Element::new("option").with_attr("selected", "");
        let mut opt = OptionWorker::new(&audi);
        assert!(optgroup.accept_child(option(&mut opt, &audi, "  Audi\n A4 ", &mut ctx), &mut ctx));
        assert!(worker.accept_child(optgroup.take_result(), &mut ctx));

        let volvo = Element::new("option").with_attr("value", "v").with_attr("selected", "");
        let mut opt = OptionWorker::new(&volvo);
        assert!(worker.accept_child(option(&mut opt, &volvo, "Volvo", &mut ctx), &mut ctx));
        worker.end(&select, &mut ctx);

        let field = field_of(worker.take_result());
        assert_eq!(field.kind, FormFieldKind::ComboBox);
        assert_eq!(field.options.len(), 2);
        let audi = &field.options[0];
        assert_eq!((audi.label.as_str(), audi.value.as_str()), ("Audi A4", "Audi A4"));
        assert_eq!(audi.group.as_deref(), Some("German"));
        assert!(audi.disabled);
        assert!(!audi.selected);
        let volvo = &field.options[1];
        assert_eq!((volvo.label.as_str(), volvo.value.as_str()), ("Volvo", "v"));
        assert!(volvo.selected);
    }

    #[test]
    fn multiple_select_is_a_list_box() {
        let mut ctx = ctx();
        let element = Element::new("select").with_attr("size", "4");
        let field = field_of(SelectWorker::new(&element, &mut ctx).take_result());
        assert_eq!(field.kind, FormFieldKind::ListBox);
        assert_eq!(field.rows, Some(4));
        assert_eq!(field.name, "field");
    }

    #[test]
    fn button_keeps_its_content() {
        let mut ctx = ctx();
        let element = Element::new("button").with_attr("type", "reset");
        let mut worker = ButtonWorker::new(&element, &mut ctx);
        worker.accept_text(" Clear ", &mut ctx);
        worker.end(&element, &mut ctx);
        worker.end(&element, &mut ctx);
        let result = worker.take_result();
        assert_eq!(result.control, Some(ControlKind::Button));
        let field = field_of(result);
        assert_eq!(field.kind, FormFieldKind::Reset);
        assert_eq!(field.content.len(), 1);
        assert_eq!(field.content[0].text_content(), "Clear");
    }
}
