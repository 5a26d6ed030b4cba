//! DOM bridge: reads a server-rendered `<form>` into a [`Form`] and writes
//! the changes the services made back as Bootstrap classes and nodes.
//!
//! Handlers never keep a `Form` across an `await`: they snapshot, let a
//! service mutate the snapshot, then [`FormView::apply`] the difference.

use benchhub_domain::field::{FeedbackKind, Field, FieldState, InputKind};
use benchhub_domain::form::Form;
use benchhub_domain::http::HttpMethod;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement, Window,
};

const CONTROLS: &str = "input[name], select[name], textarea[name]";
const FIELD_GROUP: &str = ".mb-3";
const SUBMIT_BUTTON: &str = "button[type=\"submit\"]";
/// Holds the submit button's markup while the busy indicator is shown.
const ORIGINAL_LABEL_ATTR: &str = "data-original-label";
const BUSY_LABEL: &str = "<span class=\"spinner-border spinner-border-sm me-2\" role=\"status\" aria-hidden=\"true\"></span>Processing...";

const IS_VALID: &str = "is-valid";
const IS_INVALID: &str = "is-invalid";
const IS_VALIDATING: &str = "is-validating";
const VALID_FEEDBACK: &str = "valid-feedback";
const INVALID_FEEDBACK: &str = "invalid-feedback";

pub fn window() -> Option<Window> {
    web_sys::window()
}

pub fn document() -> Option<Document> {
    window().and_then(|w| w.document())
}

/// Every element matching `selector` under `root`.
pub fn select_all(root: &Element, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Every element matching `selector` in the document.
pub fn select_in_document(selector: &str) -> Vec<Element> {
    let Some(list) = document().and_then(|doc| doc.query_selector_all(selector).ok()) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Id of the modal enclosing `element`, if any.
pub fn enclosing_modal_id(element: &Element) -> Option<String> {
    element
        .closest(".modal")
        .ok()
        .flatten()
        .map(|modal| modal.id())
        .filter(|id| !id.is_empty())
}

fn has_class(element: &Element, class: &str) -> bool {
    element.class_list().contains(class)
}

fn control_value(element: &Element) -> String {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

fn set_control_value(element: &Element, value: &str) {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.set_value(value);
    } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        select.set_value(value);
    } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        area.set_value(value);
    }
}

fn input_kind(element: &Element) -> InputKind {
    match element.tag_name().to_ascii_lowercase().as_str() {
        "select" => InputKind::Select,
        "textarea" => InputKind::TextArea,
        _ => match element.get_attribute("type").as_deref() {
            Some("number") => InputKind::Number,
            Some("hidden") => InputKind::Hidden,
            _ => InputKind::Text,
        },
    }
}

/// Controls that never carry a value. Disabled controls are kept and
/// flagged on the [`Field`] so required checks still see them.
fn is_excluded(element: &Element) -> bool {
    let Some(input) = element.dyn_ref::<HtmlInputElement>() else {
        return false;
    };
    match input.type_().as_str() {
        "submit" | "button" | "reset" | "file" | "image" => true,
        "checkbox" | "radio" => !input.checked(),
        _ => false,
    }
}

/// Text of the `<label>` right before the control.
fn preceding_label(element: &Element) -> Option<String> {
    let sibling = element.previous_element_sibling()?;
    if !sibling.tag_name().eq_ignore_ascii_case("label") {
        return None;
    }
    sibling
        .text_content()
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

fn field_group(control: &Element) -> Option<Element> {
    control
        .closest(FIELD_GROUP)
        .ok()
        .flatten()
        .or_else(|| control.parent_element())
}

fn feedback_text(control: &Element, class: &str) -> Option<String> {
    let group = field_group(control)?;
    group
        .query_selector(&format!(".{class}"))
        .ok()
        .flatten()
        .and_then(|node| node.text_content())
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

fn read_field(control: &Element) -> Option<Field> {
    let name = control.get_attribute("name")?;
    let mut field = Field::new(name)
        .value(control_value(control))
        .kind(input_kind(control));
    field.label = preceding_label(control);
    field.required = control.has_attribute("required");
    field.disabled = control.has_attribute("disabled");
    field.max_length = control
        .get_attribute("maxlength")
        .and_then(|raw| raw.trim().parse().ok());
    field.min = control.get_attribute("min").filter(|raw| !raw.is_empty());
    field.max = control.get_attribute("max").filter(|raw| !raw.is_empty());

    if has_class(control, IS_VALIDATING) {
        field.begin_validating();
    } else if has_class(control, IS_INVALID) {
        match feedback_text(control, INVALID_FEEDBACK) {
            Some(message) => field.reject(message),
            None => field.flag_invalid(),
        }
    } else if has_class(control, IS_VALID) {
        field.accept(feedback_text(control, VALID_FEEDBACK));
    }
    Some(field)
}

/// A live `<form>` element.
#[derive(Clone)]
pub struct FormView {
    element: HtmlFormElement,
}

impl FormView {
    pub fn new(element: HtmlFormElement) -> Self {
        Self { element }
    }

    /// The form enclosing `element`.
    pub fn enclosing(element: &Element) -> Option<Self> {
        element
            .closest("form")
            .ok()
            .flatten()
            .and_then(|form| form.dyn_into::<HtmlFormElement>().ok())
            .map(Self::new)
    }

    fn control(&self, name: &str) -> Option<Element> {
        self.element
            .query_selector(&format!("[name=\"{name}\"]"))
            .ok()
            .flatten()
    }

    fn submit_button(&self) -> Option<HtmlElement> {
        self.element
            .query_selector(SUBMIT_BUTTON)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    /// Read the current state of the form.
    pub fn snapshot(&self) -> Form {
        let method = HttpMethod::from_declared(self.element.get_attribute("method").as_deref());
        let mut form = Form::new(
            self.element.get_attribute("action").unwrap_or_default(),
            method,
        );
        form.ajax = has_class(&self.element, "ajax-form");
        form.delete_form = has_class(&self.element, "delete-form");
        form.modal_id = enclosing_modal_id(&self.element);
        form.fields = select_all(&self.element, CONTROLS)
            .iter()
            .filter(|control| !is_excluded(control))
            .filter_map(read_field)
            .collect();
        if let Some(button) = self.submit_button() {
            form.submit.disabled = button.has_attribute("disabled");
            form.submit.busy = button.has_attribute(ORIGINAL_LABEL_ATTR);
        }
        form
    }

    /// Snapshot, let `change` mutate the snapshot, then apply the difference.
    pub fn edit<R>(&self, change: impl FnOnce(&mut Form) -> R) -> R {
        let mut form = self.snapshot();
        let before = form.clone();
        let result = change(&mut form);
        self.apply(&before, &form);
        result
    }

    /// Write every difference between `before` and `after` to the DOM.
    pub fn apply(&self, before: &Form, after: &Form) {
        for field in &after.fields {
            match before.field(&field.name) {
                Some(old) => {
                    if old.value != field.value {
                        if let Some(control) = self.control(&field.name) {
                            set_control_value(&control, &field.value);
                        }
                    }
                    if old.state() != field.state() || old.feedback() != field.feedback() {
                        self.render_field(field);
                    }
                }
                None => self.append_hidden(field),
            }
        }
        if before.submit != after.submit {
            self.render_submit(after);
        }
        if before.errors() != after.errors() {
            self.render_errors(after.errors());
        }
    }

    fn render_field(&self, field: &Field) {
        let Some(control) = self.control(&field.name) else {
            return;
        };
        let classes = control.class_list();
        let _ = classes.remove_3(IS_VALID, IS_INVALID, IS_VALIDATING);
        let marker = match field.state() {
            FieldState::Unvalidated => None,
            FieldState::Valid => Some(IS_VALID),
            FieldState::Invalid => Some(IS_INVALID),
            FieldState::Validating => Some(IS_VALIDATING),
        };
        if let Some(marker) = marker {
            let _ = classes.add_1(marker);
        }

        let Some(group) = field_group(&control) else {
            return;
        };
        for stale in select_all(&group, &format!(".{INVALID_FEEDBACK}, .{VALID_FEEDBACK}")) {
            stale.remove();
        }
        let Some(feedback) = field.feedback() else {
            return;
        };
        let Some(doc) = document() else {
            return;
        };
        let Ok(node) = doc.create_element("div") else {
            return;
        };
        node.set_class_name(match feedback.kind {
            FeedbackKind::Valid => VALID_FEEDBACK,
            FeedbackKind::Invalid => INVALID_FEEDBACK,
        });
        let _ = node.set_attribute("style", "display: block;");
        node.set_text_content(Some(&feedback.message));
        let _ = group.append_child(&node);
    }

    fn render_submit(&self, form: &Form) {
        let Some(button) = self.submit_button() else {
            return;
        };
        if form.submit.disabled {
            let _ = button.set_attribute("disabled", "");
        } else {
            let _ = button.remove_attribute("disabled");
        }
        match (form.submit.busy, button.get_attribute(ORIGINAL_LABEL_ATTR)) {
            (true, None) => {
                let _ = button.set_attribute(ORIGINAL_LABEL_ATTR, &button.inner_html());
                button.set_inner_html(BUSY_LABEL);
            }
            (false, Some(original)) => {
                button.set_inner_html(&original);
                let _ = button.remove_attribute(ORIGINAL_LABEL_ATTR);
            }
            _ => {}
        }
    }

    /// Replace the error list at the top of the form.
    fn render_errors(&self, errors: &[String]) {
        for stale in select_all(&self.element, ".form-error") {
            stale.remove();
        }
        if errors.is_empty() {
            return;
        }
        let Some(doc) = document() else {
            return;
        };
        let (Ok(alert), Ok(list)) = (doc.create_element("div"), doc.create_element("ul")) else {
            return;
        };
        alert.set_class_name("alert alert-danger form-error mt-3");
        list.set_class_name("mb-0");
        for error in errors {
            if let Ok(item) = doc.create_element("li") {
                item.set_text_content(Some(error));
                let _ = list.append_child(&item);
            }
        }
        let _ = alert.append_child(&list);
        let _ = self.element.prepend_with_node_1(&alert);
    }

    fn append_hidden(&self, field: &Field) {
        let Some(doc) = document() else {
            return;
        };
        let Ok(input) = doc.create_element("input") else {
            return;
        };
        let _ = input.set_attribute("type", "hidden");
        let _ = input.set_attribute("name", &field.name);
        let _ = input.set_attribute("value", &field.value);
        let _ = self.element.append_child(&input);
    }
}
