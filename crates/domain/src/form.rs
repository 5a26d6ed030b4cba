//! Form: ordered fields plus a submit control whose enablement is derived.

use crate::credential::{Credential, SESSION_KEY};
use crate::field::{Field, InputKind};
use crate::http::HttpMethod;

/// State of a form's submit button.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitControl {
    pub disabled: bool,
    /// Showing the busy indicator while a request is in flight.
    pub busy: bool,
}

impl SubmitControl {
    /// Disable and show the busy indicator.
    pub fn start_busy(&mut self) {
        self.disabled = true;
        self.busy = true;
    }

    /// Re-enable and restore the original label.
    pub fn restore(&mut self) {
        self.disabled = false;
        self.busy = false;
    }
}

/// Keywords in an error message and the field they point at.
const RELATED_FIELDS: [(&str, &str); 3] = [
    ("name", "name"),
    ("ip", "ip_address"),
    ("type", "device_type"),
];

/// A dashboard form.
#[derive(Debug, Clone, Default)]
pub struct Form {
    pub action: String,
    pub method: HttpMethod,
    pub fields: Vec<Field>,
    pub submit: SubmitControl,
    /// Submitted through the HTTP client rather than a page navigation.
    pub ajax: bool,
    /// Extra reload guard for delete forms.
    pub delete_form: bool,
    /// Id of the enclosing modal, if any.
    pub modal_id: Option<String>,
    errors: Vec<String>,
}

impl Form {
    #[must_use]
    pub fn new(action: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            action: action.into(),
            method,
            ajax: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn in_modal(mut self, modal_id: impl Into<String>) -> Self {
        self.modal_id = Some(modal_id.into());
        self
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    #[must_use]
    pub fn has_invalid_fields(&self) -> bool {
        self.fields.iter().any(Field::is_invalid)
    }

    #[must_use]
    pub fn is_validating(&self) -> bool {
        self.fields.iter().any(Field::is_validating)
    }

    /// Recompute submit enablement: disabled iff any field is invalid or
    /// still validating.
    pub fn refresh_submit_state(&mut self) {
        self.submit.disabled = self.has_invalid_fields() || self.is_validating();
    }

    /// Errors currently rendered at the top of the form.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Dismiss the rendered error list.
    pub fn dismiss_errors(&mut self) {
        self.errors.clear();
    }

    /// Replace the rendered error list.
    ///
    /// All invalid markers are dropped first, then fields related to each
    /// message (by keyword) are flagged again. Returns whether anything was
    /// rendered.
    pub fn display_errors(&mut self, errors: &[String]) -> bool {
        self.errors.clear();
        for field in &mut self.fields {
            field.unflag_invalid();
        }
        if errors.is_empty() {
            return false;
        }
        for error in errors {
            let lower = error.to_lowercase();
            for (keyword, name) in RELATED_FIELDS {
                if lower.contains(keyword) {
                    if let Some(field) = self.field_mut(name) {
                        field.flag_invalid();
                    }
                }
            }
        }
        self.errors = errors.to_vec();
        true
    }

    /// Name/value pairs in document order, as a browser would submit them.
    #[must_use]
    pub fn serialize(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .filter(|f| !f.disabled)
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect()
    }

    /// Add a hidden credential field to a plain (non-AJAX) form.
    ///
    /// Returns `false` for AJAX forms, which carry the credential in a header.
    pub fn attach_credential(&mut self, credential: &Credential) -> bool {
        if self.ajax {
            return false;
        }
        let hidden = Field::new(SESSION_KEY)
            .kind(InputKind::Hidden)
            .value(credential.expose());
        match self.field_mut(SESSION_KEY) {
            Some(existing) => *existing = hidden,
            None => self.fields.push(hidden),
        }
        true
    }
}
