//! Form-level validators run on submit.
//!
//! Each returns the ordered list of messages to render. Offending fields are
//! flagged invalid (their feedback is left alone) and the submit control is
//! recomputed afterwards.

use crate::entity::{EntityKind, FormKind};
use crate::error::ValidationError;
use crate::form::Form;

use super::field::{check_max_length, check_number, check_required, has_ipv4_shape};

const IP_FIELD: &str = "ip_address";
const PORT_FIELD: &str = "port";

fn flag(form: &mut Form, name: &str) {
    if let Some(field) = form.field_mut(name) {
        field.flag_invalid();
    }
}

fn trimmed_value(form: &Form, name: &str) -> Option<String> {
    form.field(name)
        .map(|f| f.trimmed().to_string())
        .filter(|v| !v.is_empty())
}

/// Required and max-length checks across every field.
///
/// All required failures come first, then all length failures, each in
/// field order.
pub fn validate_form(form: &mut Form) -> Vec<String> {
    let mut errors = Vec::new();
    let mut failing = Vec::new();

    for field in &form.fields {
        if let Err(err) = check_required(field) {
            errors.push(err.to_string());
            failing.push(field.name.clone());
        }
    }
    for field in &form.fields {
        if let Err(err) = check_max_length(field) {
            errors.push(err.to_string());
            failing.push(field.name.clone());
        }
    }
    for name in &failing {
        flag(form, name);
    }

    form.refresh_submit_state();
    errors
}

/// Generic rules plus a dotted-quad shape check on `ip_address`.
pub fn validate_device_form(form: &mut Form) -> Vec<String> {
    let mut errors = validate_form(form);
    if let Some(ip) = trimmed_value(form, IP_FIELD) {
        if !has_ipv4_shape(&ip) {
            errors.push(ValidationError::IpFormat.to_string());
            flag(form, IP_FIELD);
        }
    }
    form.refresh_submit_state();
    errors
}

/// Generic rules plus a 1–65535 range check on `port`.
pub fn validate_environment_form(form: &mut Form) -> Vec<String> {
    let mut errors = validate_form(form);
    if let Some(port) = trimmed_value(form, PORT_FIELD) {
        if check_number(&port, false, Some("1"), Some("65535")).is_err() {
            errors.push(ValidationError::PortRange.to_string());
            flag(form, PORT_FIELD);
        }
    }
    form.refresh_submit_state();
    errors
}

/// Generic rules only.
pub fn validate_test_config_form(form: &mut Form) -> Vec<String> {
    validate_form(form)
}

/// Dispatch to the validator for `kind`.
pub fn validate_for(kind: FormKind, form: &mut Form) -> Vec<String> {
    match kind {
        FormKind::Entity(EntityKind::Device) => validate_device_form(form),
        FormKind::Entity(EntityKind::Environment) => validate_environment_form(form),
        FormKind::Entity(EntityKind::TestConfig) => validate_test_config_form(form),
        FormKind::Generic => validate_form(form),
    }
}
