//! Single-field validators.
//!
//! The `check_*` functions are pure predicates. The `validate_*` functions
//! apply a predicate to a named field of a form: they clear the field's
//! previous marker and feedback, record the verdict, and recompute the
//! form's submit enablement. A missing field is a no-op.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;
use crate::field::Field;
use crate::form::Form;

/// Four dot-separated groups of one to three ASCII digits.
static IPV4_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{1,3})\.([0-9]{1,3})\.([0-9]{1,3})\.([0-9]{1,3})$")
        .unwrap_or_else(|err| unreachable!("static IPv4 pattern: {err}"))
});

/// Whether `value` has the dotted-quad shape, ignoring octet range.
#[must_use]
pub fn has_ipv4_shape(value: &str) -> bool {
    IPV4_SHAPE.is_match(value)
}

/// Check a trimmed IPv4 address.
///
/// Leading zeros are accepted (`010.1.1.1` passes).
///
/// # Errors
///
/// Returns [`ValidationError::IpRequired`] for an empty value,
/// [`ValidationError::IpFormat`] when the value is not four 1–3 digit
/// groups, and [`ValidationError::IpOctetRange`] when a group exceeds 255.
pub fn check_ipv4(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::IpRequired);
    }
    let caps = IPV4_SHAPE
        .captures(value)
        .ok_or(ValidationError::IpFormat)?;
    let in_range = caps
        .iter()
        .skip(1)
        .flatten()
        .all(|group| group.as_str().parse::<u16>().is_ok_and(|octet| octet <= 255));
    if in_range {
        Ok(())
    } else {
        Err(ValidationError::IpOctetRange)
    }
}

/// Parse a numeric input the way a browser coerces it. Only finite numbers
/// are accepted, so `NaN`, `inf` and overflowing literals are rejected.
#[must_use]
pub fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

/// Check a numeric value against optional raw `min`/`max` bounds.
///
/// Returns `Ok(None)` for an empty, non-required value (nothing to judge)
/// and `Ok(Some(n))` for an accepted number. Bounds that do not parse are
/// ignored.
///
/// # Errors
///
/// Returns [`ValidationError::NumberRequired`],
/// [`ValidationError::NotANumber`], [`ValidationError::BelowMin`] or
/// [`ValidationError::AboveMax`].
pub fn check_number(
    value: &str,
    required: bool,
    min: Option<&str>,
    max: Option<&str>,
) -> Result<Option<f64>, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return if required {
            Err(ValidationError::NumberRequired)
        } else {
            Ok(None)
        };
    }
    let number = parse_number(value).ok_or(ValidationError::NotANumber)?;
    if let Some(min) = min.filter(|m| parse_number(m).is_some_and(|bound| number < bound)) {
        return Err(ValidationError::BelowMin {
            min: min.trim().to_string(),
        });
    }
    if let Some(max) = max.filter(|m| parse_number(m).is_some_and(|bound| number > bound)) {
        return Err(ValidationError::AboveMax {
            max: max.trim().to_string(),
        });
    }
    Ok(Some(number))
}

/// Check that a field has a non-blank value.
///
/// # Errors
///
/// Returns [`ValidationError::Required`] labelled with the field's label.
pub fn check_required(field: &Field) -> Result<(), ValidationError> {
    if field.required && field.trimmed().is_empty() {
        return Err(ValidationError::Required {
            label: field.display_label().to_string(),
        });
    }
    Ok(())
}

/// Check that a non-empty value fits the field's `maxlength`.
///
/// # Errors
///
/// Returns [`ValidationError::TooLong`] labelled with the field's label.
pub fn check_max_length(field: &Field) -> Result<(), ValidationError> {
    let Some(max) = field.max_length else {
        return Ok(());
    };
    let value = field.trimmed();
    if !value.is_empty() && value.chars().count() > max {
        return Err(ValidationError::TooLong {
            label: field.display_label().to_string(),
            max,
        });
    }
    Ok(())
}

/// Run `check` against the named field, recording the verdict.
///
/// `award_valid` controls whether success earns a positive marker.
fn apply<F>(
    form: &mut Form,
    name: &str,
    award_valid: bool,
    check: F,
) -> Result<(), ValidationError>
where
    F: FnOnce(&Field) -> Result<bool, ValidationError>,
{
    let Some(field) = form.field_mut(name) else {
        return Ok(());
    };
    field.reset();
    let verdict = check(field);
    match &verdict {
        Err(err) => field.reject(err.to_string()),
        Ok(true) if award_valid => field.accept(None),
        Ok(_) => {}
    }
    form.refresh_submit_state();
    verdict.map(|_| ())
}

/// Validate an IP address field.
///
/// # Errors
///
/// Propagates the [`check_ipv4`] failure after marking the field invalid.
pub fn validate_ip_address(form: &mut Form, name: &str) -> Result<(), ValidationError> {
    apply(form, name, true, |field| {
        check_ipv4(&field.value).map(|()| true)
    })
}

/// Validate a numeric field against its own `required`/`min`/`max`.
///
/// # Errors
///
/// Propagates the [`check_number`] failure after marking the field invalid.
pub fn validate_numeric_field(form: &mut Form, name: &str) -> Result<(), ValidationError> {
    apply(form, name, true, |field| {
        check_number(
            &field.value,
            field.required,
            field.min.as_deref(),
            field.max.as_deref(),
        )
        .map(|judged| judged.is_some())
    })
}

/// Validate that a field is filled in. Success leaves the field unmarked.
///
/// # Errors
///
/// Propagates the [`check_required`] failure after marking the field invalid.
pub fn validate_required(form: &mut Form, name: &str) -> Result<(), ValidationError> {
    apply(form, name, false, |field| check_required(field).map(|()| true))
}

/// Validate a field's `maxlength`. Success leaves the field unmarked.
///
/// # Errors
///
/// Propagates the [`check_max_length`] failure after marking the field invalid.
pub fn validate_max_length(form: &mut Form, name: &str) -> Result<(), ValidationError> {
    apply(form, name, false, |field| {
        check_max_length(field).map(|()| true)
    })
}
