//! Client-side validation rules.
//!
//! [`field`] holds the single-input validators wired to blur events;
//! [`form`] composes them into the per-entity checks run on submit.

pub mod field;
pub mod form;

pub use field::{
    check_ipv4, check_number, validate_ip_address, validate_max_length, validate_numeric_field,
    validate_required,
};
pub use form::{
    validate_device_form, validate_environment_form, validate_for, validate_form,
    validate_test_config_form,
};
