//! # benchhub-domain
//!
//! Pure domain model for the benchhub dashboard client.
//!
//! ## Responsibilities
//! - Foundational types: credentials, error conventions, HTTP request/response shapes
//! - Define **Fields** (a single form input with its validation marker and feedback)
//! - Define **Forms** (ordered fields plus a submit control whose enablement is derived)
//! - Define **Validators** (required, max length, numeric range, IPv4, per-entity form rules)
//! - Define the **submission** state machine and the outcome of a server response
//! - Define the **theme** preference
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never touch the DOM, storage, or the network.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod credential;
pub mod http;

pub mod entity;
pub mod field;
pub mod form;
pub mod response;
pub mod submission;
pub mod theme;
pub mod validation;
