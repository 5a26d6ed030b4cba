//! # benchhub-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** the browser adapter must implement:
//!   - `CredentialSource`: meta element, session storage, cookies
//!   - `HttpTransport`: execute a request, return status and body
//!   - `Browser`: navigation, reloads, modals, alerts, confirmations
//!   - `PreferenceStore`: persisted user preferences
//!   - `Timer`: fixed delays
//! - Define the **use-cases**:
//!   - `TokenAccessor` / `AuthInterceptor`: resolve and attach the bearer credential
//!   - `NameValidator`: remote name availability check
//!   - `SubmissionController`: validate, send, and react to a form submit
//!   - `ButtonActionController`: single-action buttons
//!   - `ThemeService`: light/dark preference
//!   - `PageGuard`: send anonymous visitors to the login view
//! - Own the client **configuration**
//!
//! ## Dependency rule
//! Depends on `benchhub-domain` only.
//! Never imports the browser adapter. The adapter depends on *this* crate, not the reverse.

pub mod config;
pub mod ports;
pub mod services;
