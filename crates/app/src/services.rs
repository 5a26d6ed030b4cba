//! Application services: use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from the browser.

pub mod button_action;
pub mod interceptor;
pub mod name_check;
pub mod page_guard;
pub mod submission;
pub mod theme_service;
pub mod token_accessor;

#[cfg(test)]
pub(crate) mod fakes;
