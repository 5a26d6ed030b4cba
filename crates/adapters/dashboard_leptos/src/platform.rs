//! `web-sys` implementations of the credential, browser, preference and
//! timer ports.

use std::future::Future;
use std::time::Duration;

use benchhub_app::ports::{Browser, CredentialSource, PreferenceStore, Timer};
use gloo_timers::future::TimeoutFuture;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use web_sys::{HtmlDocument, HtmlElement, Location, Storage};

use crate::dom;

fn millis(delay: Duration) -> u32 {
    u32::try_from(delay.as_millis()).unwrap_or(u32::MAX)
}

fn location() -> Option<Location> {
    dom::window().map(|w| w.location())
}

fn session_storage() -> Option<Storage> {
    dom::window().and_then(|w| w.session_storage().ok().flatten())
}

fn local_storage() -> Option<Storage> {
    dom::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Meta element, `sessionStorage` and `document.cookie`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserCredentials;

impl CredentialSource for BrowserCredentials {
    fn meta_content(&self, name: &str) -> Option<String> {
        dom::document()?
            .query_selector(&format!("meta[name=\"{name}\"]"))
            .ok()
            .flatten()?
            .get_attribute("content")
    }

    fn session_item(&self, key: &str) -> Option<String> {
        session_storage()?.get_item(key).ok().flatten()
    }

    fn set_session_item(&self, key: &str, value: &str) {
        if let Some(storage) = session_storage() {
            let _ = storage.set_item(key, value);
        }
    }

    fn cookies(&self) -> String {
        dom::document()
            .and_then(|doc| doc.dyn_into::<HtmlDocument>().ok())
            .and_then(|doc| doc.cookie().ok())
            .unwrap_or_default()
    }
}

/// The current window.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserWindow;

impl Browser for BrowserWindow {
    fn navigate(&self, url: &str) {
        if let Some(location) = location() {
            let _ = location.set_href(url);
        }
    }

    fn reload(&self) {
        if let Some(location) = location() {
            let _ = location.reload();
        }
    }

    fn reload_after(&self, delay: Duration) {
        let ms = millis(delay);
        spawn_local(async move {
            TimeoutFuture::new(ms).await;
            BrowserWindow.reload();
        });
    }

    /// Clicks the modal's own dismiss control so Bootstrap tears down the
    /// backdrop; without one the modal is hidden directly.
    fn close_modal(&self, modal_id: &str) {
        let Some(modal) = dom::document().and_then(|doc| doc.get_element_by_id(modal_id)) else {
            return;
        };
        let dismiss = modal
            .query_selector("[data-bs-dismiss=\"modal\"]")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        if let Some(button) = dismiss {
            button.click();
            return;
        }
        let _ = modal.class_list().remove_1("show");
        let _ = modal.set_attribute("style", "display: none;");
        let _ = modal.set_attribute("aria-hidden", "true");
    }

    fn alert(&self, message: &str) {
        if let Some(window) = dom::window() {
            let _ = window.alert_with_message(message);
        }
    }

    fn confirm(&self, message: &str) -> bool {
        dom::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }

    fn has_data_table(&self) -> bool {
        !dom::select_in_document(".table-responsive table").is_empty()
    }

    fn current_path(&self) -> String {
        location()
            .and_then(|l| l.pathname().ok())
            .unwrap_or_default()
    }
}

/// `localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalPreferences;

impl PreferenceStore for LocalPreferences {
    fn get(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(key, value);
        }
    }
}

/// `setTimeout`-backed delays.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTimer;

impl Timer for GlooTimer {
    fn sleep(&self, delay: Duration) -> impl Future<Output = ()> {
        TimeoutFuture::new(millis(delay))
    }
}
