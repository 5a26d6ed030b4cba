//! Light/dark theme toggle persisted in `localStorage`.
//!
//! The `<body>` class is the source of truth for the current theme so the
//! Leptos button and the server-rendered menu entry (`toggleTheme()` with a
//! `#theme-toggle-text` label) stay in step. The mounted button registers
//! its label setter so a toggle from the menu refreshes it as well.

use std::cell::Cell;

use benchhub_app::services::theme_service::ThemeService;
use benchhub_domain::theme::{DARK_BODY_CLASS, Theme};
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::wasm_bindgen;

use crate::dom;
use crate::platform::LocalPreferences;

/// Mount point for the [`ThemeToggle`] button.
const MOUNT_ID: &str = "theme-toggle";
/// Label of the server-rendered menu entry.
const MENU_LABEL_ID: &str = "theme-toggle-text";

thread_local! {
    static MOUNTED_LABEL: Cell<Option<WriteSignal<Theme>>> = const { Cell::new(None) };
}

fn register(set_theme: WriteSignal<Theme>) {
    MOUNTED_LABEL.with(|slot| slot.set(Some(set_theme)));
}

/// Push `theme` to the mounted button, if there is one.
fn publish(theme: Theme) {
    MOUNTED_LABEL.with(|slot| {
        if let Some(set_theme) = slot.get() {
            set_theme.try_set(theme);
        }
    });
}

fn current_theme() -> Theme {
    let dark = dom::document()
        .and_then(|doc| doc.body())
        .is_some_and(|body| body.class_list().contains(DARK_BODY_CLASS));
    if dark { Theme::Dark } else { Theme::Light }
}

/// Set the body class and the menu label for `theme`.
fn apply_theme(theme: Theme) {
    let Some(doc) = dom::document() else {
        return;
    };
    if let Some(body) = doc.body() {
        let classes = body.class_list();
        let _ = if theme.is_dark() {
            classes.add_1(DARK_BODY_CLASS)
        } else {
            classes.remove_1(DARK_BODY_CLASS)
        };
    }
    if let Some(label) = doc.get_element_by_id(MENU_LABEL_ID) {
        label.set_text_content(Some(theme.toggle_label()));
    }
}

fn flip(service: &ThemeService<LocalPreferences>) -> Theme {
    let next = service.toggle(current_theme());
    apply_theme(next);
    publish(next);
    next
}

/// Apply the stored theme and mount the toggle button if the page has a slot.
pub fn init(service: &ThemeService<LocalPreferences>) {
    apply_theme(service.load());

    let mount = dom::document()
        .and_then(|doc| doc.get_element_by_id(MOUNT_ID))
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok());
    if let Some(parent) = mount {
        let service = service.clone();
        leptos::mount::mount_to(parent, move || view! { <ThemeToggle service=service.clone()/> })
            .forget();
    }
}

/// Entry point for markup that calls `toggleTheme()` directly.
#[wasm_bindgen(js_name = toggleTheme)]
pub fn toggle_theme() {
    let service = ThemeService::new(LocalPreferences, crate::config::load().theme);
    flip(&service);
}

/// A button that switches between light and dark themes.
#[component]
pub fn ThemeToggle(service: ThemeService<LocalPreferences>) -> impl IntoView {
    let (theme, set_theme) = signal(current_theme());
    register(set_theme);

    let toggle = move |_| {
        flip(&service);
    };

    view! {
        <button class="btn btn-sm btn-outline-secondary theme-toggle" on:click=toggle>
            {move || theme.get().toggle_label()}
        </button>
    }
}
