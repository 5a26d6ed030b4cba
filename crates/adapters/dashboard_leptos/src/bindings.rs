//! DOM event wiring.
//!
//! Listeners live as long as the page, so their closures are leaked with
//! `forget()`. Async work is spawned on the Leptos executor.

use std::rc::Rc;

use benchhub_app::ports::{Browser, Timer};
use benchhub_app::services::button_action::ButtonAction;
use benchhub_domain::entity::EntityKind;
use benchhub_domain::http::HttpMethod;
use benchhub_domain::validation::{validate_ip_address, validate_numeric_field};
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::{Element, Event, HtmlFormElement};

use crate::dom::{self, FormView};
use crate::{Dashboard, NameChecks, Submissions};

const NAME_FIELD: &str = "name";
const IP_FIELD: &str = "ip_address";

fn listen(target: &Element, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    if let Err(err) =
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        tracing::warn!(event, ?err, "failed to attach listener");
    }
    closure.forget();
}

/// Install every handler the dashboard pages need.
pub fn bind_all(dashboard: &Rc<Dashboard>) {
    bind_forms(dashboard);
    bind_ip_fields();
    bind_numeric_fields();
    for kind in EntityKind::ALL {
        bind_name_checks(dashboard, kind);
    }
    bind_submit_state();
    bind_buttons(dashboard);
}

fn bind_forms(dashboard: &Rc<Dashboard>) {
    for element in dom::select_in_document("form") {
        let Ok(form) = element.clone().dyn_into::<HtmlFormElement>() else {
            continue;
        };
        let dashboard = Rc::clone(dashboard);
        listen(&element, "submit", move |event| {
            let view = FormView::new(form.clone());
            if form.class_list().contains("ajax-form") {
                event.prevent_default();
                spawn_local(submit_ajax(Rc::clone(&dashboard), view));
            } else {
                submit_plain(&dashboard, &view);
            }
        });
    }
}

/// Plain forms navigate on their own; they only need the credential field.
fn submit_plain(dashboard: &Dashboard, view: &FormView) {
    view.edit(|form| {
        if form.delete_form {
            dashboard
                .browser
                .reload_after(dashboard.config.timing.delete_reload_guard());
        }
        if let Some(cred) = dashboard.tokens.get_token() {
            form.attach_credential(&cred);
        }
    });
}

async fn submit_ajax(dashboard: Rc<Dashboard>, view: FormView) {
    let Ok(attempt) = view.edit(|form| dashboard.submissions.prepare(form)) else {
        return;
    };
    let outcome = dashboard.submissions.dispatch(attempt).await;
    view.edit(|form| Submissions::apply(form, &outcome));
    tracing::debug!(%outcome, "submission finished");

    dashboard
        .timer
        .sleep(dashboard.submissions.restore_delay())
        .await;
    view.edit(|form| form.submit.restore());
}

fn bind_ip_fields() {
    for input in dom::select_in_document(&format!("[name=\"{IP_FIELD}\"]")) {
        let target = input.clone();
        listen(&input, "blur", move |_| {
            let Some(view) = FormView::enclosing(&target) else {
                return;
            };
            if let Err(err) = view.edit(|form| validate_ip_address(form, IP_FIELD)) {
                tracing::debug!(%err, "ip address rejected");
            }
        });
    }
}

fn bind_numeric_fields() {
    for input in dom::select_in_document("input[type=\"number\"]") {
        let Some(name) = input.get_attribute("name") else {
            continue;
        };
        let target = input.clone();
        listen(&input, "blur", move |_| {
            let Some(view) = FormView::enclosing(&target) else {
                return;
            };
            if let Err(err) = view.edit(|form| validate_numeric_field(form, &name)) {
                tracing::debug!(field = %name, %err, "number rejected");
            }
        });
    }
}

/// Name inputs in the create modal and every edit modal of `kind`.
fn bind_name_checks(dashboard: &Rc<Dashboard>, kind: EntityKind) {
    let create = format!("#{} [name=\"{NAME_FIELD}\"]", kind.create_modal_id());
    let edit = format!("[id^=\"{}\"] [name=\"{NAME_FIELD}\"]", kind.edit_modal_prefix());

    for (selector, editing) in [(create, false), (edit, true)] {
        for input in dom::select_in_document(&selector) {
            let entity_id = editing
                .then(|| dom::enclosing_modal_id(&input))
                .flatten()
                .and_then(|modal| kind.entity_id_from_modal(&modal));
            let dashboard = Rc::clone(dashboard);
            let target = input.clone();
            listen(&input, "blur", move |_| {
                if let Some(view) = FormView::enclosing(&target) {
                    spawn_local(check_name(
                        Rc::clone(&dashboard),
                        view,
                        entity_id.clone(),
                        kind,
                    ));
                }
            });
        }
    }
}

async fn check_name(
    dashboard: Rc<Dashboard>,
    view: FormView,
    entity_id: Option<String>,
    kind: EntityKind,
) {
    let url = dashboard.config.routes.check_url(kind).to_string();
    let Some(check) = view.edit(|form| {
        NameChecks::begin(form, NAME_FIELD, entity_id.as_deref(), &url, kind.label())
    }) else {
        return;
    };
    let result = dashboard.names.check(&check).await;
    let verdict = view.edit(|form| NameChecks::finish(form, &check, result));
    tracing::debug!(entity = %kind, ?verdict, "name check finished");
}

/// Any edit inside a modal form recomputes submit enablement.
fn bind_submit_state() {
    for control in dom::select_in_document(".modal form input, .modal form select") {
        for event in ["input", "change"] {
            let target = control.clone();
            listen(&control, event, move |_| {
                if let Some(view) = FormView::enclosing(&target) {
                    view.edit(|form| form.refresh_submit_state());
                }
            });
        }
    }
}

fn read_button(element: &Element) -> Option<ButtonAction> {
    let url = element.get_attribute("data-url")?;
    let mut action = ButtonAction::new(url).method(HttpMethod::from_declared(
        element.get_attribute("data-method").as_deref(),
    ));
    if let Some(prompt) = element.get_attribute("data-confirm") {
        action = action.confirm(prompt);
    }
    if let Some(modal) = dom::enclosing_modal_id(element) {
        action = action.in_modal(modal);
    }
    Some(action)
}

fn bind_buttons(dashboard: &Rc<Dashboard>) {
    for button in dom::select_in_document(".ajax-button") {
        let dashboard = Rc::clone(dashboard);
        let target = button.clone();
        listen(&button, "click", move |event| {
            event.prevent_default();
            let Some(action) = read_button(&target) else {
                tracing::warn!("ajax button without data-url");
                return;
            };
            let dashboard = Rc::clone(&dashboard);
            spawn_local(async move {
                let outcome = dashboard.buttons.trigger(&action).await;
                tracing::debug!(?outcome, "button action finished");
            });
        });
    }
}
