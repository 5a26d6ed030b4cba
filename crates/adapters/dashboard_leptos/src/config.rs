//! Configuration loading from the page.
//!
//! Looks for `<script type="application/json" id="benchhub-config">`. Pages
//! that still publish a `window.routes` object get its endpoints merged in
//! when the element does not set them. Anything missing or malformed falls
//! back to the defaults; logging is not up yet, so problems are reported
//! through `leptos::logging`.

use benchhub_app::config::{DashboardConfig, RoutesConfig};
use wasm_bindgen::JsValue;

use crate::dom;

/// Id of the element carrying the JSON configuration.
pub const CONFIG_ELEMENT_ID: &str = "benchhub-config";

/// Read the configuration embedded in the page.
pub fn load() -> DashboardConfig {
    let embedded = dom::document()
        .and_then(|doc| doc.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());

    let mut config = match embedded.as_deref().map(DashboardConfig::from_json) {
        Some(Ok(config)) => config,
        Some(Err(err)) => {
            leptos::logging::warn!("ignoring invalid dashboard config: {err}");
            DashboardConfig::default()
        }
        None => DashboardConfig::default(),
    };

    if !embedded.as_deref().is_some_and(sets_routes) {
        if let Some(routes) = legacy_routes() {
            config.routes = merge_routes(config.routes, routes);
        }
    }
    config
}

fn sets_routes(json: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(json)
        .ok()
        .is_some_and(|value| value.get("routes").is_some())
}

/// Endpoints published as `window.routes`.
fn legacy_routes() -> Option<RoutesConfig> {
    let window = dom::window()?;
    let routes = js_sys::Reflect::get(&window, &JsValue::from_str("routes")).ok()?;
    if routes.is_undefined() || routes.is_null() {
        return None;
    }
    let json = js_sys::JSON::stringify(&routes).ok()?.as_string()?;
    match serde_json::from_str(&json) {
        Ok(routes) => Some(routes),
        Err(err) => {
            leptos::logging::warn!("ignoring malformed window.routes: {err}");
            None
        }
    }
}

/// Take the name-check endpoints from `legacy`, keep everything else.
fn merge_routes(current: RoutesConfig, legacy: RoutesConfig) -> RoutesConfig {
    RoutesConfig {
        check_device_name: legacy.check_device_name,
        check_environment_name: legacy.check_environment_name,
        check_test_config_name: legacy.check_test_config_name,
        ..current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_detect_routes_section() {
        assert!(sets_routes(r#"{"routes": {"login": "/signin"}}"#));
        assert!(!sets_routes(r#"{"timing": {"reload_delay_ms": 250}}"#));
        assert!(!sets_routes("not json"));
    }

    #[test]
    fn should_take_only_check_urls_from_legacy_routes() {
        let current = RoutesConfig {
            login: "/signin".to_string(),
            ..RoutesConfig::default()
        };
        let legacy: RoutesConfig =
            serde_json::from_str(r#"{"checkDeviceName": "/d/devices/check-name"}"#).unwrap();

        let merged = merge_routes(current, legacy);

        assert_eq!(merged.login, "/signin");
        assert_eq!(merged.check_device_name, "/d/devices/check-name");
        assert_eq!(
            merged.check_environment_name,
            "/dashboard/environments/check-name"
        );
    }
}
