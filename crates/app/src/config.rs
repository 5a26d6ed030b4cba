//! Client configuration: JSON embedded in the page, every field optional.
//!
//! The adapter reads it from a `<script type="application/json">` element.
//! Route keys also accept the camel-case names of the legacy `window.routes`
//! object (`checkDeviceName`, …).

use std::time::Duration;

use benchhub_domain::credential::{COOKIE_NAME, META_NAME, SESSION_KEY};
use benchhub_domain::entity::EntityKind;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Server endpoints.
    pub routes: RoutesConfig,
    /// Where the credential is looked up.
    pub credential: CredentialConfig,
    /// Fixed delays.
    pub timing: TimingConfig,
    /// Theme persistence.
    pub theme: ThemeConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Server endpoints the client talks to.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RoutesConfig {
    /// Login view anonymous users are sent to.
    pub login: String,
    /// Path fragment identifying pages that require a credential.
    pub dashboard_marker: String,
    #[serde(alias = "checkDeviceName")]
    pub check_device_name: String,
    #[serde(alias = "checkEnvironmentName")]
    pub check_environment_name: String,
    #[serde(alias = "checkTestConfigName")]
    pub check_test_config_name: String,
}

/// Credential lookup keys.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CredentialConfig {
    pub meta_name: String,
    pub session_key: String,
    pub cookie_name: String,
}

/// Fixed delays, in milliseconds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Delay between closing a modal and reloading after a success.
    pub reload_delay_ms: u64,
    /// Fallback after which the submit control is restored regardless of outcome.
    pub submit_restore_ms: u64,
    /// Extra reload scheduled when a delete form is submitted.
    pub delete_reload_guard_ms: u64,
}

/// Theme persistence.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// `localStorage` key holding `light` or `dark`.
    pub storage_key: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl DashboardConfig {
    /// Parse and validate a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Validation`] for semantically invalid values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.routes.login.starts_with('/') {
            return Err(ConfigError::Validation(
                "routes.login must be an absolute path".to_string(),
            ));
        }
        if self.credential.session_key.is_empty() || self.credential.cookie_name.is_empty() {
            return Err(ConfigError::Validation(
                "credential keys must be non-empty".to_string(),
            ));
        }
        if self.theme.storage_key.is_empty() {
            return Err(ConfigError::Validation(
                "theme.storage_key must be non-empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl RoutesConfig {
    /// Name-availability endpoint for `kind`.
    #[must_use]
    pub fn check_url(&self, kind: EntityKind) -> &str {
        match kind {
            EntityKind::Device => &self.check_device_name,
            EntityKind::Environment => &self.check_environment_name,
            EntityKind::TestConfig => &self.check_test_config_name,
        }
    }
}

impl TimingConfig {
    #[must_use]
    pub fn reload_delay(&self) -> Duration {
        Duration::from_millis(self.reload_delay_ms)
    }

    #[must_use]
    pub fn submit_restore(&self) -> Duration {
        Duration::from_millis(self.submit_restore_ms)
    }

    #[must_use]
    pub fn delete_reload_guard(&self) -> Duration {
        Duration::from_millis(self.delete_reload_guard_ms)
    }
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            login: "/login".to_string(),
            dashboard_marker: "/dashboard".to_string(),
            check_device_name: EntityKind::Device.default_check_url(),
            check_environment_name: EntityKind::Environment.default_check_url(),
            check_test_config_name: EntityKind::TestConfig.default_check_url(),
        }
    }
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self {
            meta_name: META_NAME.to_string(),
            session_key: SESSION_KEY.to_string(),
            cookie_name: COOKIE_NAME.to_string(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            reload_delay_ms: 500,
            submit_restore_ms: 1000,
            delete_reload_guard_ms: 1000,
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "theme".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "benchhub_app=info,benchhub_dashboard=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parse failure.
    #[error("failed to parse dashboard config")]
    Parse(#[from] serde_json::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.routes.login, "/login");
        assert_eq!(config.credential.session_key, "jwt_token");
        assert_eq!(config.credential.meta_name, "jwt-token");
        assert_eq!(config.timing.reload_delay(), Duration::from_millis(500));
        assert_eq!(config.timing.submit_restore(), Duration::from_secs(1));
        assert_eq!(config.theme.storage_key, "theme");
    }

    #[test]
    fn should_parse_empty_object() {
        let config = DashboardConfig::from_json("{}").unwrap();
        assert_eq!(
            config.routes.check_url(EntityKind::Device),
            "/dashboard/devices/check-name"
        );
    }

    #[test]
    fn should_accept_legacy_route_names() {
        let json = r#"{"routes": {"checkDeviceName": "/api/devices/name-free"}}"#;
        let config = DashboardConfig::from_json(json).unwrap();
        assert_eq!(
            config.routes.check_url(EntityKind::Device),
            "/api/devices/name-free"
        );
        assert_eq!(
            config.routes.check_url(EntityKind::TestConfig),
            "/dashboard/test-configs/check-name"
        );
    }

    #[test]
    fn should_parse_partial_timing_with_defaults() {
        let json = r#"{"timing": {"reload_delay_ms": 0}}"#;
        let config = DashboardConfig::from_json(json).unwrap();
        assert_eq!(config.timing.reload_delay(), Duration::ZERO);
        assert_eq!(config.timing.submit_restore_ms, 1000);
    }

    #[test]
    fn should_reject_relative_login_path() {
        let json = r#"{"routes": {"login": "login"}}"#;
        assert!(matches!(
            DashboardConfig::from_json(json),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn should_reject_empty_session_key() {
        let json = r#"{"credential": {"session_key": ""}}"#;
        assert!(DashboardConfig::from_json(json).is_err());
    }

    #[test]
    fn should_report_parse_error_for_invalid_json() {
        assert!(matches!(
            DashboardConfig::from_json("{invalid"),
            Err(ConfigError::Parse(_))
        ));
    }
}
