//! Managed entity kinds and how forms map onto them.

use std::fmt;

/// The server-side resources the dashboard manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Device,
    Environment,
    TestConfig,
}

impl EntityKind {
    pub const ALL: [Self; 3] = [Self::Device, Self::Environment, Self::TestConfig];

    /// Human-readable label used in feedback messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Device => "Device",
            Self::Environment => "Environment",
            Self::TestConfig => "Test configuration",
        }
    }

    /// Path segment of the resource under `/dashboard`.
    #[must_use]
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Device => "devices",
            Self::Environment => "environments",
            Self::TestConfig => "test-configs",
        }
    }

    /// Default name-availability endpoint.
    #[must_use]
    pub fn default_check_url(self) -> String {
        format!("/dashboard/{}/check-name", self.path_segment())
    }

    /// Id of the modal holding the create form.
    #[must_use]
    pub fn create_modal_id(self) -> &'static str {
        match self {
            Self::Device => "createDeviceModal",
            Self::Environment => "createEnvironmentModal",
            Self::TestConfig => "createTestConfigModal",
        }
    }

    /// Prefix of the edit modal ids; the rest of the id is the entity id.
    #[must_use]
    pub fn edit_modal_prefix(self) -> &'static str {
        match self {
            Self::Device => "editDeviceModal",
            Self::Environment => "editEnvironmentModal",
            Self::TestConfig => "editTestConfigModal",
        }
    }

    /// Extract the entity id from an edit modal id such as `editDeviceModal42`.
    #[must_use]
    pub fn entity_id_from_modal(self, modal_id: &str) -> Option<String> {
        modal_id
            .strip_prefix(self.edit_modal_prefix())
            .filter(|rest| !rest.is_empty())
            .map(str::to_string)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which validation rules apply to a submitted form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Entity(EntityKind),
    Generic,
}

impl FormKind {
    /// Pick the rules from the form's action URL. The first matching
    /// resource segment wins.
    #[must_use]
    pub fn from_action(url: &str) -> Self {
        if url.contains("/devices") {
            Self::Entity(EntityKind::Device)
        } else if url.contains("/environments") {
            Self::Entity(EntityKind::Environment)
        } else if url.contains("/test-configs") {
            Self::Entity(EntityKind::TestConfig)
        } else {
            Self::Generic
        }
    }
}

/// Whether an action URL targets a deletion endpoint.
#[must_use]
pub fn is_delete_action(url: &str) -> bool {
    url.contains("/delete")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_default_check_urls() {
        assert_eq!(
            EntityKind::Device.default_check_url(),
            "/dashboard/devices/check-name"
        );
        assert_eq!(
            EntityKind::TestConfig.default_check_url(),
            "/dashboard/test-configs/check-name"
        );
    }

    #[test]
    fn should_extract_entity_id_from_edit_modal() {
        assert_eq!(
            EntityKind::Device.entity_id_from_modal("editDeviceModal42"),
            Some("42".to_string())
        );
        assert_eq!(EntityKind::Device.entity_id_from_modal("editDeviceModal"), None);
        assert_eq!(
            EntityKind::Environment.entity_id_from_modal("editDeviceModal42"),
            None
        );
    }

    #[test]
    fn should_detect_form_kind_from_action() {
        assert_eq!(
            FormKind::from_action("/dashboard/devices/create"),
            FormKind::Entity(EntityKind::Device)
        );
        assert_eq!(
            FormKind::from_action("/dashboard/environments/3/update"),
            FormKind::Entity(EntityKind::Environment)
        );
        assert_eq!(
            FormKind::from_action("/dashboard/test-configs/create"),
            FormKind::Entity(EntityKind::TestConfig)
        );
        assert_eq!(FormKind::from_action("/dashboard/media/upload"), FormKind::Generic);
    }

    #[test]
    fn should_detect_delete_action() {
        assert!(is_delete_action("/dashboard/devices/4/delete"));
        assert!(!is_delete_action("/dashboard/devices/4/update"));
    }

    #[test]
    fn should_display_label() {
        assert_eq!(EntityKind::TestConfig.to_string(), "Test configuration");
    }
}
