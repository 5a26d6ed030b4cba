//! Credential source port: where a bearer token can be found.

use std::rc::Rc;

/// Read access to the places a page may carry the credential.
///
/// Implementations receive the configured key names so the adapter does not
/// hard-code them.
pub trait CredentialSource {
    /// `content` of the `<meta name="{name}">` element, if present.
    fn meta_content(&self, name: &str) -> Option<String>;

    /// Session storage entry under `key`.
    fn session_item(&self, key: &str) -> Option<String>;

    /// Write a session storage entry. Failures are ignored.
    fn set_session_item(&self, key: &str, value: &str);

    /// The raw `document.cookie` string.
    fn cookies(&self) -> String;
}

impl<T: CredentialSource> CredentialSource for Rc<T> {
    fn meta_content(&self, name: &str) -> Option<String> {
        (**self).meta_content(name)
    }

    fn session_item(&self, key: &str) -> Option<String> {
        (**self).session_item(key)
    }

    fn set_session_item(&self, key: &str, value: &str) {
        (**self).set_session_item(key, value);
    }

    fn cookies(&self) -> String {
        (**self).cookies()
    }
}
