//! Preference store port: small persisted key/value settings.

use std::rc::Rc;

/// Persisted user preferences (`localStorage` in the browser).
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;

    /// Persist `value` under `key`. Failures are ignored.
    fn set(&self, key: &str, value: &str);
}

impl<T: PreferenceStore> PreferenceStore for Rc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value);
    }
}
