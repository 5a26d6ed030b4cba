//! Theme service: loads and flips the persisted light/dark preference.

use benchhub_domain::theme::Theme;

use crate::config::ThemeConfig;
use crate::ports::PreferenceStore;

/// Reads and writes the theme preference.
#[derive(Debug, Clone)]
pub struct ThemeService<P> {
    store: P,
    config: ThemeConfig,
}

impl<P: PreferenceStore> ThemeService<P> {
    pub fn new(store: P, config: ThemeConfig) -> Self {
        Self { store, config }
    }

    /// Theme to apply on page load. A missing or unknown value means light.
    pub fn load(&self) -> Theme {
        Theme::from_stored(self.store.get(&self.config.storage_key).as_deref())
    }

    /// Flip `current`, persist the result, and return it.
    pub fn toggle(&self, current: Theme) -> Theme {
        let next = current.toggled();
        self.store.set(&self.config.storage_key, next.as_str());
        tracing::debug!(theme = %next, "theme toggled");
        next
    }
}
