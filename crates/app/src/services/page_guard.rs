//! Page guard: sends visitors without a credential back to the login view.

use crate::config::RoutesConfig;
use crate::ports::{Browser, CredentialSource};
use crate::services::token_accessor::TokenAccessor;

/// Runs once per page load.
#[derive(Debug, Clone)]
pub struct PageGuard<S, B> {
    tokens: TokenAccessor<S>,
    browser: B,
    routes: RoutesConfig,
}

impl<S: CredentialSource, B: Browser> PageGuard<S, B> {
    pub fn new(tokens: TokenAccessor<S>, browser: B, routes: RoutesConfig) -> Self {
        Self {
            tokens,
            browser,
            routes,
        }
    }

    /// Redirect to the login view when a protected page has no credential.
    ///
    /// Returns `true` when the page may stay.
    pub fn check(&self) -> bool {
        let path = self.browser.current_path();
        if !path.contains(&self.routes.dashboard_marker) {
            return true;
        }
        if self.tokens.get_token().is_some() {
            return true;
        }
        tracing::info!(%path, "no credential on protected page, redirecting to login");
        self.browser.navigate(&self.routes.login);
        false
    }
}
