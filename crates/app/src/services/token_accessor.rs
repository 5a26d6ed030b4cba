//! Token accessor: resolves the bearer credential for the current page.

use benchhub_domain::credential::Credential;

use crate::config::CredentialConfig;
use crate::ports::CredentialSource;

/// Resolves the credential from the page, session storage, or cookies.
#[derive(Debug, Clone)]
pub struct TokenAccessor<S> {
    source: S,
    keys: CredentialConfig,
}

impl<S: CredentialSource> TokenAccessor<S> {
    /// Create an accessor reading from `source` under the configured keys.
    pub fn new(source: S, keys: CredentialConfig) -> Self {
        Self { source, keys }
    }

    /// Resolve the credential.
    ///
    /// Lookup order: the meta element, then session storage, then the
    /// cookie. A cookie hit is mirrored into session storage. Absence is
    /// not an error; the caller decides what to do.
    pub fn get_token(&self) -> Option<Credential> {
        if let Some(cred) = self
            .source
            .meta_content(&self.keys.meta_name)
            .and_then(Credential::new)
        {
            return Some(cred);
        }
        if let Some(cred) = self
            .source
            .session_item(&self.keys.session_key)
            .and_then(Credential::new)
        {
            return Some(cred);
        }
        let cred = Credential::from_cookie_header(&self.source.cookies(), &self.keys.cookie_name)?;
        tracing::debug!("credential promoted from cookie to session storage");
        self.source
            .set_session_item(&self.keys.session_key, cred.expose());
        Some(cred)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fakes::FakeCredentials;
    use std::rc::Rc;

    fn accessor(source: &Rc<FakeCredentials>) -> TokenAccessor<Rc<FakeCredentials>> {
        TokenAccessor::new(Rc::clone(source), CredentialConfig::default())
    }

    #[test]
    fn should_prefer_meta_element() {
        let source = Rc::new(FakeCredentials {
            meta: Some("from-meta".to_string()),
            cookies: "jwt_token=from-cookie".to_string(),
            ..FakeCredentials::default()
        });
        source.set_session_item("jwt_token", "from-session");
        let token = accessor(&source).get_token().unwrap();
        assert_eq!(token.expose(), "from-meta");
    }

    #[test]
    fn should_fall_back_to_session_storage() {
        let source = Rc::new(FakeCredentials {
            meta: Some(String::new()),
            cookies: "jwt_token=from-cookie".to_string(),
            ..FakeCredentials::default()
        });
        source.set_session_item("jwt_token", "from-session");
        assert_eq!(
            accessor(&source).get_token().unwrap().expose(),
            "from-session"
        );
    }

    #[test]
    fn should_promote_cookie_into_session_storage() {
        let source = Rc::new(FakeCredentials {
            cookies: "theme=dark; jwt_token=from-cookie".to_string(),
            ..FakeCredentials::default()
        });
        let token = accessor(&source).get_token().unwrap();
        assert_eq!(token.expose(), "from-cookie");
        assert_eq!(
            source.session_item("jwt_token").as_deref(),
            Some("from-cookie")
        );
    }

    #[test]
    fn should_return_none_when_no_source_has_token() {
        let source = Rc::new(FakeCredentials::default());
        assert!(accessor(&source).get_token().is_none());
        assert!(source.session.borrow().is_empty());
    }

    #[test]
    fn should_honour_configured_cookie_name() {
        let source = Rc::new(FakeCredentials {
            cookies: "auth=abc".to_string(),
            ..FakeCredentials::default()
        });
        let keys = CredentialConfig {
            cookie_name: "auth".to_string(),
            ..CredentialConfig::default()
        };
        let token = TokenAccessor::new(Rc::clone(&source), keys).get_token();
        assert_eq!(token.unwrap().expose(), "abc");
    }
}
