//! Credential: the opaque bearer token attached to dashboard requests.

use std::fmt;

/// Name of the `<meta>` element whose `content` carries the token.
pub const META_NAME: &str = "jwt-token";

/// Session storage key the token is mirrored into.
pub const SESSION_KEY: &str = "jwt_token";

/// Cookie the server sets at login.
pub const COOKIE_NAME: &str = "jwt_token";

/// An opaque bearer token.
///
/// The shape and expiry of the token are never inspected; it is only ever
/// forwarded. `Debug` is redacted so the value cannot leak into logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a raw token, treating blank input as absent.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    /// The raw token value.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }

    /// Find `name` in a `document.cookie` style string.
    ///
    /// Whitespace around names and around `=` is ignored. When the name
    /// appears more than once the last pair wins. The value runs up to the
    /// next `;`.
    #[must_use]
    pub fn from_cookie_header(cookies: &str, name: &str) -> Option<Self> {
        cookies
            .split(';')
            .filter_map(|pair| pair.split_once('='))
            .rfind(|(key, _)| key.trim() == name)
            .and_then(|(_, value)| Self::new(value.trim_start()))
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}
