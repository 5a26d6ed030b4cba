//! Transport-neutral HTTP request and response shapes.

use std::fmt;

use url::form_urlencoded;

/// Header carrying the bearer credential.
pub const AUTHORIZATION: &str = "Authorization";

/// HTTP verb declared on a form or action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    Get,
    #[default]
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Parse a declared method, case-insensitively. Unknown or missing
    /// values fall back to `POST`.
    #[must_use]
    pub fn from_declared(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(m) if m.eq_ignore_ascii_case("get") => Self::Get,
            Some(m) if m.eq_ignore_ascii_case("put") => Self::Put,
            Some(m) if m.eq_ignore_ascii_case("delete") => Self::Delete,
            _ => Self::Post,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
            Self::Put => f.write_str("PUT"),
            Self::Delete => f.write_str("DELETE"),
        }
    }
}

/// An outgoing request, built by the services and executed by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    /// `application/x-www-form-urlencoded` pairs.
    pub form: Option<Vec<(String, String)>>,
}

impl HttpRequest {
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            query: Vec::new(),
            form: None,
        }
    }

    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    /// Set a header, replacing any existing value with the same
    /// (case-insensitive) name.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.into()));
    }

    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_form(mut self, pairs: Vec<(String, String)>) -> Self {
        self.form = Some(pairs);
        self
    }

    /// The URL with the query pairs appended.
    #[must_use]
    pub fn full_url(&self) -> String {
        if self.query.is_empty() {
            return self.url.clone();
        }
        let sep = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{sep}{}", self.url, encode_pairs(&self.query))
    }

    /// The url-encoded form body, if any.
    #[must_use]
    pub fn form_body(&self) -> Option<String> {
        self.form.as_deref().map(encode_pairs)
    }
}

/// A response as seen by the services: status plus raw body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    #[must_use]
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Join pairs as an `application/x-www-form-urlencoded` string.
#[must_use]
pub fn encode_pairs(pairs: &[(String, String)]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

/// Form-encode a single value; spaces become `+`.
#[must_use]
pub fn encode_component(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
