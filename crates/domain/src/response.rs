//! Shapes of the JSON bodies the dashboard endpoints return.

use serde::Deserialize;

/// Marker that identifies a full HTML page returned in place of JSON.
const HTML_MARKER: &str = "<!doctype html>";

/// Successful action response: `{redirect?, success?}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ActionResponse {
    #[serde(default)]
    pub redirect: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
}

/// `error` may be a single message or a list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

/// Failed action response: `{error}` or `{msg}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorPayload {
    #[serde(default)]
    pub error: Option<OneOrMany>,
    #[serde(default)]
    pub msg: Option<String>,
}

impl ErrorPayload {
    /// Parse a failure body, returning `None` when it is not a JSON object.
    #[must_use]
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }

    /// Messages to render: `error` takes precedence over `msg`.
    #[must_use]
    pub fn messages(&self) -> Option<Vec<String>> {
        match (&self.error, &self.msg) {
            (Some(OneOrMany::One(message)), _) => Some(vec![message.clone()]),
            (Some(OneOrMany::Many(messages)), _) => Some(messages.clone()),
            (None, Some(msg)) => Some(vec![msg.clone()]),
            (None, None) => None,
        }
    }

    /// The `error` field flattened to a single line, for alert surfaces.
    #[must_use]
    pub fn error_text(&self) -> Option<String> {
        match self.error.as_ref()? {
            OneOrMany::One(message) => Some(message.clone()),
            OneOrMany::Many(messages) => Some(messages.join(",")),
        }
    }
}

/// Name availability answer: `{valid, message?}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NameCheckResponse {
    pub valid: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// How a 2xx body should be interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    /// A JSON object in the action response shape.
    Action(ActionResponse),
    /// A full HTML page: the request most likely landed on the login page.
    Html,
    /// Anything else (plain text, JSON of another shape).
    Unstructured,
}

impl ResponseBody {
    /// Classify a successful response body.
    #[must_use]
    pub fn classify(body: &str) -> Self {
        if let Ok(action) = serde_json::from_str::<ActionResponse>(body) {
            return Self::Action(action);
        }
        if body.to_ascii_lowercase().contains(HTML_MARKER) {
            Self::Html
        } else {
            Self::Unstructured
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_classify_redirect_response() {
        let body = ResponseBody::classify(r#"{"redirect":"/dashboard/devices"}"#);
        assert_eq!(
            body,
            ResponseBody::Action(ActionResponse {
                redirect: Some("/dashboard/devices".to_string()),
                success: None,
            })
        );
    }

    #[test]
    fn should_classify_html_page() {
        let body = ResponseBody::classify("<!DOCTYPE html>\n<html><body>Login</body></html>");
        assert_eq!(body, ResponseBody::Html);
    }

    #[test]
    fn should_classify_plain_text_as_unstructured() {
        assert_eq!(ResponseBody::classify("ok"), ResponseBody::Unstructured);
        assert_eq!(ResponseBody::classify("[1,2]"), ResponseBody::Unstructured);
    }

    #[test]
    fn should_read_single_error_message() {
        let payload = ErrorPayload::parse(r#"{"error":"Device name already exists"}"#).unwrap();
        assert_eq!(
            payload.messages(),
            Some(vec!["Device name already exists".to_string()])
        );
    }

    #[test]
    fn should_read_error_list() {
        let payload = ErrorPayload::parse(r#"{"error":["Name is required","Bad IP"]}"#).unwrap();
        assert_eq!(payload.messages().unwrap().len(), 2);
        assert_eq!(payload.error_text().unwrap(), "Name is required,Bad IP");
    }

    #[test]
    fn should_fall_back_to_msg() {
        let payload = ErrorPayload::parse(r#"{"msg":"Token has expired"}"#).unwrap();
        assert_eq!(payload.messages(), Some(vec!["Token has expired".to_string()]));
        assert!(payload.error_text().is_none());
    }

    #[test]
    fn should_return_none_for_non_json_error_body() {
        assert!(ErrorPayload::parse("Internal Server Error").is_none());
        assert!(ErrorPayload::parse("{}").unwrap().messages().is_none());
    }

    #[test]
    fn should_parse_name_check_without_message() {
        let check: NameCheckResponse = serde_json::from_str(r#"{"valid":true}"#).unwrap();
        assert!(check.valid);
        assert!(check.message.is_none());
    }
}
