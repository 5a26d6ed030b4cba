//! Common error types used across the workspace.
//!
//! Validation failures carry the exact user-facing message as their
//! `Display` output, so the same value can be attached to a field as
//! feedback and pushed into a form's error list.

/// A field or form failed client-side validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{label} is required")]
    Required { label: String },

    #[error("{label} must be {max} characters or less")]
    TooLong { label: String, max: usize },

    #[error("This field is required")]
    NumberRequired,

    #[error("Please enter a valid number")]
    NotANumber,

    #[error("Value must be at least {min}")]
    BelowMin { min: String },

    #[error("Value must be at most {max}")]
    AboveMax { max: String },

    #[error("IP Address is required")]
    IpRequired,

    #[error("Invalid IP Address format")]
    IpFormat,

    #[error("IP Address octets must be between 0 and 255")]
    IpOctetRange,

    #[error("Port must be a number between 1 and 65535")]
    PortRange,
}

/// An HTTP exchange did not produce a successful response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request never produced a response (network down, CORS, aborted).
    #[error("{0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}")]
    Status { status: u16, body: String },

    /// The body could not be decoded into the expected shape.
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl TransportError {
    /// Body of a non-2xx response, if the server sent one.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } if !body.is_empty() => Some(body),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_format_required_message_with_label() {
        let err = ValidationError::Required {
            label: "Name".to_string(),
        };
        assert_eq!(err.to_string(), "Name is required");
    }

    #[test]
    fn should_format_length_message_with_bound() {
        let err = ValidationError::TooLong {
            label: "Description".to_string(),
            max: 64,
        };
        assert_eq!(err.to_string(), "Description must be 64 characters or less");
    }

    #[test]
    fn should_format_range_messages_with_raw_bounds() {
        assert_eq!(
            ValidationError::BelowMin {
                min: "1".to_string()
            }
            .to_string(),
            "Value must be at least 1"
        );
        assert_eq!(
            ValidationError::AboveMax {
                max: "65535".to_string()
            }
            .to_string(),
            "Value must be at most 65535"
        );
    }

    #[test]
    fn should_display_status_error() {
        let err = TransportError::Status {
            status: 500,
            body: String::new(),
        };
        assert_eq!(err.to_string(), "HTTP 500");
        assert!(err.body().is_none());
    }

    #[test]
    fn should_expose_status_body() {
        let err = TransportError::Status {
            status: 400,
            body: r#"{"error":"bad"}"#.to_string(),
        };
        assert_eq!(err.body(), Some(r#"{"error":"bad"}"#));
    }
}
