//! Remote name validator: asks the server whether a name is still free.
//!
//! The check runs in three steps so a reactive caller can publish the
//! `Validating` marker before the request leaves: [`NameValidator::begin`]
//! marks the field and builds the query, [`NameValidator::check`] performs
//! the round-trip, [`NameValidator::finish`] records the verdict.
//!
//! Requests are neither cancelled nor sequenced. If the value changes while
//! a check is in flight, the late answer still lands on the field.

use benchhub_domain::error::TransportError;
use benchhub_domain::form::Form;
use benchhub_domain::http::HttpRequest;
use benchhub_domain::response::NameCheckResponse;

use crate::ports::HttpTransport;

/// A pending availability query for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCheck {
    pub field: String,
    pub entity_label: String,
    pub request: HttpRequest,
}

/// Final state of a name check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameVerdict {
    /// The value was blank; nothing was asked.
    Skipped,
    Available,
    Taken(String),
    /// The server could not be asked; the field is left unjudged.
    Unknown,
}

/// Checks entity names against the server.
#[derive(Debug, Clone)]
pub struct NameValidator<H> {
    transport: H,
}

impl<H: HttpTransport> NameValidator<H> {
    pub fn new(transport: H) -> Self {
        Self { transport }
    }

    /// Mark `field` as validating and build the query.
    ///
    /// Returns `None` (and leaves the field alone) when the field is missing
    /// or its trimmed value is empty. `entity_id` is sent for edit forms so
    /// the server accepts an unchanged name.
    pub fn begin(
        form: &mut Form,
        field: &str,
        entity_id: Option<&str>,
        check_url: &str,
        entity_label: &str,
    ) -> Option<NameCheck> {
        let input = form.field_mut(field)?;
        let name = input.trimmed().to_string();
        if name.is_empty() {
            return None;
        }
        input.begin_validating();
        form.refresh_submit_state();

        let mut request = HttpRequest::get(check_url).with_query("name", name);
        if let Some(id) = entity_id {
            request = request.with_query("id", id);
        }
        Some(NameCheck {
            field: field.to_string(),
            entity_label: entity_label.to_string(),
            request,
        })
    }

    /// Perform the round-trip.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when no response arrives, the status is
    /// not 2xx, or the body is not a name-check answer.
    #[tracing::instrument(skip(self, check), fields(field = %check.field))]
    pub async fn check(&self, check: &NameCheck) -> Result<NameCheckResponse, TransportError> {
        let response = self.transport.send(check.request.clone()).await?;
        if !response.ok() {
            return Err(TransportError::Status {
                status: response.status,
                body: response.body,
            });
        }
        serde_json::from_str(&response.body).map_err(|err| TransportError::Decode(err.to_string()))
    }

    /// Record the verdict on the field and recompute submit enablement.
    ///
    /// A transport failure clears every marker without judging, so an
    /// unreachable endpoint never blocks submission.
    pub fn finish(
        form: &mut Form,
        check: &NameCheck,
        result: Result<NameCheckResponse, TransportError>,
    ) -> NameVerdict {
        let Some(input) = form.field_mut(&check.field) else {
            return NameVerdict::Unknown;
        };
        let verdict = match result {
            Ok(answer) if answer.valid => {
                input.accept(Some(format!("{} name is available", check.entity_label)));
                NameVerdict::Available
            }
            Ok(answer) => {
                let message = answer.message.unwrap_or_default();
                tracing::debug!(field = %check.field, %message, "name rejected");
                input.reject(message.clone());
                NameVerdict::Taken(message)
            }
            Err(err) => {
                tracing::warn!(field = %check.field, error = %err, "name check failed");
                input.reset();
                NameVerdict::Unknown
            }
        };
        form.refresh_submit_state();
        verdict
    }

    /// Run a complete check against `form`.
    pub async fn validate_entity_name(
        &self,
        form: &mut Form,
        field: &str,
        entity_id: Option<&str>,
        check_url: &str,
        entity_label: &str,
    ) -> NameVerdict {
        let Some(check) = Self::begin(form, field, entity_id, check_url, entity_label) else {
            return NameVerdict::Skipped;
        };
        let result = self.check(&check).await;
        Self::finish(form, &check, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fakes::FakeTransport;
    use benchhub_domain::field::{FeedbackKind, Field, FieldState};
    use benchhub_domain::http::HttpMethod;
    use std::rc::Rc;

    const CHECK_URL: &str = "/dashboard/devices/check-name";

    fn form(name: &str) -> Form {
        Form::new("/dashboard/devices/create", HttpMethod::Post)
            .with_field(Field::new("name").label("Name").required().value(name))
    }

    fn validator() -> (NameValidator<Rc<FakeTransport>>, Rc<FakeTransport>) {
        let transport = Rc::new(FakeTransport::default());
        (NameValidator::new(Rc::clone(&transport)), transport)
    }

    #[tokio::test]
    async fn should_mark_taken_name_invalid_with_server_message() {
        let (validator, transport) = validator();
        transport.respond(200, r#"{"valid": false, "message": "already exists"}"#);
        let mut form = form("rig-1");

        let verdict = validator
            .validate_entity_name(&mut form, "name", None, CHECK_URL, "Device")
            .await;

        assert_eq!(verdict, NameVerdict::Taken("already exists".to_string()));
        let field = form.field("name").unwrap();
        assert!(field.is_invalid());
        assert_eq!(field.feedback().unwrap().message, "already exists");
        assert!(form.submit.disabled);
    }

    #[tokio::test]
    async fn should_mark_free_name_valid_with_generated_message() {
        let (validator, transport) = validator();
        transport.respond(200, r#"{"valid": true}"#);
        let mut form = form("rig-1");

        let verdict = validator
            .validate_entity_name(&mut form, "name", None, CHECK_URL, "Device")
            .await;

        assert_eq!(verdict, NameVerdict::Available);
        let feedback = form.field("name").unwrap().feedback().unwrap().clone();
        assert_eq!(feedback.kind, FeedbackKind::Valid);
        assert_eq!(feedback.message, "Device name is available");
        assert!(!form.submit.disabled);
    }

    #[tokio::test]
    async fn should_send_trimmed_name_and_entity_id() {
        let (validator, transport) = validator();
        transport.respond(200, r#"{"valid": true}"#);
        let mut form = form("  rig 1 ");

        validator
            .validate_entity_name(&mut form, "name", Some("42"), CHECK_URL, "Device")
            .await;

        let sent = transport.sent();
        assert_eq!(sent[0].method, HttpMethod::Get);
        assert_eq!(
            sent[0].full_url(),
            "/dashboard/devices/check-name?name=rig+1&id=42"
        );
    }

    #[tokio::test]
    async fn should_skip_blank_value_without_request() {
        let (validator, transport) = validator();
        let mut form = form("   ");

        let verdict = validator
            .validate_entity_name(&mut form, "name", None, CHECK_URL, "Device")
            .await;

        assert_eq!(verdict, NameVerdict::Skipped);
        assert!(transport.sent().is_empty());
        assert_eq!(form.field("name").unwrap().state(), FieldState::Unvalidated);
    }

    #[tokio::test]
    async fn should_fail_open_on_transport_error() {
        let (validator, transport) = validator();
        transport.fail("connection refused");
        let mut form = form("rig-1");
        form.field_mut("name").unwrap().reject("stale");

        let verdict = validator
            .validate_entity_name(&mut form, "name", None, CHECK_URL, "Device")
            .await;

        assert_eq!(verdict, NameVerdict::Unknown);
        let field = form.field("name").unwrap();
        assert_eq!(field.state(), FieldState::Unvalidated);
        assert!(field.feedback().is_none());
        assert!(!form.submit.disabled);
    }

    #[tokio::test]
    async fn should_fail_open_on_server_error_status() {
        let (validator, transport) = validator();
        transport.respond(500, "Internal Server Error");
        let mut form = form("rig-1");

        let verdict = validator
            .validate_entity_name(&mut form, "name", None, CHECK_URL, "Device")
            .await;

        assert_eq!(verdict, NameVerdict::Unknown);
        assert!(!form.submit.disabled);
    }

    #[test]
    fn should_disable_submit_while_check_in_flight() {
        let mut form = form("rig-1");
        let check = NameValidator::<FakeTransport>::begin(
            &mut form,
            "name",
            None,
            CHECK_URL,
            "Device",
        )
        .unwrap();
        assert!(form.field("name").unwrap().is_validating());
        assert!(form.submit.disabled);
        assert_eq!(check.entity_label, "Device");
    }

    #[test]
    fn should_apply_late_answer_to_changed_value() {
        let mut form = form("rig-1");
        let check =
            NameValidator::<FakeTransport>::begin(&mut form, "name", None, CHECK_URL, "Device")
                .unwrap();
        form.field_mut("name").unwrap().value = "rig-2".to_string();

        let answer = NameCheckResponse {
            valid: false,
            message: Some("already exists".to_string()),
        };
        NameValidator::<FakeTransport>::finish(&mut form, &check, Ok(answer));

        assert!(form.field("name").unwrap().is_invalid());
    }
}
