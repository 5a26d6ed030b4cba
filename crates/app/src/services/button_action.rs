//! Button actions: one-shot requests fired by stop/delete style buttons.

use benchhub_domain::error::TransportError;
use benchhub_domain::http::{AUTHORIZATION, HttpMethod, HttpRequest};
use benchhub_domain::response::{ErrorPayload, ResponseBody};

use crate::config::DashboardConfig;
use crate::ports::{Browser, CredentialSource, HttpTransport};
use crate::services::submission::require_credential;
use crate::services::token_accessor::TokenAccessor;

/// What a button asks for, as declared on the element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonAction {
    pub url: String,
    pub method: HttpMethod,
    /// Prompt shown before sending; `None` sends straight away.
    pub confirm: Option<String>,
    /// Id of the enclosing modal, if any.
    pub modal_id: Option<String>,
}

impl ButtonAction {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: HttpMethod::Post,
            confirm: None,
            modal_id: None,
        }
    }

    #[must_use]
    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    #[must_use]
    pub fn confirm(mut self, prompt: impl Into<String>) -> Self {
        self.confirm = Some(prompt.into()).filter(|p: &String| !p.is_empty());
        self
    }

    #[must_use]
    pub fn in_modal(mut self, modal_id: impl Into<String>) -> Self {
        self.modal_id = Some(modal_id.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonOutcome {
    Unauthenticated,
    /// The user dismissed the confirmation prompt.
    Declined,
    Redirected(String),
    /// `success: true`; `reloaded` tells whether a data table forced a reload.
    Completed { reloaded: bool },
    /// Any other 2xx answer, logged only.
    Acknowledged,
    /// The request failed; `alerted` holds the message shown to the user.
    Failed { alerted: Option<String> },
}

/// Runs [`ButtonAction`]s.
pub struct ButtonActionController<S, H, B> {
    tokens: TokenAccessor<S>,
    transport: H,
    browser: B,
    config: DashboardConfig,
}

impl<S, H, B> ButtonActionController<S, H, B>
where
    S: CredentialSource,
    H: HttpTransport,
    B: Browser,
{
    pub fn new(tokens: TokenAccessor<S>, transport: H, browser: B, config: DashboardConfig) -> Self {
        Self {
            tokens,
            transport,
            browser,
            config,
        }
    }

    #[tracing::instrument(skip(self, action), fields(method = %action.method, url = %action.url))]
    pub async fn trigger(&self, action: &ButtonAction) -> ButtonOutcome {
        let Some(cred) = require_credential(&self.tokens, &self.browser, &self.config.routes.login)
        else {
            return ButtonOutcome::Unauthenticated;
        };
        if let Some(prompt) = &action.confirm {
            if !self.browser.confirm(prompt) {
                tracing::debug!("action declined");
                return ButtonOutcome::Declined;
            }
        }

        let mut request = HttpRequest::new(action.method, action.url.clone());
        request.set_header(AUTHORIZATION, cred.bearer());

        match self.transport.send(request).await {
            Ok(response) if response.ok() => self.on_success(action, &response.body),
            Ok(response) => self.on_failure(&TransportError::Status {
                status: response.status,
                body: response.body,
            }),
            Err(err) => self.on_failure(&err),
        }
    }

    fn on_success(&self, action: &ButtonAction, body: &str) -> ButtonOutcome {
        let ResponseBody::Action(answer) = ResponseBody::classify(body) else {
            tracing::info!(body, "action succeeded");
            return ButtonOutcome::Acknowledged;
        };
        if let Some(url) = answer.redirect.filter(|url| !url.is_empty()) {
            self.browser.navigate(&url);
            return ButtonOutcome::Redirected(url);
        }
        if answer.success != Some(true) {
            tracing::info!(body, "action succeeded");
            return ButtonOutcome::Acknowledged;
        }
        if let Some(modal) = &action.modal_id {
            self.browser.close_modal(modal);
        }
        let reloaded = self.browser.has_data_table();
        if reloaded {
            self.browser.reload();
        }
        ButtonOutcome::Completed { reloaded }
    }

    fn on_failure(&self, err: &TransportError) -> ButtonOutcome {
        let message = err
            .body()
            .and_then(ErrorPayload::parse)
            .and_then(|payload| payload.error_text());
        match &message {
            Some(text) => self.browser.alert(text),
            None => tracing::error!(error = %err, "action failed"),
        }
        ButtonOutcome::Failed { alerted: message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CredentialConfig;
    use crate::services::fakes::{BrowserEvent, FakeBrowser, FakeCredentials, FakeTransport};
    use crate::services::submission::NOT_LOGGED_IN;
    use std::rc::Rc;

    fn controller(
        token: Option<&str>,
        browser: FakeBrowser,
    ) -> (
        ButtonActionController<FakeCredentials, Rc<FakeTransport>, Rc<FakeBrowser>>,
        Rc<FakeTransport>,
        Rc<FakeBrowser>,
    ) {
        let transport = Rc::new(FakeTransport::default());
        let browser = Rc::new(browser);
        let source = token.map_or_else(FakeCredentials::default, FakeCredentials::with_meta);
        let controller = ButtonActionController::new(
            TokenAccessor::new(source, CredentialConfig::default()),
            Rc::clone(&transport),
            Rc::clone(&browser),
            DashboardConfig::default(),
        );
        (controller, transport, browser)
    }

    fn stop_action() -> ButtonAction {
        ButtonAction::new("/dashboard/runs/7/stop")
            .confirm("Stop this run?")
            .in_modal("runModal")
    }

    #[tokio::test]
    async fn should_redirect_to_login_without_credential() {
        let (controller, transport, browser) = controller(None, FakeBrowser::default());

        let outcome = controller.trigger(&stop_action()).await;

        assert_eq!(outcome, ButtonOutcome::Unauthenticated);
        assert!(transport.sent().is_empty());
        assert_eq!(
            browser.events(),
            vec![
                BrowserEvent::Alert(NOT_LOGGED_IN.to_string()),
                BrowserEvent::Navigate("/login".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn should_not_send_when_confirmation_declined() {
        let fake = FakeBrowser::default();
        fake.confirm_answer.set(false);
        let (controller, transport, _browser) = controller(Some("tok"), fake);

        let outcome = controller.trigger(&stop_action()).await;

        assert_eq!(outcome, ButtonOutcome::Declined);
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn should_send_declared_method_with_bearer() {
        let (controller, transport, _browser) = controller(Some("tok"), FakeBrowser::default());
        transport.respond(200, "{}");

        controller
            .trigger(&ButtonAction::new("/dashboard/devices/3").method(HttpMethod::Delete))
            .await;

        let sent = transport.sent();
        assert_eq!(sent[0].method, HttpMethod::Delete);
        assert_eq!(sent[0].header(AUTHORIZATION), Some("Bearer tok"));
    }

    #[tokio::test]
    async fn should_close_modal_and_reload_when_table_present() {
        let fake = FakeBrowser {
            table: true,
            ..FakeBrowser::default()
        };
        let (controller, transport, browser) = controller(Some("tok"), fake);
        transport.respond(200, r#"{"success": true}"#);

        let outcome = controller.trigger(&stop_action()).await;

        assert_eq!(outcome, ButtonOutcome::Completed { reloaded: true });
        assert_eq!(
            browser.events(),
            vec![
                BrowserEvent::Confirm("Stop this run?".to_string()),
                BrowserEvent::CloseModal("runModal".to_string()),
                BrowserEvent::Reload,
            ]
        );
    }

    #[tokio::test]
    async fn should_not_reload_without_table() {
        let (controller, transport, browser) = controller(Some("tok"), FakeBrowser::default());
        transport.respond(200, r#"{"success": true}"#);

        let outcome = controller.trigger(&ButtonAction::new("/x")).await;

        assert_eq!(outcome, ButtonOutcome::Completed { reloaded: false });
        assert!(browser.events().is_empty());
    }

    #[tokio::test]
    async fn should_follow_redirect() {
        let (controller, transport, browser) = controller(Some("tok"), FakeBrowser::default());
        transport.respond(200, r#"{"redirect": "/dashboard/runs"}"#);

        let outcome = controller.trigger(&ButtonAction::new("/x")).await;

        assert_eq!(outcome, ButtonOutcome::Redirected("/dashboard/runs".to_string()));
        assert_eq!(
            browser.events(),
            vec![BrowserEvent::Navigate("/dashboard/runs".to_string())]
        );
    }

    #[tokio::test]
    async fn should_alert_server_error() {
        let (controller, transport, browser) = controller(Some("tok"), FakeBrowser::default());
        transport.respond(409, r#"{"error": ["Run already stopped", "Retry later"]}"#);

        let outcome = controller.trigger(&ButtonAction::new("/x")).await;

        let text = "Run already stopped,Retry later".to_string();
        assert_eq!(
            outcome,
            ButtonOutcome::Failed {
                alerted: Some(text.clone())
            }
        );
        assert_eq!(browser.events(), vec![BrowserEvent::Alert(text)]);
    }

    #[tokio::test]
    async fn should_only_log_failure_without_error_field() {
        let (controller, transport, browser) = controller(Some("tok"), FakeBrowser::default());
        transport.respond(401, r#"{"msg": "Token has expired"}"#);

        let outcome = controller.trigger(&ButtonAction::new("/x")).await;

        assert_eq!(outcome, ButtonOutcome::Failed { alerted: None });
        assert!(browser.events().is_empty());
    }

    #[test]
    fn should_treat_empty_confirm_as_absent() {
        assert!(ButtonAction::new("/x").confirm("").confirm.is_none());
    }
}
