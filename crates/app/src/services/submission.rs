//! Submission controller: gates a form submit on validation, sends it with
//! the credential, and reacts to the server's answer.
//!
//! Like the name validator it is split so a reactive caller can publish form
//! changes between steps: [`SubmissionController::prepare`] runs the
//! synchronous part, [`SubmissionController::dispatch`] performs the
//! round-trip and the page-level effects, [`SubmissionController::apply`]
//! writes the outcome back into the form. [`SubmissionController::submit`]
//! chains all three plus the fallback restore.

use benchhub_domain::entity::{FormKind, is_delete_action};
use benchhub_domain::error::TransportError;
use benchhub_domain::form::Form;
use benchhub_domain::http::{AUTHORIZATION, HttpMethod, HttpRequest, HttpResponse};
use benchhub_domain::response::{ErrorPayload, ResponseBody};
use benchhub_domain::submission::{SubmissionOutcome, SubmissionPhase, SuccessAction};
use benchhub_domain::validation::validate_for;

use crate::config::DashboardConfig;
use crate::ports::{Browser, CredentialSource, HttpTransport, Timer};
use crate::services::token_accessor::TokenAccessor;

/// Shown before redirecting an anonymous user to the login view.
pub const NOT_LOGGED_IN: &str = "Not logged in. Please log in to continue.";

/// A submission that passed the entry guard and validation.
#[derive(Debug, Clone)]
pub struct SubmissionAttempt {
    pub request: HttpRequest,
    pub delete: bool,
    pub modal_id: Option<String>,
    phase: SubmissionPhase,
}

impl SubmissionAttempt {
    #[must_use]
    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }
}

fn step(phase: &mut SubmissionPhase, next: SubmissionPhase) {
    if let Err(err) = phase.advance(next) {
        tracing::error!(error = %err, "submission state machine violated");
    }
}

/// Sends login-gated requests and redirects anonymous users.
pub(crate) fn require_credential<S: CredentialSource, B: Browser>(
    tokens: &TokenAccessor<S>,
    browser: &B,
    login: &str,
) -> Option<benchhub_domain::credential::Credential> {
    let cred = tokens.get_token();
    if cred.is_none() {
        tracing::info!("no credential, redirecting to login");
        browser.alert(NOT_LOGGED_IN);
        browser.navigate(login);
    }
    cred
}

/// Messages for a non-2xx response or a transport failure.
fn failure_messages(error: &TransportError) -> Vec<String> {
    error
        .body()
        .and_then(ErrorPayload::parse)
        .and_then(|payload| payload.messages())
        .unwrap_or_else(|| vec![format!("An error occurred: {error}")])
}

/// Orchestrates AJAX form submissions.
pub struct SubmissionController<S, H, B, T> {
    tokens: TokenAccessor<S>,
    transport: H,
    browser: B,
    timer: T,
    config: DashboardConfig,
}

impl<S, H, B, T> SubmissionController<S, H, B, T>
where
    S: CredentialSource,
    H: HttpTransport,
    B: Browser,
    T: Timer,
{
    pub fn new(
        tokens: TokenAccessor<S>,
        transport: H,
        browser: B,
        timer: T,
        config: DashboardConfig,
    ) -> Self {
        Self {
            tokens,
            transport,
            browser,
            timer,
            config,
        }
    }

    /// Run the entry guard and validation, then mark the form busy.
    ///
    /// # Errors
    ///
    /// Returns the terminal outcome when the attempt stops here:
    /// [`SubmissionOutcome::Unauthenticated`] without a credential (the
    /// browser is sent to the login view), or
    /// [`SubmissionOutcome::Blocked`] when validation fails (the errors are
    /// rendered on the form). Delete submissions skip validation.
    pub fn prepare(&self, form: &mut Form) -> Result<SubmissionAttempt, SubmissionOutcome> {
        if form.delete_form {
            self.browser
                .reload_after(self.config.timing.delete_reload_guard());
        }

        let Some(cred) = require_credential(&self.tokens, &self.browser, &self.config.routes.login)
        else {
            return Err(SubmissionOutcome::Unauthenticated);
        };

        let mut phase = SubmissionPhase::Idle;
        let delete = is_delete_action(&form.action);
        if !delete {
            step(&mut phase, SubmissionPhase::Validating);
            let errors = validate_for(FormKind::from_action(&form.action), form);
            if !errors.is_empty() {
                step(&mut phase, SubmissionPhase::Blocked);
                tracing::debug!(action = %form.action, count = errors.len(), "submission blocked");
                form.display_errors(&errors);
                return Err(SubmissionOutcome::Blocked(errors));
            }
        }

        step(&mut phase, SubmissionPhase::Sending);
        form.submit.start_busy();

        let pairs = form.serialize();
        let mut request = HttpRequest::new(form.method, form.action.clone());
        if form.method == HttpMethod::Get {
            request.query = pairs;
        } else {
            request = request.with_form(pairs);
        }
        request.set_header(AUTHORIZATION, cred.bearer());

        Ok(SubmissionAttempt {
            request,
            delete,
            modal_id: form.modal_id.clone(),
            phase,
        })
    }

    /// Send the request and carry out the page-level follow-up.
    #[tracing::instrument(skip(self, attempt), fields(method = %attempt.request.method, url = %attempt.request.url))]
    pub async fn dispatch(&self, mut attempt: SubmissionAttempt) -> SubmissionOutcome {
        let result = self.transport.send(attempt.request.clone()).await;
        let outcome = match result {
            Ok(response) if response.ok() => {
                let action = SuccessAction::from_body(&ResponseBody::classify(&response.body));
                self.follow_up(&action, attempt.modal_id.as_deref(), attempt.delete);
                SubmissionOutcome::Succeeded(action)
            }
            Ok(HttpResponse { status, body }) => {
                let err = TransportError::Status { status, body };
                tracing::warn!(error = %err, "submission rejected");
                SubmissionOutcome::Failed(failure_messages(&err))
            }
            Err(err) => {
                tracing::warn!(error = %err, "submission failed");
                SubmissionOutcome::Failed(failure_messages(&err))
            }
        };
        step(&mut attempt.phase, outcome.phase());
        outcome
    }

    fn follow_up(&self, action: &SuccessAction, modal_id: Option<&str>, delete: bool) {
        match action {
            SuccessAction::Redirect(url) => self.browser.navigate(url),
            SuccessAction::CloseAndReload => {
                if let Some(modal) = modal_id {
                    self.browser.close_modal(modal);
                }
                tracing::info!(delete, "submission succeeded, refreshing page");
                self.browser.reload_after(self.config.timing.reload_delay());
            }
            SuccessAction::Reload => self.browser.reload(),
            SuccessAction::RecoverFromHtml => {
                tracing::info!("received HTML instead of JSON, reloading page");
                self.browser.reload();
            }
        }
    }

    /// Write a dispatched outcome back into the form.
    ///
    /// Failures restore the submit control and render the messages; other
    /// outcomes leave the form to the fallback restore.
    pub fn apply(form: &mut Form, outcome: &SubmissionOutcome) {
        if let SubmissionOutcome::Failed(errors) = outcome {
            form.submit.restore();
            form.display_errors(errors);
        }
    }

    /// Delay after which the submit control is restored unconditionally.
    pub fn restore_delay(&self) -> std::time::Duration {
        self.config.timing.submit_restore()
    }

    /// Run a whole submission against `form`.
    pub async fn submit(&self, form: &mut Form) -> SubmissionOutcome {
        let attempt = match self.prepare(form) {
            Ok(attempt) => attempt,
            Err(outcome) => return outcome,
        };
        let outcome = self.dispatch(attempt).await;
        Self::apply(form, &outcome);
        self.timer.sleep(self.restore_delay()).await;
        form.submit.restore();
        outcome
    }
}
