//! Submission state machine and the outcomes of a submit attempt.

use std::fmt;

use crate::response::ResponseBody;

/// Phase of a single submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Validating,
    Blocked,
    Sending,
    Succeeded,
    Failed,
}

impl SubmissionPhase {
    /// Whether moving from `self` to `next` is a legal step.
    ///
    /// `Idle → Sending` covers delete submissions, which skip validation.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        use SubmissionPhase::{Blocked, Failed, Idle, Sending, Succeeded, Validating};
        matches!(
            (self, next),
            (Idle, Validating | Sending)
                | (Validating, Blocked | Sending)
                | (Sending, Succeeded | Failed)
                | (Blocked | Succeeded | Failed, Idle)
        )
    }

    /// Step to `next`.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalTransition`] when the step is not part of the machine.
    pub fn advance(&mut self, next: Self) -> Result<(), IllegalTransition> {
        if !self.can_transition_to(next) {
            return Err(IllegalTransition {
                from: *self,
                to: next,
            });
        }
        *self = next;
        Ok(())
    }
}

/// A step the submission machine does not allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("illegal submission transition from {from:?} to {to:?}")]
pub struct IllegalTransition {
    pub from: SubmissionPhase,
    pub to: SubmissionPhase,
}

/// What the page should do after a successful (2xx) response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuccessAction {
    /// Navigate to the given URL.
    Redirect(String),
    /// Close the enclosing modal (if any), then reload after a short delay.
    CloseAndReload,
    /// Reload now; the body was not a recognisable success.
    Reload,
    /// Reload now; an HTML page came back, most likely the login page.
    RecoverFromHtml,
}

impl SuccessAction {
    /// Decide the follow-up for a 2xx body.
    #[must_use]
    pub fn from_body(body: &ResponseBody) -> Self {
        match body {
            ResponseBody::Action(action) => match (&action.redirect, action.success) {
                (Some(url), _) if !url.is_empty() => Self::Redirect(url.clone()),
                (_, Some(true)) => Self::CloseAndReload,
                _ => Self::Reload,
            },
            ResponseBody::Html => Self::RecoverFromHtml,
            ResponseBody::Unstructured => Self::Reload,
        }
    }
}

/// Final result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// No credential: the user was sent to the login view.
    Unauthenticated,
    /// Client-side validation failed; nothing was sent.
    Blocked(Vec<String>),
    /// The server accepted the submission.
    Succeeded(SuccessAction),
    /// The server or the network rejected the submission.
    Failed(Vec<String>),
}

impl SubmissionOutcome {
    /// The phase the machine ends in for this outcome.
    #[must_use]
    pub fn phase(&self) -> SubmissionPhase {
        match self {
            Self::Unauthenticated => SubmissionPhase::Idle,
            Self::Blocked(_) => SubmissionPhase::Blocked,
            Self::Succeeded(_) => SubmissionPhase::Succeeded,
            Self::Failed(_) => SubmissionPhase::Failed,
        }
    }
}

impl fmt::Display for SubmissionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthenticated => f.write_str("unauthenticated"),
            Self::Blocked(errors) => write!(f, "blocked ({} errors)", errors.len()),
            Self::Succeeded(action) => write!(f, "succeeded ({action:?})"),
            Self::Failed(errors) => write!(f, "failed ({} errors)", errors.len()),
        }
    }
}
