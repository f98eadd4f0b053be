//! Submission Controller: `Idle → Submitting → {Succeeded, Failed}`.
//!
//! The controller only tracks state; the network call happens elsewhere.
//! Callers bracket it with [`SubmissionController::begin`] and
//! [`SubmissionController::complete`] (or [`SubmissionController::abandon`]
//! when the call is cancelled).

use crate::form::FormState;
use crate::types::Appearance;

/// Shown after the API accepts the draft.
pub const SUCCESS_MESSAGE: &str = "Cadastro realizado com sucesso";

/// Shown after the API rejects the draft.
pub const ERROR_MESSAGE: &str = "Campo obrigatório em destaque";

/// Route pushed after a successful submission.
pub const LISTING_ROUTE: &str = "/app";

/// Sink for user-facing notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, appearance: Appearance);
}

/// Moves the user to another view.
pub trait Navigator: Send + Sync {
    fn push(&self, route: &str);
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    /// Validation messages extracted from the API's error body.
    Failed { messages: Vec<String> },
}

/// Proof that a submission is in flight. Consumed by `complete`/`abandon`.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "an in-flight submission must be completed or abandoned"]
pub struct SubmissionTicket {
    serial: u64,
}

/// What a submit attempt ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Succeeded,
    Rejected { messages: Vec<String> },
    /// Another submission was already in flight, or the ticket was stale.
    Ignored,
}

#[derive(Debug, Default)]
pub struct SubmissionController {
    state: SubmissionState,
    serial: u64,
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    /// Enter `Submitting`. Returns `None` while a submission is already in
    /// flight, so a double trigger does nothing.
    pub fn begin(&mut self) -> Option<SubmissionTicket> {
        if self.is_submitting() {
            return None;
        }
        self.serial += 1;
        self.state = SubmissionState::Submitting;
        Some(SubmissionTicket {
            serial: self.serial,
        })
    }

    /// Apply the API result.
    ///
    /// `Ok` clears the form's error flag, notifies success and navigates to
    /// the listing. `Err` raises the error flag and notifies the error without
    /// navigating.
    pub fn complete(
        &mut self,
        ticket: SubmissionTicket,
        result: Result<(), Vec<String>>,
        form: &mut FormState,
        notifier: &dyn Notifier,
        navigator: &dyn Navigator,
    ) -> SubmitOutcome {
        if !self.owns(&ticket) {
            return SubmitOutcome::Ignored;
        }
        match result {
            Ok(()) => {
                self.state = SubmissionState::Succeeded;
                form.set_has_error(false);
                notifier.notify(SUCCESS_MESSAGE, Appearance::Success);
                navigator.push(LISTING_ROUTE);
                SubmitOutcome::Succeeded
            }
            Err(messages) => {
                self.state = SubmissionState::Failed {
                    messages: messages.clone(),
                };
                form.set_has_error(true);
                notifier.notify(ERROR_MESSAGE, Appearance::Error);
                SubmitOutcome::Rejected { messages }
            }
        }
    }

    /// The call was cancelled before it finished: back to `Idle`, silently.
    pub fn abandon(&mut self, ticket: SubmissionTicket) {
        if self.owns(&ticket) {
            self.state = SubmissionState::Idle;
        }
    }

    fn owns(&self, ticket: &SubmissionTicket) -> bool {
        self.is_submitting() && ticket.serial == self.serial
    }
}
