//! Submission form lifecycle
//!
//! Every form moves `Idle -> Validating -> Submitting -> Success | Failed`.
//! Validation failures return to `Idle` carrying inline field messages;
//! `Failed` may be resubmitted straight away.

use std::collections::BTreeMap;
use std::future::Future;

use serde::Serialize;
use thiserror::Error;

use super::error::ValidationErrors;
use super::submission::SubmissionResult;
use crate::error::Error;

/// Where a form currently is in its lifecycle
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FormState {
    Idle {
        field_errors: BTreeMap<String, String>,
    },
    Validating,
    Submitting,
    Success {
        result: SubmissionResult,
    },
    Failed {
        message: String,
        retryable: bool,
    },
}

/// Something that happened to a form
#[derive(Debug)]
pub enum FormEvent {
    Submit,
    ValidationPassed,
    ValidationFailed(ValidationErrors),
    Succeeded(SubmissionResult),
    Failed(Error),
    Dismiss,
}

impl FormEvent {
    fn name(&self) -> &'static str {
        match self {
            FormEvent::Submit => "submit",
            FormEvent::ValidationPassed => "validation_passed",
            FormEvent::ValidationFailed(_) => "validation_failed",
            FormEvent::Succeeded(_) => "succeeded",
            FormEvent::Failed(_) => "failed",
            FormEvent::Dismiss => "dismiss",
        }
    }
}

/// An event arrived in a state that does not accept it
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot apply '{event}' to a form that is {state}")]
pub struct InvalidTransition {
    pub state: &'static str,
    pub event: &'static str,
}

impl Default for FormState {
    fn default() -> Self {
        FormState::idle()
    }
}

impl FormState {
    /// A fresh form with no messages
    pub fn idle() -> Self {
        FormState::Idle {
            field_errors: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FormState::Idle { .. } => "idle",
            FormState::Validating => "validating",
            FormState::Submitting => "submitting",
            FormState::Success { .. } => "success",
            FormState::Failed { .. } => "failed",
        }
    }

    /// Whether the submit control should be disabled
    pub fn is_busy(&self) -> bool {
        matches!(self, FormState::Validating | FormState::Submitting)
    }

    /// Apply an event, returning the next state
    pub fn apply(self, event: FormEvent) -> Result<FormState, InvalidTransition> {
        match (self, event) {
            (FormState::Idle { .. } | FormState::Failed { .. }, FormEvent::Submit) => {
                Ok(FormState::Validating)
            },
            (FormState::Validating, FormEvent::ValidationPassed) => Ok(FormState::Submitting),
            (FormState::Validating, FormEvent::ValidationFailed(errors)) => Ok(FormState::Idle {
                field_errors: errors.field_messages(),
            }),
            (FormState::Submitting, FormEvent::Succeeded(result)) => {
                Ok(FormState::Success { result })
            },
            (FormState::Submitting, FormEvent::Failed(error)) => Ok(FormState::Failed {
                message: error.user_message(),
                retryable: error.is_retryable(),
            }),
            (FormState::Success { .. } | FormState::Failed { .. }, FormEvent::Dismiss) => {
                Ok(FormState::idle())
            },
            (state, event) => Err(InvalidTransition {
                state: state.name(),
                event: event.name(),
            }),
        }
    }
}

/// Drive one submission attempt from `state` to its resting state
///
/// `validate` runs first; `send` is only awaited when validation passes.
pub async fn run_submission<V, F, Fut>(
    state: FormState,
    validate: V,
    send: F,
) -> Result<FormState, InvalidTransition>
where
    V: FnOnce() -> Result<(), ValidationErrors>,
    F: FnOnce() -> Fut,
    Fut: Future<Output = crate::error::Result<SubmissionResult>>,
{
    let state = state.apply(FormEvent::Submit)?;

    let state = match validate() {
        Ok(()) => state.apply(FormEvent::ValidationPassed)?,
        Err(errors) => return state.apply(FormEvent::ValidationFailed(errors)),
    };

    match send().await {
        Ok(result) => state.apply(FormEvent::Succeeded(result)),
        Err(error) => state.apply(FormEvent::Failed(error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ValidationError, ValidationErrorKind};

    fn one_error(field: &str) -> ValidationErrors {
        ValidationError::new(ValidationErrorKind::RequiredField, field).into()
    }

    #[test]
    fn test_happy_path() {
        let state = FormState::idle()
            .apply(FormEvent::Submit)
            .unwrap()
            .apply(FormEvent::ValidationPassed)
            .unwrap();
        assert!(state.is_busy());

        let state = state
            .apply(FormEvent::Succeeded(SubmissionResult::demo("ok", None)))
            .unwrap();
        assert_eq!(state.name(), "success");

        assert_eq!(state.apply(FormEvent::Dismiss).unwrap(), FormState::idle());
    }

    #[test]
    fn test_validation_failure_returns_to_idle_with_messages() {
        let state = FormState::idle()
            .apply(FormEvent::Submit)
            .unwrap()
            .apply(FormEvent::ValidationFailed(one_error("phone")))
            .unwrap();

        match state {
            FormState::Idle { field_errors } => {
                assert_eq!(field_errors["phone"], "This field is required");
            },
            other => panic!("expected idle, got {:?}", other),
        }
    }

    #[test]
    fn test_failed_allows_resubmission() {
        let state = FormState::Submitting
            .apply(FormEvent::Failed(Error::response(
                500,
                Some("Failed to submit booking".to_string()),
            )))
            .unwrap();
        assert_eq!(
            state,
            FormState::Failed {
                message: "Failed to submit booking".to_string(),
                retryable: true,
            }
        );

        assert_eq!(state.apply(FormEvent::Submit).unwrap(), FormState::Validating);
    }

    #[test]
    fn test_invalid_transitions() {
        let err = FormState::idle().apply(FormEvent::ValidationPassed).unwrap_err();
        assert_eq!(err.state, "idle");
        assert_eq!(err.event, "validation_passed");

        assert!(FormState::Submitting.apply(FormEvent::Submit).is_err());
        assert!(FormState::Validating.apply(FormEvent::Dismiss).is_err());
    }

    #[tokio::test]
    async fn test_run_submission_skips_send_on_invalid_input() {
        let flag = std::cell::Cell::new(false);
        let sent = &flag;
        let state = run_submission(
            FormState::idle(),
            || Err(one_error("email")),
            move || async move {
                sent.set(true);
                Ok(SubmissionResult::demo("sent", None))
            },
        )
        .await
        .unwrap();

        assert!(!flag.get());
        assert!(matches!(state, FormState::Idle { ref field_errors } if field_errors.contains_key("email")));
    }

    #[tokio::test]
    async fn test_run_submission_reports_transport_failure() {
        let state = run_submission(
            FormState::idle(),
            || Ok(()),
            || async { Err(Error::transport("connection refused")) },
        )
        .await
        .unwrap();

        match state {
            FormState::Failed { retryable, message } => {
                assert!(retryable);
                assert!(message.contains("try again"));
            },
            other => panic!("expected failed, got {:?}", other),
        }
    }
}
