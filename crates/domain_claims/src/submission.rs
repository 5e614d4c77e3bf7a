//! Submission lifecycle
//!
//! ```text
//!            submit            clean             Ok(receipt)
//!   Idle ───────────► Validating ─────► Submitting ──────────► Succeeded
//!    ▲                    │                  │                     │
//!    │     blocked        │                  │ Err(port)           │
//!    ├────────────────────┘                  ▼                     │
//!    │                                     Failed                  │
//!    │            reset / retry               │                    │
//!    └────────────────────────────────────────┴────────────────────┘
//! ```
//!
//! Every submit re-runs validation; an earlier verdict is never trusted.
//! At most one submission is in flight per controller. A controller that is
//! closed while a submission is in flight discards the late result without
//! touching its state.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, warn};

use core_kernel::{OperationMetadata, PortError, SubmissionId};

use crate::attachment::{AttachmentBatch, AttachmentValidator};
use crate::draft::ClaimDraft;
use crate::error::ClaimError;
use crate::ports::{ClaimSubmissionPort, SubmissionReceipt};
use crate::rules::RuleEngine;
use crate::validation::{ValidationAggregator, ValidationReport};

/// Where a submission attempt stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

impl SubmissionState {
    /// Checks if a transition to the target state is allowed
    pub fn can_transition_to(&self, target: SubmissionState) -> bool {
        use SubmissionState::*;
        matches!(
            (self, target),
            (Idle, Validating)
                | (Validating, Idle)
                | (Validating, Submitting)
                | (Submitting, Succeeded)
                | (Submitting, Failed)
                | (Succeeded, Idle)
                | (Failed, Idle)
        )
    }

    /// True while a submission is running
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SubmissionState::Validating | SubmissionState::Submitting)
    }

    /// True once an attempt has reached the collaborator and come back
    pub fn is_terminal(&self) -> bool {
        matches!(self, SubmissionState::Succeeded | SubmissionState::Failed)
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Validating => "validating",
            SubmissionState::Submitting => "submitting",
            SubmissionState::Succeeded => "succeeded",
            SubmissionState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Failure reported by the submission collaborator, passed through unchanged
#[derive(Debug, Error)]
#[error("Failed to submit claim: {0}")]
pub struct SubmissionError(#[from] PortError);

impl SubmissionError {
    pub fn port_error(&self) -> &PortError {
        &self.0
    }
}

/// How a submission attempt ended
#[derive(Debug)]
pub enum SubmissionOutcome {
    /// Validation found problems; the collaborator was not called
    Blocked(ValidationReport),
    /// The collaborator accepted the claim
    Submitted(SubmissionReceipt),
    /// The collaborator was called and failed
    Failed(SubmissionError),
}

/// Drives one form session through the submission lifecycle
///
/// The controller owns no draft; it is handed the current draft and batch
/// on each submit. State changes are published on a watch channel so a
/// caller can disable its submit control while a submission is in flight.
pub struct SubmissionController {
    port: Arc<dyn ClaimSubmissionPort>,
    rules: RuleEngine,
    attachments: AttachmentValidator,
    state: watch::Sender<SubmissionState>,
    closed: AtomicBool,
}

impl SubmissionController {
    pub fn new(
        port: Arc<dyn ClaimSubmissionPort>,
        rules: RuleEngine,
        attachments: AttachmentValidator,
    ) -> Self {
        let (state, _) = watch::channel(SubmissionState::Idle);
        Self {
            port,
            rules,
            attachments,
            state,
            closed: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> SubmissionState {
        *self.state.borrow()
    }

    /// Receives every state change from now on
    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.state.subscribe()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Closes the session; an in-flight result will be discarded
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            info!(state = %self.state(), "Submission session closed");
        }
    }

    /// Runs field and attachment validation without changing state
    pub fn validate(&self, draft: &ClaimDraft, batch: &AttachmentBatch) -> ValidationReport {
        ValidationAggregator::merge(
            self.rules.validate(draft),
            self.attachments.validate_for_submission(batch),
        )
    }

    /// Validates and, when clean, hands the claim to the collaborator
    ///
    /// Only accepted from `Idle`. A blocked attempt returns to `Idle`; an
    /// attempt that reached the collaborator ends in `Succeeded` or `Failed`
    /// and needs [`reset`](Self::reset) before the next one.
    pub async fn submit(
        &self,
        draft: &ClaimDraft,
        batch: &AttachmentBatch,
    ) -> Result<SubmissionOutcome, ClaimError> {
        if self.is_closed() {
            return Err(ClaimError::SessionClosed);
        }

        self.begin()?;
        let mut guard = InFlightGuard::new(self);
        let submission_id = SubmissionId::new_v7();

        let report = self.validate(draft, batch);
        if report.is_blocked() {
            self.transition(SubmissionState::Validating, SubmissionState::Idle)?;
            guard.disarm();
            warn!(
                %submission_id,
                error_count = report.error_count(),
                "Claim submission blocked by validation"
            );
            return Ok(SubmissionOutcome::Blocked(report));
        }

        self.transition(SubmissionState::Validating, SubmissionState::Submitting)?;
        info!(
            %submission_id,
            claim_type = %draft.claim_type,
            attachments = batch.len(),
            "Submitting claim"
        );

        let metadata = OperationMetadata::with_correlation_id(submission_id.to_string())
            .with_context("claim_type", draft.claim_type.as_str())
            .with_context("attachment_count", batch.len().to_string());
        let result = self
            .port
            .submit_claim(draft.clone(), batch.clone(), Some(metadata))
            .await;
        guard.disarm();

        if self.is_closed() {
            warn!(%submission_id, "Session closed during submission, discarding result");
            return Err(ClaimError::SessionClosed);
        }

        match result {
            Ok(receipt) => {
                self.transition(SubmissionState::Submitting, SubmissionState::Succeeded)?;
                info!(
                    %submission_id,
                    claim_number = %receipt.claim_number,
                    "Claim submitted"
                );
                Ok(SubmissionOutcome::Submitted(receipt))
            }
            Err(error) => {
                self.transition(SubmissionState::Submitting, SubmissionState::Failed)?;
                warn!(%submission_id, error = %error, "Claim submission failed");
                Ok(SubmissionOutcome::Failed(SubmissionError::from(error)))
            }
        }
    }

    /// Returns a finished attempt to `Idle` so the user can edit or retry
    pub fn reset(&self) -> Result<(), ClaimError> {
        let current = self.state();
        if !current.is_terminal() {
            return Err(ClaimError::InvalidStateTransition {
                from: current,
                to: SubmissionState::Idle,
            });
        }
        self.transition(current, SubmissionState::Idle)
    }

    /// Claims the controller for a new attempt
    fn begin(&self) -> Result<(), ClaimError> {
        let current = self.state();
        if current.is_in_flight() {
            return Err(ClaimError::SubmissionInProgress);
        }
        self.transition(SubmissionState::Idle, SubmissionState::Validating)
            .map_err(|error| match error {
                ClaimError::InvalidStateTransition {
                    from: SubmissionState::Validating | SubmissionState::Submitting,
                    ..
                } => ClaimError::SubmissionInProgress,
                other => other,
            })
    }

    /// Moves `from` to `to` if the controller is still in `from`
    fn transition(&self, from: SubmissionState, to: SubmissionState) -> Result<(), ClaimError> {
        let mut observed = from;
        let moved = self.state.send_if_modified(|state| {
            observed = *state;
            if *state == from && from.can_transition_to(to) {
                *state = to;
                true
            } else {
                false
            }
        });

        if moved {
            Ok(())
        } else {
            Err(ClaimError::InvalidStateTransition { from: observed, to })
        }
    }
}

/// Closes the controller if a submit future is dropped mid-attempt
///
/// The state stays where it was, which keeps the controller from accepting
/// another attempt it could not account for.
struct InFlightGuard<'a> {
    controller: &'a SubmissionController,
    armed: bool,
}

impl<'a> InFlightGuard<'a> {
    fn new(controller: &'a SubmissionController) -> Self {
        Self {
            controller,
            armed: true,
        }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.controller.close();
        }
    }
}
