//! Claims domain errors
//!
//! Field and attachment problems are verdicts, not errors; see
//! [`crate::validation`]. The variants here describe misuse of the
//! submission lifecycle and of the attachment list.

use thiserror::Error;

use crate::submission::SubmissionState;

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Invalid submission transition from {from} to {to}")]
    InvalidStateTransition {
        from: SubmissionState,
        to: SubmissionState,
    },

    #[error("A submission is already in progress")]
    SubmissionInProgress,

    #[error("Submission session has been closed")]
    SessionClosed,

    #[error("No attachment at index {index} (batch holds {len})")]
    AttachmentNotFound { index: usize, len: usize },
}
