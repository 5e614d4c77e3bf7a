//! Claims Submission Domain
//!
//! This crate decides whether a claim a user has filled in may be submitted,
//! and drives the submission itself. It knows nothing about HTTP or storage;
//! the system that records claims is reached through
//! [`ClaimSubmissionPort`].
//!
//! # Architecture
//!
//! - **Draft**: [`ClaimDraft`], every form value as raw text
//! - **Rules**: a declarative [`FieldSchema`] per field, evaluated by the
//!   [`RuleEngine`] against an injected clock and timezone
//! - **Attachments**: the [`AttachmentValidator`] checks file size, type,
//!   and the per-claim file cap
//! - **Verdicts**: the [`ValidationAggregator`] merges both into a
//!   [`ValidationReport`]
//! - **Lifecycle**: the [`SubmissionController`] state machine
//!
//! # Submission Lifecycle
//!
//! ```text
//! Idle -> Validating -> Submitting -> Succeeded -> Idle
//!              \                 \-> Failed    -> Idle
//!               \-> Idle (blocked)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_claims::{ClaimForm, FieldId, InMemorySubmissionPort, SubmissionController};
//!
//! let mut form = ClaimForm::new(RuleEngine::standard(), AttachmentValidator::default());
//! form.edit(FieldId::ClaimType, "vehicle");
//! form.add_attachments(&[AttachmentDescriptor::new("photo.jpg", 204_800, "image/jpeg")]);
//!
//! let controller = SubmissionController::new(port, RuleEngine::standard(), AttachmentValidator::default());
//! match controller.submit(form.draft(), form.attachments()).await? {
//!     SubmissionOutcome::Blocked(report) => form.show(&report),
//!     SubmissionOutcome::Submitted(receipt) => println!("{}", receipt.claim_number),
//!     SubmissionOutcome::Failed(error) => eprintln!("{}", error),
//! }
//! ```

pub mod adapters;
pub mod attachment;
pub mod draft;
pub mod error;
pub mod form;
pub mod ports;
pub mod rules;
pub mod schema;
pub mod submission;
pub mod validation;

pub use adapters::{InMemorySubmissionPort, SubmittedClaim};
pub use attachment::{
    AttachmentBatch, AttachmentDescriptor, AttachmentError, AttachmentPolicy,
    AttachmentValidator, IntakeOutcome, ALLOWED_MIME_TYPES, MAX_FILES, MAX_FILE_SIZE_BYTES,
};
pub use draft::{ClaimDraft, ClaimType, FieldId};
pub use error::ClaimError;
pub use form::ClaimForm;
pub use ports::{ClaimSubmissionPort, SubmissionReceipt};
pub use rules::{parse_amount, parse_date, ParsedAmount, RuleEngine};
pub use schema::{claim_form_schema, FieldPattern, FieldSchema, Rule, RuleCheck, MAX_CLAIM_AMOUNT};
pub use submission::{SubmissionController, SubmissionError, SubmissionOutcome, SubmissionState};
pub use validation::{
    FieldError, FieldErrorKind, ValidationAggregator, ValidationReport, ValidationResult,
    ATTACHMENTS_KEY,
};
