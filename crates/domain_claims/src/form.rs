//! Form session state
//!
//! [`ClaimForm`] holds what a user has typed and uploaded so far, along
//! with the errors currently on display. Errors appear after a full
//! validation pass or a failed upload; editing a field that shows an error
//! re-checks that field alone, so a fixed field clears immediately and a
//! still-broken one shows its current message.

use tracing::debug;

use crate::attachment::{AttachmentBatch, AttachmentDescriptor, AttachmentError, AttachmentValidator};
use crate::draft::{ClaimDraft, FieldId};
use crate::error::ClaimError;
use crate::rules::RuleEngine;
use crate::schema::MAX_DESCRIPTION_CHARS;
use crate::validation::{ValidationAggregator, ValidationReport, ValidationResult};

/// One user's in-progress claim
#[derive(Clone)]
pub struct ClaimForm {
    draft: ClaimDraft,
    attachments: AttachmentBatch,
    field_errors: ValidationResult,
    attachment_errors: Vec<AttachmentError>,
    rules: RuleEngine,
    validator: AttachmentValidator,
}

impl ClaimForm {
    pub fn new(rules: RuleEngine, validator: AttachmentValidator) -> Self {
        Self {
            draft: ClaimDraft::new(),
            attachments: AttachmentBatch::new(),
            field_errors: ValidationResult::new(),
            attachment_errors: Vec::new(),
            rules,
            validator,
        }
    }

    pub fn draft(&self) -> &ClaimDraft {
        &self.draft
    }

    pub fn attachments(&self) -> &AttachmentBatch {
        &self.attachments
    }

    /// Field errors currently displayed
    pub fn field_errors(&self) -> &ValidationResult {
        &self.field_errors
    }

    /// Attachment errors currently displayed
    pub fn attachment_errors(&self) -> &[AttachmentError] {
        &self.attachment_errors
    }

    /// Updates one field
    ///
    /// Only a field that is already showing an error is re-checked.
    pub fn edit(&mut self, field: FieldId, value: impl Into<String>) {
        self.draft.set(field, value);

        if !self.field_errors.contains(field) {
            return;
        }

        match self.rules.validate_field(&self.draft, field) {
            Some(error) => self.field_errors.insert(error),
            None => {
                self.field_errors.clear(field);
                debug!(%field, "Field error cleared");
            }
        }
    }

    /// Offers files for upload and returns the errors now on display
    ///
    /// Replaces whatever attachment errors were shown before.
    pub fn add_attachments(&mut self, files: &[AttachmentDescriptor]) -> &[AttachmentError] {
        self.attachment_errors = self.validator.admit(&mut self.attachments, files);
        &self.attachment_errors
    }

    /// Removes an uploaded file and clears attachment errors
    pub fn remove_attachment(&mut self, index: usize) -> Result<AttachmentDescriptor, ClaimError> {
        let removed = self.attachments.remove(index)?;
        self.attachment_errors.clear();
        Ok(removed)
    }

    /// Description length in characters
    pub fn description_length(&self) -> usize {
        self.draft.description.chars().count()
    }

    /// Characters left before the description limit
    pub fn description_remaining(&self) -> usize {
        MAX_DESCRIPTION_CHARS.saturating_sub(self.description_length())
    }

    /// Runs a full pass and displays its result
    pub fn validate(&mut self) -> ValidationReport {
        let report = ValidationAggregator::merge(
            self.rules.validate(&self.draft),
            self.validator.validate_for_submission(&self.attachments),
        );
        self.show(&report);
        report
    }

    /// Displays the errors of a report, such as one from a blocked submit
    pub fn show(&mut self, report: &ValidationReport) {
        self.field_errors = report.field_errors().clone();
        self.attachment_errors = report.attachment_errors().to_vec();
    }

    /// Errors currently displayed, as a report
    pub fn report(&self) -> ValidationReport {
        ValidationAggregator::merge(self.field_errors.clone(), self.attachment_errors.clone())
    }

    /// Starts over with an empty draft and no files
    pub fn clear(&mut self) {
        self.draft = ClaimDraft::new();
        self.attachments = AttachmentBatch::new();
        self.field_errors = ValidationResult::new();
        self.attachment_errors.clear();
    }
}
