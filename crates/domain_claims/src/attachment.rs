//! Supporting document checks
//!
//! Only the descriptor is inspected (name, size, declared MIME type); file
//! contents are never read. Files are checked one by one and every
//! offending file is reported. The count cap applies to the whole batch: an
//! addition that would push the batch past the cap is refused in full.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::error::ClaimError;

/// Largest accepted file, 10 MiB
pub const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Most files a claim may carry
pub const MAX_FILES: usize = 10;

/// Images, PDF, and Word documents
pub const ALLOWED_MIME_TYPES: [&str; 7] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/webp",
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

const BYTES_PER_MIB: u64 = 1024 * 1024;

/// A file offered for upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentDescriptor {
    pub name: String,
    pub size_bytes: u64,
    pub declared_mime_type: String,
}

impl AttachmentDescriptor {
    pub fn new(name: impl Into<String>, size_bytes: u64, declared_mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            declared_mime_type: declared_mime_type.into(),
        }
    }
}

/// Attachment problems, per file or for the whole batch
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttachmentError {
    #[error("{file_name}: File size exceeds {}MB", .limit_bytes / BYTES_PER_MIB)]
    FileTooLarge {
        file_name: String,
        size_bytes: u64,
        limit_bytes: u64,
    },

    #[error("{file_name}: Invalid file type. Only JPG, PNG, PDF, and DOC files are allowed")]
    UnsupportedType {
        file_name: String,
        declared_mime_type: String,
    },

    #[error("Maximum {limit} files allowed")]
    BatchLimitExceeded { limit: usize, attempted: usize },

    /// Only raised when submitting
    #[error("Please upload at least one supporting document")]
    BatchEmpty,
}

impl AttachmentError {
    /// True for errors that concern the whole batch rather than one file
    pub fn is_batch_level(&self) -> bool {
        matches!(
            self,
            AttachmentError::BatchLimitExceeded { .. } | AttachmentError::BatchEmpty
        )
    }
}

/// Files accepted so far, in upload order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttachmentBatch {
    files: Vec<AttachmentDescriptor>,
}

impl AttachmentBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn files(&self) -> &[AttachmentDescriptor] {
        &self.files
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttachmentDescriptor> {
        self.files.iter()
    }

    /// Total size of all files in bytes
    pub fn total_size_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.size_bytes).sum()
    }

    /// Removes the file at `index`
    pub fn remove(&mut self, index: usize) -> Result<AttachmentDescriptor, ClaimError> {
        if index >= self.files.len() {
            return Err(ClaimError::AttachmentNotFound {
                index,
                len: self.files.len(),
            });
        }
        Ok(self.files.remove(index))
    }
}

impl From<Vec<AttachmentDescriptor>> for AttachmentBatch {
    fn from(files: Vec<AttachmentDescriptor>) -> Self {
        Self { files }
    }
}

/// Limits applied to uploads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentPolicy {
    pub max_file_size_bytes: u64,
    pub max_files: usize,
    pub allowed_mime_types: Vec<String>,
}

impl Default for AttachmentPolicy {
    fn default() -> Self {
        Self {
            max_file_size_bytes: MAX_FILE_SIZE_BYTES,
            max_files: MAX_FILES,
            allowed_mime_types: ALLOWED_MIME_TYPES.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Result of offering new files to a batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntakeOutcome {
    /// Files to append to the batch, in offered order
    pub accepted: Vec<AttachmentDescriptor>,
    /// Per-file errors in offered order, then any batch-level error
    pub errors: Vec<AttachmentError>,
}

/// Checks files against an [`AttachmentPolicy`]
#[derive(Debug, Clone, Default)]
pub struct AttachmentValidator {
    policy: AttachmentPolicy,
}

impl AttachmentValidator {
    pub fn new(policy: AttachmentPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &AttachmentPolicy {
        &self.policy
    }

    /// Checks one file; a file can fail on both size and type
    pub fn validate_file(&self, file: &AttachmentDescriptor) -> Vec<AttachmentError> {
        let mut errors = Vec::new();

        if file.size_bytes > self.policy.max_file_size_bytes {
            errors.push(AttachmentError::FileTooLarge {
                file_name: file.name.clone(),
                size_bytes: file.size_bytes,
                limit_bytes: self.policy.max_file_size_bytes,
            });
        }

        if !self
            .policy
            .allowed_mime_types
            .iter()
            .any(|t| *t == file.declared_mime_type)
        {
            errors.push(AttachmentError::UnsupportedType {
                file_name: file.name.clone(),
                declared_mime_type: file.declared_mime_type.clone(),
            });
        }

        errors
    }

    /// Decides which offered files join a batch that already holds
    /// `accepted_count` files
    ///
    /// Invalid files are reported and skipped. If the valid ones would push
    /// the batch past the cap, none of them are admitted.
    pub fn validate_intake(
        &self,
        accepted_count: usize,
        incoming: &[AttachmentDescriptor],
    ) -> IntakeOutcome {
        let mut outcome = IntakeOutcome::default();

        for file in incoming {
            let errors = self.validate_file(file);
            if errors.is_empty() {
                outcome.accepted.push(file.clone());
            } else {
                outcome.errors.extend(errors);
            }
        }

        let attempted = accepted_count.saturating_add(outcome.accepted.len());
        if attempted > self.policy.max_files {
            warn!(
                accepted_count,
                incoming = outcome.accepted.len(),
                limit = self.policy.max_files,
                "Attachment addition refused, batch limit exceeded"
            );
            outcome.accepted.clear();
            outcome.errors.push(AttachmentError::BatchLimitExceeded {
                limit: self.policy.max_files,
                attempted,
            });
        }

        debug!(
            offered = incoming.len(),
            accepted = outcome.accepted.len(),
            errors = outcome.errors.len(),
            "Attachment intake evaluated"
        );
        outcome
    }

    /// Runs intake and appends the admitted files to `batch`
    pub fn admit(
        &self,
        batch: &mut AttachmentBatch,
        incoming: &[AttachmentDescriptor],
    ) -> Vec<AttachmentError> {
        let outcome = self.validate_intake(batch.len(), incoming);
        batch.files.extend(outcome.accepted);
        outcome.errors
    }

    /// Checks a batch right before it is submitted
    ///
    /// An empty batch is blocking here, and only here. Files are re-checked
    /// so a batch assembled outside intake cannot slip through.
    pub fn validate_for_submission(&self, batch: &AttachmentBatch) -> Vec<AttachmentError> {
        if batch.is_empty() {
            return vec![AttachmentError::BatchEmpty];
        }

        let mut errors: Vec<AttachmentError> =
            batch.iter().flat_map(|f| self.validate_file(f)).collect();

        if batch.len() > self.policy.max_files {
            errors.push(AttachmentError::BatchLimitExceeded {
                limit: self.policy.max_files,
                attempted: batch.len(),
            });
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf(name: &str) -> AttachmentDescriptor {
        AttachmentDescriptor::new(name, 200 * 1024, "application/pdf")
    }

    #[test]
    fn test_size_boundary() {
        let validator = AttachmentValidator::default();
        let at_limit = AttachmentDescriptor::new("scan.png", MAX_FILE_SIZE_BYTES, "image/png");
        let over = AttachmentDescriptor::new("scan.png", MAX_FILE_SIZE_BYTES + 1, "image/png");

        assert!(validator.validate_file(&at_limit).is_empty());
        assert!(matches!(
            validator.validate_file(&over).as_slice(),
            [AttachmentError::FileTooLarge { .. }]
        ));
    }

    #[test]
    fn test_every_allowed_type_passes() {
        let validator = AttachmentValidator::default();
        for mime in ALLOWED_MIME_TYPES {
            let file = AttachmentDescriptor::new("doc", 1, mime);
            assert!(validator.validate_file(&file).is_empty(), "{}", mime);
        }
    }

    #[test]
    fn test_file_failing_both_checks_reports_both() {
        let validator = AttachmentValidator::default();
        let file = AttachmentDescriptor::new("huge.zip", 11 * 1024 * 1024, "application/zip");

        let errors = validator.validate_file(&file);
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| matches!(e, AttachmentError::UnsupportedType { .. })));
    }

    #[test]
    fn test_intake_admits_valid_and_reports_invalid() {
        let validator = AttachmentValidator::default();
        let incoming = vec![
            pdf("a.pdf"),
            AttachmentDescriptor::new("b.exe", 10, "application/x-msdownload"),
            pdf("c.pdf"),
        ];

        let outcome = validator.validate_intake(0, &incoming);
        assert_eq!(outcome.accepted, vec![pdf("a.pdf"), pdf("c.pdf")]);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(
            outcome.errors[0].to_string(),
            "b.exe: Invalid file type. Only JPG, PNG, PDF, and DOC files are allowed"
        );
    }

    #[test]
    fn test_invalid_files_do_not_count_toward_cap() {
        let validator = AttachmentValidator::default();
        let incoming = vec![
            pdf("ok.pdf"),
            AttachmentDescriptor::new("bad.zip", 10, "application/zip"),
        ];

        let outcome = validator.validate_intake(9, &incoming);
        assert_eq!(outcome.accepted.len(), 1);
        assert!(!outcome.errors.iter().any(AttachmentError::is_batch_level));
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut batch = AttachmentBatch::from(vec![pdf("a.pdf")]);
        assert!(batch.remove(3).is_err());
        assert_eq!(batch.remove(0).unwrap().name, "a.pdf");
        assert!(batch.is_empty());
    }

    #[test]
    fn test_submission_requires_a_document() {
        let validator = AttachmentValidator::default();
        assert_eq!(
            validator.validate_for_submission(&AttachmentBatch::new()),
            vec![AttachmentError::BatchEmpty]
        );
        assert!(validator
            .validate_for_submission(&AttachmentBatch::from(vec![pdf("a.pdf")]))
            .is_empty());
    }

    #[test]
    fn test_error_serialization_is_tagged() {
        let json = serde_json::to_value(AttachmentError::BatchLimitExceeded {
            limit: 10,
            attempted: 11,
        })
        .unwrap();
        assert_eq!(json["kind"], "batch_limit_exceeded");
        assert_eq!(json["attempted"], 11);
    }
}
