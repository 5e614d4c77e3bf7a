//! Claims DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use domain_claims::{
    AttachmentDescriptor, ClaimDraft, ClaimType, IntakeOutcome, SubmissionReceipt,
    ValidationResult,
};

/// Live validation verdict for a draft
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidateClaimResponse {
    pub valid: bool,
    /// Field name to message, only for invalid fields
    pub errors: BTreeMap<String, String>,
}

impl From<ValidationResult> for ValidateClaimResponse {
    fn from(result: ValidationResult) -> Self {
        Self {
            valid: result.is_empty(),
            errors: result
                .iter()
                .map(|e| (e.field.as_str().to_string(), e.message.clone()))
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentIntakeRequest {
    /// Files the form already holds
    #[serde(default)]
    pub accepted_count: usize,
    pub files: Vec<AttachmentDescriptor>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AttachmentIntakeResponse {
    pub accepted: Vec<AttachmentDescriptor>,
    pub errors: Vec<String>,
}

impl From<IntakeOutcome> for AttachmentIntakeResponse {
    fn from(outcome: IntakeOutcome) -> Self {
        Self {
            accepted: outcome.accepted,
            errors: outcome.errors.iter().map(ToString::to_string).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitClaimRequest {
    pub draft: ClaimDraft,
    #[serde(default)]
    pub attachments: Vec<AttachmentDescriptor>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimReceiptResponse {
    pub claim_id: String,
    pub claim_number: String,
    pub submitted_at: DateTime<Utc>,
}

impl From<SubmissionReceipt> for ClaimReceiptResponse {
    fn from(receipt: SubmissionReceipt) -> Self {
        Self {
            claim_id: receipt.claim_id.to_string(),
            claim_number: receipt.claim_number,
            submitted_at: receipt.submitted_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClaimTypeResponse {
    pub code: String,
    pub label: String,
}

impl From<ClaimType> for ClaimTypeResponse {
    fn from(claim_type: ClaimType) -> Self {
        Self {
            code: claim_type.code().to_string(),
            label: claim_type.label().to_string(),
        }
    }
}
