//! Claim submission port
//!
//! The system that persists a claim lives outside this crate. The
//! [`SubmissionController`](crate::submission::SubmissionController) reaches
//! it only through [`ClaimSubmissionPort`], so the back office, a test
//! double, or the in-memory adapter can sit behind it.
//!
//! ```rust,ignore
//! let port: Arc<dyn ClaimSubmissionPort> = Arc::new(InMemorySubmissionPort::new());
//! let controller = SubmissionController::new(port, RuleEngine::standard(), AttachmentValidator::default());
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, DomainPort, HealthCheckable, OperationMetadata, PortError};

use crate::attachment::AttachmentBatch;
use crate::draft::ClaimDraft;

/// Acknowledgement returned once a claim has been accepted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub claim_id: ClaimId,
    /// Human-facing reference, e.g. `CLM-2024-001`
    pub claim_number: String,
    pub submitted_at: DateTime<Utc>,
}

/// Port to the system that records submitted claims
///
/// Implementations receive only drafts that passed validation. Any failure,
/// however the remote system signals it, must come back as a `PortError`.
#[async_trait]
pub trait ClaimSubmissionPort: DomainPort + HealthCheckable {
    /// Records a validated claim and its supporting documents
    async fn submit_claim(
        &self,
        draft: ClaimDraft,
        attachments: AttachmentBatch,
        metadata: Option<OperationMetadata>,
    ) -> Result<SubmissionReceipt, PortError>;
}
