//! In-memory submission adapter
//!
//! Stands in for the claims back office during development and in tests.
//! Submitted claims are kept in memory and numbered per calendar year. The
//! adapter can be told to wait before answering, to mimic a network round
//! trip, or to fail every call.

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::info;

use core_kernel::{
    ClaimId, DomainPort, HealthCheckResult, HealthCheckable, OperationMetadata, PortError,
};

use crate::attachment::AttachmentBatch;
use crate::draft::ClaimDraft;
use crate::ports::{ClaimSubmissionPort, SubmissionReceipt};

const ADAPTER_ID: &str = "in-memory-claim-submission";

/// A claim recorded by the in-memory adapter
#[derive(Debug, Clone)]
pub struct SubmittedClaim {
    pub receipt: SubmissionReceipt,
    pub draft: ClaimDraft,
    pub attachments: AttachmentBatch,
    pub correlation_id: Option<String>,
}

/// In-memory implementation of [`ClaimSubmissionPort`]
#[derive(Debug, Default)]
pub struct InMemorySubmissionPort {
    claims: Arc<RwLock<Vec<SubmittedClaim>>>,
    sequence: AtomicU64,
    latency: Option<Duration>,
    failure: Option<String>,
}

impl InMemorySubmissionPort {
    /// Creates an adapter that accepts every claim immediately
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an adapter that rejects every claim with the given message
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Delays every answer by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Returns every claim recorded so far, oldest first
    pub async fn submitted(&self) -> Vec<SubmittedClaim> {
        self.claims.read().await.clone()
    }
}

impl DomainPort for InMemorySubmissionPort {}

#[async_trait]
impl HealthCheckable for InMemorySubmissionPort {
    async fn health_check(&self) -> HealthCheckResult {
        match &self.failure {
            Some(reason) => {
                HealthCheckResult::unhealthy(ADAPTER_ID, format!("Configured to fail: {}", reason))
            }
            None => HealthCheckResult::healthy(ADAPTER_ID),
        }
    }
}

#[async_trait]
impl ClaimSubmissionPort for InMemorySubmissionPort {
    async fn submit_claim(
        &self,
        draft: ClaimDraft,
        attachments: AttachmentBatch,
        metadata: Option<OperationMetadata>,
    ) -> Result<SubmissionReceipt, PortError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        if let Some(reason) = &self.failure {
            return Err(PortError::rejected(reason.clone()));
        }

        let submitted_at = Utc::now();
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let receipt = SubmissionReceipt {
            claim_id: ClaimId::new_v7(),
            claim_number: format!("CLM-{}-{:03}", submitted_at.year(), sequence),
            submitted_at,
        };

        info!(
            claim_id = %receipt.claim_id,
            claim_number = %receipt.claim_number,
            attachments = attachments.len(),
            "Claim recorded"
        );

        self.claims.write().await.push(SubmittedClaim {
            receipt: receipt.clone(),
            draft,
            attachments,
            correlation_id: metadata.and_then(|m| m.correlation_id),
        });

        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_claim_numbers_are_sequential() {
        let port = InMemorySubmissionPort::new();

        let first = port
            .submit_claim(ClaimDraft::new(), AttachmentBatch::new(), None)
            .await
            .unwrap();
        let second = port
            .submit_claim(ClaimDraft::new(), AttachmentBatch::new(), None)
            .await
            .unwrap();

        assert!(first.claim_number.ends_with("-001"));
        assert!(second.claim_number.ends_with("-002"));
        assert_eq!(port.submitted().await.len(), 2);
    }

    #[tokio::test]
    async fn test_failing_port_records_nothing() {
        let port = InMemorySubmissionPort::failing("intake offline");

        let result = port
            .submit_claim(ClaimDraft::new(), AttachmentBatch::new(), None)
            .await;

        assert!(matches!(result, Err(PortError::Rejected { .. })));
        assert!(port.submitted().await.is_empty());
        assert!(!port.health_check().await.is_healthy());
    }

    #[tokio::test]
    async fn test_correlation_id_is_kept() {
        let port = InMemorySubmissionPort::new();
        port.submit_claim(
            ClaimDraft::new(),
            AttachmentBatch::new(),
            Some(OperationMetadata::with_correlation_id("SUB-42")),
        )
        .await
        .unwrap();

        let claims = port.submitted().await;
        assert_eq!(claims[0].correlation_id.as_deref(), Some("SUB-42"));
    }
}
