//! Claims handlers

use axum::{extract::State, http::StatusCode, Json};
use tracing::debug;

use domain_claims::{AttachmentBatch, ClaimDraft, ClaimType, SubmissionController, SubmissionOutcome};

use crate::dto::claims::*;
use crate::{error::ApiError, AppState};

/// Lists the claim types offered by the form
pub async fn list_claim_types() -> Json<Vec<ClaimTypeResponse>> {
    Json(ClaimType::ALL.into_iter().map(ClaimTypeResponse::from).collect())
}

/// Validates a draft without submitting it
pub async fn validate_claim(
    State(state): State<AppState>,
    Json(draft): Json<ClaimDraft>,
) -> Json<ValidateClaimResponse> {
    Json(state.rules.validate(&draft).into())
}

/// Decides which offered files join the form's attachment list
pub async fn intake_attachments(
    State(state): State<AppState>,
    Json(request): Json<AttachmentIntakeRequest>,
) -> Json<AttachmentIntakeResponse> {
    let outcome = state
        .attachments
        .validate_intake(request.accepted_count, &request.files);
    Json(outcome.into())
}

/// Validates and submits a claim
pub async fn submit_claim(
    State(state): State<AppState>,
    Json(request): Json<SubmitClaimRequest>,
) -> Result<(StatusCode, Json<ClaimReceiptResponse>), ApiError> {
    let controller = SubmissionController::new(
        state.port.clone(),
        state.rules.clone(),
        state.attachments.clone(),
    );
    let batch = AttachmentBatch::from(request.attachments);

    match controller.submit(&request.draft, &batch).await? {
        SubmissionOutcome::Submitted(receipt) => {
            debug!(claim_number = %receipt.claim_number, "Returning claim receipt");
            Ok((StatusCode::CREATED, Json(receipt.into())))
        }
        SubmissionOutcome::Blocked(report) => Err(ApiError::blocked(&report)),
        SubmissionOutcome::Failed(error) => Err(error.into()),
    }
}
