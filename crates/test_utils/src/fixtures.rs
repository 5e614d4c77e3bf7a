//! Pre-built Test Fixtures
//!
//! Provides ready-to-use claim data. Time is pinned to 15 June 2024, noon
//! UTC, so date rules behave the same on every run.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use once_cell::sync::Lazy;
use std::sync::Arc;

use core_kernel::{FixedClock, Timezone};
use domain_claims::{AttachmentBatch, AttachmentDescriptor, ClaimDraft, RuleEngine};

const MIB: u64 = 1024 * 1024;

static FIXED_NOW: Lazy<DateTime<Utc>> =
    Lazy::new(|| Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap());

static VALID_DRAFT: Lazy<ClaimDraft> = Lazy::new(|| ClaimDraft {
    claim_type: "vehicle".to_string(),
    policy_number: "POL-2024-001".to_string(),
    incident_date: "2024-06-10".to_string(),
    incident_time: "14:30".to_string(),
    amount: "4250.00".to_string(),
    description: "Rear-ended while stopped at a red light; bumper and trunk lid damaged."
        .to_string(),
    incident_location: "Main St & 5th Ave, Springfield".to_string(),
    police_report_number: "SPD-2024-0612".to_string(),
    contact_phone: "(555) 123-4567".to_string(),
    contact_email: "john.doe@example.com".to_string(),
    witness_name: "Jane Smith".to_string(),
    witness_phone: "555-987-6543".to_string(),
});

/// Fixture for time
pub struct ClockFixtures;

impl ClockFixtures {
    /// The pinned calendar date in UTC
    pub fn today() -> NaiveDate {
        FIXED_NOW.date_naive()
    }

    pub fn clock() -> Arc<FixedClock> {
        Arc::new(FixedClock::new(*FIXED_NOW))
    }

    /// The claim form rules, evaluated at the pinned time in UTC
    pub fn rule_engine() -> RuleEngine {
        RuleEngine::with_clock(Self::clock(), Timezone::default())
    }
}

/// Fixture for claim drafts
pub struct DraftFixtures;

impl DraftFixtures {
    /// A draft that passes every rule
    pub fn valid() -> ClaimDraft {
        VALID_DRAFT.clone()
    }

    /// A draft with every field empty
    pub fn empty() -> ClaimDraft {
        ClaimDraft::new()
    }
}

/// Fixture for attachments
pub struct AttachmentFixtures;

impl AttachmentFixtures {
    pub fn photo() -> AttachmentDescriptor {
        AttachmentDescriptor::new("damage-front.jpg", 2 * MIB, "image/jpeg")
    }

    pub fn police_report() -> AttachmentDescriptor {
        AttachmentDescriptor::new("police-report.pdf", 350 * 1024, "application/pdf")
    }

    /// An allowed type, 11 MiB
    pub fn oversized() -> AttachmentDescriptor {
        AttachmentDescriptor::new("dashcam-still.png", 11 * MIB, "image/png")
    }

    /// A disallowed type of modest size
    pub fn archive() -> AttachmentDescriptor {
        AttachmentDescriptor::new("evidence.zip", MIB, "application/zip")
    }

    /// A batch holding one photo
    pub fn single() -> AttachmentBatch {
        AttachmentBatch::from(vec![Self::photo()])
    }

    /// A batch of `count` distinct PDFs
    pub fn batch_of(count: usize) -> AttachmentBatch {
        AttachmentBatch::from(
            (1..=count)
                .map(|i| AttachmentDescriptor::new(format!("page-{:02}.pdf", i), 100 * 1024, "application/pdf"))
                .collect::<Vec<_>>(),
        )
    }
}
