//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating claim data. Strategies named
//! `valid_*` only produce values every rule accepts.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use domain_claims::{AttachmentDescriptor, ClaimDraft, ClaimType, ALLOWED_MIME_TYPES, MAX_FILE_SIZE_BYTES};

use crate::fixtures::{ClockFixtures, DraftFixtures};

/// Strategy for catalog claim types
pub fn claim_type_strategy() -> impl Strategy<Value = ClaimType> {
    proptest::sample::select(ClaimType::ALL.to_vec())
}

/// Strategy for amounts in (0, 1,000,000], two decimal places
pub fn valid_amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for amounts above the claim limit
pub fn excessive_amount_strategy() -> impl Strategy<Value = Decimal> {
    (100_000_001i64..10_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for policy numbers that satisfy every policy number rule
pub fn valid_policy_number_strategy() -> impl Strategy<Value = String> {
    "[A-Z0-9][A-Z0-9-]{4,19}"
}

/// Strategy for dates up to ten years before the fixture "today"
pub fn past_date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0u64..3650).prop_map(|days| ClockFixtures::today() - Days::new(days))
}

/// Strategy for dates after the fixture "today"
pub fn future_date_strategy() -> impl Strategy<Value = NaiveDate> {
    (1u64..3650).prop_map(|days| ClockFixtures::today() + Days::new(days))
}

/// Strategy for descriptions within the accepted length
pub fn valid_description_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ,.]{20,1000}"
}

/// Strategy for attachments every check accepts
pub fn valid_attachment_strategy() -> impl Strategy<Value = AttachmentDescriptor> {
    (
        "[a-z0-9-]{1,24}\\.[a-z]{3}",
        1u64..=MAX_FILE_SIZE_BYTES,
        proptest::sample::select(ALLOWED_MIME_TYPES.to_vec()),
    )
        .prop_map(|(name, size, mime)| AttachmentDescriptor::new(name, size, mime))
}

/// Strategy for drafts that pass every rule
pub fn valid_draft_strategy() -> impl Strategy<Value = ClaimDraft> {
    (
        claim_type_strategy(),
        valid_policy_number_strategy(),
        past_date_strategy(),
        valid_amount_strategy(),
        valid_description_strategy(),
    )
        .prop_map(|(claim_type, policy_number, date, amount, description)| ClaimDraft {
            claim_type: claim_type.code().to_string(),
            policy_number,
            incident_date: date.format("%Y-%m-%d").to_string(),
            amount: amount.to_string(),
            description,
            ..DraftFixtures::valid()
        })
}
