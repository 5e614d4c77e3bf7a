//! Field rule tests for domain_claims

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use std::sync::Arc;

use core_kernel::FixedClock;

use domain_claims::{
    AttachmentBatch, AttachmentValidator, ClaimDraft, ClaimType, FieldErrorKind, FieldId,
    RuleEngine, ValidationAggregator, ValidationResult,
};

use test_utils::{
    assert_field_error, assert_field_valid, excessive_amount_strategy, future_date_strategy,
    past_date_strategy, valid_amount_strategy, AttachmentFixtures, ClaimDraftBuilder,
    ClockFixtures, DraftFixtures,
};

fn engine() -> RuleEngine {
    ClockFixtures::rule_engine()
}

fn with(field: FieldId, value: &str) -> ClaimDraft {
    ClaimDraftBuilder::new().with_field(field, value).build()
}

fn validate(draft: &ClaimDraft) -> ValidationResult {
    engine().validate(draft)
}

fn message(draft: &ClaimDraft, field: FieldId) -> Option<String> {
    engine().validate_field(draft, field).map(|e| e.message)
}

// ============================================================================
// Baseline
// ============================================================================

mod baseline_tests {
    use super::*;

    #[test]
    fn test_valid_draft_has_no_errors() {
        let result = validate(&DraftFixtures::valid());
        assert!(result.is_empty(), "unexpected errors: {:?}", result);
    }

    #[test]
    fn test_empty_draft_error_messages() {
        let result = validate(&DraftFixtures::empty());

        assert_field_error(&result, FieldId::ClaimType, "Please select a claim type");
        assert_field_error(&result, FieldId::PolicyNumber, "Policy number is required");
        assert_field_error(&result, FieldId::IncidentDate, "Incident date is required");
        assert_field_error(&result, FieldId::IncidentTime, "Incident time is required");
        assert_field_error(&result, FieldId::Amount, "Claim amount is required");
        assert_field_error(
            &result,
            FieldId::Description,
            "Description must be at least 20 characters",
        );
        assert_field_error(
            &result,
            FieldId::IncidentLocation,
            "Incident location must be at least 5 characters",
        );
        assert_field_error(
            &result,
            FieldId::ContactPhone,
            "Phone number must be at least 10 digits",
        );
        assert_field_error(&result, FieldId::ContactEmail, "Email address is required");
        assert_eq!(result.len(), 9);
    }

    #[test]
    fn test_partially_filled_draft() {
        let draft = ClaimDraftBuilder::empty()
            .with_claim_type(ClaimType::Medical)
            .build();
        let result = validate(&draft);

        assert_field_valid(&result, FieldId::ClaimType);
        assert_field_valid(&result, FieldId::WitnessPhone);
        assert_field_error(&result, FieldId::Amount, "Claim amount is required");
        assert_eq!(result.len(), 8);
    }

    #[test]
    fn test_fields_are_independent() {
        let draft = ClaimDraftBuilder::new()
            .with_field(FieldId::Amount, "lots")
            .with_field(FieldId::IncidentDate, "yesterday")
            .build();

        let result = validate(&draft);
        assert_eq!(result.fields(), vec![FieldId::IncidentDate, FieldId::Amount]);
    }

    #[test]
    fn test_whitespace_satisfies_required_fields() {
        let draft = ClaimDraftBuilder::new()
            .with_field(FieldId::ClaimType, " ")
            .with_field(FieldId::IncidentTime, "  ")
            .build();
        let result = validate(&draft);

        assert_field_valid(&result, FieldId::ClaimType);
        assert_field_valid(&result, FieldId::IncidentTime);
    }
}

// ============================================================================
// Incident date
// ============================================================================

mod incident_date_tests {
    use super::*;

    #[test]
    fn test_today_passes() {
        let draft = ClaimDraftBuilder::new()
            .with_incident_date(ClockFixtures::today())
            .build();
        assert_eq!(message(&draft, FieldId::IncidentDate), None);
    }

    #[test]
    fn test_tomorrow_fails() {
        let draft = with(FieldId::IncidentDate, "2024-06-16");
        let error = engine().validate_field(&draft, FieldId::IncidentDate).unwrap();

        assert_eq!(error.message, "Incident date cannot be in the future");
        assert_eq!(error.kind, FieldErrorKind::OutOfRange);
    }

    #[test]
    fn test_unparsable_date() {
        let draft = with(FieldId::IncidentDate, "2024-13-01");
        let error = engine().validate_field(&draft, FieldId::IncidentDate).unwrap();

        assert_eq!(error.message, "Incident date must be a valid date");
        assert_eq!(error.kind, FieldErrorKind::FormatInvalid);
    }

    #[test]
    fn test_today_follows_configured_timezone() {
        // 02:00 UTC on the 16th is still the 15th in New York
        let now = Utc.with_ymd_and_hms(2024, 6, 16, 2, 0, 0).unwrap();
        let engine = RuleEngine::with_clock(
            Arc::new(FixedClock::new(now)),
            "America/New_York".parse().unwrap(),
        );

        let draft = with(FieldId::IncidentDate, "2024-06-16");
        assert!(engine.validate_field(&draft, FieldId::IncidentDate).is_some());

        let draft = with(FieldId::IncidentDate, "2024-06-15");
        assert!(engine.validate_field(&draft, FieldId::IncidentDate).is_none());
    }

    #[test]
    fn test_local_midnight_counts_as_today() {
        // Noon UTC on the 15th is midnight on the 16th in Auckland
        let engine =
            RuleEngine::with_clock(ClockFixtures::clock(), "Pacific/Auckland".parse().unwrap());

        let draft = with(FieldId::IncidentDate, "2024-06-16");
        assert!(engine.validate_field(&draft, FieldId::IncidentDate).is_none());
    }

    proptest! {
        #[test]
        fn prop_future_dates_always_fail(date in future_date_strategy()) {
            let draft = ClaimDraftBuilder::new().with_incident_date(date).build();
            let msg = message(&draft, FieldId::IncidentDate);
            prop_assert_eq!(
                msg.as_deref(),
                Some("Incident date cannot be in the future")
            );
        }

        #[test]
        fn prop_past_dates_pass(date in past_date_strategy()) {
            let draft = ClaimDraftBuilder::new().with_incident_date(date).build();
            prop_assert_eq!(message(&draft, FieldId::IncidentDate), None);
        }
    }
}

// ============================================================================
// Amount
// ============================================================================

mod amount_tests {
    use super::*;

    #[test]
    fn test_upper_bound_inclusive() {
        assert_eq!(message(&with(FieldId::Amount, "1000000"), FieldId::Amount), None);
        assert_eq!(
            message(&with(FieldId::Amount, "1000000.01"), FieldId::Amount).as_deref(),
            Some("Amount cannot exceed $1,000,000")
        );
    }

    #[test]
    fn test_non_positive_amounts_fail() {
        for amount in ["0", "-5", "0.00", "-1e40"] {
            assert_eq!(
                message(&with(FieldId::Amount, amount), FieldId::Amount).as_deref(),
                Some("Amount must be a positive number"),
                "{}",
                amount
            );
        }
    }

    #[test]
    fn test_non_numeric_amount_fails() {
        for amount in ["about 500", "   ", "1_000", "5_0", "0x10", "inf", "NaN"] {
            let error = engine()
                .validate_field(&with(FieldId::Amount, amount), FieldId::Amount)
                .unwrap();
            assert_eq!(error.kind, FieldErrorKind::FormatInvalid, "{:?}", amount);
            assert_eq!(error.message, "Amount must be a positive number");
        }
    }

    #[test]
    fn test_amount_beyond_decimal_range_exceeds_limit() {
        for amount in ["99999999999999999999999999999999", "1e40", "1E400"] {
            let error = engine()
                .validate_field(&with(FieldId::Amount, amount), FieldId::Amount)
                .unwrap();
            assert_eq!(error.kind, FieldErrorKind::OutOfRange, "{}", amount);
            assert_eq!(error.message, "Amount cannot exceed $1,000,000");
        }
    }

    #[test]
    fn test_scientific_notation_accepted() {
        assert_eq!(message(&with(FieldId::Amount, "2.5e3"), FieldId::Amount), None);
        assert_eq!(message(&with(FieldId::Amount, ".5"), FieldId::Amount), None);
    }

    #[test]
    fn test_smallest_positive_amount_passes() {
        assert_eq!(message(&with(FieldId::Amount, "0.01"), FieldId::Amount), None);
    }

    proptest! {
        #[test]
        fn prop_amounts_within_limit_pass(amount in valid_amount_strategy()) {
            let draft = ClaimDraftBuilder::new().with_amount(amount).build();
            prop_assert_eq!(message(&draft, FieldId::Amount), None);
        }

        #[test]
        fn prop_amounts_above_limit_fail(amount in excessive_amount_strategy()) {
            let draft = ClaimDraftBuilder::new().with_amount(amount).build();
            let msg = message(&draft, FieldId::Amount);
            prop_assert_eq!(
                msg.as_deref(),
                Some("Amount cannot exceed $1,000,000")
            );
        }

        #[test]
        fn prop_long_digit_runs_exceed_limit(digits in "[1-9][0-9]{7,40}") {
            let draft = with(FieldId::Amount, &digits);
            let msg = message(&draft, FieldId::Amount);
            prop_assert_eq!(
                msg.as_deref(),
                Some("Amount cannot exceed $1,000,000")
            );
        }
    }
}

// ============================================================================
// Description
// ============================================================================

mod description_tests {
    use super::*;

    #[test]
    fn test_length_boundaries() {
        let cases = [
            (19, Some("Description must be at least 20 characters")),
            (20, None),
            (1000, None),
            (1001, Some("Description cannot exceed 1000 characters")),
        ];

        for (len, expected) in cases {
            let draft = ClaimDraftBuilder::new().with_description_len(len).build();
            assert_eq!(
                message(&draft, FieldId::Description).as_deref(),
                expected,
                "length {}",
                len
            );
        }
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let draft = with(FieldId::Description, &"é".repeat(20));
        assert_eq!(message(&draft, FieldId::Description), None);
    }

    proptest! {
        #[test]
        fn prop_description_length_bounds(len in 0usize..1500) {
            let draft = ClaimDraftBuilder::new().with_description_len(len).build();
            let expected = match len {
                0..=19 => Some("Description must be at least 20 characters"),
                20..=1000 => None,
                _ => Some("Description cannot exceed 1000 characters"),
            };
            let msg = message(&draft, FieldId::Description);
            prop_assert_eq!(msg.as_deref(), expected);
        }
    }
}

// ============================================================================
// Policy number
// ============================================================================

mod policy_number_tests {
    use super::*;

    #[test]
    fn test_lowercase_fails_format() {
        let draft = ClaimDraftBuilder::new()
            .with_raw(FieldId::PolicyNumber, "abc-123")
            .build();

        let error = engine().validate_field(&draft, FieldId::PolicyNumber).unwrap();
        assert_eq!(error.kind, FieldErrorKind::FormatInvalid);
        assert_eq!(
            error.message,
            "Policy number can only contain uppercase letters, numbers, and hyphens"
        );
    }

    #[test]
    fn test_set_normalizes_lowercase() {
        let draft = with(FieldId::PolicyNumber, "abc-123");
        assert_eq!(message(&draft, FieldId::PolicyNumber), None);
    }

    #[test]
    fn test_length_bounds() {
        assert_eq!(message(&with(FieldId::PolicyNumber, "AB-123"), FieldId::PolicyNumber), None);
        assert_eq!(
            message(&with(FieldId::PolicyNumber, "AB12"), FieldId::PolicyNumber).as_deref(),
            Some("Policy number must be at least 5 characters")
        );
        assert_eq!(
            message(&with(FieldId::PolicyNumber, &"A".repeat(21)), FieldId::PolicyNumber)
                .as_deref(),
            Some("Policy number cannot exceed 20 characters")
        );
    }
}

// ============================================================================
// Contact details
// ============================================================================

mod contact_tests {
    use super::*;

    #[test]
    fn test_phone_format() {
        assert_eq!(
            message(&with(FieldId::ContactPhone, "555-123-456"), FieldId::ContactPhone),
            None
        );
        assert_eq!(
            message(&with(FieldId::ContactPhone, "555-CALL-NOW"), FieldId::ContactPhone)
                .as_deref(),
            Some("Invalid phone number format")
        );
    }

    #[test]
    fn test_phone_allows_only_plain_spaces() {
        for phone in ["555\t123\t4567", "555\n123-4567", "555\u{00A0}123\u{00A0}4567"] {
            assert_eq!(
                message(&with(FieldId::ContactPhone, phone), FieldId::ContactPhone).as_deref(),
                Some("Invalid phone number format"),
                "{:?}",
                phone
            );
        }
        assert_eq!(
            message(&with(FieldId::ContactPhone, "555 123 4567"), FieldId::ContactPhone),
            None
        );
    }

    #[test]
    fn test_email_format() {
        assert_eq!(
            message(&with(FieldId::ContactEmail, "jane.doe@"), FieldId::ContactEmail).as_deref(),
            Some("Invalid email address")
        );
    }

    #[test]
    fn test_generated_contact_passes() {
        let draft = ClaimDraftBuilder::new().with_generated_contact().build();
        let result = validate(&draft);

        assert_field_valid(&result, FieldId::ContactEmail);
        assert_field_valid(&result, FieldId::WitnessName);
    }

    #[test]
    fn test_witness_phone_is_optional() {
        assert_eq!(message(&with(FieldId::WitnessPhone, ""), FieldId::WitnessPhone), None);
        assert_eq!(
            message(&with(FieldId::WitnessPhone, "call me"), FieldId::WitnessPhone).as_deref(),
            Some("Invalid phone number format")
        );
    }
}

// ============================================================================
// Idempotence
// ============================================================================

mod idempotence_tests {
    use super::*;

    fn arbitrary_draft() -> impl Strategy<Value = ClaimDraft> {
        (
            "[a-z-]{0,20}",
            "[A-Za-z0-9 -]{0,25}",
            "[0-9-]{0,12}",
            "-?[0-9.]{0,10}",
            ".{0,40}",
            "[0-9 ()+a-z-]{0,16}",
            "[a-z.@]{0,20}",
        )
            .prop_map(|(claim_type, policy, date, amount, description, phone, email)| {
                ClaimDraft {
                    claim_type,
                    policy_number: policy,
                    incident_date: date,
                    amount,
                    description,
                    contact_phone: phone,
                    contact_email: email,
                    ..ClaimDraft::default()
                }
            })
    }

    proptest! {
        #[test]
        fn prop_validation_is_repeatable(draft in arbitrary_draft()) {
            let engine = engine();
            let first = serde_json::to_string(&engine.validate(&draft)).unwrap();
            let second = serde_json::to_string(&engine.validate(&draft)).unwrap();
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn test_report_serialization_is_stable() {
        let validator = AttachmentValidator::default();
        let batch = AttachmentBatch::from(vec![AttachmentFixtures::archive()]);
        let draft = with(FieldId::Amount, "-1");

        let first = ValidationAggregator::merge(
            validate(&draft),
            validator.validate_for_submission(&batch),
        );
        let second = ValidationAggregator::merge(
            validate(&draft),
            validator.validate_for_submission(&batch),
        );

        assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
        assert!(first.is_blocked());
    }
}
