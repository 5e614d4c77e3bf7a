//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for validation verdicts that give
//! more meaningful error messages than standard assertions.

use domain_claims::{FieldId, ValidationReport, ValidationResult};

/// Asserts that a field carries exactly the expected message
///
/// # Panics
///
/// Panics if the field is valid or carries a different message
pub fn assert_field_error(result: &ValidationResult, field: FieldId, expected: &str) {
    match result.message(field) {
        Some(actual) => assert_eq!(
            actual, expected,
            "Unexpected message for {}: actual={:?}, expected={:?}",
            field, actual, expected
        ),
        None => panic!(
            "Expected {} to be invalid with {:?}, but it passed (errors on: {:?})",
            field,
            expected,
            result.fields()
        ),
    }
}

/// Asserts that a field has no error
pub fn assert_field_valid(result: &ValidationResult, field: FieldId) {
    if let Some(error) = result.get(field) {
        panic!("Expected {} to be valid, got {:?}", field, error.message);
    }
}

/// Asserts that a report does not block submission
pub fn assert_not_blocked(report: &ValidationReport) {
    assert!(
        !report.is_blocked(),
        "Expected a clean report, got {:?}",
        report.messages()
    );
}

/// Asserts that a report blocks submission and lists `key` among its errors
pub fn assert_blocked_on(report: &ValidationReport, key: &str) {
    let messages = report.messages();
    assert!(report.is_blocked(), "Expected a blocking report");
    assert!(
        messages.contains_key(key),
        "Expected an error on {:?}, got errors on {:?}",
        key,
        messages.keys().collect::<Vec<_>>()
    );
}
