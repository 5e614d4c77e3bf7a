//! Declarative field rules for the claim form
//!
//! Each field owns an ordered list of checks. The engine stops at the first
//! failing check for a field, so the order below is also the order in which
//! problems are reported to the user.
//!
//! | Field              | Checks                                              |
//! |--------------------|-----------------------------------------------------|
//! | claimType          | required                                            |
//! | policyNumber       | required, 5..=20 chars, `[A-Z0-9-]`                 |
//! | incidentDate       | required, `YYYY-MM-DD`, not after today             |
//! | incidentTime       | required                                            |
//! | amount             | required, number, > 0, <= 1,000,000                 |
//! | description        | 20..=1000 chars                                     |
//! | incidentLocation   | >= 5 chars                                          |
//! | contactPhone       | >= 10 chars, digits/space/`-+()`                    |
//! | contactEmail       | required, email syntax                              |
//! | witnessPhone       | optional, digits/space/`-+()`                       |
//! | policeReportNumber | none                                                |
//! | witnessName        | none                                                |

use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::LazyLock;

use crate::draft::FieldId;
use crate::validation::FieldErrorKind;

/// Largest claim amount accepted by the portal
pub const MAX_CLAIM_AMOUNT: Decimal = dec!(1000000);

/// Longest description accepted, in characters
pub const MAX_DESCRIPTION_CHARS: usize = 1000;

static POLICY_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9-]+$").expect("policy number pattern"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9 \-+()]+$").expect("phone pattern"));

/// Named character-class patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPattern {
    /// Uppercase letters, digits, and hyphens
    PolicyNumber,
    /// Digits, spaces, hyphens, plus signs, and parentheses
    Phone,
}

impl FieldPattern {
    pub fn is_match(&self, value: &str) -> bool {
        match self {
            FieldPattern::PolicyNumber => POLICY_NUMBER_RE.is_match(value),
            FieldPattern::Phone => PHONE_RE.is_match(value),
        }
    }
}

/// A single check applied to a raw field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Non-empty
    Required,
    /// At least this many characters
    MinLength(usize),
    /// At most this many characters
    MaxLength(usize),
    Pattern(FieldPattern),
    Email,
    /// Parses as a `YYYY-MM-DD` calendar date
    Date,
    /// Parses as a date that is not after the local "today"
    NotInFuture,
    /// Parses as a decimal number
    Number,
    /// Parses as a number strictly greater than zero
    Positive,
    /// Parses as a number no greater than the bound
    AtMost(Decimal),
}

impl Rule {
    /// Error category reported when this rule fails
    pub fn kind(&self) -> FieldErrorKind {
        match self {
            Rule::Required => FieldErrorKind::Required,
            Rule::Pattern(_) | Rule::Email | Rule::Date | Rule::Number => {
                FieldErrorKind::FormatInvalid
            }
            Rule::MinLength(_)
            | Rule::MaxLength(_)
            | Rule::NotInFuture
            | Rule::Positive
            | Rule::AtMost(_) => FieldErrorKind::OutOfRange,
        }
    }
}

/// A rule paired with the message shown when it fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleCheck {
    pub rule: Rule,
    pub message: String,
}

/// Ordered checks for one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    pub field: FieldId,
    /// An empty value skips every check
    pub optional: bool,
    pub checks: Vec<RuleCheck>,
}

impl FieldSchema {
    pub fn new(field: FieldId) -> Self {
        Self {
            field,
            optional: false,
            checks: Vec::new(),
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Appends a check; checks run in insertion order
    pub fn check(mut self, rule: Rule, message: impl Into<String>) -> Self {
        self.checks.push(RuleCheck {
            rule,
            message: message.into(),
        });
        self
    }
}

/// The rule set of the "file a claim" form
pub fn claim_form_schema() -> Vec<FieldSchema> {
    vec![
        FieldSchema::new(FieldId::ClaimType)
            .check(Rule::Required, "Please select a claim type"),
        FieldSchema::new(FieldId::PolicyNumber)
            .check(Rule::Required, "Policy number is required")
            .check(Rule::MinLength(5), "Policy number must be at least 5 characters")
            .check(Rule::MaxLength(20), "Policy number cannot exceed 20 characters")
            .check(
                Rule::Pattern(FieldPattern::PolicyNumber),
                "Policy number can only contain uppercase letters, numbers, and hyphens",
            ),
        FieldSchema::new(FieldId::IncidentDate)
            .check(Rule::Required, "Incident date is required")
            .check(Rule::Date, "Incident date must be a valid date")
            .check(Rule::NotInFuture, "Incident date cannot be in the future"),
        FieldSchema::new(FieldId::IncidentTime)
            .check(Rule::Required, "Incident time is required"),
        FieldSchema::new(FieldId::Amount)
            .check(Rule::Required, "Claim amount is required")
            .check(Rule::Number, "Amount must be a positive number")
            .check(Rule::Positive, "Amount must be a positive number")
            .check(Rule::AtMost(MAX_CLAIM_AMOUNT), "Amount cannot exceed $1,000,000"),
        FieldSchema::new(FieldId::Description)
            .check(Rule::MinLength(20), "Description must be at least 20 characters")
            .check(
                Rule::MaxLength(MAX_DESCRIPTION_CHARS),
                "Description cannot exceed 1000 characters",
            ),
        FieldSchema::new(FieldId::IncidentLocation)
            .check(Rule::MinLength(5), "Incident location must be at least 5 characters"),
        FieldSchema::new(FieldId::PoliceReportNumber),
        FieldSchema::new(FieldId::ContactPhone)
            .check(Rule::MinLength(10), "Phone number must be at least 10 digits")
            .check(Rule::Pattern(FieldPattern::Phone), "Invalid phone number format"),
        FieldSchema::new(FieldId::ContactEmail)
            .check(Rule::Required, "Email address is required")
            .check(Rule::Email, "Invalid email address"),
        FieldSchema::new(FieldId::WitnessName),
        FieldSchema::new(FieldId::WitnessPhone)
            .optional()
            .check(Rule::Pattern(FieldPattern::Phone), "Invalid phone number format"),
    ]
}
