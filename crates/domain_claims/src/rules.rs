//! Rule engine
//!
//! Evaluates a field schema against a [`ClaimDraft`]. Every declared field
//! is evaluated on every pass; within one field evaluation stops at the
//! first failing check. Rules read raw values only, so no field depends on
//! another having passed, and an unparsable value is just a failing check.

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::{Arc, LazyLock};
use tracing::debug;
use validator::ValidateEmail;

use core_kernel::{Clock, SystemClock, Timezone};

use crate::draft::{ClaimDraft, FieldId};
use crate::schema::{claim_form_schema, FieldSchema, Rule};
use crate::validation::{FieldError, ValidationResult};

static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$").expect("number pattern")
});

/// A numeric amount read from the form
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParsedAmount {
    /// Held exactly
    Exact(Decimal),
    /// Numeric, but outside what a [`Decimal`] can hold
    Approximate(f64),
}

impl ParsedAmount {
    pub fn is_positive(&self) -> bool {
        match self {
            ParsedAmount::Exact(amount) => *amount > Decimal::ZERO,
            ParsedAmount::Approximate(amount) => *amount > 0.0,
        }
    }

    pub fn is_at_most(&self, max: Decimal) -> bool {
        match self {
            ParsedAmount::Exact(amount) => *amount <= max,
            ParsedAmount::Approximate(amount) => max.to_f64().is_some_and(|max| *amount <= max),
        }
    }
}

/// Parses an amount the way the form accepts it
///
/// Plain decimals and scientific notation are accepted; surrounding
/// whitespace is ignored. Digit separators, hex, and named values such as
/// `inf` are not numbers here.
pub fn parse_amount(value: &str) -> Option<ParsedAmount> {
    let value = value.trim();
    if !NUMBER_RE.is_match(value) {
        return None;
    }
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map(ParsedAmount::Exact)
        .or_else(|_| value.parse::<f64>().map(ParsedAmount::Approximate))
        .ok()
}

/// Parses a `YYYY-MM-DD` calendar date
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Evaluates field schemas against claim drafts
#[derive(Clone)]
pub struct RuleEngine {
    schema: Vec<FieldSchema>,
    clock: Arc<dyn Clock>,
    timezone: Timezone,
}

impl RuleEngine {
    pub fn new(schema: Vec<FieldSchema>, clock: Arc<dyn Clock>, timezone: Timezone) -> Self {
        Self {
            schema,
            clock,
            timezone,
        }
    }

    /// The claim form rules, evaluated against the system clock in UTC
    pub fn standard() -> Self {
        Self::with_clock(Arc::new(SystemClock), Timezone::default())
    }

    /// The claim form rules with an explicit notion of "today"
    pub fn with_clock(clock: Arc<dyn Clock>, timezone: Timezone) -> Self {
        Self::new(claim_form_schema(), clock, timezone)
    }

    pub fn schema(&self) -> &[FieldSchema] {
        &self.schema
    }

    /// Local calendar date used by date rules
    pub fn today(&self) -> NaiveDate {
        self.timezone.today(self.clock.as_ref())
    }

    /// Validates every declared field
    pub fn validate(&self, draft: &ClaimDraft) -> ValidationResult {
        let today = self.today();
        let mut result = ValidationResult::new();

        for schema in &self.schema {
            if let Some(error) = evaluate(schema, draft.value(schema.field), today) {
                result.insert(error);
            }
        }

        debug!(
            error_count = result.len(),
            fields = ?result.fields(),
            "Claim draft validated"
        );
        result
    }

    /// Validates a single field
    ///
    /// Returns `None` when the field is valid or has no declared rules.
    pub fn validate_field(&self, draft: &ClaimDraft, field: FieldId) -> Option<FieldError> {
        let today = self.today();
        self.schema
            .iter()
            .filter(|s| s.field == field)
            .find_map(|s| evaluate(s, draft.value(field), today))
    }
}

fn evaluate(schema: &FieldSchema, value: &str, today: NaiveDate) -> Option<FieldError> {
    if schema.optional && value.is_empty() {
        return None;
    }

    schema
        .checks
        .iter()
        .find(|check| !passes(&check.rule, value, today))
        .map(|check| FieldError::new(schema.field, check.rule.kind(), check.message.clone()))
}

fn passes(rule: &Rule, value: &str, today: NaiveDate) -> bool {
    match rule {
        Rule::Required => !value.is_empty(),
        Rule::MinLength(min) => value.chars().count() >= *min,
        Rule::MaxLength(max) => value.chars().count() <= *max,
        Rule::Pattern(pattern) => pattern.is_match(value),
        Rule::Email => value.validate_email(),
        Rule::Date => parse_date(value).is_some(),
        Rule::NotInFuture => parse_date(value).is_some_and(|date| date <= today),
        Rule::Number => parse_amount(value).is_some(),
        Rule::Positive => parse_amount(value).is_some_and(|amount| amount.is_positive()),
        Rule::AtMost(max) => parse_amount(value).is_some_and(|amount| amount.is_at_most(*max)),
    }
}
