//! Validation verdicts
//!
//! Verdicts are data, never failures. The rule engine produces a
//! [`ValidationResult`] with at most one [`FieldError`] per field, the
//! attachment validator produces a list of
//! [`AttachmentError`](crate::attachment::AttachmentError)s, and the
//! [`ValidationAggregator`] merges both into a [`ValidationReport`] that
//! decides whether submission is blocked.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

use crate::attachment::AttachmentError;
use crate::draft::FieldId;

/// Reserved report key for attachment errors
///
/// Distinct from every [`FieldId`] name.
pub const ATTACHMENTS_KEY: &str = "attachments";

/// Category of a field rule failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorKind {
    /// A required value is empty
    Required,
    /// The value does not parse or does not match the expected pattern
    FormatInvalid,
    /// The value parses but falls outside a length, numeric, or date bound
    OutOfRange,
}

/// A failed check on one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: FieldId,
    pub kind: FieldErrorKind,
    pub message: String,
}

impl FieldError {
    pub fn new(field: FieldId, kind: FieldErrorKind, message: impl Into<String>) -> Self {
        Self {
            field,
            kind,
            message: message.into(),
        }
    }
}

/// Field-indexed error set produced by the rule engine
///
/// A key is present only while its field is invalid. Ordered by field so
/// two passes over the same draft serialize identically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationResult {
    errors: BTreeMap<FieldId, FieldError>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error, replacing any previous error for the same field
    pub fn insert(&mut self, error: FieldError) {
        self.errors.insert(error.field, error);
    }

    /// Removes the error for a field, returning it if there was one
    pub fn clear(&mut self, field: FieldId) -> Option<FieldError> {
        self.errors.remove(&field)
    }

    pub fn get(&self, field: FieldId) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    /// Returns the message for a field, if it currently has an error
    pub fn message(&self, field: FieldId) -> Option<&str> {
        self.errors.get(&field).map(|e| e.message.as_str())
    }

    pub fn contains(&self, field: FieldId) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterates errors in field order
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.values()
    }

    /// Returns the fields that currently have errors
    pub fn fields(&self) -> Vec<FieldId> {
        self.errors.keys().copied().collect()
    }
}

/// Combined field and attachment verdict for one submission attempt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    fields: ValidationResult,
    attachments: Vec<AttachmentError>,
}

impl ValidationReport {
    pub fn field_errors(&self) -> &ValidationResult {
        &self.fields
    }

    /// Attachment errors in file order, batch-level errors last
    pub fn attachment_errors(&self) -> &[AttachmentError] {
        &self.attachments
    }

    /// True when anything in the report prevents submission
    pub fn is_blocked(&self) -> bool {
        !self.fields.is_empty() || !self.attachments.is_empty()
    }

    /// Number of report keys that carry errors
    pub fn error_count(&self) -> usize {
        self.fields.len() + usize::from(!self.attachments.is_empty())
    }

    /// Flattens the report into display messages keyed by field name
    ///
    /// Fields map to a single message; the [`ATTACHMENTS_KEY`] entry keeps
    /// every attachment message so simultaneous file problems stay visible.
    pub fn messages(&self) -> BTreeMap<String, Vec<String>> {
        let mut messages: BTreeMap<String, Vec<String>> = self
            .fields
            .iter()
            .map(|e| (e.field.as_str().to_string(), vec![e.message.clone()]))
            .collect();

        if !self.attachments.is_empty() {
            messages.insert(
                ATTACHMENTS_KEY.to_string(),
                self.attachments.iter().map(ToString::to_string).collect(),
            );
        }

        messages
    }
}

impl Serialize for ValidationReport {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("ValidationReport", 2)?;
        state.serialize_field("blocked", &self.is_blocked())?;
        state.serialize_field("errors", &self.messages())?;
        state.end()
    }
}

/// Merges field and attachment verdicts
pub struct ValidationAggregator;

impl ValidationAggregator {
    /// Unions both verdicts into one report
    ///
    /// Attachment errors keep their incoming order.
    pub fn merge(fields: ValidationResult, attachments: Vec<AttachmentError>) -> ValidationReport {
        ValidationReport { fields, attachments }
    }
}
