//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use chrono::NaiveDate;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use rust_decimal::Decimal;

use domain_claims::{AttachmentDescriptor, ClaimDraft, ClaimType, FieldId};

use crate::fixtures::{AttachmentFixtures, DraftFixtures};

/// Builder for claim drafts, starting from a valid draft
pub struct ClaimDraftBuilder {
    draft: ClaimDraft,
}

impl Default for ClaimDraftBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimDraftBuilder {
    /// Creates a builder holding a valid draft
    pub fn new() -> Self {
        Self {
            draft: DraftFixtures::valid(),
        }
    }

    /// Creates a builder holding an empty draft
    pub fn empty() -> Self {
        Self {
            draft: DraftFixtures::empty(),
        }
    }

    /// Sets any field through the form's input handling
    pub fn with_field(mut self, field: FieldId, value: impl Into<String>) -> Self {
        self.draft.set(field, value);
        self
    }

    /// Sets a field verbatim, skipping normalization
    pub fn with_raw(mut self, field: FieldId, value: impl Into<String>) -> Self {
        let value = value.into();
        match field {
            FieldId::PolicyNumber => self.draft.policy_number = value,
            other => self.draft.set(other, value),
        }
        self
    }

    pub fn with_claim_type(self, claim_type: ClaimType) -> Self {
        self.with_field(FieldId::ClaimType, claim_type.code())
    }

    pub fn with_amount(self, amount: Decimal) -> Self {
        self.with_field(FieldId::Amount, amount.to_string())
    }

    pub fn with_incident_date(self, date: NaiveDate) -> Self {
        self.with_field(FieldId::IncidentDate, date.format("%Y-%m-%d").to_string())
    }

    /// Sets a description of exactly `chars` characters
    pub fn with_description_len(self, chars: usize) -> Self {
        self.with_field(FieldId::Description, "d".repeat(chars))
    }

    /// Replaces contact details with generated ones
    pub fn with_generated_contact(mut self) -> Self {
        self.draft.contact_email = SafeEmail().fake();
        self.draft.witness_name = Name().fake();
        self
    }

    pub fn build(self) -> ClaimDraft {
        self.draft
    }
}

/// Builder for attachment descriptors
pub struct AttachmentBuilder {
    name: String,
    size_bytes: u64,
    mime_type: String,
}

impl Default for AttachmentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AttachmentBuilder {
    /// Creates a builder holding a valid photo
    pub fn new() -> Self {
        let photo = AttachmentFixtures::photo();
        Self {
            name: photo.name,
            size_bytes: photo.size_bytes,
            mime_type: photo.declared_mime_type,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_size_bytes(mut self, size_bytes: u64) -> Self {
        self.size_bytes = size_bytes;
        self
    }

    pub fn with_size_mib(self, mib: u64) -> Self {
        self.with_size_bytes(mib * 1024 * 1024)
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    pub fn build(self) -> AttachmentDescriptor {
        AttachmentDescriptor::new(self.name, self.size_bytes, self.mime_type)
    }
}
