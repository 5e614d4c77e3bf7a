//! Candidate claim record
//!
//! A `ClaimDraft` holds every form value as raw text. Nothing is parsed
//! until a rule reads it, so a draft can always be constructed and
//! always be validated.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Catalog of claim types offered by the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClaimType {
    Vehicle,
    Medical,
    Property,
    Theft,
    Fire,
    NaturalDisaster,
    Other,
}

impl ClaimType {
    pub const ALL: [ClaimType; 7] = [
        ClaimType::Vehicle,
        ClaimType::Medical,
        ClaimType::Property,
        ClaimType::Theft,
        ClaimType::Fire,
        ClaimType::NaturalDisaster,
        ClaimType::Other,
    ];

    /// Returns the code submitted by the form
    pub fn code(&self) -> &'static str {
        match self {
            ClaimType::Vehicle => "vehicle",
            ClaimType::Medical => "medical",
            ClaimType::Property => "property",
            ClaimType::Theft => "theft",
            ClaimType::Fire => "fire",
            ClaimType::NaturalDisaster => "natural-disaster",
            ClaimType::Other => "other",
        }
    }

    /// Returns the display label
    pub fn label(&self) -> &'static str {
        match self {
            ClaimType::Vehicle => "Vehicle Accident",
            ClaimType::Medical => "Medical Bills",
            ClaimType::Property => "Property Damage",
            ClaimType::Theft => "Theft",
            ClaimType::Fire => "Fire Damage",
            ClaimType::NaturalDisaster => "Natural Disaster",
            ClaimType::Other => "Other",
        }
    }
}

impl fmt::Display for ClaimType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ClaimType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClaimType::ALL
            .into_iter()
            .find(|t| t.code() == s)
            .ok_or_else(|| format!("Unknown claim type: {}", s))
    }
}

/// Identifier of a form field
///
/// The serialized names match the keys the form layer uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldId {
    ClaimType,
    PolicyNumber,
    IncidentDate,
    IncidentTime,
    Amount,
    Description,
    IncidentLocation,
    PoliceReportNumber,
    ContactPhone,
    ContactEmail,
    WitnessName,
    WitnessPhone,
}

impl FieldId {
    pub const ALL: [FieldId; 12] = [
        FieldId::ClaimType,
        FieldId::PolicyNumber,
        FieldId::IncidentDate,
        FieldId::IncidentTime,
        FieldId::Amount,
        FieldId::Description,
        FieldId::IncidentLocation,
        FieldId::PoliceReportNumber,
        FieldId::ContactPhone,
        FieldId::ContactEmail,
        FieldId::WitnessName,
        FieldId::WitnessPhone,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldId::ClaimType => "claimType",
            FieldId::PolicyNumber => "policyNumber",
            FieldId::IncidentDate => "incidentDate",
            FieldId::IncidentTime => "incidentTime",
            FieldId::Amount => "amount",
            FieldId::Description => "description",
            FieldId::IncidentLocation => "incidentLocation",
            FieldId::PoliceReportNumber => "policeReportNumber",
            FieldId::ContactPhone => "contactPhone",
            FieldId::ContactEmail => "contactEmail",
            FieldId::WitnessName => "witnessName",
            FieldId::WitnessPhone => "witnessPhone",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The in-progress claim as entered by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClaimDraft {
    pub claim_type: String,
    /// Expected in uppercase; `set` normalizes it
    pub policy_number: String,
    /// Calendar date, `YYYY-MM-DD`
    pub incident_date: String,
    pub incident_time: String,
    /// Decimal amount as typed
    pub amount: String,
    pub description: String,
    pub incident_location: String,
    pub police_report_number: String,
    pub contact_phone: String,
    pub contact_email: String,
    pub witness_name: String,
    pub witness_phone: String,
}

impl ClaimDraft {
    /// Creates an empty draft
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw value of a field
    pub fn value(&self, field: FieldId) -> &str {
        match field {
            FieldId::ClaimType => &self.claim_type,
            FieldId::PolicyNumber => &self.policy_number,
            FieldId::IncidentDate => &self.incident_date,
            FieldId::IncidentTime => &self.incident_time,
            FieldId::Amount => &self.amount,
            FieldId::Description => &self.description,
            FieldId::IncidentLocation => &self.incident_location,
            FieldId::PoliceReportNumber => &self.police_report_number,
            FieldId::ContactPhone => &self.contact_phone,
            FieldId::ContactEmail => &self.contact_email,
            FieldId::WitnessName => &self.witness_name,
            FieldId::WitnessPhone => &self.witness_phone,
        }
    }

    /// Sets a field the way the form's input handler does
    ///
    /// Policy numbers are uppercased; every other value is stored as given.
    pub fn set(&mut self, field: FieldId, value: impl Into<String>) {
        let value = match field {
            FieldId::PolicyNumber => value.into().to_uppercase(),
            _ => value.into(),
        };
        *self.value_mut(field) = value;
    }

    fn value_mut(&mut self, field: FieldId) -> &mut String {
        match field {
            FieldId::ClaimType => &mut self.claim_type,
            FieldId::PolicyNumber => &mut self.policy_number,
            FieldId::IncidentDate => &mut self.incident_date,
            FieldId::IncidentTime => &mut self.incident_time,
            FieldId::Amount => &mut self.amount,
            FieldId::Description => &mut self.description,
            FieldId::IncidentLocation => &mut self.incident_location,
            FieldId::PoliceReportNumber => &mut self.police_report_number,
            FieldId::ContactPhone => &mut self.contact_phone,
            FieldId::ContactEmail => &mut self.contact_email,
            FieldId::WitnessName => &mut self.witness_name,
            FieldId::WitnessPhone => &mut self.witness_phone,
        }
    }

    /// Resolves the claim type against the catalog
    pub fn catalog_type(&self) -> Option<ClaimType> {
        self.claim_type.parse().ok()
    }
}
