//! Core Kernel - Foundational types for the claims portal
//!
//! This crate provides the building blocks shared by the claims domain and
//! the HTTP facade:
//! - Strongly-typed identifiers
//! - Clocks and timezone handling for "today" calculations
//! - Port infrastructure for external collaborators

pub mod temporal;
pub mod identifiers;
pub mod ports;
pub mod error;

pub use temporal::{Clock, FixedClock, SystemClock, Timezone, TemporalError};
pub use identifiers::{ClaimId, SubmissionId};
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
    OperationMetadata,
};
pub use error::CoreError;
