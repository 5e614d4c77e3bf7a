//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! claims portal test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pinned time, a valid draft, and common attachments
//! - `builders`: Builder patterns for test data construction
//! - `assertions`: Custom assertion helpers for validation verdicts
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
