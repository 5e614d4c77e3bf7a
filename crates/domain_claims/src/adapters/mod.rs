//! Adapters implementing the claim submission port

pub mod in_memory;

pub use in_memory::{InMemorySubmissionPort, SubmittedClaim};
