//! Configuration value objects for the domain layer
//!
//! Validation issues are reported with these types by the configuration
//! loader and shown by the binary before anything starts.

mod validation;

pub use validation::{ConfigIssue, ConfigIssueCode, Severity};
