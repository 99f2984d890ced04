//! # IBM Cloud Utils
//!
//! Helpers shared by the API client and the CLI: identifier classification,
//! log-safe formatting and small parsers.

pub mod errors;
pub mod formatters;
pub mod identifiers;
pub mod parsers;

// Re-export common types for convenience
pub use errors::*;
pub use formatters::*;
pub use identifiers::*;
pub use parsers::*;
