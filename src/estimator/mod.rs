//! Effort estimation domain: canonical fields, collected inputs, the
//! prediction service client, and display formatting.

pub mod api;
pub mod fields;
pub mod format;
pub mod inputs;
