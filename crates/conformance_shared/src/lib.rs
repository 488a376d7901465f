//! Shared functionality
//!
//! Errors and small value types used by every crate in the conformance workspace.

pub mod errors;
pub mod types;
