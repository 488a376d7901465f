//! Conformance fixture engine
//!
//! Parses html5lib tree construction and tokenizer fixtures, renders document trees into the
//! canonical tree dump format and collects tokenizer output into canonical token lists.

// Node model
pub use conformance_dom as dom;

// Errors and shared types
pub use conformance_shared as shared;

// Fixtures, dumps and tokens
pub use conformance_testing as testing;
