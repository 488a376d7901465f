//! Conformance testing utilities
//!
//! Reads html5lib style fixtures, renders document trees into the canonical tree dump format
//! and collects tokenizer output into the canonical token list. Running a parser under test is
//! left to the caller.

pub mod escape;
pub mod tokenizer;
pub mod tree_construction;
