//! Document tree model
//!
//! Trees are plain owned values. A parser under test builds one of these (or converts its own
//! tree into one) and hands an immutable reference to the tree dumper. The set of node kinds is
//! closed, so every consumer matches on [`Node`] exhaustively.

pub mod node;

pub use node::data::doctype::DocTypeData;
pub use node::data::element::{Attribute, ElementData};
pub use node::{Namespace, Node, NodeType};
