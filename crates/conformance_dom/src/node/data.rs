pub mod doctype;
pub mod element;
