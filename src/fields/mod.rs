//! The field table an engine fills while probing, and the fields derived from it.
pub mod catalog;
pub mod derived;
pub mod humanize;
mod structs;

pub use structs::{Field, FieldTable, Stream, StreamKind};
